use crate::builders::{build_frequency, build_question_bank};
use crate::clients::LlmClient;
use crate::config::{Config, ExamRules};
use crate::models::{ClassLevel, SUBJECT_CATALOG};
use crate::scoring::{PaperAssembler, ProbabilityScorer, QuestionQuery};
use crate::services::{ExplanationService, PaperService, QuestionService, TopicService};
use crate::storage::{DatasetStore, FileExplanationCache, FilePaperCache};
use crate::utils::logging::{log_startup, log_warm_start, print_final_stats};
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info};

pub const USAGE: &str = "用法:
  exam_forecast topics <subject> <PASS|AVG>
  exam_forecast paper <subject>
  exam_forecast explain <subject> <marks> <question...>
  exam_forecast questions <subject> [--chapter <name>] [--marks <n>] [--limit <n>]
  exam_forecast build <subject> <class10|class12> <stream>
  exam_forecast warm";

/// 命令行命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Topics { subject: String, mode: String },
    Paper { subject: String },
    Explain { subject: String, marks: u32, question_text: String },
    Questions { subject: String, query: QuestionQuery },
    Build { subject: String, class_level: ClassLevel, stream: String },
    Warm,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Topics { .. } => "topics",
            Command::Paper { .. } => "paper",
            Command::Explain { .. } => "explain",
            Command::Questions { .. } => "questions",
            Command::Build { .. } => "build",
            Command::Warm => "warm",
        }
    }

    /// 解析命令行参数（不含程序名）
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let Some((command, rest)) = args.split_first() else {
            bail!("缺少命令\n{}", USAGE);
        };

        match (command.as_str(), rest) {
            ("topics", [subject, mode]) => Ok(Command::Topics {
                subject: subject.clone(),
                mode: mode.clone(),
            }),
            ("paper", [subject]) => Ok(Command::Paper {
                subject: subject.clone(),
            }),
            ("explain", [subject, marks, question @ ..]) if !question.is_empty() => {
                Ok(Command::Explain {
                    subject: subject.clone(),
                    marks: marks
                        .parse()
                        .with_context(|| format!("分值必须是正整数: {}", marks))?,
                    question_text: question.join(" "),
                })
            }
            ("questions", [subject, options @ ..]) => Ok(Command::Questions {
                subject: subject.clone(),
                query: parse_question_options(options)?,
            }),
            ("build", [subject, class_level, stream]) => Ok(Command::Build {
                subject: subject.clone(),
                class_level: ClassLevel::parse(class_level)?,
                stream: stream.clone(),
            }),
            ("warm", []) => Ok(Command::Warm),
            _ => bail!("无法识别的命令: {}\n{}", args.join(" "), USAGE),
        }
    }
}

fn parse_question_options(options: &[String]) -> Result<QuestionQuery> {
    let mut query = QuestionQuery::default();
    let mut iter = options.iter();

    while let Some(flag) = iter.next() {
        let value = iter
            .next()
            .with_context(|| format!("参数 {} 缺少取值", flag))?;
        match flag.as_str() {
            "--chapter" => query.chapter = Some(value.clone()),
            "--marks" => {
                // `all` 等同于不筛选
                if !value.eq_ignore_ascii_case("all") {
                    query.marks = Some(
                        value
                            .parse()
                            .with_context(|| format!("--marks 必须是整数: {}", value))?,
                    );
                }
            }
            "--limit" => {
                query.limit = value
                    .parse()
                    .with_context(|| format!("--limit 必须是整数: {}", value))?
            }
            other => bail!("未知参数: {}\n{}", other, USAGE),
        }
    }

    Ok(query)
}

/// 预生成统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WarmStats {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
}

/// 应用主结构
pub struct App {
    config: Config,
    store: DatasetStore,
    topic_service: TopicService,
    paper_service: Arc<PaperService<FilePaperCache>>,
    explanation_service: ExplanationService<LlmClient, FileExplanationCache>,
    question_service: QuestionService,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        let rules: ExamRules = config.load_rules().await?;
        let store = DatasetStore::new(&config.data_dir);
        let scorer = ProbabilityScorer::new(config.current_year);

        info!("📁 数据目录: {}", config.data_dir.display());
        info!("💾 缓存目录: {}", config.cache_dir.display());

        let paper_service = PaperService::new(
            store.clone(),
            rules.patterns.clone(),
            PaperAssembler::new(scorer),
            FilePaperCache::new(config.cache_dir.join("papers")),
        );

        let explanation_service = ExplanationService::new(
            LlmClient::from_config(&config),
            FileExplanationCache::new(config.cache_dir.join("explanations.json")),
        );

        Ok(Self {
            topic_service: TopicService::new(store.clone(), scorer, rules.modes),
            paper_service: Arc::new(paper_service),
            explanation_service,
            question_service: QuestionService::new(store.clone(), config.current_year),
            store,
            config,
        })
    }

    /// 执行命令，结果以格式化 JSON 返回
    pub async fn execute(&self, command: Command) -> Result<serde_json::Value> {
        log_startup(command.name(), self.config.current_year);

        let value = match command {
            Command::Topics { subject, mode } => {
                serde_json::to_value(self.topic_service.topics(&subject, &mode).await?)?
            }
            Command::Paper { subject } => {
                serde_json::to_value(self.paper_service.paper(&subject).await?)?
            }
            Command::Explain {
                subject,
                marks,
                question_text,
            } => serde_json::to_value(
                self.explanation_service
                    .explain(&subject, &question_text, marks)
                    .await?,
            )?,
            Command::Questions { subject, query } => {
                serde_json::to_value(self.question_service.questions(&subject, &query).await?)?
            }
            Command::Build {
                subject,
                class_level,
                stream,
            } => {
                let frequency = build_frequency(&self.store, &subject, class_level, &stream).await?;
                let bank = build_question_bank(&self.store, &subject, class_level, &stream).await?;
                serde_json::json!({
                    "frequency": { "output": frequency.output, "topics": frequency.entries },
                    "questionBank": { "output": bank.output, "questions": bank.entries },
                    "sourceFiles": frequency.source_files,
                })
            }
            Command::Warm => serde_json::to_value(self.warm().await?)?,
        };

        Ok(value)
    }

    /// 执行命令并打印结果
    pub async fn run(&self, command: Command) -> Result<()> {
        let value = self.execute(command).await?;
        println!("{}", serde_json::to_string_pretty(&value)?);
        Ok(())
    }

    /// 为目录中的所有科目预生成试卷
    pub async fn warm(&self) -> Result<WarmStats> {
        let subjects: Vec<&'static str> = SUBJECT_CATALOG.keys().copied().collect();
        let max_concurrent = self.config.max_concurrent_papers.max(1);
        log_warm_start(subjects.len(), max_concurrent);

        let semaphore = Arc::new(Semaphore::new(max_concurrent));
        let mut handles = Vec::with_capacity(subjects.len());

        for (idx, subject) in subjects.iter().enumerate() {
            let permit = semaphore.clone().acquire_owned().await?;
            let service = Arc::clone(&self.paper_service);
            let subject = *subject;
            let index = idx + 1;

            handles.push(tokio::spawn(async move {
                let _permit = permit;
                match service.paper(subject).await {
                    Ok(paper) => {
                        info!("[科目 {}] ✅ {}: {} 题", index, subject, paper.question_count());
                        true
                    }
                    Err(e) => {
                        error!("[科目 {}] ❌ {}: {}", index, subject, e);
                        false
                    }
                }
            }));
        }

        let mut stats = WarmStats {
            total: subjects.len(),
            ..Default::default()
        };
        for result in futures::future::join_all(handles).await {
            match result {
                Ok(true) => stats.success += 1,
                Ok(false) => stats.failed += 1,
                Err(e) => {
                    error!("任务执行失败: {}", e);
                    stats.failed += 1;
                }
            }
        }

        print_final_stats(stats.success, stats.failed, stats.total);
        Ok(stats)
    }
}
