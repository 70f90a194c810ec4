/// 预测试卷服务
///
/// 负责缓存查询、数据定位、组卷和写回缓存
use crate::error::AppResult;
use crate::models::{AssembledPaper, ClassLevel, PatternBook};
use crate::scoring::PaperAssembler;
use crate::storage::{DatasetStore, PaperCache};
use tracing::{info, warn};

/// 预测试卷服务
pub struct PaperService<C: PaperCache> {
    store: DatasetStore,
    patterns: PatternBook,
    assembler: PaperAssembler,
    cache: C,
}

impl<C: PaperCache> PaperService<C> {
    pub fn new(
        store: DatasetStore,
        patterns: PatternBook,
        assembler: PaperAssembler,
        cache: C,
    ) -> Self {
        Self {
            store,
            patterns,
            assembler,
            cache,
        }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// 获取预测试卷，年级由科目 ID 推断
    ///
    /// 同一 (科目, 年级) 第一次请求时生成并缓存，之后直接返回缓存
    pub async fn paper(&self, subject: &str) -> AppResult<AssembledPaper> {
        let class_level = ClassLevel::from_subject_id(subject);
        info!("📝 获取预测试卷: {} (class {})", subject, class_level);

        if let Some(cached) = self.cache.get(subject, class_level).await? {
            info!("⚡ 命中缓存: {}", subject);
            return Ok(cached);
        }

        let paper = self.generate(subject, class_level).await?;
        self.cache.put(subject, class_level, &paper).await?;

        info!("✅ 新试卷已生成并缓存: {}", subject);
        Ok(paper)
    }

    /// 不经过缓存直接组卷
    pub async fn generate(&self, subject: &str, class_level: ClassLevel) -> AppResult<AssembledPaper> {
        let pattern = self.patterns.pattern_for(class_level)?;
        let inputs = self.store.resolve_paper_inputs(subject, class_level).await?;

        let paper = self.assembler.assemble(
            &inputs.question_bank,
            &inputs.frequency,
            pattern,
            subject,
            class_level,
        );

        for (section, template) in paper.sections.iter().zip(&pattern.sections) {
            if section.questions.len() < template.question_count {
                warn!(
                    "⚠️ [{}] Section {} 只选出 {}/{} 题",
                    subject,
                    section.section_label,
                    section.questions.len(),
                    template.question_count
                );
            }
        }

        info!(
            "📄 组卷完成: {} 共 {}/{} 题",
            subject,
            paper.question_count(),
            pattern.total_questions
        );
        Ok(paper)
    }
}
