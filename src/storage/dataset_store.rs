//! 数据集读取
//!
//! 目录结构：
//! ```text
//! <data_dir>/
//!   frequency/<subject_id>.json      频率数据
//!   questionBank/<subject_id>.json   题库
//!   raw/<class>/<stream>/*.json      原始试卷（离线构建的输入）
//! ```

use crate::error::{AppError, AppResult};
use crate::models::{ClassLevel, QuestionRecord, SubjectFrequencyDataset};
use crate::storage::json_file::read_json;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const FREQUENCY_DIR: &str = "frequency";
pub const QUESTION_BANK_DIR: &str = "questionBank";
pub const RAW_DIR: &str = "raw";

/// 组卷所需的两份数据
#[derive(Debug, Clone)]
pub struct PaperInputs {
    /// 实际命中的文件名（不含扩展名）
    pub file_stem: String,
    pub question_bank: Vec<QuestionRecord>,
    pub frequency: SubjectFrequencyDataset,
}

/// 基于目录的数据集读取器
#[derive(Debug, Clone)]
pub struct DatasetStore {
    root: PathBuf,
}

impl DatasetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn frequency_path(&self, file_stem: &str) -> PathBuf {
        self.root.join(FREQUENCY_DIR).join(format!("{}.json", file_stem))
    }

    pub fn question_bank_path(&self, file_stem: &str) -> PathBuf {
        self.root.join(QUESTION_BANK_DIR).join(format!("{}.json", file_stem))
    }

    pub fn raw_dir(&self, class_level: ClassLevel, stream: &str) -> PathBuf {
        self.root.join(RAW_DIR).join(class_level.prefix()).join(stream)
    }

    /// 读取频率数据，文件名为小写的科目 ID
    pub async fn load_frequency(&self, subject_id: &str) -> AppResult<SubjectFrequencyDataset> {
        let stem = subject_id.to_lowercase();
        let path = self.frequency_path(&stem);
        debug!("🔍 查找频率数据: {}", path.display());

        read_json(&path)
            .await?
            .ok_or_else(|| AppError::FrequencyDataNotFound {
                subject: subject_id.to_string(),
                class_level: ClassLevel::from_subject_id(&stem).number(),
                path: path.display().to_string(),
            })
    }

    /// 读取题库，文件名为小写的科目 ID
    pub async fn load_question_bank(&self, subject_id: &str) -> AppResult<Vec<QuestionRecord>> {
        let stem = subject_id.to_lowercase();
        let path = self.question_bank_path(&stem);
        debug!("🔍 查找题库: {}", path.display());

        read_json(&path)
            .await?
            .ok_or_else(|| AppError::QuestionBankNotFound {
                subject: subject_id.to_string(),
                class_level: ClassLevel::from_subject_id(&stem).number(),
                path: path.display().to_string(),
            })
    }

    /// 定位并读取组卷所需的题库和频率数据
    ///
    /// 科目 ID 已带年级前缀时直接使用，否则补上前缀；
    /// 题库不存在时去掉一次前缀再重新拼接重试，频率数据与题库使用同一个文件名
    pub async fn resolve_paper_inputs(
        &self,
        subject: &str,
        class_level: ClassLevel,
    ) -> AppResult<PaperInputs> {
        let prefix = class_level.prefix();
        let primary = if subject.starts_with(prefix) {
            subject.to_string()
        } else {
            format!("{}_{}", prefix, subject)
        };
        debug!("📁 使用文件名: {}", primary);

        let bank_path = self.question_bank_path(&primary);
        let (stem, question_bank) = match read_json::<Vec<QuestionRecord>>(&bank_path).await? {
            Some(bank) => (primary, bank),
            None => {
                let stripped = subject.replacen(&format!("{}_", prefix), "", 1);
                let alternative = format!("{}_{}", prefix, stripped);
                warn!(
                    "❌ 题库不存在: {}，尝试备用文件名 {}",
                    bank_path.display(),
                    alternative
                );

                match read_json::<Vec<QuestionRecord>>(&self.question_bank_path(&alternative))
                    .await?
                {
                    Some(bank) => {
                        info!("✅ 备用路径命中: {}", alternative);
                        (alternative, bank)
                    }
                    None => {
                        return Err(AppError::QuestionBankNotFound {
                            subject: subject.to_string(),
                            class_level: class_level.number(),
                            path: bank_path.display().to_string(),
                        })
                    }
                }
            }
        };

        let frequency_path = self.frequency_path(&stem);
        let frequency = read_json::<SubjectFrequencyDataset>(&frequency_path)
            .await?
            .ok_or_else(|| AppError::FrequencyDataNotFound {
                subject: subject.to_string(),
                class_level: class_level.number(),
                path: frequency_path.display().to_string(),
            })?;

        info!(
            "✅ 已加载 {}: 题库 {} 题, 知识点 {} 个",
            stem,
            question_bank.len(),
            frequency.topic_count()
        );

        Ok(PaperInputs {
            file_stem: stem,
            question_bank,
            frequency,
        })
    }
}
