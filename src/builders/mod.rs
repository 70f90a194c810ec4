//! 离线数据构建
//!
//! 从 `raw/<class>/<stream>/` 的原始试卷生成频率数据和题库

pub mod frequency_builder;
pub mod question_bank_builder;
pub mod raw_source;

use std::path::PathBuf;

pub use frequency_builder::build_frequency;
pub use question_bank_builder::build_question_bank;

/// 单次构建的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub output: PathBuf,
    pub source_files: usize,
    /// 频率数据为知识点数，题库为题目数
    pub entries: usize,
}
