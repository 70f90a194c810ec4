use crate::models::subject::ClassLevel;
use serde::{Deserialize, Serialize};

/// 知识点在某年真题中的一次出现
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    pub year: i32,
    pub marks: u32,
}

/// 知识点及其历年出现记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    pub appearances: Vec<Appearance>,
}

impl Topic {
    /// 各次出现的分值之和，超出上限时截断在 `u64::MAX`
    pub fn total_marks(&self) -> u64 {
        self.appearances
            .iter()
            .fold(0u64, |acc, a| acc.saturating_add(u64::from(a.marks)))
    }
}

/// 章节
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    #[serde(rename = "chapter")]
    pub name: String,
    pub topics: Vec<Topic>,
}

/// 科目频率数据（离线构建，查询时只读）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectFrequencyDataset {
    pub subject: String,
    #[serde(rename = "class")]
    pub class_level: ClassLevel,
    pub chapters: Vec<Chapter>,
}

impl SubjectFrequencyDataset {
    /// 知识点总数
    pub fn topic_count(&self) -> usize {
        self.chapters.iter().map(|c| c.topics.len()).sum()
    }
}
