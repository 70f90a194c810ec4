use crate::models::mode::Mode;
use crate::models::subject::ClassLevel;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

/// 近三年没有出现时的占位文本
pub const NO_RECENT_YEARS: &str = "No recent years";

/// 近年出现情况
///
/// 没有近年记录时序列化为 `["No recent years"]`，而不是空数组
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecentYears {
    Years(Vec<i32>),
    NoneRecent,
}

impl RecentYears {
    pub fn from_years(years: Vec<i32>) -> Self {
        if years.is_empty() {
            RecentYears::NoneRecent
        } else {
            RecentYears::Years(years)
        }
    }

    pub fn years(&self) -> &[i32] {
        match self {
            RecentYears::Years(years) => years,
            RecentYears::NoneRecent => &[],
        }
    }
}

impl Serialize for RecentYears {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RecentYears::Years(years) => years.serialize(serializer),
            RecentYears::NoneRecent => {
                let mut seq = serializer.serialize_seq(Some(1))?;
                seq.serialize_element(NO_RECENT_YEARS)?;
                seq.end()
            }
        }
    }
}

/// 打分后的知识点（每次请求重新计算，不持久化）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredTopic {
    pub chapter: String,
    pub name: String,
    pub probability: f64,
    pub appeared_count: usize,
    pub recent_years: RecentYears,
    pub all_years: Vec<i32>,
    pub total_marks: u64,
}

/// 高频考点查询结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicReport {
    pub high_probability_topics: Vec<ScoredTopic>,
    pub subject: String,
    #[serde(rename = "class")]
    pub class_level: ClassLevel,
    pub mode: Mode,
    /// 界面展示的百分比，不是内部阈值
    pub threshold: u8,
    pub total_topics: usize,
    pub filtered_count: usize,
}
