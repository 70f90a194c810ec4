use serde::{Deserialize, Serialize};

/// 题库中的一道历年真题
///
/// 同一科目内 `question_text` 即唯一标识
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub year: i32,
    #[serde(rename = "section")]
    pub section_label: String,
    #[serde(rename = "type")]
    pub section_type: String,
    pub chapter: String,
    pub topic: String,
    pub marks: u32,
    pub question_text: String,
}

/// 组卷结果中的一道题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedQuestion {
    pub chapter: String,
    pub topic: String,
    pub marks: u32,
    pub question_text: String,
    pub source_year: i32,
}

impl From<&QuestionRecord> for SelectedQuestion {
    fn from(record: &QuestionRecord) -> Self {
        Self {
            chapter: record.chapter.clone(),
            topic: record.topic.clone(),
            marks: record.marks,
            question_text: record.question_text.clone(),
            source_year: record.year,
        }
    }
}

/// 题目浏览结果：题目 + 重要度
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedQuestion {
    #[serde(flatten)]
    pub record: QuestionRecord,
    pub importance: i64,
    pub frequency: usize,
}

/// 题目浏览结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionListing {
    pub subject: String,
    pub total: usize,
    pub questions: Vec<RankedQuestion>,
}
