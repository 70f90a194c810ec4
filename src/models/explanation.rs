use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 题目讲解（通俗版 + 标准答案版）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub familiar_explanation: String,
    pub exam_standard_explanation: String,
}

impl Explanation {
    /// 两部分都不为空才算有效
    pub fn is_complete(&self) -> bool {
        !self.familiar_explanation.is_empty() && !self.exam_standard_explanation.is_empty()
    }

    /// 模型不可用时的固定模板
    pub fn canned(marks: u32) -> Self {
        Self {
            familiar_explanation: format!(
                "Yeh question {} marks ka hai. Isko samajhne ke liye basic concepts clear hone chahiye. Chapter ke main points yaad rakho aur diagrams banakar practice karo.",
                marks
            ),
            exam_standard_explanation: format!(
                "This is a {}-mark question. Key points to remember:\n• Understand the core concept\n• Write step-by-step solution\n• Include relevant formulas\n• Draw diagrams where applicable\n• Practice similar questions from previous years",
                marks
            ),
        }
    }
}

/// 缓存中的讲解记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationRecord {
    pub subject: String,
    pub question_text: String,
    #[serde(flatten)]
    pub explanation: Explanation,
    pub created_at: DateTime<Utc>,
}

/// 讲解接口的返回结构
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationResponse {
    pub subject: String,
    pub question_text: String,
    pub marks: u32,
    #[serde(flatten)]
    pub explanation: Explanation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canned_mentions_marks() {
        let canned = Explanation::canned(5);
        assert!(canned.is_complete());
        assert!(canned.familiar_explanation.contains("5 marks"));
        assert!(canned.exam_standard_explanation.starts_with("This is a 5-mark question"));
    }
}
