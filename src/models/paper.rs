use crate::models::question::SelectedQuestion;
use crate::models::subject::ClassLevel;
use serde::{Deserialize, Serialize};

/// 预测试卷的元信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperMeta {
    pub series: String,
    pub set: String,
    pub paper_code: String,
    pub subject: String,
    pub class_level: ClassLevel,
    pub time_allowed: String,
    pub maximum_marks: u32,
    pub total_questions: usize,
}

/// 试卷中的一个大题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperSection {
    pub section_label: String,
    pub section_type: String,
    pub marks_per_question: u32,
    pub questions: Vec<SelectedQuestion>,
}

/// 组卷结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssembledPaper {
    pub meta: PaperMeta,
    pub sections: Vec<PaperSection>,
}

impl AssembledPaper {
    /// 实际选出的题目数量
    pub fn question_count(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }

    /// 按顺序遍历所有题目
    pub fn questions(&self) -> impl Iterator<Item = &SelectedQuestion> {
        self.sections.iter().flat_map(|s| s.questions.iter())
    }
}
