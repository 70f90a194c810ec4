use crate::error::{AppError, AppResult};
use crate::models::subject::ClassLevel;
use serde::{Deserialize, Serialize};

/// 试卷模板中的一个大题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionPattern {
    #[serde(rename = "section")]
    pub section_label: String,
    #[serde(rename = "type")]
    pub section_type: String,
    #[serde(rename = "marks")]
    pub marks_per_question: u32,
    #[serde(rename = "count")]
    pub question_count: usize,
}

/// 试卷模板（按年级固定配置）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperPattern {
    pub time_allowed: String,
    pub total_marks: u32,
    pub total_questions: usize,
    pub sections: Vec<SectionPattern>,
}

/// 各年级的试卷模板
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternBook {
    #[serde(default)]
    pub class10: Option<PaperPattern>,
    #[serde(default)]
    pub class12: Option<PaperPattern>,
}

impl PatternBook {
    /// 获取年级对应的模板
    pub fn pattern_for(&self, class_level: ClassLevel) -> AppResult<&PaperPattern> {
        let pattern = match class_level {
            ClassLevel::Ten => self.class10.as_ref(),
            ClassLevel::Twelve => self.class12.as_ref(),
        };
        pattern.ok_or_else(|| AppError::InvalidPattern {
            class_level: class_level.to_string(),
        })
    }
}

fn section(label: &str, kind: &str, marks: u32, count: usize) -> SectionPattern {
    SectionPattern {
        section_label: label.to_string(),
        section_type: kind.to_string(),
        marks_per_question: marks,
        question_count: count,
    }
}

impl Default for PatternBook {
    /// CBSE 当前的板考结构
    fn default() -> Self {
        Self {
            class10: Some(PaperPattern {
                time_allowed: "3 Hours".to_string(),
                total_marks: 80,
                total_questions: 38,
                sections: vec![
                    section("A", "MCQ", 1, 20),
                    section("B", "Very Short Answer", 2, 5),
                    section("C", "Short Answer", 3, 6),
                    section("D", "Long Answer", 5, 4),
                    section("E", "Case Based", 4, 3),
                ],
            }),
            class12: Some(PaperPattern {
                time_allowed: "3 Hours".to_string(),
                total_marks: 70,
                total_questions: 33,
                sections: vec![
                    section("A", "MCQ", 1, 16),
                    section("B", "Very Short Answer", 2, 5),
                    section("C", "Short Answer", 3, 7),
                    section("D", "Case Based", 4, 2),
                    section("E", "Long Answer", 5, 3),
                ],
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_patterns_are_consistent() {
        let book = PatternBook::default();
        for level in [ClassLevel::Ten, ClassLevel::Twelve] {
            let pattern = book.pattern_for(level).unwrap();
            let marks: u32 = pattern
                .sections
                .iter()
                .map(|s| s.marks_per_question * s.question_count as u32)
                .sum();
            let count: usize = pattern.sections.iter().map(|s| s.question_count).sum();
            assert_eq!(marks, pattern.total_marks);
            assert_eq!(count, pattern.total_questions);
        }
    }

    #[test]
    fn test_missing_pattern_is_invalid() {
        let book = PatternBook {
            class10: None,
            class12: PatternBook::default().class12,
        };
        assert!(matches!(
            book.pattern_for(ClassLevel::Ten),
            Err(AppError::InvalidPattern { .. })
        ));
        assert!(book.pattern_for(ClassLevel::Twelve).is_ok());
    }
}
