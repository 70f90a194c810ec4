use crate::models::{QuestionRecord, RankedQuestion};
use std::collections::HashMap;

pub const DEFAULT_QUESTION_LIMIT: usize = 50;

/// 题目浏览的筛选条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionQuery {
    /// `None` 或 `all` 表示不按章节筛选
    pub chapter: Option<String>,
    pub marks: Option<u32>,
    pub limit: usize,
}

impl Default for QuestionQuery {
    fn default() -> Self {
        Self {
            chapter: None,
            marks: None,
            limit: DEFAULT_QUESTION_LIMIT,
        }
    }
}

impl QuestionQuery {
    fn chapter_filter(&self) -> Option<&str> {
        self.chapter
            .as_deref()
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"))
    }

    fn matches(&self, question: &QuestionRecord) -> bool {
        if let Some(chapter) = self.chapter_filter() {
            if question.chapter != chapter {
                return false;
            }
        }
        self.marks.map_or(true, |marks| question.marks == marks)
    }
}

/// 筛选题库并按重要度排序
///
/// 重要度 = 同 (章节, 知识点) 的题目数 × 10 + 距参考年份的年数 × 2
///
/// # 参数
/// - `bank`: 科目题库
/// - `query`: 章节、分值筛选和数量上限
/// - `current_year`: 参考年份
pub fn rank_questions(
    bank: &[QuestionRecord],
    query: &QuestionQuery,
    current_year: i32,
) -> Vec<RankedQuestion> {
    let filtered: Vec<&QuestionRecord> = bank.iter().filter(|q| query.matches(q)).collect();

    let mut topic_counts: HashMap<(&str, &str), usize> = HashMap::new();
    for q in &filtered {
        *topic_counts
            .entry((q.chapter.as_str(), q.topic.as_str()))
            .or_insert(0) += 1;
    }

    let mut ranked: Vec<RankedQuestion> = filtered
        .iter()
        .map(|q| {
            let frequency = topic_counts
                .get(&(q.chapter.as_str(), q.topic.as_str()))
                .copied()
                .unwrap_or(0);
            RankedQuestion {
                record: (*q).clone(),
                importance: frequency as i64 * 10
                    + (i64::from(current_year) - i64::from(q.year)) * 2,
                frequency,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.importance.cmp(&a.importance));
    ranked.truncate(query.limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(year: i32, chapter: &str, topic: &str, marks: u32, text: &str) -> QuestionRecord {
        QuestionRecord {
            year,
            section_label: "A".to_string(),
            section_type: "MCQ".to_string(),
            chapter: chapter.to_string(),
            topic: topic.to_string(),
            marks,
            question_text: text.to_string(),
        }
    }

    fn bank() -> Vec<QuestionRecord> {
        vec![
            q(2024, "Polynomials", "Zeroes", 1, "p1"),
            q(2023, "Polynomials", "Zeroes", 2, "p2"),
            q(2020, "Triangles", "Similarity", 3, "t1"),
            q(2024, "Polynomials", "Division", 1, "p3"),
        ]
    }

    #[test]
    fn test_importance_and_order() {
        let ranked = rank_questions(&bank(), &QuestionQuery::default(), 2025);
        let summary: Vec<(&str, i64, usize)> = ranked
            .iter()
            .map(|r| (r.record.question_text.as_str(), r.importance, r.frequency))
            .collect();
        assert_eq!(
            summary,
            vec![("p2", 24, 2), ("p1", 22, 2), ("t1", 20, 1), ("p3", 12, 1)]
        );
    }

    #[test]
    fn test_filters_apply_before_frequency() {
        let query = QuestionQuery {
            chapter: Some("Polynomials".to_string()),
            marks: Some(1),
            ..QuestionQuery::default()
        };
        let ranked = rank_questions(&bank(), &query, 2025);
        assert_eq!(ranked.len(), 2);
        // 筛选后 Zeroes 只剩 1 题
        assert!(ranked.iter().all(|r| r.frequency == 1));
    }

    #[test]
    fn test_all_chapter_means_no_filter() {
        let query = QuestionQuery {
            chapter: Some("all".to_string()),
            ..QuestionQuery::default()
        };
        assert_eq!(rank_questions(&bank(), &query, 2025).len(), 4);
    }

    #[test]
    fn test_limit_truncates() {
        let query = QuestionQuery {
            limit: 1,
            ..QuestionQuery::default()
        };
        let ranked = rank_questions(&bank(), &query, 2025);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].record.question_text, "p2");
    }

    #[test]
    fn test_ranked_question_serializes_flat() {
        let ranked = rank_questions(&bank(), &QuestionQuery::default(), 2025);
        let value = serde_json::to_value(&ranked[0]).unwrap();
        assert_eq!(value["questionText"], "p2");
        assert_eq!(value["importance"], 24);
        assert_eq!(value["section"], "A");
    }

    #[test]
    fn test_extreme_year_does_not_overflow() {
        let bank = vec![q(i32::MIN, "Polynomials", "Zeroes", 1, "ancient")];
        let ranked = rank_questions(&bank, &QuestionQuery::default(), 2025);
        assert_eq!(
            ranked[0].importance,
            10 + (2025 - i64::from(i32::MIN)) * 2
        );
    }
}
