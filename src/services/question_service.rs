use crate::error::AppResult;
use crate::models::QuestionListing;
use crate::scoring::{rank_questions, QuestionQuery};
use crate::storage::DatasetStore;
use tracing::info;

/// 题库浏览
pub struct QuestionService {
    store: DatasetStore,
    current_year: i32,
}

impl QuestionService {
    pub fn new(store: DatasetStore, current_year: i32) -> Self {
        Self { store, current_year }
    }

    pub async fn questions(&self, subject: &str, query: &QuestionQuery) -> AppResult<QuestionListing> {
        let bank = self.store.load_question_bank(subject).await?;
        let questions = rank_questions(&bank, query, self.current_year);

        info!(
            "📚 {}: 题库 {} 题, 返回 {} 题",
            subject,
            bank.len(),
            questions.len()
        );

        Ok(QuestionListing {
            subject: subject.to_string(),
            total: questions.len(),
            questions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::storage::json_file::write_json;
    use serde_json::json;

    #[tokio::test]
    async fn test_listing_filters_by_marks() {
        let dir = tempfile::tempdir().unwrap();
        let store = DatasetStore::new(dir.path());
        write_json(
            &store.question_bank_path("class10_maths_basic"),
            &json!([
                { "year": 2023, "section": "A", "type": "MCQ", "chapter": "Polynomials",
                  "topic": "Zeroes", "marks": 1, "questionText": "q1" },
                { "year": 2022, "section": "C", "type": "SA", "chapter": "Polynomials",
                  "topic": "Zeroes", "marks": 3, "questionText": "q2" }
            ]),
        )
        .await
        .unwrap();

        let service = QuestionService::new(store, 2025);
        let query = QuestionQuery {
            marks: Some(3),
            ..QuestionQuery::default()
        };
        let listing = service.questions("class10_maths_basic", &query).await.unwrap();

        assert_eq!(listing.total, 1);
        assert_eq!(listing.questions[0].record.question_text, "q2");
        assert_eq!(listing.questions[0].importance, 16);
    }

    #[tokio::test]
    async fn test_missing_bank() {
        let dir = tempfile::tempdir().unwrap();
        let service = QuestionService::new(DatasetStore::new(dir.path()), 2025);
        let err = service
            .questions("class10_ss", &QuestionQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::QuestionBankNotFound { .. }));
    }
}
