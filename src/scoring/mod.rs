//! 打分与组卷
//!
//! 纯计算逻辑，不做任何 IO

pub mod assembler;
pub mod filter;
pub mod question_ranker;
pub mod scorer;
pub mod topic_index;

pub use assembler::{PaperAssembler, PaperLabels};
pub use filter::TopicFilter;
pub use question_ranker::{rank_questions, QuestionQuery, DEFAULT_QUESTION_LIMIT};
pub use scorer::ProbabilityScorer;
pub use topic_index::TopicIndex;
