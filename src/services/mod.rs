pub mod explanation_service;
pub mod paper_service;
pub mod question_service;
pub mod topic_service;

pub use explanation_service::ExplanationService;
pub use paper_service::PaperService;
pub use question_service::QuestionService;
pub use topic_service::TopicService;
