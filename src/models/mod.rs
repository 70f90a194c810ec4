pub mod explanation;
pub mod frequency;
pub mod loaders;
pub mod mode;
pub mod paper;
pub mod pattern;
pub mod question;
pub mod raw;
pub mod subject;
pub mod topic;

pub use explanation::{Explanation, ExplanationRecord, ExplanationResponse};
pub use frequency::{Appearance, Chapter, SubjectFrequencyDataset, Topic};
pub use loaders::load_rules;
pub use mode::{Mode, ModeSettings, ModeTable};
pub use paper::{AssembledPaper, PaperMeta, PaperSection};
pub use pattern::{PaperPattern, PatternBook, SectionPattern};
pub use question::{QuestionListing, QuestionRecord, RankedQuestion, SelectedQuestion};
pub use subject::{ClassLevel, SubjectInfo, SUBJECT_CATALOG};
pub use topic::{RecentYears, ScoredTopic, TopicReport};
