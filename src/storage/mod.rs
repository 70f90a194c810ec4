pub mod dataset_store;
pub mod explanation_cache;
pub mod json_file;
pub mod paper_cache;

pub use dataset_store::{DatasetStore, PaperInputs};
pub use explanation_cache::{ExplanationCache, FileExplanationCache, MemoryExplanationCache};
pub use paper_cache::{CachedPaper, FilePaperCache, MemoryPaperCache, PaperCache};
