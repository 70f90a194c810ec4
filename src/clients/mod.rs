//! 外部服务客户端

pub mod llm_client;

pub use llm_client::{ExplanationOracle, LlmClient};
