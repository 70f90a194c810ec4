//! LLM 客户端 - 题目讲解
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 默认走 Gemini 的 OpenAI 兼容端点，可通过配置切换到其他兼容服务

use crate::config::Config;
use crate::error::{AppError, AppResult, LlmError};
use crate::models::Explanation;
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use regex::Regex;
use std::future::Future;
use tracing::{debug, warn};

const FAMILIAR_MARKER: &str = "FAMILIAR_EXPLANATION:";
const EXAM_STANDARD_MARKER: &str = "EXAM_STANDARD_ANSWER:";

/// 题目讲解来源
///
/// 返回的讲解可能不完整（某一部分为空），由调用方决定是否回退
pub trait ExplanationOracle: Send + Sync {
    fn explain(
        &self,
        subject: &str,
        question_text: &str,
        marks: u32,
    ) -> impl Future<Output = AppResult<Explanation>> + Send;
}

/// 基于 OpenAI 兼容接口的讲解生成
pub struct LlmClient {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl LlmClient {
    pub fn new(api_key: &str, api_base_url: &str, model_name: &str) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: model_name.to_string(),
        }
    }

    /// 没有配置 API Key 时返回 None
    pub fn from_config(config: &Config) -> Option<Self> {
        let api_key = config.llm_api_key.as_deref()?;
        Some(Self::new(
            api_key,
            &config.llm_api_base_url,
            &config.llm_model_name,
        ))
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// 通用的 LLM 调用
    ///
    /// # 参数
    /// - `user_message`: 用户消息
    /// - `system_message`: 可选的系统提示
    ///
    /// # 返回
    /// 去掉首尾空白的模型回复文本
    pub async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
    ) -> AppResult<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let mut messages = Vec::new();

        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()
                .map_err(request_build_failed)?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(request_build_failed)?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(0.3)
            .max_tokens(1024u32)
            .build()
            .map_err(request_build_failed)?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            AppError::llm_api_failed(&self.model_name, e)
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| LlmError::EmptyContent {
                model: self.model_name.clone(),
            })?;

        Ok(content.trim().to_string())
    }
}

impl ExplanationOracle for LlmClient {
    async fn explain(&self, subject: &str, question_text: &str, marks: u32) -> AppResult<Explanation> {
        let (user_message, system_message) = build_explanation_messages(subject, question_text, marks);
        let response = self.send_to_llm(&user_message, Some(&system_message)).await?;
        Ok(parse_explanation_response(&response))
    }
}

fn request_build_failed(e: impl ToString) -> AppError {
    LlmError::RequestBuildFailed {
        message: e.to_string(),
    }
    .into()
}

/// 构建讲解提示词，返回 (用户消息, 系统消息)
pub fn build_explanation_messages(subject: &str, question_text: &str, marks: u32) -> (String, String) {
    let system_message = format!(
        "You are a CBSE board exam expert teacher for {}. Explain questions clearly and follow the requested format exactly.",
        subject
    );

    let user_message = format!(
        r#"Explain this question in two ways:

Question: "{question}"
Marks: {marks}

Format your response exactly like this:

{familiar}
[Simple, easy-to-understand explanation in Hinglish mix - max {words} words]

{standard}
[Perfect board-exam style answer with proper formatting, key points, and formulas if needed]"#,
        question = question_text,
        marks = marks,
        familiar = FAMILIAR_MARKER,
        standard = EXAM_STANDARD_MARKER,
        words = marks * 20,
    );

    (user_message, system_message)
}

/// 解析模型返回的两段讲解，缺失的部分为空字符串
pub fn parse_explanation_response(text: &str) -> Explanation {
    let familiar = capture_first(
        r"(?s)FAMILIAR_EXPLANATION:\s*(.*?)(?:EXAM_STANDARD_ANSWER:|\z)",
        text,
    );
    let standard = capture_first(r"(?s)EXAM_STANDARD_ANSWER:\s*(.*)", text);

    Explanation {
        familiar_explanation: familiar,
        exam_standard_explanation: standard,
    }
}

fn capture_first(pattern: &str, text: &str) -> String {
    Regex::new(pattern)
        .ok()
        .and_then(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_both_blocks() {
        let text = "FAMILIAR_EXPLANATION:\nDekho, flux matlab field lines ka count.\n\nEXAM_STANDARD_ANSWER:\nElectric flux is defined as φ = E·A.\n• SI unit: N m²/C";
        let parsed = parse_explanation_response(text);
        assert_eq!(
            parsed.familiar_explanation,
            "Dekho, flux matlab field lines ka count."
        );
        assert!(parsed.exam_standard_explanation.starts_with("Electric flux"));
        assert!(parsed.exam_standard_explanation.ends_with("N m²/C"));
        assert!(parsed.is_complete());
    }

    #[test]
    fn test_parse_missing_standard_block() {
        let parsed = parse_explanation_response("FAMILIAR_EXPLANATION: only this part");
        assert_eq!(parsed.familiar_explanation, "only this part");
        assert!(parsed.exam_standard_explanation.is_empty());
        assert!(!parsed.is_complete());
    }

    #[test]
    fn test_parse_unstructured_text() {
        let parsed = parse_explanation_response("Sorry, I cannot help with that.");
        assert!(parsed.familiar_explanation.is_empty());
        assert!(parsed.exam_standard_explanation.is_empty());
    }

    #[test]
    fn test_prompt_word_limit_scales_with_marks() {
        let (user, system) = build_explanation_messages("physics", "Define flux.", 3);
        assert!(user.contains("max 60 words"));
        assert!(user.contains("Marks: 3"));
        assert!(user.contains(FAMILIAR_MARKER));
        assert!(user.contains(EXAM_STANDARD_MARKER));
        assert!(system.contains("physics"));
    }

    #[test]
    fn test_from_config_requires_api_key() {
        let config = Config::default();
        assert!(LlmClient::from_config(&config).is_none());

        let config = Config {
            llm_api_key: Some("test-key".to_string()),
            ..Config::default()
        };
        let client = LlmClient::from_config(&config).unwrap();
        assert_eq!(client.model_name(), "gemini-2.5-flash-lite");
    }
}
