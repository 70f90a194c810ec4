//! 题目讲解服务
//!
//! 流程：科目名转小写 → 查缓存 → 模型不可用则返回固定模板 → 调用模型 → 解析。
//! 解析不完整或调用失败都回退到固定模板，固定模板不写入缓存。
//! 缓存读取失败按未命中处理，写入失败只记录警告，讲解照常返回。

use crate::clients::ExplanationOracle;
use crate::error::AppResult;
use crate::models::{Explanation, ExplanationRecord, ExplanationResponse};
use crate::storage::ExplanationCache;
use chrono::Utc;
use tracing::{info, warn};

pub struct ExplanationService<O: ExplanationOracle, C: ExplanationCache> {
    oracle: Option<O>,
    cache: C,
}

impl<O: ExplanationOracle, C: ExplanationCache> ExplanationService<O, C> {
    /// `oracle` 为 None 表示模型不可用（例如没有配置 API Key）
    pub fn new(oracle: Option<O>, cache: C) -> Self {
        if oracle.is_none() {
            warn!("⚠️ 未配置 LLM，讲解将使用固定模板");
        }
        Self { oracle, cache }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// 获取题目讲解
    ///
    /// # 参数
    /// - `subject`: 科目名，大小写不敏感
    /// - `question_text`: 题干
    /// - `marks`: 分值，决定讲解篇幅
    ///
    /// # 返回
    /// 总能得到一份讲解：缓存或模型出错时回退到固定模板
    pub async fn explain(
        &self,
        subject: &str,
        question_text: &str,
        marks: u32,
    ) -> AppResult<ExplanationResponse> {
        let subject = subject.to_lowercase();
        let explanation = self.resolve(&subject, question_text, marks).await?;

        Ok(ExplanationResponse {
            subject,
            question_text: question_text.to_string(),
            marks,
            explanation,
        })
    }

    async fn resolve(&self, subject: &str, question_text: &str, marks: u32) -> AppResult<Explanation> {
        info!("🔎 查询讲解缓存: {}", subject);
        match self.cache.get(subject, question_text).await {
            Ok(Some(cached)) => {
                info!("⚡ 命中讲解缓存");
                return Ok(cached.explanation);
            }
            Ok(None) => {}
            Err(e) => warn!("⚠️ 读取讲解缓存失败: {}，按未命中处理", e),
        }

        let Some(oracle) = &self.oracle else {
            info!("⚠️ 模型不可用，返回固定模板");
            return Ok(Explanation::canned(marks));
        };

        info!("🤖 缓存未命中，调用模型生成讲解");
        let explanation = match oracle.explain(subject, question_text, marks).await {
            Ok(explanation) => explanation,
            Err(e) => {
                warn!("🔥 生成讲解失败: {}，返回固定模板", e);
                return Ok(Explanation::canned(marks));
            }
        };

        if !explanation.is_complete() {
            warn!("❌ 模型返回内容解析不完整，返回固定模板");
            return Ok(Explanation::canned(marks));
        }

        let record = ExplanationRecord {
            subject: subject.to_string(),
            question_text: question_text.to_string(),
            explanation: explanation.clone(),
            created_at: Utc::now(),
        };
        match self.cache.put(record).await {
            Ok(()) => info!("💾 讲解已生成并缓存"),
            Err(e) => warn!("⚠️ 写入讲解缓存失败: {}", e),
        }

        Ok(explanation)
    }
}
