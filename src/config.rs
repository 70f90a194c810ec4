use crate::error::{AppResult, ConfigError};
use crate::models::{ModeTable, PatternBook};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 数据目录（frequency / questionBank / raw）
    pub data_dir: PathBuf,
    /// 缓存目录（papers / explanations）
    pub cache_dir: PathBuf,
    /// 规则文件（可选，覆盖内置的模式和试卷模板）
    pub rules_file: Option<PathBuf>,
    /// 打分参考年份
    pub current_year: i32,
    /// 预生成试卷时的最大并发数
    pub max_concurrent_papers: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- LLM 配置 ---
    pub llm_api_key: Option<String>,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            cache_dir: PathBuf::from("cache"),
            rules_file: None,
            current_year: 2025,
            max_concurrent_papers: 4,
            verbose_logging: false,
            llm_api_key: None,
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-2.5-flash-lite".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        let default = Self::default();
        Ok(Self {
            data_dir: std::env::var("DATA_DIR").map(PathBuf::from).unwrap_or(default.data_dir),
            cache_dir: std::env::var("CACHE_DIR").map(PathBuf::from).unwrap_or(default.cache_dir),
            rules_file: std::env::var("RULES_FILE").ok().map(PathBuf::from),
            current_year: parse_env("CURRENT_YEAR", "i32")?.unwrap_or(default.current_year),
            max_concurrent_papers: parse_env("MAX_CONCURRENT_PAPERS", "usize")?
                .unwrap_or(default.max_concurrent_papers)
                .max(1),
            verbose_logging: parse_env("VERBOSE_LOGGING", "bool")?.unwrap_or(default.verbose_logging),
            llm_api_key: std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.trim().is_empty()),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
        })
    }

    /// 加载规则：配置了规则文件就读取文件，否则使用内置规则
    pub async fn load_rules(&self) -> AppResult<ExamRules> {
        match &self.rules_file {
            Some(path) => crate::models::load_rules(path).await,
            None => Ok(ExamRules::default()),
        }
    }
}

/// 变量存在但无法解析时报错，不存在时返回 None
fn parse_env<T: FromStr>(var_name: &str, expected_type: &str) -> AppResult<Option<T>> {
    match std::env::var(var_name) {
        Ok(value) => value.trim().parse::<T>().map(Some).map_err(|_| {
            ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }
            .into()
        }),
        Err(_) => Ok(None),
    }
}

/// 模式表 + 试卷模板
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExamRules {
    #[serde(default)]
    pub modes: ModeTable,
    #[serde(default)]
    pub patterns: PatternBook,
}
