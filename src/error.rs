use thiserror::Error;

/// 应用程序错误类型
///
/// 所有错误都是本地校验失败，不可重试，直接向调用方传播。
/// 每个变体都携带科目 / 年级 / 模式 / 路径等上下文，方便生成面向用户的提示。
#[derive(Debug, Error)]
pub enum AppError {
    /// 未识别的备考模式
    #[error("无效的模式: {mode} (只支持 PASS / AVG)")]
    InvalidMode { mode: String },

    /// 题库文件不存在
    #[error("题库不存在: {subject} (class {class_level}), 路径: {path}")]
    QuestionBankNotFound {
        subject: String,
        class_level: u8,
        path: String,
    },

    /// 频率数据文件不存在
    #[error("频率数据不存在: {subject} (class {class_level}), 路径: {path}")]
    FrequencyDataNotFound {
        subject: String,
        class_level: u8,
        path: String,
    },

    /// 该年级没有配置试卷模板
    #[error("没有为 class {class_level} 配置试卷模板")]
    InvalidPattern { class_level: String },

    /// 不支持的年级
    #[error("无效的年级: {value} (只支持 10 / 12)")]
    InvalidClassLevel { value: String },

    /// 数据文件缺少必需字段或 JSON 格式错误
    #[error("数据文件格式错误 ({path}): {source}")]
    MalformedDataset {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// 原始试卷目录不存在
    #[error("原始试卷目录不存在: {path}")]
    RawDataNotFound { path: String },

    /// 原始试卷目录中没有该科目的文件
    #[error("没有找到科目 {subject} 的原始试卷 (目录: {path})")]
    NoRawFiles { subject: String, path: String },

    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),

    /// LLM 服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 序列化失败
    #[error("序列化失败 ({path}): {source}")]
    SerializeFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {message}")]
    ApiCallFailed { model: String, message: String },

    /// 请求构建失败
    #[error("LLM 请求构建失败: {message}")]
    RequestBuildFailed { message: String },

    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },

    /// 规则文件中的值不合法
    #[error("规则配置无效: {message}")]
    InvalidRules { message: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建数据格式错误
    pub fn malformed(path: impl Into<String>, source: serde_json::Error) -> Self {
        AppError::MalformedDataset {
            path: path.into(),
            source,
        }
    }

    /// 创建LLM API调用错误
    pub fn llm_api_failed(model: impl Into<String>, message: impl ToString) -> Self {
        AppError::Llm(LlmError::ApiCallFailed {
            model: model.into(),
            message: message.to_string(),
        })
    }

    /// 是否属于"数据集不存在"一类错误
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AppError::QuestionBankNotFound { .. } | AppError::FrequencyDataNotFound { .. }
        )
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
