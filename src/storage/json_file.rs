use crate::error::{AppError, AppResult, FileError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tokio::fs;

/// 读取并解析 JSON 文件
///
/// 文件不存在时返回 `Ok(None)`，由调用方决定报哪种"不存在"错误
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<Option<T>> {
    let display = path.display().to_string();
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(AppError::file_read_failed(display, e)),
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| AppError::malformed(display, e))
}

/// 以格式化 JSON 写入文件，父目录不存在时自动创建
pub async fn write_json<T: Serialize>(path: &Path, value: &T) -> AppResult<()> {
    let display = path.display().to_string();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::file_write_failed(&display, e))?;
    }

    let content = serde_json::to_string_pretty(value).map_err(|e| {
        AppError::File(FileError::SerializeFailed {
            path: display.clone(),
            source: e,
        })
    })?;

    fs::write(path, content)
        .await
        .map_err(|e| AppError::file_write_failed(display, e))
}
