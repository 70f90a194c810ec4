use crate::error::{AppError, AppResult};
use crate::models::raw::RawPaper;
use crate::models::ClassLevel;
use crate::storage::DatasetStore;
use std::path::PathBuf;
use tokio::fs;
use tracing::info;

/// 一份已解析的原始试卷
#[derive(Debug, Clone)]
pub struct RawPaperFile {
    pub path: PathBuf,
    pub paper: RawPaper,
}

/// 读取 `raw/<class>/<stream>/` 下文件名以科目名开头（不区分大小写）的所有 JSON 文件
///
/// 按文件名排序处理，保证构建结果稳定
pub async fn load_raw_papers(
    store: &DatasetStore,
    subject: &str,
    class_level: ClassLevel,
    stream: &str,
) -> AppResult<Vec<RawPaperFile>> {
    let folder = store.raw_dir(class_level, stream);
    let folder_display = folder.display().to_string();

    if !fs::try_exists(&folder).await.unwrap_or(false) {
        return Err(AppError::RawDataNotFound {
            path: folder_display,
        });
    }

    let subject_prefix = subject.to_lowercase();
    let mut paths = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|e| AppError::file_read_failed(&folder_display, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file_read_failed(&folder_display, e))?
    {
        let path = entry.path();
        let Some(file_name) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        let lower = file_name.to_lowercase();
        if lower.starts_with(&subject_prefix) && lower.ends_with(".json") {
            paths.push(path);
        }
    }

    if paths.is_empty() {
        return Err(AppError::NoRawFiles {
            subject: subject.to_string(),
            path: folder_display,
        });
    }

    paths.sort();

    let mut papers = Vec::with_capacity(paths.len());
    for path in paths {
        let display = path.display().to_string();
        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| AppError::file_read_failed(&display, e))?;
        let paper: RawPaper =
            serde_json::from_str(&content).map_err(|e| AppError::malformed(&display, e))?;

        info!(
            "正在加载: {} ({} 年, {} 个大题)",
            path.file_name().unwrap_or_default().to_string_lossy(),
            paper.meta.year,
            paper.sections.len()
        );
        papers.push(RawPaperFile { path, paper });
    }

    Ok(papers)
}
