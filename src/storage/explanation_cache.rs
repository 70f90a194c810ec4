use crate::error::AppResult;
use crate::models::ExplanationRecord;
use crate::storage::json_file::{read_json, write_json};
use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock};

/// 讲解缓存，键为 (科目, 题干)
pub trait ExplanationCache: Send + Sync {
    fn get(
        &self,
        subject: &str,
        question_text: &str,
    ) -> impl Future<Output = AppResult<Option<ExplanationRecord>>> + Send;

    fn put(&self, record: ExplanationRecord) -> impl Future<Output = AppResult<()>> + Send;
}

#[derive(Debug, Default)]
pub struct MemoryExplanationCache {
    records: RwLock<HashMap<(String, String), ExplanationRecord>>,
}

impl MemoryExplanationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

impl ExplanationCache for MemoryExplanationCache {
    async fn get(&self, subject: &str, question_text: &str) -> AppResult<Option<ExplanationRecord>> {
        let records = self.records.read().await;
        Ok(records
            .get(&(subject.to_string(), question_text.to_string()))
            .cloned())
    }

    async fn put(&self, record: ExplanationRecord) -> AppResult<()> {
        self.records
            .write()
            .await
            .insert((record.subject.clone(), record.question_text.clone()), record);
        Ok(())
    }
}

/// 单文件缓存：所有讲解记录存放在一个 JSON 数组里
///
/// 写入时整体重写，`lock` 保证同一进程内的读改写不交错
#[derive(Debug)]
pub struct FileExplanationCache {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileExplanationCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> AppResult<Vec<ExplanationRecord>> {
        Ok(read_json(&self.path).await?.unwrap_or_default())
    }
}

impl ExplanationCache for FileExplanationCache {
    async fn get(&self, subject: &str, question_text: &str) -> AppResult<Option<ExplanationRecord>> {
        let _guard = self.lock.lock().await;
        let records = self.load().await?;
        Ok(records
            .into_iter()
            .find(|r| r.subject == subject && r.question_text == question_text))
    }

    async fn put(&self, record: ExplanationRecord) -> AppResult<()> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        records.retain(|r| !(r.subject == record.subject && r.question_text == record.question_text));
        records.push(record);
        write_json(&self.path, &records).await
    }
}
