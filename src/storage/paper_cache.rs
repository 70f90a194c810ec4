use crate::error::AppResult;
use crate::models::{AssembledPaper, ClassLevel};
use crate::storage::json_file::{read_json, write_json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// 试卷缓存
///
/// 每个 (科目, 年级) 最多一份，没有过期和淘汰。
/// 先读后写之间没有互斥，同一科目的并发请求可能各自生成一次，结果相同
pub trait PaperCache: Send + Sync {
    fn get(
        &self,
        subject: &str,
        class_level: ClassLevel,
    ) -> impl Future<Output = AppResult<Option<AssembledPaper>>> + Send;

    fn put(
        &self,
        subject: &str,
        class_level: ClassLevel,
        paper: &AssembledPaper,
    ) -> impl Future<Output = AppResult<()>> + Send;
}

/// 进程内缓存
#[derive(Debug, Default)]
pub struct MemoryPaperCache {
    papers: RwLock<HashMap<(String, ClassLevel), AssembledPaper>>,
}

impl MemoryPaperCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.papers.read().await.len()
    }
}

impl PaperCache for MemoryPaperCache {
    async fn get(&self, subject: &str, class_level: ClassLevel) -> AppResult<Option<AssembledPaper>> {
        let papers = self.papers.read().await;
        Ok(papers.get(&(subject.to_string(), class_level)).cloned())
    }

    async fn put(
        &self,
        subject: &str,
        class_level: ClassLevel,
        paper: &AssembledPaper,
    ) -> AppResult<()> {
        self.papers
            .write()
            .await
            .insert((subject.to_string(), class_level), paper.clone());
        Ok(())
    }
}

/// 缓存文件内容
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedPaper {
    pub subject: String,
    #[serde(rename = "class")]
    pub class_level: ClassLevel,
    pub created_at: DateTime<Utc>,
    pub paper: AssembledPaper,
}

/// 文件缓存：`<dir>/<subject>__class<N>.json`，每个键一个文件
#[derive(Debug, Clone)]
pub struct FilePaperCache {
    dir: PathBuf,
}

impl FilePaperCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, subject: &str, class_level: ClassLevel) -> PathBuf {
        self.dir
            .join(format!("{}__{}.json", encode_file_stem(subject), class_level.prefix()))
    }
}

impl PaperCache for FilePaperCache {
    async fn get(&self, subject: &str, class_level: ClassLevel) -> AppResult<Option<AssembledPaper>> {
        let entry: Option<CachedPaper> = read_json(&self.entry_path(subject, class_level)).await?;
        // 文件名编码是单射的，这里再比对一次原始键以防文件被手动改动
        Ok(entry
            .filter(|e| e.subject == subject && e.class_level == class_level)
            .map(|e| e.paper))
    }

    async fn put(
        &self,
        subject: &str,
        class_level: ClassLevel,
        paper: &AssembledPaper,
    ) -> AppResult<()> {
        let entry = CachedPaper {
            subject: subject.to_string(),
            class_level,
            created_at: Utc::now(),
            paper: paper.clone(),
        };
        write_json(&self.entry_path(subject, class_level), &entry).await
    }
}

/// 把键编码成文件名
///
/// 字母、数字、`-` 和 `_` 原样保留，其余字节写成 `%XX`。
/// 不同的键一定得到不同的文件名
pub(crate) fn encode_file_stem(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PaperMeta, PaperSection, SelectedQuestion};

    fn paper(subject: &str) -> AssembledPaper {
        AssembledPaper {
            meta: PaperMeta {
                series: "ExamGod".to_string(),
                set: "Predicted-Set-1".to_string(),
                paper_code: "Predicted-01".to_string(),
                subject: subject.to_string(),
                class_level: ClassLevel::Twelve,
                time_allowed: "3 Hours".to_string(),
                maximum_marks: 70,
                total_questions: 33,
            },
            sections: vec![PaperSection {
                section_label: "A".to_string(),
                section_type: "MCQ".to_string(),
                marks_per_question: 1,
                questions: vec![SelectedQuestion {
                    chapter: "Electrostatics".to_string(),
                    topic: "Gauss Law".to_string(),
                    marks: 1,
                    question_text: "Define electric flux.".to_string(),
                    source_year: 2024,
                }],
            }],
        }
    }

    #[tokio::test]
    async fn test_memory_round_trip() {
        let cache = MemoryPaperCache::new();
        assert!(cache.get("class12_physics", ClassLevel::Twelve).await.unwrap().is_none());

        let p = paper("Physics");
        cache.put("class12_physics", ClassLevel::Twelve, &p).await.unwrap();
        assert_eq!(cache.get("class12_physics", ClassLevel::Twelve).await.unwrap(), Some(p));
        assert!(cache.get("class12_physics", ClassLevel::Ten).await.unwrap().is_none());
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FilePaperCache::new(dir.path().join("papers"));

        let p = paper("Physics");
        cache.put("class12_physics", ClassLevel::Twelve, &p).await.unwrap();
        assert_eq!(cache.get("class12_physics", ClassLevel::Twelve).await.unwrap(), Some(p));

        // 新实例读取同一目录
        let reopened = FilePaperCache::new(dir.path().join("papers"));
        assert!(reopened.get("class12_physics", ClassLevel::Twelve).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_similar_keys_keep_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FilePaperCache::new(dir.path());

        cache.put("class10 maths", ClassLevel::Ten, &paper("Maths A")).await.unwrap();
        cache.put("class10_maths", ClassLevel::Ten, &paper("Maths B")).await.unwrap();
        cache.put("class10%20maths", ClassLevel::Ten, &paper("Maths C")).await.unwrap();

        let subject_of = |p: Option<AssembledPaper>| p.unwrap().meta.subject;
        assert_eq!(subject_of(cache.get("class10 maths", ClassLevel::Ten).await.unwrap()), "Maths A");
        assert_eq!(subject_of(cache.get("class10_maths", ClassLevel::Ten).await.unwrap()), "Maths B");
        assert_eq!(subject_of(cache.get("class10%20maths", ClassLevel::Ten).await.unwrap()), "Maths C");
    }

    #[test]
    fn test_encode_file_stem() {
        assert_eq!(encode_file_stem("class10_maths-basic"), "class10_maths-basic");
        assert_eq!(encode_file_stem("class10 maths"), "class10%20maths");
        assert_eq!(encode_file_stem("50%"), "50%25");
        assert_eq!(encode_file_stem("../etc/passwd"), "%2E%2E%2Fetc%2Fpasswd");
        assert_ne!(encode_file_stem("a b"), encode_file_stem("a_b"));
    }
}
