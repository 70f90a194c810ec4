use crate::builders::raw_source::{load_raw_papers, RawPaperFile};
use crate::builders::BuildSummary;
use crate::error::AppResult;
use crate::models::{Appearance, Chapter, ClassLevel, SubjectFrequencyDataset, Topic};
use crate::storage::json_file::write_json;
use crate::storage::DatasetStore;
use std::collections::{BTreeMap, HashMap};
use tracing::info;

/// 章节 → 知识点 → 年份 → 最高分值，章节和知识点保持首次出现的顺序
#[derive(Default)]
struct FrequencyTable {
    chapters: Vec<(String, Vec<(String, BTreeMap<i32, u32>)>)>,
    chapter_index: HashMap<String, usize>,
    topic_index: HashMap<(usize, String), usize>,
}

impl FrequencyTable {
    fn record(&mut self, chapter: &str, topic: &str, year: i32, marks: u32) {
        let chapter_pos = match self.chapter_index.get(chapter) {
            Some(&pos) => pos,
            None => {
                self.chapters.push((chapter.to_string(), Vec::new()));
                let pos = self.chapters.len() - 1;
                self.chapter_index.insert(chapter.to_string(), pos);
                pos
            }
        };

        let topics = &mut self.chapters[chapter_pos].1;
        let topic_key = (chapter_pos, topic.to_string());
        let topic_pos = match self.topic_index.get(&topic_key) {
            Some(&pos) => pos,
            None => {
                topics.push((topic.to_string(), BTreeMap::new()));
                let pos = topics.len() - 1;
                self.topic_index.insert(topic_key, pos);
                pos
            }
        };

        let years = &mut topics[topic_pos].1;
        let entry = years.entry(year).or_insert(marks);
        *entry = (*entry).max(marks);
    }

    fn into_chapters(self) -> Vec<Chapter> {
        self.chapters
            .into_iter()
            .map(|(name, topics)| Chapter {
                name,
                topics: topics
                    .into_iter()
                    .map(|(name, years)| Topic {
                        name,
                        // BTreeMap 按年份升序
                        appearances: years
                            .into_iter()
                            .map(|(year, marks)| Appearance { year, marks })
                            .collect(),
                    })
                    .collect(),
            })
            .collect()
    }
}

/// 由原始试卷聚合出频率数据
pub fn aggregate_frequency(
    subject: &str,
    class_level: ClassLevel,
    papers: &[RawPaperFile],
) -> SubjectFrequencyDataset {
    let mut table = FrequencyTable::default();

    for file in papers {
        let year = file.paper.meta.year;
        for section in &file.paper.sections {
            for question in &section.questions {
                if let Some((chapter, topic)) = question.classified() {
                    table.record(chapter, topic, year, question.marks);
                }
            }
        }
    }

    SubjectFrequencyDataset {
        subject: subject.to_string(),
        class_level,
        chapters: table.into_chapters(),
    }
}

/// 构建 `frequency/class<N>_<subject>.json`
///
/// # 参数
/// - `store`: 数据集根目录
/// - `subject`: 科目名，同时用于匹配原始试卷文件名
/// - `class_level`: 年级
/// - `stream`: 原始数据子目录（如 `science`）
///
/// # 返回
/// 输出文件路径、读取的原始文件数和知识点数
pub async fn build_frequency(
    store: &DatasetStore,
    subject: &str,
    class_level: ClassLevel,
    stream: &str,
) -> AppResult<BuildSummary> {
    let papers = load_raw_papers(store, subject, class_level, stream).await?;
    let dataset = aggregate_frequency(subject, class_level, &papers);

    let output = store.frequency_path(&format!("{}_{}", class_level.prefix(), subject.to_lowercase()));
    write_json(&output, &dataset).await?;

    info!(
        "✅ 频率数据已生成: {} ({} 份试卷, {} 个章节, {} 个知识点)",
        output.display(),
        papers.len(),
        dataset.chapters.len(),
        dataset.topic_count()
    );

    Ok(BuildSummary {
        output,
        source_files: papers.len(),
        entries: dataset.topic_count(),
    })
}
