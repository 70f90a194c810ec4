use crate::error::AppResult;
use crate::models::{Mode, ModeTable, TopicReport};
use crate::scoring::{ProbabilityScorer, TopicFilter};
use crate::storage::DatasetStore;
use tracing::info;

/// 高频考点查询
pub struct TopicService {
    store: DatasetStore,
    filter: TopicFilter,
    modes: ModeTable,
}

impl TopicService {
    pub fn new(store: DatasetStore, scorer: ProbabilityScorer, modes: ModeTable) -> Self {
        Self {
            store,
            filter: TopicFilter::new(scorer, modes.clone()),
            modes,
        }
    }

    /// 模式名不区分大小写
    pub async fn topics(&self, subject: &str, mode: &str) -> AppResult<TopicReport> {
        let mode: Mode = mode.to_uppercase().parse()?;
        info!("📥 查询高频考点: {} ({})", subject, mode);

        let dataset = self.store.load_frequency(subject).await?;
        let total_topics = dataset.topic_count();
        let topics = self.filter.filter(&dataset, mode);

        info!(
            "✅ {} 个知识点中有 {} 个达到 {} 阈值",
            total_topics,
            topics.len(),
            mode
        );

        Ok(TopicReport {
            filtered_count: topics.len(),
            high_probability_topics: topics,
            subject: dataset.subject,
            class_level: dataset.class_level,
            mode,
            threshold: self.modes.settings(mode).display_percent,
            total_topics,
        })
    }
}
