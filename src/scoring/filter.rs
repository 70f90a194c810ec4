use crate::error::AppResult;
use crate::models::{Mode, ModeTable, RecentYears, ScoredTopic, SubjectFrequencyDataset};
use crate::scoring::scorer::ProbabilityScorer;
use tracing::debug;

/// 近年范围：距参考年份 3 年以内
const RECENT_WINDOW_YEARS: i32 = 3;

/// 按模式阈值筛选高频考点
#[derive(Debug, Clone)]
pub struct TopicFilter {
    scorer: ProbabilityScorer,
    modes: ModeTable,
}

impl TopicFilter {
    pub fn new(scorer: ProbabilityScorer, modes: ModeTable) -> Self {
        Self { scorer, modes }
    }

    /// 按模式名筛选，模式名必须是 `PASS` 或 `AVG`
    pub fn filter_by_name(
        &self,
        dataset: &SubjectFrequencyDataset,
        mode: &str,
    ) -> AppResult<Vec<ScoredTopic>> {
        let mode: Mode = mode.parse()?;
        Ok(self.filter(dataset, mode))
    }

    /// 返回概率不低于阈值的知识点，按概率降序
    ///
    /// 概率相同的知识点保持章节 / 知识点的原始顺序
    pub fn filter(&self, dataset: &SubjectFrequencyDataset, mode: Mode) -> Vec<ScoredTopic> {
        let threshold = self.modes.threshold(mode);
        debug!(
            "筛选知识点: 模式 {}, 阈值 {}, 章节数 {}",
            mode,
            threshold,
            dataset.chapters.len()
        );

        let mut results = Vec::new();

        for chapter in &dataset.chapters {
            for topic in &chapter.topics {
                let probability = self.scorer.score(topic);

                if probability < threshold {
                    debug!("  ✗ {} - {}: {}", chapter.name, topic.name, probability);
                    continue;
                }
                debug!("  ✓ {} - {}: {}", chapter.name, topic.name, probability);

                let mut recent_years: Vec<i32> = topic
                    .appearances
                    .iter()
                    .filter(|a| self.scorer.years_ago(a.year) <= RECENT_WINDOW_YEARS)
                    .map(|a| a.year)
                    .collect();
                recent_years.sort_unstable_by(|a, b| b.cmp(a));

                let mut all_years: Vec<i32> = topic.appearances.iter().map(|a| a.year).collect();
                all_years.sort_unstable_by(|a, b| b.cmp(a));

                results.push(ScoredTopic {
                    chapter: chapter.name.clone(),
                    name: topic.name.clone(),
                    probability: round_one_decimal(probability),
                    appeared_count: topic.appearances.len(),
                    recent_years: RecentYears::from_years(recent_years),
                    all_years,
                    total_marks: topic.total_marks(),
                });
            }
        }

        results.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        debug!("筛选完成: 共 {} 个知识点达到阈值", results.len());
        results
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
