use crate::models::SubjectFrequencyDataset;
use crate::scoring::scorer::ProbabilityScorer;
use std::collections::{HashMap, HashSet};

/// 按 (章节, 知识点) 小写键预先计算好的概率表
///
/// 同名章节只取第一个，同一章节内同名知识点也只取第一个
#[derive(Debug, Clone, Default)]
pub struct TopicIndex {
    scores: HashMap<(String, String), f64>,
}

impl TopicIndex {
    pub fn build(dataset: &SubjectFrequencyDataset, scorer: &ProbabilityScorer) -> Self {
        let mut scores = HashMap::new();
        let mut seen_chapters = HashSet::new();

        for chapter in &dataset.chapters {
            let chapter_key = normalize(&chapter.name);
            if !seen_chapters.insert(chapter_key.clone()) {
                continue;
            }
            for topic in &chapter.topics {
                scores
                    .entry((chapter_key.clone(), normalize(&topic.name)))
                    .or_insert_with(|| scorer.score(topic));
            }
        }

        Self { scores }
    }

    /// 查不到时返回 0
    pub fn probability(&self, chapter: &str, topic: &str) -> f64 {
        self.scores
            .get(&(normalize(chapter), normalize(topic)))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Appearance, Chapter, ClassLevel, Topic};

    fn chapter(name: &str, topics: &[(&str, i32, u32)]) -> Chapter {
        Chapter {
            name: name.to_string(),
            topics: topics
                .iter()
                .map(|&(topic, year, marks)| Topic {
                    name: topic.to_string(),
                    appearances: vec![Appearance { year, marks }],
                })
                .collect(),
        }
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let dataset = SubjectFrequencyDataset {
            subject: "science".to_string(),
            class_level: ClassLevel::Ten,
            chapters: vec![chapter("Light", &[("Refraction", 2020, 3)])],
        };
        let index = TopicIndex::build(&dataset, &ProbabilityScorer::new(2025));

        assert_eq!(index.probability("LIGHT", "refraction"), 13.0);
        assert_eq!(index.probability("Light", "Reflection"), 0.0);
        assert_eq!(index.probability("Sound", "Refraction"), 0.0);
    }

    #[test]
    fn test_first_chapter_with_same_name_wins() {
        let dataset = SubjectFrequencyDataset {
            subject: "science".to_string(),
            class_level: ClassLevel::Ten,
            chapters: vec![
                chapter("Light", &[("Refraction", 2020, 3)]),
                chapter("light", &[("Lenses", 2024, 5)]),
            ],
        };
        let index = TopicIndex::build(&dataset, &ProbabilityScorer::new(2025));

        assert_eq!(index.len(), 1);
        assert_eq!(index.probability("Light", "Lenses"), 0.0);
    }
}
