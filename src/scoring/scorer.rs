//! 知识点概率打分
//!
//! 概率 = 频次分(≤40) + 分值分(≤30) + 近年加成，总分封顶 100。
//! 参考年份由调用方传入，打分过程不读取系统时间。

use crate::models::{Appearance, Topic};

const FREQUENCY_POINTS_PER_APPEARANCE: u64 = 10;
const FREQUENCY_CAP: u64 = 40;
const MARKS_CAP: u64 = 30;
const PROBABILITY_CAP: u64 = 100;

/// 知识点概率打分器
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbabilityScorer {
    current_year: i32,
}

impl ProbabilityScorer {
    pub fn new(current_year: i32) -> Self {
        Self { current_year }
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    /// 距参考年份的年数（未来年份为负数，极端年份按饱和运算处理）
    pub fn years_ago(&self, year: i32) -> i32 {
        self.current_year.saturating_sub(year)
    }

    /// 计算知识点概率，范围 [0, 100]
    pub fn score(&self, topic: &Topic) -> f64 {
        self.score_appearances(&topic.appearances)
    }

    pub fn score_appearances(&self, appearances: &[Appearance]) -> f64 {
        if appearances.is_empty() {
            return 0.0;
        }

        let frequency = (appearances.len() as u64)
            .saturating_mul(FREQUENCY_POINTS_PER_APPEARANCE)
            .min(FREQUENCY_CAP);

        let marks = appearances
            .iter()
            .map(|a| a.marks as u64)
            .sum::<u64>()
            .min(MARKS_CAP);

        let recency: u64 = appearances
            .iter()
            .map(|a| self.recency_points(a.year))
            .sum();

        (frequency + marks + recency).min(PROBABILITY_CAP) as f64
    }

    /// 单次出现的近年加成：1 年内 15，2 年内 10，3 年内 5
    fn recency_points(&self, year: i32) -> u64 {
        match self.years_ago(year) {
            y if y <= 1 => 15,
            2 => 10,
            3 => 5,
            _ => 0,
        }
    }
}
