//! 预测试卷组卷
//!
//! 按模板顺序逐个大题选题：
//! 1. 取分值等于该大题每题分值的候选题
//! 2. 候选题得分 = 所属知识点概率 + 近年加成
//! 3. 按得分降序（同分保持题库顺序）贪心选取
//! 4. 整张试卷共用一个已选集合，同一题干只出现一次，前面的大题优先

use crate::models::{
    subject, AssembledPaper, ClassLevel, PaperMeta, PaperPattern, PaperSection, QuestionRecord,
    SectionPattern, SelectedQuestion, SubjectFrequencyDataset,
};
use crate::scoring::scorer::ProbabilityScorer;
use crate::scoring::topic_index::TopicIndex;
use std::collections::HashSet;
use tracing::{debug, warn};

/// 试卷元信息中的固定标签
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperLabels {
    pub series: String,
    pub set: String,
    pub paper_code: String,
}

impl Default for PaperLabels {
    fn default() -> Self {
        Self {
            series: "ExamGod".to_string(),
            set: "Predicted-Set-1".to_string(),
            paper_code: "Predicted-01".to_string(),
        }
    }
}

/// 候选题及其得分（得分只在选题时使用，不进入输出）
struct Candidate<'a> {
    record: &'a QuestionRecord,
    final_score: f64,
}

/// 组卷器
#[derive(Debug, Clone)]
pub struct PaperAssembler {
    scorer: ProbabilityScorer,
    labels: PaperLabels,
}

impl PaperAssembler {
    pub fn new(scorer: ProbabilityScorer) -> Self {
        Self {
            scorer,
            labels: PaperLabels::default(),
        }
    }

    pub fn with_labels(mut self, labels: PaperLabels) -> Self {
        self.labels = labels;
        self
    }

    /// 组装一张预测试卷
    ///
    /// 相同输入总是得到相同输出；候选不足的大题返回的题目会少于模板要求
    ///
    /// # 参数
    /// - `question_bank`: 科目题库
    /// - `frequency`: 科目频率数据，用于给候选题打分
    /// - `pattern`: 年级对应的试卷模板
    /// - `subject_id`: 科目 ID，用于生成显示名称
    /// - `class_level`: 年级
    ///
    /// # 返回
    /// 按模板顺序排列各大题的试卷，整卷内题干不重复
    pub fn assemble(
        &self,
        question_bank: &[QuestionRecord],
        frequency: &SubjectFrequencyDataset,
        pattern: &PaperPattern,
        subject_id: &str,
        class_level: ClassLevel,
    ) -> AssembledPaper {
        let index = TopicIndex::build(frequency, &self.scorer);
        let mut used_questions: HashSet<String> = HashSet::new();

        debug!(
            "开始组卷: {} (class {}), 题库 {} 题, 知识点 {} 个",
            subject_id,
            class_level,
            question_bank.len(),
            index.len()
        );

        let sections = pattern
            .sections
            .iter()
            .map(|section| PaperSection {
                section_label: section.section_label.clone(),
                section_type: section.section_type.clone(),
                marks_per_question: section.marks_per_question,
                questions: self.pick_questions(question_bank, &index, section, &mut used_questions),
            })
            .collect();

        AssembledPaper {
            meta: PaperMeta {
                series: self.labels.series.clone(),
                set: self.labels.set.clone(),
                paper_code: self.labels.paper_code.clone(),
                subject: subject::subject_label(subject_id),
                class_level,
                time_allowed: pattern.time_allowed.clone(),
                maximum_marks: pattern.total_marks,
                total_questions: pattern.total_questions,
            },
            sections,
        }
    }

    /// 为单个大题选题，`used_questions` 在整张试卷的各大题之间共享
    fn pick_questions(
        &self,
        question_bank: &[QuestionRecord],
        index: &TopicIndex,
        section: &SectionPattern,
        used_questions: &mut HashSet<String>,
    ) -> Vec<SelectedQuestion> {
        let mut candidates: Vec<Candidate<'_>> = question_bank
            .iter()
            .filter(|q| q.marks == section.marks_per_question)
            .map(|q| Candidate {
                record: q,
                final_score: index.probability(&q.chapter, &q.topic) + self.recency_bonus(q.year),
            })
            .collect();

        // sort_by 是稳定排序，同分时保持题库顺序
        candidates.sort_by(|a, b| {
            b.final_score
                .partial_cmp(&a.final_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut selected = Vec::with_capacity(section.question_count);
        for candidate in &candidates {
            if selected.len() >= section.question_count {
                break;
            }
            if used_questions.contains(&candidate.record.question_text) {
                continue;
            }
            debug!(
                "  [{}] 选中 ({:.1}): {}",
                section.section_label,
                candidate.final_score,
                crate::utils::logging::truncate_text(&candidate.record.question_text, 40)
            );
            used_questions.insert(candidate.record.question_text.clone());
            selected.push(SelectedQuestion::from(candidate.record));
        }

        if selected.len() < section.question_count {
            warn!(
                "⚠️ Section {} 候选题不足: 需要 {} 题, 实际 {} 题 ({} 分题共 {} 个候选)",
                section.section_label,
                section.question_count,
                selected.len(),
                section.marks_per_question,
                candidates.len()
            );
        }

        selected
    }

    /// 近年加成：2 年内 +5，4 年内 +2
    fn recency_bonus(&self, year: i32) -> f64 {
        match self.scorer.years_ago(year) {
            y if y <= 2 => 5.0,
            y if y <= 4 => 2.0,
            _ => 0.0,
        }
    }
}
