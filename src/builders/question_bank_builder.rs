use crate::builders::raw_source::{load_raw_papers, RawPaperFile};
use crate::builders::BuildSummary;
use crate::error::AppResult;
use crate::models::{ClassLevel, QuestionRecord};
use crate::storage::json_file::write_json;
use crate::storage::DatasetStore;
use tracing::info;

/// 把原始试卷展开成扁平题库，跳过缺少章节或知识点的题目
pub fn flatten_questions(papers: &[RawPaperFile]) -> Vec<QuestionRecord> {
    let mut bank = Vec::new();

    for file in papers {
        let year = file.paper.meta.year;
        for section in &file.paper.sections {
            for question in &section.questions {
                let Some((chapter, topic)) = question.classified() else {
                    continue;
                };
                bank.push(QuestionRecord {
                    year,
                    section_label: section.section.clone(),
                    section_type: section.section_type.clone(),
                    chapter: chapter.to_string(),
                    topic: topic.to_string(),
                    marks: question.marks,
                    question_text: question.question_text.clone(),
                });
            }
        }
    }

    bank
}

/// 构建 `questionBank/class<N>_<subject>.json`
pub async fn build_question_bank(
    store: &DatasetStore,
    subject: &str,
    class_level: ClassLevel,
    stream: &str,
) -> AppResult<BuildSummary> {
    let papers = load_raw_papers(store, subject, class_level, stream).await?;
    let bank = flatten_questions(&papers);

    let output =
        store.question_bank_path(&format!("{}_{}", class_level.prefix(), subject.to_lowercase()));
    write_json(&output, &bank).await?;

    info!(
        "✅ 题库已生成: {} ({} 份试卷, {} 题)",
        output.display(),
        papers.len(),
        bank.len()
    );

    Ok(BuildSummary {
        output,
        source_files: papers.len(),
        entries: bank.len(),
    })
}
