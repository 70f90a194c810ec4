use crate::config::ExamRules;
use crate::error::{AppError, AppResult, ConfigError, FileError};
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载模式和试卷模板
pub async fn load_rules(rules_file_path: &Path) -> AppResult<ExamRules> {
    let path_display = rules_file_path.display().to_string();
    let content = fs::read_to_string(rules_file_path)
        .await
        .map_err(|e| AppError::file_read_failed(&path_display, e))?;

    let rules = parse_rules(&content, &path_display)?;

    tracing::info!("已加载规则文件: {}", path_display);
    Ok(rules)
}

/// 解析规则文本并校验
pub fn parse_rules(content: &str, source_name: &str) -> AppResult<ExamRules> {
    let rules: ExamRules = toml::from_str(content).map_err(|e| {
        AppError::File(FileError::TomlParseFailed {
            path: source_name.to_string(),
            source: e,
        })
    })?;

    for (mode, settings) in [("PASS", &rules.modes.pass), ("AVG", &rules.modes.avg)] {
        if !(0.0..=100.0).contains(&settings.threshold) {
            return Err(ConfigError::InvalidRules {
                message: format!("{} 的阈值 {} 不在 0-100 之间", mode, settings.threshold),
            }
            .into());
        }
    }

    for (name, pattern) in [
        ("class10", rules.patterns.class10.as_ref()),
        ("class12", rules.patterns.class12.as_ref()),
    ] {
        let Some(pattern) = pattern else { continue };
        let marks: u32 = pattern
            .sections
            .iter()
            .map(|s| s.marks_per_question * s.question_count as u32)
            .sum();
        if marks != pattern.total_marks {
            tracing::warn!(
                "⚠️ {} 模板各大题分值之和 {} 与总分 {} 不一致",
                name,
                marks,
                pattern.total_marks
            );
        }
    }

    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassLevel, Mode};

    const RULES: &str = r#"
[modes.PASS]
threshold = 45.0
display_percent = 80
description = "Core Basics"

[modes.AVG]
threshold = 25.0
display_percent = 60
description = "Standard Prep"

[patterns.class12]
time_allowed = "3 Hours"
total_marks = 10
total_questions = 4

[[patterns.class12.sections]]
section = "A"
type = "MCQ"
marks = 1
count = 2

[[patterns.class12.sections]]
section = "B"
type = "Long Answer"
marks = 4
count = 2
"#;

    #[test]
    fn test_parse_rules_file() {
        let rules = parse_rules(RULES, "rules.toml").unwrap();
        assert_eq!(rules.modes.threshold(Mode::Pass), 45.0);
        assert_eq!(rules.modes.settings(Mode::Avg).display_percent, 60);
        assert!(rules.patterns.pattern_for(ClassLevel::Ten).is_err());

        let pattern = rules.patterns.pattern_for(ClassLevel::Twelve).unwrap();
        assert_eq!(pattern.sections.len(), 2);
        assert_eq!(pattern.sections[1].marks_per_question, 4);
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let rules = parse_rules("", "empty.toml").unwrap();
        assert_eq!(rules, ExamRules::default());
    }

    #[test]
    fn test_threshold_out_of_range_is_rejected() {
        let bad = RULES.replace("threshold = 45.0", "threshold = 140.0");
        assert!(matches!(
            parse_rules(&bad, "rules.toml"),
            Err(AppError::Config(ConfigError::InvalidRules { .. }))
        ));
    }

    #[test]
    fn test_bundled_rules_match_defaults() {
        let bundled = include_str!("../../../config/rules.toml");
        let rules = parse_rules(bundled, "config/rules.toml").unwrap();
        assert_eq!(rules, ExamRules::default());
    }

    #[tokio::test]
    async fn test_load_rules_missing_file() {
        let result = load_rules(Path::new("/nonexistent/rules.toml")).await;
        assert!(matches!(result, Err(AppError::File(FileError::ReadFailed { .. }))));
    }

    #[tokio::test]
    async fn test_load_rules_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.toml");
        tokio::fs::write(&path, RULES).await.unwrap();

        let rules = load_rules(&path).await.unwrap();
        assert_eq!(rules.modes.threshold(Mode::Pass), 45.0);
    }
}
