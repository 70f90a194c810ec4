use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// 年级（只有 10 和 12 两种）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ClassLevel {
    /// 10 年级
    Ten,
    /// 12 年级
    Twelve,
}

impl ClassLevel {
    /// 数字形式
    pub fn number(self) -> u8 {
        match self {
            ClassLevel::Ten => 10,
            ClassLevel::Twelve => 12,
        }
    }

    /// 文件名前缀形式，例如 `class10`
    pub fn prefix(self) -> &'static str {
        match self {
            ClassLevel::Ten => "class10",
            ClassLevel::Twelve => "class12",
        }
    }

    /// 从科目 ID 推断年级
    ///
    /// `class12…` → 12，`class10…` → 10，其他情况默认 10
    pub fn from_subject_id(subject: &str) -> Self {
        if subject.starts_with("class12") {
            ClassLevel::Twelve
        } else {
            ClassLevel::Ten
        }
    }

    /// 解析 `class10` / `class12` / `10` / `12`
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value.trim().to_lowercase().as_str() {
            "class10" | "10" => Ok(ClassLevel::Ten),
            "class12" | "12" => Ok(ClassLevel::Twelve),
            other => Err(AppError::InvalidClassLevel {
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<u8> for ClassLevel {
    type Error = AppError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            10 => Ok(ClassLevel::Ten),
            12 => Ok(ClassLevel::Twelve),
            other => Err(AppError::InvalidClassLevel {
                value: other.to_string(),
            }),
        }
    }
}

impl From<ClassLevel> for u8 {
    fn from(level: ClassLevel) -> Self {
        level.number()
    }
}

impl std::fmt::Display for ClassLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// 目录中的科目信息
#[derive(Debug, Clone, Copy)]
pub struct SubjectInfo {
    pub name: &'static str,
    pub class_level: ClassLevel,
    pub stream: Option<&'static str>,
}

/// 已知科目目录（科目 ID 与数据文件名一致）
pub static SUBJECT_CATALOG: phf::OrderedMap<&'static str, SubjectInfo> = phf::phf_ordered_map! {
    "class10_maths_basic" => SubjectInfo { name: "Mathematics (Basic)", class_level: ClassLevel::Ten, stream: None },
    "class10_maths_standard" => SubjectInfo { name: "Mathematics (Standard)", class_level: ClassLevel::Ten, stream: None },
    "class10_science" => SubjectInfo { name: "Science", class_level: ClassLevel::Ten, stream: None },
    "class10_ss" => SubjectInfo { name: "Social Science", class_level: ClassLevel::Ten, stream: None },
    "class10_english" => SubjectInfo { name: "English", class_level: ClassLevel::Ten, stream: None },
    "class10_hindi" => SubjectInfo { name: "Hindi", class_level: ClassLevel::Ten, stream: None },
    "class12_physics" => SubjectInfo { name: "Physics", class_level: ClassLevel::Twelve, stream: Some("Science") },
    "class12_chemistry" => SubjectInfo { name: "Chemistry", class_level: ClassLevel::Twelve, stream: Some("Science") },
    "class12_maths" => SubjectInfo { name: "Mathematics", class_level: ClassLevel::Twelve, stream: Some("Science") },
    "class12_biology" => SubjectInfo { name: "Biology", class_level: ClassLevel::Twelve, stream: Some("Science") },
    "class12_accounts" => SubjectInfo { name: "Accountancy", class_level: ClassLevel::Twelve, stream: Some("Commerce") },
    "class12_bst" => SubjectInfo { name: "Business Studies", class_level: ClassLevel::Twelve, stream: Some("Commerce") },
    "class12_eco" => SubjectInfo { name: "Economics", class_level: ClassLevel::Twelve, stream: Some("Commerce") },
    "class12_history" => SubjectInfo { name: "History", class_level: ClassLevel::Twelve, stream: Some("Arts") },
    "class12_polsci" => SubjectInfo { name: "Political Science", class_level: ClassLevel::Twelve, stream: Some("Arts") },
    "class12_geo" => SubjectInfo { name: "Geography", class_level: ClassLevel::Twelve, stream: Some("Arts") },
    "class12_soc" => SubjectInfo { name: "Sociology", class_level: ClassLevel::Twelve, stream: Some("Arts") },
};

/// 查询科目目录
pub fn find_subject(subject_id: &str) -> Option<&'static SubjectInfo> {
    SUBJECT_CATALOG.get(subject_id.to_lowercase().as_str())
}

/// 试卷元信息中展示的科目名
///
/// 取下划线分隔的第二段并首字母大写，例如 `class10_maths_standard` → `Maths`
pub fn subject_label(subject_id: &str) -> String {
    match subject_id.split('_').nth(1) {
        Some(segment) => {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        }
        None => subject_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_level_from_subject_id() {
        assert_eq!(ClassLevel::from_subject_id("class12_physics"), ClassLevel::Twelve);
        assert_eq!(ClassLevel::from_subject_id("class10_science"), ClassLevel::Ten);
        assert_eq!(ClassLevel::from_subject_id("physics"), ClassLevel::Ten);
    }

    #[test]
    fn test_class_level_serde_as_number() {
        let json = serde_json::to_string(&ClassLevel::Twelve).unwrap();
        assert_eq!(json, "12");
        let parsed: ClassLevel = serde_json::from_str("10").unwrap();
        assert_eq!(parsed, ClassLevel::Ten);
        assert!(serde_json::from_str::<ClassLevel>("11").is_err());
    }

    #[test]
    fn test_subject_label() {
        assert_eq!(subject_label("class10_maths_standard"), "Maths");
        assert_eq!(subject_label("class12_physics"), "Physics");
        assert_eq!(subject_label("physics"), "physics");
    }

    #[test]
    fn test_catalog_lookup() {
        let info = find_subject("CLASS12_BST").unwrap();
        assert_eq!(info.name, "Business Studies");
        assert_eq!(info.class_level, ClassLevel::Twelve);
        assert!(find_subject("class11_art").is_none());
    }
}
