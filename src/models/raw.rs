use serde::Deserialize;

/// 原始试卷文件（每年一份，离线构建的输入）
#[derive(Debug, Clone, Deserialize)]
pub struct RawPaper {
    pub meta: RawMeta,
    pub sections: Vec<RawSection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMeta {
    pub year: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSection {
    pub section: String,
    #[serde(rename = "type")]
    pub section_type: String,
    pub questions: Vec<RawQuestion>,
}

/// 原始题目，缺少章节或知识点的题目在构建时跳过
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuestion {
    #[serde(default)]
    pub chapter: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    pub marks: u32,
    #[serde(default)]
    pub question_text: String,
}

impl RawQuestion {
    /// 章节和知识点都非空时返回二者
    pub fn classified(&self) -> Option<(&str, &str)> {
        match (self.chapter.as_deref(), self.topic.as_deref()) {
            (Some(chapter), Some(topic)) if !chapter.is_empty() && !topic.is_empty() => {
                Some((chapter, topic))
            }
            _ => None,
        }
    }
}
