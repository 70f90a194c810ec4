use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 备考模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// 及格冲刺
    #[serde(rename = "PASS")]
    Pass,
    /// 中等水平
    #[serde(rename = "AVG")]
    Avg,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Pass => "PASS",
            Mode::Avg => "AVG",
        }
    }
}

impl FromStr for Mode {
    type Err = AppError;

    /// 精确匹配 `PASS` / `AVG`，大小写归一化由调用方负责
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PASS" => Ok(Mode::Pass),
            "AVG" => Ok(Mode::Avg),
            other => Err(AppError::InvalidMode {
                mode: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单个模式的设置
///
/// `threshold` 是内部概率阈值，`display_percent` 是界面展示的百分比，两者互相独立
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeSettings {
    pub threshold: f64,
    pub display_percent: u8,
    pub description: String,
}

/// 模式表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeTable {
    #[serde(rename = "PASS")]
    pub pass: ModeSettings,
    #[serde(rename = "AVG")]
    pub avg: ModeSettings,
}

impl ModeTable {
    pub fn settings(&self, mode: Mode) -> &ModeSettings {
        match mode {
            Mode::Pass => &self.pass,
            Mode::Avg => &self.avg,
        }
    }

    pub fn threshold(&self, mode: Mode) -> f64 {
        self.settings(mode).threshold
    }
}

impl Default for ModeTable {
    fn default() -> Self {
        Self {
            pass: ModeSettings {
                threshold: 40.0,
                display_percent: 75,
                description: "Core Basics (75%+ probability)".to_string(),
            },
            avg: ModeSettings {
                threshold: 20.0,
                display_percent: 55,
                description: "Standard Prep (55%+ probability)".to_string(),
            },
        }
    }
}
