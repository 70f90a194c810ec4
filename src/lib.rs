//! # Exam Forecast
//!
//! 根据历年真题数据预测高频考点并组装预测试卷的 Rust 应用程序
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models / Storage）
//! - `models/` - 频率数据、题库、试卷模板、模式表等数据结构
//! - `storage/` - 数据集读取（含文件名回退规则）和结果缓存
//!
//! ### ② 计算层（Scoring）
//! - `ProbabilityScorer` - 知识点概率打分（参考年份显式传入）
//! - `TopicFilter` - 按模式阈值筛选高频考点
//! - `PaperAssembler` - 按模板逐大题选题，整卷去重
//! - `rank_questions` - 题库浏览时的重要度排序
//!
//! ### ③ 业务层（Services / Clients）
//! - `TopicService` / `PaperService` / `QuestionService` - 查询入口
//! - `ExplanationService` - 题目讲解，模型不可用时回退到固定模板
//! - `LlmClient` - OpenAI 兼容接口的讲解生成
//!
//! ### ④ 离线构建（Builders）
//! - `build_frequency` / `build_question_bank` - 由原始试卷生成数据集
//!
//! ## 模块结构

pub mod app;
pub mod builders;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod scoring;
pub mod services;
pub mod storage;
pub mod utils;

// 重新导出常用类型
pub use app::{App, Command};
pub use config::{Config, ExamRules};
pub use error::{AppError, AppResult};
pub use scoring::{PaperAssembler, ProbabilityScorer, TopicFilter};
