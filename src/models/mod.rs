//! # 数据模型模块
//!
//! 定义分析结果、词频、情感标签与批处理事件。
//!
//! ## 依赖关系
//! - 被 `analyzer/`, `batch/` 和 `commands/` 使用
//! - 子模块: analysis, event

pub mod analysis;
pub mod event;

pub use analysis::{AnalysisResult, Sentiment, TextStats, WordFrequency};
pub use event::{BatchEvent, BatchSummary};
