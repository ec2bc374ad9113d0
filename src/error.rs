//! # 统一错误处理模块
//!
//! 定义 textbatch 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 错误分层
//! - `AnalysisError`: 单文件分析失败，作为数据存入 `AnalysisResult`，从不向上传播
//! - `EngineError`: 批处理引擎拒绝提交（唯一的整批失败条件）
//! - `TextBatchError`: 命令行外壳的应用级错误
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use serde::Serialize;
use thiserror::Error;

// ─────────────────────────────────────────────────────────────
// 单文件分析错误
// ─────────────────────────────────────────────────────────────

/// 单文件分析失败原因
///
/// 每个变体对单个文件都是终止性的，只会被记录在结果中。
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AnalysisError {
    #[error("File does not exist")]
    NotFound,

    #[error("File cannot be read - permission denied")]
    PermissionDenied,

    #[error("Error reading file: {0}")]
    Io(String),

    #[error("Unexpected error during analysis: {0}")]
    Unexpected(String),

    /// 由引擎合成：任务被取消或在分析器之外崩溃
    #[error("Error during concurrent analysis: {0}")]
    Scheduling(String),
}

// ─────────────────────────────────────────────────────────────
// 引擎错误
// ─────────────────────────────────────────────────────────────

/// 批处理引擎拒绝执行
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    #[error("Batch rejected: engine is shutting down")]
    ShuttingDown,

    #[error("Batch rejected: engine has been shut down")]
    ShutDown,

    #[error("Batch rejected: worker pool could not be created")]
    PoolUnavailable,
}

// ─────────────────────────────────────────────────────────────
// 应用错误
// ─────────────────────────────────────────────────────────────

/// textbatch 统一错误类型
#[derive(Error, Debug)]
pub enum TextBatchError {
    #[error("No input files found (pattern: {pattern})")]
    NoInputs { pattern: String },

    #[error("Invalid file pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to write output")]
    Io(#[from] std::io::Error),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, TextBatchError>;
