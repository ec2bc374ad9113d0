//! # analyze 子命令 CLI 定义
//!
//! 并发分析一批文本文件。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/analyze.rs`

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 结果输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human readable table
    #[default]
    Table,
    /// CSV on stdout
    Csv,
}

/// analyze 子命令参数
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Files or directories to analyze
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// File pattern(s) used inside directories (comma-separated)
    #[arg(short, long, default_value = "*.txt")]
    pub pattern: String,

    /// Search directories recursively
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Number of worker threads (0 = all cores)
    #[arg(short, long, default_value_t = 0, env = "TEXTBATCH_JOBS")]
    pub jobs: usize,

    /// Seconds to wait for running tasks on shutdown
    #[arg(long, default_value_t = 60, env = "TEXTBATCH_GRACE_SECS")]
    pub grace_secs: u64,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Print the detailed report for every file
    #[arg(short, long, default_value_t = false)]
    pub details: bool,

    /// Number of top words to display (1-10)
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub top: u8,
}
