//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `analyze`: 并发分析一批文本文件
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: analyze

pub mod analyze;

use clap::{Parser, Subcommand};

/// textbatch - 并发批量文本分析
#[derive(Parser)]
#[command(name = "textbatch")]
#[command(version)]
#[command(
    about = "Concurrent batch text analysis: word statistics, top words and sentiment",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Analyze text files concurrently
    Analyze(analyze::AnalyzeArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::parse_from([
            "textbatch", "-vv", "analyze", "a.txt", "docs", "--jobs", "3", "--format", "csv",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Analyze(args) = cli.command;
        assert_eq!(args.inputs.len(), 2);
        assert_eq!(args.jobs, 3);
        assert_eq!(args.format, analyze::OutputFormat::Csv);
        assert_eq!(args.grace_secs, 60);
        assert_eq!(args.top, 10);
    }
}
