//! # analyze 命令实现
//!
//! 并发分析一批文本文件并输出结果。
//!
//! ## 功能
//! - 收集输入文件
//! - 通过 `BatchEngine` 并发分析
//! - 每个文件一个进度条，外加整体进度条
//! - 表格或 CSV 输出，可选逐文件详情
//! - 汇总统计与失败列表
//!
//! ## 依赖关系
//! - 使用 `cli/analyze.rs` 定义的参数
//! - 使用库中的 `batch/`, `models/`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::cli::analyze::{AnalyzeArgs, OutputFormat};
use crate::utils::{output, progress};

use textbatch::batch::{BatchEngine, EngineConfig, EventSink, FileCollector, ShutdownStatus};
use textbatch::error::{Result, TextBatchError};
use textbatch::models::{AnalysisResult, BatchEvent, BatchSummary};

use indicatif::{MultiProgress, ProgressBar};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tabled::{Table, Tabled};

/// 失败列表最多显示的条数
const MAX_LISTED_FAILURES: usize = 10;

/// 执行 analyze 命令
pub fn execute(args: AnalyzeArgs) -> Result<()> {
    output::print_header("Batch Text Analysis");

    let files = FileCollector::new(args.inputs.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect();

    if files.is_empty() {
        return Err(TextBatchError::NoInputs {
            pattern: args.pattern.clone(),
        });
    }

    let engine = BatchEngine::with_config(EngineConfig {
        workers: args.jobs,
        grace_period: Duration::from_secs(args.grace_secs),
    });
    output::print_info(&format!(
        "Analyzing {} files with {} worker threads",
        files.len(),
        engine.workers()
    ));

    let mut sink = TerminalSink::new(files.len());
    let results = engine.run_batch(&files, &mut sink)?;

    if let ShutdownStatus::Forced { abandoned } = engine.shutdown() {
        output::print_warning(&format!("{} tasks abandoned at shutdown", abandoned));
    }

    let top = usize::from(args.top);
    match args.format {
        OutputFormat::Table => print_table(&results, top),
        OutputFormat::Csv => write_csv(&results, top)?,
    }

    if args.details {
        for (result, path) in results.iter().zip(&files) {
            eprintln!("{}", render_details(result, path, top));
        }
    }

    print_summary(&results);
    Ok(())
}

// ─────────────────────────────────────────────────────────────
// 进度显示
// ─────────────────────────────────────────────────────────────

/// 把批处理事件渲染为终端进度条
struct TerminalSink {
    multi: MultiProgress,
    overall: ProgressBar,
    bars: HashMap<usize, ProgressBar>,
}

impl TerminalSink {
    fn new(total: usize) -> Self {
        let multi = MultiProgress::new();
        let overall = multi.add(progress::create_progress_bar(total as u64, "Analyzing"));
        Self {
            multi,
            overall,
            bars: HashMap::new(),
        }
    }

    fn close_bar(&mut self, index: usize) {
        if let Some(bar) = self.bars.remove(&index) {
            bar.finish_and_clear();
            self.multi.remove(&bar);
        }
    }
}

impl EventSink for TerminalSink {
    fn emit(&mut self, event: BatchEvent) {
        match event {
            BatchEvent::FileStarted { index, name } => {
                let bar = self
                    .multi
                    .insert_before(&self.overall, progress::create_file_bar(&name));
                self.bars.insert(index, bar);
            }
            BatchEvent::FileProgress {
                index, fraction, ..
            } => {
                if let Some(bar) = self.bars.get(&index) {
                    bar.set_position(progress::fraction_to_position(fraction));
                }
            }
            BatchEvent::FileCompleted { index, .. } => self.close_bar(index),
            BatchEvent::FileFailed {
                index,
                name,
                error_message,
            } => {
                self.close_bar(index);
                self.multi.suspend(|| {
                    output::print_warning(&format!("{}: {}", name, error_message));
                });
            }
            BatchEvent::OverallProgress { completed, .. } => {
                self.overall.set_position(completed as u64);
            }
            BatchEvent::BatchCompleted { .. } => self.overall.finish_and_clear(),
        }
    }
}

// ─────────────────────────────────────────────────────────────
// 结果输出
// ─────────────────────────────────────────────────────────────

/// 表格结果行
#[derive(Debug, Clone, Tabled)]
struct ResultRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Words")]
    words: usize,
    #[tabled(rename = "Unique")]
    unique: usize,
    #[tabled(rename = "Chars")]
    chars: usize,
    #[tabled(rename = "Lines")]
    lines: usize,
    #[tabled(rename = "Sentiment")]
    sentiment: String,
    #[tabled(rename = "Top Words")]
    top_words: String,
}

/// CSV 结果行
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    file: &'a str,
    status: &'static str,
    error: String,
    total_words: usize,
    unique_words: usize,
    total_characters: usize,
    total_lines: usize,
    sentiment: String,
    top_words: String,
}

fn status_label(result: &AnalysisResult) -> &'static str {
    if result.is_success() {
        "Completed"
    } else {
        "Error"
    }
}

/// 格式化高频词，例如 `the(2) cat(2)`
fn format_top_words(result: &AnalysisResult, top: usize) -> String {
    result
        .top_words()
        .iter()
        .take(top)
        .map(|w| format!("{}({})", w.word(), w.frequency()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_table(results: &[AnalysisResult], top: usize) {
    let rows: Vec<ResultRow> = results
        .iter()
        .enumerate()
        .map(|(i, r)| ResultRow {
            index: i + 1,
            file: r.file_name().to_string(),
            status: status_label(r),
            words: r.total_words(),
            unique: r.unique_words(),
            chars: r.total_characters(),
            lines: r.total_lines(),
            sentiment: r.sentiment().to_string(),
            top_words: format_top_words(r, top),
        })
        .collect();

    println!("{}", Table::new(rows));
}

fn write_csv(results: &[AnalysisResult], top: usize) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(io::stdout().lock());
    for r in results {
        wtr.serialize(CsvRow {
            file: r.file_name(),
            status: status_label(r),
            error: r.error_message().unwrap_or_default(),
            total_words: r.total_words(),
            unique_words: r.unique_words(),
            total_characters: r.total_characters(),
            total_lines: r.total_lines(),
            sentiment: r.sentiment().to_string(),
            top_words: format_top_words(r, top),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// 文件大小的可读形式
fn format_file_size(size: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = 1024.0 * 1024.0;

    if size < 1024 {
        format!("{} B", size)
    } else if size < 1024 * 1024 {
        format!("{:.2} KB", size as f64 / KB)
    } else {
        format!("{:.2} MB", size as f64 / MB)
    }
}

/// 单文件详情
fn render_details(result: &AnalysisResult, path: &Path, top: usize) -> String {
    let size = fs::metadata(path)
        .map(|m| format_file_size(m.len()))
        .unwrap_or_else(|_| "-".to_string());

    let mut details = String::new();
    details.push_str(&format!("File Name: {}\n", result.file_name()));
    details.push_str(&format!("Full Path: {}\n", display_path(path)));
    details.push_str(&format!("Size: {}\n", size));
    details.push_str(&format!("Status: {}\n", status_label(result)));

    if let Some(message) = result.error_message() {
        details.push_str(&format!("Error: {}\n", message));
        return details;
    }

    details.push_str("\n=== ANALYSIS RESULTS ===\n");
    details.push_str(&format!("Total Words: {}\n", result.total_words()));
    details.push_str(&format!("Unique Words: {}\n", result.unique_words()));
    details.push_str(&format!("Total Characters: {}\n", result.total_characters()));
    details.push_str(&format!("Total Lines: {}\n", result.total_lines()));
    details.push_str(&format!("Sentiment: {}\n", result.sentiment()));

    details.push_str(&format!("\n=== TOP {} FREQUENT WORDS ===\n", top));
    for (rank, w) in result.top_words().iter().take(top).enumerate() {
        details.push_str(&format!("{}. {} ({})\n", rank + 1, w.word(), w.frequency()));
    }

    details
}

fn display_path(path: &Path) -> String {
    fs::canonicalize(path)
        .unwrap_or_else(|_| PathBuf::from(path))
        .display()
        .to_string()
}

fn print_summary(results: &[AnalysisResult]) {
    let summary = BatchSummary::from_results(results);

    output::print_separator();
    let status = format!(
        "Completed: {} of {} files analyzed successfully",
        summary.succeeded, summary.total_files
    );
    if summary.failed == 0 {
        output::print_success(&status);
    } else {
        output::print_done(&status);
    }
    output::print_info(&format!(
        "Totals: {} words, {} characters, {} lines",
        summary.total_words, summary.total_characters, summary.total_lines
    ));
    output::print_info(&format!(
        "Sentiment: {} positive, {} negative, {} neutral",
        summary.positive, summary.negative, summary.neutral
    ));

    if summary.failed > 0 {
        output::print_warning("Failed files:");
        for r in results
            .iter()
            .filter(|r| !r.is_success())
            .take(MAX_LISTED_FAILURES)
        {
            output::print_error(&format!(
                "  {}: {}",
                r.file_name(),
                r.error_message().unwrap_or_default()
            ));
        }
        if summary.failed > MAX_LISTED_FAILURES {
            output::print_warning(&format!(
                "  ... and {} more",
                summary.failed - MAX_LISTED_FAILURES
            ));
        }
    }
}
