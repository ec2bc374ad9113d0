//! # 单文件文本分析器
//!
//! 纯同步的单文件分析，不涉及任何并发。
//!
//! ## 功能
//! - 前置检查（文件存在、可读）
//! - 读取并按行规范化内容
//! - 词数、不同词数、字符数、行数
//! - 前 10 高频词
//! - 词典情感分类
//! - 固定检查点的进度回调
//!
//! 所有失败（包括分析过程中的 panic）都被转换为失败的 `AnalysisResult`，
//! 不会越过 `analyze_file` 的边界。
//!
//! ## 依赖关系
//! - 被 `batch/engine.rs` 调用
//! - 使用 `models/`, `error.rs`
//! - 子模块: text, sentiment

pub mod sentiment;
pub mod text;

use crate::error::AnalysisError;
use crate::models::{AnalysisResult, TextStats};

use std::any::Any;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

/// 进度检查点（固定值，与实际工作量无关）
pub mod checkpoints {
    pub const OPENED: f64 = 0.1;
    pub const READ: f64 = 0.3;
    pub const TOKENIZED: f64 = 0.5;
    pub const UNIQUE_COUNTED: f64 = 0.6;
    pub const SIZE_COUNTED: f64 = 0.7;
    pub const RANKED: f64 = 0.9;
    pub const DONE: f64 = 1.0;
}

/// 单文件进度监听器
///
/// `on_error` 仅作通知；返回的 `AnalysisResult` 才是权威结果。
pub trait ProgressListener {
    fn on_progress(&mut self, fraction: f64);

    fn on_complete(&mut self, _result: &AnalysisResult) {}

    fn on_error(&mut self, _message: &str) {}
}

impl<F: FnMut(f64)> ProgressListener for F {
    fn on_progress(&mut self, fraction: f64) {
        self(fraction)
    }
}

/// 忽略所有回调
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressListener for NoProgress {
    fn on_progress(&mut self, _fraction: f64) {}
}

/// 文本分析器（无状态，可在线程间共享）
#[derive(Debug, Clone, Copy, Default)]
pub struct Analyzer;

impl Analyzer {
    pub fn new() -> Self {
        Analyzer
    }

    /// 分析单个文件（不需要进度）
    pub fn analyze(&self, path: &Path) -> AnalysisResult {
        self.analyze_file(path, &mut NoProgress)
    }

    /// 分析单个文件并通过监听器报告进度
    pub fn analyze_file<L>(&self, path: &Path, listener: &mut L) -> AnalysisResult
    where
        L: ProgressListener + ?Sized,
    {
        let name = display_name(path);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.run_pipeline(path, &name, &mut *listener)
        }));

        let error = match outcome {
            Ok(Ok(result)) => {
                listener.on_complete(&result);
                return result;
            }
            Ok(Err(err)) => err,
            Err(payload) => AnalysisError::Unexpected(panic_message(payload.as_ref())),
        };

        listener.on_error(&error.to_string());
        AnalysisResult::failed(name, error)
    }

    fn run_pipeline<L>(
        &self,
        path: &Path,
        name: &str,
        listener: &mut L,
    ) -> Result<AnalysisResult, AnalysisError>
    where
        L: ProgressListener + ?Sized,
    {
        if !path.exists() {
            return Err(AnalysisError::NotFound);
        }
        let file = File::open(path).map_err(open_error)?;
        listener.on_progress(checkpoints::OPENED);

        let content = read_content(file).map_err(|e| AnalysisError::Io(e.to_string()))?;
        listener.on_progress(checkpoints::READ);

        let lowered = content.to_lowercase();
        let words = text::tokenize(&lowered);
        listener.on_progress(checkpoints::TOKENIZED);

        let unique_words = text::count_unique(&words);
        listener.on_progress(checkpoints::UNIQUE_COUNTED);

        let total_characters = text::count_characters(&content);
        let total_lines = text::count_lines(&content);
        listener.on_progress(checkpoints::SIZE_COUNTED);

        let top_words = text::rank_top_words(&words, text::TOP_WORDS);
        listener.on_progress(checkpoints::RANKED);

        let sentiment = sentiment::classify(&lowered);
        listener.on_progress(checkpoints::DONE);

        let stats = TextStats {
            total_words: words.len(),
            unique_words,
            total_characters,
            total_lines,
            top_words,
        };
        Ok(AnalysisResult::succeeded(name, stats, sentiment))
    }
}

/// 结果中使用的文件名
pub fn display_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None if path.as_os_str().is_empty() => "Unknown".to_string(),
        None => path.display().to_string(),
    }
}

fn open_error(err: io::Error) -> AnalysisError {
    match err.kind() {
        io::ErrorKind::NotFound => AnalysisError::NotFound,
        io::ErrorKind::PermissionDenied => AnalysisError::PermissionDenied,
        _ => AnalysisError::Io(err.to_string()),
    }
}

/// 读取全部内容；非法 UTF-8 以 U+FFFD 替换
fn read_content(file: File) -> io::Result<String> {
    let mut bytes = Vec::new();
    BufReader::new(file).read_to_end(&mut bytes)?;
    Ok(text::normalize_lines(&String::from_utf8_lossy(&bytes)))
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
