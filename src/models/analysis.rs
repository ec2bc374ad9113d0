//! # 单文件分析结果数据模型
//!
//! 存储一次文件分析的统计信息、高频词与情感标签。
//!
//! ## 依赖关系
//! - 被 `analyzer/` 创建
//! - 被 `batch/engine.rs`, `commands/analyze.rs` 使用

use crate::error::AnalysisError;

use serde::Serialize;
use std::fmt;

/// 情感标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    /// 分析失败时使用
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "Positive"),
            Sentiment::Negative => write!(f, "Negative"),
            Sentiment::Neutral => write!(f, "Neutral"),
            Sentiment::NotApplicable => write!(f, "N/A"),
        }
    }
}

/// 词频对
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordFrequency {
    word: String,
    frequency: usize,
}

impl WordFrequency {
    pub fn new(word: impl Into<String>, frequency: usize) -> Self {
        WordFrequency {
            word: word.into(),
            frequency,
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn frequency(&self) -> usize {
        self.frequency
    }
}

/// 成功分析得到的统计量
#[derive(Debug, Clone, Default)]
pub struct TextStats {
    pub total_words: usize,
    pub unique_words: usize,
    pub total_characters: usize,
    pub total_lines: usize,
    pub top_words: Vec<WordFrequency>,
}

/// 单文件分析结果
///
/// 构造后不可变。失败结果的所有数值为 0、高频词为空、情感为 `N/A`。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    file_name: String,
    success: bool,
    error: Option<AnalysisError>,
    total_words: usize,
    unique_words: usize,
    total_characters: usize,
    total_lines: usize,
    top_words: Vec<WordFrequency>,
    sentiment: Sentiment,
}

impl AnalysisResult {
    /// 创建成功结果
    pub fn succeeded(file_name: impl Into<String>, stats: TextStats, sentiment: Sentiment) -> Self {
        AnalysisResult {
            file_name: file_name.into(),
            success: true,
            error: None,
            total_words: stats.total_words,
            unique_words: stats.unique_words,
            total_characters: stats.total_characters,
            total_lines: stats.total_lines,
            top_words: stats.top_words,
            sentiment,
        }
    }

    /// 创建失败结果
    pub fn failed(file_name: impl Into<String>, error: AnalysisError) -> Self {
        AnalysisResult {
            file_name: file_name.into(),
            success: false,
            error: Some(error),
            total_words: 0,
            unique_words: 0,
            total_characters: 0,
            total_lines: 0,
            top_words: Vec::new(),
            sentiment: Sentiment::NotApplicable,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn error(&self) -> Option<&AnalysisError> {
        self.error.as_ref()
    }

    /// 错误描述（仅失败时存在）
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }

    pub fn total_words(&self) -> usize {
        self.total_words
    }

    pub fn unique_words(&self) -> usize {
        self.unique_words
    }

    pub fn total_characters(&self) -> usize {
        self.total_characters
    }

    pub fn total_lines(&self) -> usize {
        self.total_lines
    }

    pub fn top_words(&self) -> &[WordFrequency] {
        &self.top_words
    }

    pub fn sentiment(&self) -> Sentiment {
        self.sentiment
    }
}
