//! # 批处理事件数据模型
//!
//! 引擎向调用方推送的事件类型，以及批次结束后的汇总统计。
//!
//! ## 依赖关系
//! - 被 `batch/engine.rs` 产生
//! - 被 `batch/sink.rs`, `commands/analyze.rs` 消费

use super::analysis::{AnalysisResult, Sentiment};

/// 批处理事件
///
/// 同一文件的事件严格有序；不同文件之间不保证顺序。
/// `BatchCompleted` 总是最后一个事件，每次运行恰好一次。
#[derive(Debug, Clone, PartialEq)]
pub enum BatchEvent {
    FileStarted {
        index: usize,
        name: String,
    },
    FileProgress {
        index: usize,
        name: String,
        fraction: f64,
    },
    FileCompleted {
        index: usize,
        name: String,
        result: AnalysisResult,
    },
    FileFailed {
        index: usize,
        name: String,
        error_message: String,
    },
    OverallProgress {
        fraction: f64,
        completed: usize,
        total: usize,
    },
    /// 按原始输入顺序排列的结果
    BatchCompleted { results: Vec<AnalysisResult> },
}

impl BatchEvent {
    /// 事件所属的文件索引（批次级事件返回 `None`）
    pub fn file_index(&self) -> Option<usize> {
        match self {
            BatchEvent::FileStarted { index, .. }
            | BatchEvent::FileProgress { index, .. }
            | BatchEvent::FileCompleted { index, .. }
            | BatchEvent::FileFailed { index, .. } => Some(*index),
            BatchEvent::OverallProgress { .. } | BatchEvent::BatchCompleted { .. } => None,
        }
    }

    /// 是否为单文件的终止事件
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BatchEvent::FileCompleted { .. } | BatchEvent::FileFailed { .. }
        )
    }

    /// `BatchCompleted` 事件的汇总统计
    pub fn summary(&self) -> Option<BatchSummary> {
        match self {
            BatchEvent::BatchCompleted { results } => Some(BatchSummary::from_results(results)),
            _ => None,
        }
    }
}

/// 批次汇总统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total_files: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub total_words: usize,
    pub total_characters: usize,
    pub total_lines: usize,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[AnalysisResult]) -> Self {
        let mut summary = BatchSummary {
            total_files: results.len(),
            ..Default::default()
        };

        for result in results {
            if !result.is_success() {
                summary.failed += 1;
                continue;
            }
            summary.succeeded += 1;
            summary.total_words += result.total_words();
            summary.total_characters += result.total_characters();
            summary.total_lines += result.total_lines();
            match result.sentiment() {
                Sentiment::Positive => summary.positive += 1,
                Sentiment::Negative => summary.negative += 1,
                Sentiment::Neutral => summary.neutral += 1,
                Sentiment::NotApplicable => {}
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use crate::models::analysis::{TextStats, WordFrequency};

    fn ok_result(name: &str, words: usize, sentiment: Sentiment) -> AnalysisResult {
        let stats = TextStats {
            total_words: words,
            unique_words: words,
            total_characters: words * 4,
            total_lines: 1,
            top_words: vec![WordFrequency::new("w", 1)],
        };
        AnalysisResult::succeeded(name, stats, sentiment)
    }

    #[test]
    fn test_summary_counts_success_and_failure() {
        let results = vec![
            ok_result("a", 3, Sentiment::Positive),
            AnalysisResult::failed("b", AnalysisError::NotFound),
            ok_result("c", 5, Sentiment::Neutral),
        ];
        let summary = BatchSummary::from_results(&results);
        assert_eq!(summary.total_files, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total_words, 8);
        assert_eq!(summary.total_lines, 2);
        assert_eq!(summary.positive, 1);
        assert_eq!(summary.neutral, 1);
        assert_eq!(summary.negative, 0);
    }

    #[test]
    fn test_event_classification() {
        let started = BatchEvent::FileStarted {
            index: 2,
            name: "x".to_string(),
        };
        assert_eq!(started.file_index(), Some(2));
        assert!(!started.is_terminal());

        let failed = BatchEvent::FileFailed {
            index: 1,
            name: "y".to_string(),
            error_message: "boom".to_string(),
        };
        assert!(failed.is_terminal());

        let done = BatchEvent::BatchCompleted { results: vec![] };
        assert_eq!(done.file_index(), None);
        assert_eq!(done.summary(), Some(BatchSummary::default()));
    }
}
