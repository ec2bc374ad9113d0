//! # textbatch - 并发批量文本分析
//!
//! 对一批文本文件并发地统计词数、字符数、行数、高频词，并做粗粒度的词典情感分类。
//! 单个文件失败不会中止整批；进度与结果通过统一的事件类型推送给调用方。
//!
//! ## 依赖关系
//! ```text
//! batch/      (BatchEngine, WorkerPool, EventSink, FileCollector)
//!   └── analyzer/   (单文件分析: text, sentiment)
//!         └── models/   (AnalysisResult, BatchEvent, BatchSummary)
//! error.rs    (错误类型)
//! ```
//!
//! ## 示例
//! ```no_run
//! use std::path::PathBuf;
//! use textbatch::batch::BatchEngine;
//! use textbatch::models::BatchEvent;
//!
//! let engine = BatchEngine::new(4);
//! let files = vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")];
//! let results = engine
//!     .run_batch(&files, &mut |event: BatchEvent| println!("{:?}", event))
//!     .unwrap();
//! assert_eq!(results.len(), 2);
//! engine.shutdown();
//! ```

pub mod analyzer;
pub mod batch;
pub mod error;
pub mod models;
