//! # 批处理引擎
//!
//! 将一批文件分发到工作线程池并行分析，通过单一有序通道收集事件。
//!
//! ## 功能
//! - 每个文件一个任务，保留原始索引
//! - 单文件进度、完成/失败事件转发
//! - 按真实完成顺序汇报整体进度
//! - 调度层故障合成为失败结果，不会中止整批
//! - 最终结果按原始输入顺序排列
//!
//! 所有任务只通过 `crossbeam-channel` 与收集线程通信；`EventSink` 只在
//! 调用 `run_batch` 的线程上被调用。
//!
//! ## 依赖关系
//! - 被 `commands/analyze.rs` 调用
//! - 使用 `analyzer/` 分析单个文件
//! - 使用 `batch/pool.rs`, `batch/sink.rs`

use super::pool::{JobStart, ShutdownStatus, WorkerPool, DEFAULT_GRACE_PERIOD};
use super::sink::EventSink;
use crate::analyzer::{display_name, Analyzer, ProgressListener};
use crate::error::{AnalysisError, EngineError};
use crate::models::{AnalysisResult, BatchEvent};

use crossbeam_channel::{Receiver, Sender};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// 引擎配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// 线程数（0 表示全部 CPU 核心）
    pub workers: usize,
    /// `shutdown` 的宽限期
    pub grace_period: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            workers: num_cpus::get(),
            grace_period: DEFAULT_GRACE_PERIOD,
        }
    }
}

/// 单个文件任务
#[derive(Debug, Clone)]
struct FileTask {
    index: usize,
    path: PathBuf,
    name: String,
}

/// 任务发往收集线程的消息
enum TaskMessage {
    Event(BatchEvent),
    Finished { index: usize, result: AnalysisResult },
    Aborted { index: usize, reason: String },
}

/// 任务端的消息发送者
///
/// 未显式结束就被丢弃时（panic、未执行即被丢弃）补发 `Aborted`。
struct TaskReporter {
    index: usize,
    name: String,
    tx: Sender<TaskMessage>,
    resolved: bool,
}

impl TaskReporter {
    fn event(&self, event: BatchEvent) {
        let _ = self.tx.send(TaskMessage::Event(event));
    }

    fn finish(mut self, result: AnalysisResult) {
        self.resolved = true;
        let _ = self.tx.send(TaskMessage::Finished {
            index: self.index,
            result,
        });
    }

    fn abort(mut self, reason: &str) {
        self.resolved = true;
        let _ = self.tx.send(TaskMessage::Aborted {
            index: self.index,
            reason: reason.to_string(),
        });
    }
}

impl Drop for TaskReporter {
    fn drop(&mut self) {
        if !self.resolved {
            let _ = self.tx.send(TaskMessage::Aborted {
                index: self.index,
                reason: "task ended without reporting a result".to_string(),
            });
        }
    }
}

/// 把分析器进度转成 `FileProgress` 事件
struct TaskListener<'a> {
    reporter: &'a TaskReporter,
}

impl ProgressListener for TaskListener<'_> {
    fn on_progress(&mut self, fraction: f64) {
        self.reporter.event(BatchEvent::FileProgress {
            index: self.reporter.index,
            name: self.reporter.name.clone(),
            fraction,
        });
    }

    fn on_error(&mut self, message: &str) {
        // 仅作记录，失败以返回结果为准
        debug!(
            index = self.reporter.index,
            file = %self.reporter.name,
            "analyzer reported: {}",
            message
        );
    }
}

/// 在工作线程上执行一个文件任务
fn run_task(analyzer: Analyzer, task: FileTask, reporter: TaskReporter, start: JobStart) {
    if start == JobStart::Cancelled {
        reporter.abort("task cancelled by pool shutdown");
        return;
    }

    reporter.event(BatchEvent::FileStarted {
        index: task.index,
        name: task.name.clone(),
    });

    let result = {
        let mut listener = TaskListener {
            reporter: &reporter,
        };
        analyzer.analyze_file(&task.path, &mut listener)
    };

    reporter.finish(result);
}

/// 收集线程的状态
struct Collector<'s, S: EventSink + ?Sized> {
    sink: &'s mut S,
    names: Vec<String>,
    slots: Vec<Option<AnalysisResult>>,
    completed: usize,
}

impl<'s, S: EventSink + ?Sized> Collector<'s, S> {
    fn new(sink: &'s mut S, names: Vec<String>) -> Self {
        let slots = vec![None; names.len()];
        Self {
            sink,
            names,
            slots,
            completed: 0,
        }
    }

    fn total(&self) -> usize {
        self.slots.len()
    }

    fn is_done(&self) -> bool {
        self.completed >= self.total()
    }

    /// 按到达顺序处理消息，直到所有任务结束或通道断开
    fn drain(&mut self, rx: &Receiver<TaskMessage>) {
        while !self.is_done() {
            let Ok(message) = rx.recv() else {
                break;
            };
            match message {
                TaskMessage::Event(event) => self.sink.emit(event),
                TaskMessage::Finished { index, result } => self.record(index, result),
                TaskMessage::Aborted { index, reason } => self.record_fault(index, reason),
            }
        }
    }

    fn record_fault(&mut self, index: usize, reason: String) {
        let Some(name) = self.names.get(index).cloned() else {
            warn!(index, "fault reported for unknown task");
            return;
        };
        warn!(index, file = %name, "scheduling fault: {}", reason);
        self.record(
            index,
            AnalysisResult::failed(name, AnalysisError::Scheduling(reason)),
        );
    }

    fn record(&mut self, index: usize, result: AnalysisResult) {
        match self.slots.get(index) {
            Some(None) => {}
            Some(Some(_)) => {
                warn!(index, "duplicate result ignored");
                return;
            }
            None => {
                warn!(index, "result for unknown task ignored");
                return;
            }
        }

        let name = self.names[index].clone();
        let event = if result.is_success() {
            BatchEvent::FileCompleted {
                index,
                name,
                result: result.clone(),
            }
        } else {
            BatchEvent::FileFailed {
                index,
                name,
                error_message: result.error_message().unwrap_or_default(),
            }
        };
        self.sink.emit(event);
        self.slots[index] = Some(result);

        self.completed += 1;
        let total = self.total();
        self.sink.emit(BatchEvent::OverallProgress {
            fraction: self.completed as f64 / total as f64,
            completed: self.completed,
            total,
        });
    }

    /// 补齐未上报的任务，按原始顺序返回结果
    fn finish(mut self) -> Vec<AnalysisResult> {
        let missing: Vec<usize> = (0..self.total())
            .filter(|&i| self.slots[i].is_none())
            .collect();
        for index in missing {
            self.record_fault(index, "task was dropped before it could run".to_string());
        }

        let results: Vec<AnalysisResult> = self.slots.into_iter().flatten().collect();
        self.sink.emit(BatchEvent::BatchCompleted {
            results: results.clone(),
        });
        results
    }
}

/// 批处理引擎
pub struct BatchEngine {
    config: EngineConfig,
    pool: WorkerPool,
    analyzer: Analyzer,
}

impl BatchEngine {
    /// 使用指定线程数创建引擎（0 表示全部 CPU 核心）
    pub fn new(workers: usize) -> Self {
        Self::with_config(EngineConfig {
            workers,
            ..EngineConfig::default()
        })
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let pool = WorkerPool::new(config.workers);
        let config = EngineConfig {
            workers: pool.workers(),
            ..config
        };
        Self {
            config,
            pool,
            analyzer: Analyzer::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn workers(&self) -> usize {
        self.pool.workers()
    }

    pub fn is_shutdown(&self) -> bool {
        self.pool.is_shutdown()
    }

    /// 并行分析一批文件
    ///
    /// 阻塞直到所有任务结束。事件按到达顺序交给 `sink`，最后一个事件总是
    /// `BatchCompleted`。返回值与 `BatchCompleted` 中的结果相同，按输入顺序排列。
    ///
    /// 只有在引擎正在关闭或已关闭时才返回错误。
    pub fn run_batch<S>(
        &self,
        files: &[PathBuf],
        sink: &mut S,
    ) -> Result<Vec<AnalysisResult>, EngineError>
    where
        S: EventSink + ?Sized,
    {
        if files.is_empty() {
            return Ok(Vec::new());
        }

        let started = Instant::now();
        let tasks: Vec<FileTask> = files
            .iter()
            .enumerate()
            .map(|(index, path)| FileTask {
                index,
                path: path.clone(),
                name: display_name(path),
            })
            .collect();
        let names: Vec<String> = tasks.iter().map(|t| t.name.clone()).collect();

        let (tx, rx) = crossbeam_channel::unbounded();
        let jobs: Vec<_> = tasks
            .into_iter()
            .map(|task| {
                let reporter = TaskReporter {
                    index: task.index,
                    name: task.name.clone(),
                    tx: tx.clone(),
                    resolved: false,
                };
                let analyzer = self.analyzer;
                move |start: JobStart| run_task(analyzer, task, reporter, start)
            })
            .collect();

        if let Err(e) = self.pool.submit_all(jobs) {
            warn!("{}", e);
            return Err(e);
        }
        drop(tx);
        info!(
            files = files.len(),
            workers = self.workers(),
            "batch submitted"
        );

        let mut collector = Collector::new(sink, names);
        collector.drain(&rx);
        let results = collector.finish();

        let failed = results.iter().filter(|r| !r.is_success()).count();
        info!(
            files = results.len(),
            failed,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "batch completed"
        );

        Ok(results)
    }

    /// 优雅关闭（使用配置的宽限期）
    pub fn shutdown(&self) -> ShutdownStatus {
        self.pool.shutdown(self.config.grace_period)
    }

    /// 立即关闭
    pub fn shutdown_now(&self) -> ShutdownStatus {
        self.pool.shutdown_now()
    }
}

impl Default for BatchEngine {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl Drop for BatchEngine {
    fn drop(&mut self) {
        self.pool.shutdown_now();
    }
}
