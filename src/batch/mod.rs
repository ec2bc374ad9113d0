//! # 批量处理模块
//!
//! 提供并发的文件批量分析能力。
//!
//! ## 功能
//! - 固定大小的工作线程池与生命周期管理
//! - 每文件一个任务的扇出，单通道有序收集
//! - 事件接收端抽象
//! - 输入文件收集
//!
//! ## 依赖关系
//! - 被 `commands/analyze.rs` 使用
//! - 使用 `analyzer/` 进行单文件分析
//! - 使用 `rayon` 线程池, `crossbeam-channel` 传递事件

pub mod collector;
pub mod engine;
pub mod pool;
pub mod sink;

pub use collector::FileCollector;
pub use engine::{BatchEngine, EngineConfig};
pub use pool::{
    JobStart, ShutdownStatus, WorkerPool, DEFAULT_GRACE_PERIOD, WORKER_THREAD_PREFIX,
};
pub use sink::{ChannelSink, EventSink, NullSink};
