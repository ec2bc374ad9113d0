//! # 工作线程池
//!
//! 固定大小的 rayon 线程池，带显式的生命周期管理。
//!
//! ## 功能
//! - 整批原子提交（关闭过程中拒绝提交）
//! - 在途任务计数
//! - 优雅关闭：停止接收 → 限时等待 → 取消剩余任务
//! - 立即关闭
//!
//! 取消是整任务粒度的：已开始的任务会跑完，尚未开始的任务以
//! `JobStart::Cancelled` 启动，由任务自身决定如何上报。
//!
//! ## 依赖关系
//! - 被 `batch/engine.rs` 使用
//! - 使用 `rayon` 线程池, `num_cpus` 获取默认线程数

use crate::analyzer::panic_message;
use crate::error::EngineError;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// 默认关闭宽限期
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(60);

/// 任务启动方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStart {
    Run,
    /// 线程池已被强制关闭，任务不应再执行实际工作
    Cancelled,
}

/// 工作线程名前缀
pub const WORKER_THREAD_PREFIX: &str = "textbatch-worker";

/// 关闭结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownStatus {
    /// 所有在途任务在宽限期内完成
    Drained,
    /// 强制关闭时仍有任务未完成（`abandoned` 总是大于 0）
    Forced { abandoned: usize },
    /// 已经关闭（或正在被另一个调用关闭）
    AlreadyShutDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Running,
    ShuttingDown,
    Terminated,
    /// 线程池创建失败
    Unavailable,
}

struct PoolState {
    phase: Phase,
    pool: Option<rayon::ThreadPool>,
}

/// 在途任务计数
#[derive(Default)]
struct InFlight {
    count: Mutex<usize>,
    idle: Condvar,
}

impl InFlight {
    fn lock(&self) -> MutexGuard<'_, usize> {
        self.count.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn add(&self, n: usize) {
        *self.lock() += n;
    }

    fn done(&self) {
        let mut count = self.lock();
        *count = count.saturating_sub(1);
        if *count == 0 {
            self.idle.notify_all();
        }
    }

    fn get(&self) -> usize {
        *self.lock()
    }

    /// 等待计数归零，返回超时后剩余的任务数
    fn wait_idle(&self, timeout: Duration) -> usize {
        let deadline = Instant::now() + timeout;
        let mut count = self.lock();
        while *count > 0 {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            count = match self.idle.wait_timeout(count, deadline - now) {
                Ok((guard, _)) => guard,
                Err(poisoned) => poisoned.into_inner().0,
            };
        }
        *count
    }
}

/// 任务结束（包括 panic）时归还槽位
struct SlotGuard(Arc<InFlight>);

impl Drop for SlotGuard {
    fn drop(&mut self) {
        self.0.done();
    }
}

/// 固定大小的工作线程池
pub struct WorkerPool {
    workers: usize,
    state: Mutex<PoolState>,
    in_flight: Arc<InFlight>,
    cancelled: Arc<AtomicBool>,
}

impl WorkerPool {
    /// 创建线程池；`workers == 0` 时使用全部 CPU 核心
    ///
    /// 不会失败：系统拒绝创建线程时，线程池进入不可用状态，之后的提交被拒绝。
    pub fn new(workers: usize) -> Self {
        let workers = if workers == 0 { num_cpus::get() } else { workers };

        let built = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("{}-{}", WORKER_THREAD_PREFIX, i))
            .panic_handler(|payload| {
                warn!("worker job panicked: {}", panic_message(payload.as_ref()));
            })
            .build();

        let state = match built {
            Ok(pool) => {
                debug!(workers, "worker pool started");
                PoolState {
                    phase: Phase::Running,
                    pool: Some(pool),
                }
            }
            Err(e) => {
                error!("failed to build worker pool: {}", e);
                PoolState {
                    phase: Phase::Unavailable,
                    pool: None,
                }
            }
        };

        Self {
            workers,
            state: Mutex::new(state),
            in_flight: Arc::new(InFlight::default()),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    fn state(&self) -> MutexGuard<'_, PoolState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// 线程数
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// 已提交但尚未结束的任务数
    pub fn in_flight(&self) -> usize {
        self.in_flight.get()
    }

    /// 是否已停止接收新任务
    pub fn is_shutdown(&self) -> bool {
        self.state().phase != Phase::Running
    }

    /// 原子地提交一整批任务
    pub fn submit_all<J>(&self, jobs: Vec<J>) -> Result<(), EngineError>
    where
        J: FnOnce(JobStart) + Send + 'static,
    {
        let state = self.state();
        let pool = match (state.phase, state.pool.as_ref()) {
            (Phase::Running, Some(pool)) => pool,
            (Phase::ShuttingDown, _) => return Err(EngineError::ShuttingDown),
            (Phase::Unavailable, _) => return Err(EngineError::PoolUnavailable),
            _ => return Err(EngineError::ShutDown),
        };

        self.in_flight.add(jobs.len());
        for job in jobs {
            let slot = SlotGuard(Arc::clone(&self.in_flight));
            let cancelled = Arc::clone(&self.cancelled);
            pool.spawn(move || {
                let _slot = slot;
                let start = if cancelled.load(Ordering::SeqCst) {
                    JobStart::Cancelled
                } else {
                    JobStart::Run
                };
                job(start);
            });
        }

        Ok(())
    }

    /// 优雅关闭
    ///
    /// 停止接收新任务，最多等待 `grace` 让在途任务完成，超时后取消剩余任务。
    pub fn shutdown(&self, grace: Duration) -> ShutdownStatus {
        {
            let mut state = self.state();
            if state.phase != Phase::Running {
                return ShutdownStatus::AlreadyShutDown;
            }
            state.phase = Phase::ShuttingDown;
        }
        info!(grace_secs = grace.as_secs_f64(), "shutting down worker pool");

        let remaining = self.in_flight.wait_idle(grace);
        if remaining > 0 {
            self.cancelled.store(true, Ordering::SeqCst);
            warn!(
                abandoned = remaining,
                "grace period elapsed, cancelling remaining tasks"
            );
        }

        let pool = {
            let mut state = self.state();
            state.phase = Phase::Terminated;
            state.pool.take()
        };
        drop(pool);

        if remaining > 0 {
            ShutdownStatus::Forced {
                abandoned: remaining,
            }
        } else {
            debug!("worker pool drained");
            ShutdownStatus::Drained
        }
    }

    /// 立即关闭：取消所有尚未开始的任务
    pub fn shutdown_now(&self) -> ShutdownStatus {
        let pool = {
            let mut state = self.state();
            if matches!(state.phase, Phase::Terminated | Phase::Unavailable) {
                return ShutdownStatus::AlreadyShutDown;
            }
            self.cancelled.store(true, Ordering::SeqCst);
            state.phase = Phase::Terminated;
            state.pool.take()
        };
        drop(pool);

        let abandoned = self.in_flight.get();
        if abandoned == 0 {
            return ShutdownStatus::Drained;
        }
        warn!(abandoned, "worker pool shut down with tasks in flight");
        ShutdownStatus::Forced { abandoned }
    }
}
