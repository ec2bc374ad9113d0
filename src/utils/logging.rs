//! # 日志初始化
//!
//! 安装 `tracing-subscriber`，`RUST_LOG` 优先，否则按 `-v` 次数选择级别。
//!
//! 工作线程上的 panic 已被分析器捕获为失败结果，
//! 其消息改走 `debug!`，不再直接写入 stderr 打断进度条。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用

use std::panic;
use std::thread;

use textbatch::batch::WORKER_THREAD_PREFIX;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// 根据命令行参数初始化日志
pub fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// 安装 panic hook：工作线程的 panic 只记日志，其余线程沿用默认行为
pub fn install_panic_hook() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if is_worker_thread(thread::current().name()) {
            debug!("captured worker panic: {}", info);
        } else {
            default_hook(info);
        }
    }));
}

fn is_worker_thread(name: Option<&str>) -> bool {
    name.is_some_and(|n| n.starts_with(WORKER_THREAD_PREFIX))
}
