//! # 进度条工具
//!
//! 封装 `indicatif` 提供统一的进度条样式。
//!
//! ## 依赖关系
//! - 被 `commands/analyze.rs` 使用
//! - 使用 `indicatif` crate

use indicatif::{ProgressBar, ProgressStyle};

/// 单文件进度条的刻度（百分比）
pub const FILE_BAR_LEN: u64 = 100;

/// 创建整体进度条
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
        )
        .unwrap()
        .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}

/// 创建单文件进度条（0-100%）
pub fn create_file_bar(name: &str) -> ProgressBar {
    let pb = ProgressBar::new(FILE_BAR_LEN);
    pb.set_style(
        ProgressStyle::with_template("  {bar:30.green/white} {percent:>3}% {msg}")
            .unwrap()
            .progress_chars("█▓░"),
    );
    pb.set_message(name.to_string());
    pb
}

/// 将 [0, 1] 的进度换算为进度条位置
pub fn fraction_to_position(fraction: f64) -> u64 {
    (fraction.clamp(0.0, 1.0) * FILE_BAR_LEN as f64).round() as u64
}
