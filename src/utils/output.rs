//! # 美化输出工具
//!
//! 提供统一的终端输出样式。
//!
//! ## 依赖关系
//! - 被 `main.rs` 和 `commands/` 模块使用
//! - 使用 `colored` crate

use colored::Colorize;

/// 打印成功消息
pub fn print_success(msg: &str) {
    eprintln!("{} {}", "[OK]".green().bold(), msg);
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    eprintln!("{} {}", "[*]".blue().bold(), msg);
}

/// 打印完成消息
pub fn print_done(msg: &str) {
    eprintln!("{} {}", "[DONE]".green().bold(), msg);
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    eprintln!("\n{}", line.dimmed());
    eprintln!("  {}", title.bold());
    eprintln!("{}\n", line.dimmed());
}

/// 打印分隔线
pub fn print_separator() {
    eprintln!("{}", "─".repeat(60).dimmed());
}
