//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `utils/` 与库中的 `batch/`
//! - 子模块: analyze

pub mod analyze;

use crate::cli::Commands;
use textbatch::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Analyze(args) => analyze::execute(args),
    }
}
