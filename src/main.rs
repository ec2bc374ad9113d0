//! # textbatch 命令行入口
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑，调用库中的 batch/)
//!   └── utils/      (输出、进度条、日志)
//! ```

mod cli;
mod commands;
mod utils;

use anyhow::Context;
use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    utils::logging::setup_logging(cli.verbose, cli.quiet);
    utils::logging::install_panic_hook();

    if let Err(e) = run(cli) {
        utils::output::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    commands::run(cli.command).context("analysis command failed")?;
    Ok(())
}
