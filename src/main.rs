//! # braggedge - 面向 LEAPR 的 Bragg 边提取工具
//!
//! 从 NCMAT 多晶材料中提取 Bragg 边和所请求核素的截面数据。
//!
//! ## 子命令
//! - `extract` - 提取 Bragg 边（支持多温度并行扫描与导出）
//! - `inspect` - 查看材料模型
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     └── braggedge 库 (bragg/, parsers/, physics/, models/)
//!   ├── batch/      (并行批量执行)
//!   └── utils/      (工具函数)
//! ```

mod batch;
mod cli;
mod commands;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("[{}] {}", e.kind(), e));
        std::process::exit(1);
    }
}
