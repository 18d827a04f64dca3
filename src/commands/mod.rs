//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `batch/`, `utils/` 和 braggedge 库
//! - 子模块: extract, inspect

pub mod extract;
pub mod inspect;

use crate::cli::Commands;

use braggedge::{NcmatProvider, Result};
use std::path::PathBuf;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Extract(args) => extract::execute(args),
        Commands::Inspect(args) => inspect::execute(args),
    }
}

/// 按搜索目录创建 NCMAT 提供者
pub(crate) fn build_provider(dirs: &[PathBuf]) -> NcmatProvider {
    dirs.iter()
        .fold(NcmatProvider::new(), |provider, dir| provider.with_search_path(dir))
}
