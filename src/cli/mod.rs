//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `extract`: 提取 Bragg 边（支持多温度并行扫描）
//! - `inspect`: 查看材料模型
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: extract, inspect

pub mod extract;
pub mod inspect;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// braggedge - 面向 LEAPR 的 Bragg 边提取工具
#[derive(Parser)]
#[command(name = "braggedge")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Extract Bragg edges and cross sections from NCMAT materials for LEAPR", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Extract Bragg edges and cross sections for one isotope or natural element
    Extract(extract::ExtractArgs),

    /// Inspect a material: structure, atoms, dynamic components and planes
    Inspect(inspect::InspectArgs),
}

/// 材料文件搜索目录参数（两个子命令共用）
#[derive(clap::Args, Debug, Clone)]
pub struct DataPathArgs {
    /// Extra directories to search for material files (colon separated in the environment)
    #[arg(long = "data-path", env = "BRAGGEDGE_DATA_PATH", value_delimiter = ':')]
    pub dirs: Vec<PathBuf>,
}
