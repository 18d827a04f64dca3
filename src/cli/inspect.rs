//! # inspect 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/inspect.rs`

use crate::cli::DataPathArgs;

use clap::Args;

/// inspect 子命令参数
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Material configuration string (e.g. "Al_sg225.ncmat;dcutoff=0.4")
    pub cfg: String,

    /// Temperature in kelvin
    #[arg(short, long = "temp", default_value_t = 293.15)]
    pub temperature: f64,

    /// Number of leading planes to print
    #[arg(long, default_value_t = 10)]
    pub planes: usize,

    #[command(flatten)]
    pub data_path: DataPathArgs,
}
