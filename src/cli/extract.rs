//! # extract 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/extract.rs`

use crate::cli::DataPathArgs;

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 默认输出容量（LEAPR 中的 maxb）
pub const DEFAULT_MAXB: usize = 60_000;

/// 输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Print the edge table to the terminal
    Table,
    /// CSV data file (energy, weighted XS, wavelength)
    Csv,
    /// Plain text with a commented header
    Dat,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Dat => write!(f, "dat"),
        }
    }
}

/// extract 子命令参数
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Material configuration string (e.g. "Al_sg225.ncmat;dcutoff=0.4")
    pub cfg: String,

    /// Atomic number Z of the requested species
    #[arg(short = 'z', long = "atomic-number")]
    pub z: u32,

    /// Mass number A of the requested isotope (0 = natural element)
    #[arg(short = 'a', long = "mass-number", default_value_t = 0)]
    pub a: u32,

    /// Temperature(s) in kelvin; several values run as a parallel sweep
    #[arg(short, long = "temp", required = true, num_args = 1..)]
    pub temperatures: Vec<f64>,

    /// Output capacity in slots; must exceed twice the number of planes
    #[arg(long, env = "BRAGGEDGE_MAXB", default_value_t = DEFAULT_MAXB)]
    pub maxb: usize,

    /// Output file (suffixed with _T<temp> when sweeping temperatures)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (auto-detected from the output extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Number of rows of the edge table to print
    #[arg(long, default_value_t = 20)]
    pub rows: usize,

    /// Number of parallel jobs (0 = auto, sweep mode only)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,

    #[command(flatten)]
    pub data_path: DataPathArgs,
}
