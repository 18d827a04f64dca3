//! # 批量处理模块
//!
//! 提供统一的并行批量处理能力。
//!
//! ## 功能
//! - 并行处理任务列表（如温度扫描）
//! - 进度反馈与统计
//!
//! ## 依赖关系
//! - 被 `commands/extract.rs` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod runner;

pub use runner::{BatchResult, BatchRunner, ProcessResult};
