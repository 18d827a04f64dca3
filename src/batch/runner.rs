//! # 批量执行器
//!
//! 并行执行批量处理任务（例如多温度点的 Bragg 边提取）。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代，结果保持输入顺序
//! - 进度条显示
//! - 错误收集与汇总报告
//!
//! ## 依赖关系
//! - 被 `commands/extract.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::utils::progress;

use braggedge::{BraggError, Result};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 单个任务处理结果
#[derive(Debug, Clone)]
pub enum ProcessResult<T> {
    /// 处理成功
    Success(T),
    /// 跳过（如输出文件已存在）
    Skipped(String),
    /// 处理失败
    Failed(String, String), // (任务标识, 错误信息)
}

/// 批量处理结果统计
#[derive(Debug)]
pub struct BatchResult<T> {
    /// 成功数量
    pub success: usize,
    /// 跳过数量
    pub skipped: usize,
    /// 失败数量
    pub failed: usize,
    /// 成功结果，按输入顺序
    pub outputs: Vec<T>,
    /// 跳过原因
    pub skips: Vec<String>,
    /// 失败详情
    pub failures: Vec<(String, String)>,
}

impl<T> Default for BatchResult<T> {
    fn default() -> Self {
        BatchResult {
            success: 0,
            skipped: 0,
            failed: 0,
            outputs: Vec::new(),
            skips: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl<T> BatchResult<T> {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult<T>) {
        match result {
            ProcessResult::Success(output) => {
                self.success += 1;
                self.outputs.push(output);
            }
            ProcessResult::Skipped(reason) => {
                self.skipped += 1;
                self.skips.push(reason);
            }
            ProcessResult::Failed(item, err) => {
                self.failed += 1;
                self.failures.push((item, err));
            }
        }
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success + self.skipped + self.failed
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 并行处理任务列表
    pub fn run<I, T, F>(&self, items: Vec<I>, processor: F) -> Result<BatchResult<T>>
    where
        I: Sync,
        T: Send,
        F: Fn(&I) -> ProcessResult<T> + Sync + Send,
    {
        let total = items.len();
        let pb = progress::create_progress_bar(total as u64, "Processing");

        let failed_count = AtomicUsize::new(0);

        // 配置 rayon 线程池
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| BraggError::InvalidArgument(format!("cannot start thread pool: {}", e)))?;

        let results: Vec<ProcessResult<T>> = pool.install(|| {
            items
                .par_iter()
                .map(|item| {
                    let result = processor(item);

                    if let ProcessResult::Failed(_, _) = &result {
                        failed_count.fetch_add(1, Ordering::Relaxed);
                        pb.set_message(format!("{} failed", failed_count.load(Ordering::Relaxed)));
                    }

                    pb.inc(1);
                    result
                })
                .collect()
        });

        pb.finish_and_clear();

        // 汇总结果
        let mut batch_result = BatchResult::default();
        for result in results {
            batch_result.merge(result);
        }

        Ok(batch_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_keep_input_order() {
        let runner = BatchRunner::new(4);
        let items: Vec<u32> = (0..50).collect();
        let result = runner
            .run(items, |i| ProcessResult::Success(i * 2))
            .unwrap();

        assert_eq!(result.success, 50);
        assert_eq!(result.outputs, (0..50).map(|i| i * 2).collect::<Vec<u32>>());
    }

    #[test]
    fn test_failures_and_skips_collected() {
        let runner = BatchRunner::new(2);
        let result = runner
            .run(vec![1, 2, 3, 4], |i| match i % 3 {
                0 => ProcessResult::Skipped(format!("{} skipped", i)),
                1 => ProcessResult::Failed(i.to_string(), "boom".to_string()),
                _ => ProcessResult::Success(*i),
            })
            .unwrap();

        assert_eq!(result.total(), 4);
        assert_eq!(result.success, 1);
        assert_eq!(result.skipped, 1);
        assert_eq!(result.failed, 2);
        assert_eq!(result.failures[0], ("1".to_string(), "boom".to_string()));
    }

    #[test]
    fn test_auto_jobs() {
        assert!(BatchRunner::new(0).jobs() >= 1);
        assert_eq!(BatchRunner::new(3).jobs(), 3);
    }
}
