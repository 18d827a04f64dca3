//! # 匹配校验
//!
//! 要求恰好一个组分匹配请求的核素，并计算再分配标志。
//!
//! ## 依赖关系
//! - 被 `bragg/mod.rs` 调用
//! - 使用 `bragg/matcher.rs` 的扫描结果

use crate::bragg::matcher::{MatchResult, SpeciesScan};
use crate::error::{BraggError, Result};
use crate::models::Nuclide;

/// 校验通过的匹配
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedMatch {
    pub matched: MatchResult,
    /// 所有 VDOS 组分中的最小归一化非相干贡献
    pub min_incoherent_contribution: f64,
    /// 请求的核素是否为贡献最小者
    pub redistribute: bool,
}

/// 校验扫描结果
pub fn validate(scan: SpeciesScan, target: Nuclide) -> Result<ValidatedMatch> {
    let matched = match (scan.match_count, scan.matched) {
        (0, _) | (_, None) => {
            return Err(BraggError::NotFoundError {
                nuclide: target.to_string(),
            })
        }
        (1, Some(matched)) => matched,
        (count, Some(_)) => {
            return Err(BraggError::AmbiguousMatchError {
                nuclide: target.to_string(),
                count,
            })
        }
    };

    // 匹配成功意味着至少有一个 VDOS 组分参与了排序
    let min_incoherent_contribution = scan.ranking.minimum().unwrap_or(f64::INFINITY);

    Ok(ValidatedMatch {
        matched,
        min_incoherent_contribution,
        redistribute: scan.ranking.selects(target),
    })
}
