//! # 物种匹配与再分配排序
//!
//! 单次遍历材料中的 VDOS 动力学组分，同时完成两件事：
//! 1. 按请求的 (Z, A) 匹配组分，记录其截面、份额和均方位移
//! 2. 追踪归一化非相干贡献最小的组分，用于决定非相干散射再分配
//!
//! 非 VDOS 组分（sterile、freegas、vdosdebye、scatknl）不参与匹配与排序。
//!
//! ## 依赖关系
//! - 被 `bragg/mod.rs` 调用
//! - 使用 `models/material.rs`、`models/species.rs`

use crate::models::{DynamicInfo, MaterialModel, Nuclide};

/// 匹配到的组分数据
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// 束缚非相干截面（barn）
    pub incoherent_xs: f64,
    /// 束缚相干截面（barn）
    pub coherent_xs: f64,
    /// 自由原子散射截面（barn）
    pub free_scattering_xs: f64,
    /// 组分份额
    pub fraction: f64,
    /// 均方位移（Å²）
    pub msd: f64,
}

/// 当前贡献最小的组分
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedCandidate {
    pub contribution: f64,
    pub nuclide: Nuclide,
}

/// 再分配排序
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncoherentRanking {
    candidate: Option<RankedCandidate>,
}

impl IncoherentRanking {
    /// 纳入一个组分；仅在严格更小时替换，先出现者胜出
    pub fn offer(&mut self, contribution: f64, nuclide: Nuclide) {
        let replace = match &self.candidate {
            None => true,
            Some(current) => contribution < current.contribution,
        };
        if replace {
            self.candidate = Some(RankedCandidate {
                contribution,
                nuclide,
            });
        }
    }

    pub fn candidate(&self) -> Option<&RankedCandidate> {
        self.candidate.as_ref()
    }

    /// 最小归一化贡献，无 VDOS 组分时为 `None`
    pub fn minimum(&self) -> Option<f64> {
        self.candidate.map(|c| c.contribution)
    }

    /// 请求的核素是否为贡献最小者
    pub fn selects(&self, target: Nuclide) -> bool {
        self.candidate.is_some_and(|c| c.nuclide == target)
    }
}

/// 一次扫描的结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeciesScan {
    /// 最后一个匹配组分的数据
    pub matched: Option<MatchResult>,
    /// 匹配组分数
    pub match_count: usize,
    pub ranking: IncoherentRanking,
}

/// 归一化非相干贡献 f/(1−f)·σ_inc
///
/// f = 0 时为 0；f = 1 时为正无穷（该组分永不成为最小者，除非全部如此）。
pub fn incoherent_contribution(fraction: f64, incoherent_xs: f64) -> f64 {
    if fraction == 0.0 {
        0.0
    } else if fraction >= 1.0 {
        f64::INFINITY
    } else {
        fraction / (1.0 - fraction) * incoherent_xs
    }
}

/// 扫描动力学组分，本阶段从不失败
pub fn scan_components(model: &MaterialModel, target: Nuclide) -> SpeciesScan {
    let mut scan = SpeciesScan::default();

    for dynamic in model.dynamics() {
        let DynamicInfo::Vdos { atom, fraction, .. } = dynamic else {
            continue;
        };
        let atom_info = model.atom(*atom);
        let species = &atom_info.species;

        scan.ranking.offer(
            incoherent_contribution(*fraction, species.incoherent_xs),
            species.nuclide(),
        );

        if !species.is_element() || species.z != target.z {
            continue;
        }

        let accepted = (species.is_single_isotope() && species.a == target.a)
            || (species.is_natural_element() && target.is_natural());
        if accepted {
            scan.matched = Some(MatchResult {
                incoherent_xs: species.incoherent_xs,
                coherent_xs: species.coherent_xs(),
                free_scattering_xs: species.free_scattering_xs(),
                fraction: *fraction,
                msd: atom_info.msd,
            });
            scan.match_count += 1;
        }
    }

    scan
}
