//! # Bragg 边列表
//!
//! 将衍射晶面列表转换为 (能量, 加权截面) 对。
//!
//! ## 公式
//! ```text
//! λ = 2d
//! E = wl2ekin(λ)
//! w = E · F² · m · d · 0.5/(V · N) · λ²
//! ```
//!
//! ## 依赖关系
//! - 被 `bragg/mod.rs` 调用
//! - 使用 `physics/constants.rs` 的 wl2ekin

use crate::error::{BraggError, Result};
use crate::models::MaterialModel;
use crate::physics::wl2ekin;

use serde::{Deserialize, Serialize};

/// 单个 Bragg 边
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BraggEdge {
    /// 边能量（eV）
    pub energy: f64,
    /// 能量加权截面（eV·barn）
    pub weighted_xs: f64,
}

/// 输出容量需要的最少槽位数（不含）
pub fn required_capacity(planes: usize) -> usize {
    2 * planes
}

/// 校验输出容量，要求 capacity > 2n
pub fn check_capacity(planes: usize, capacity: usize) -> Result<()> {
    let required = required_capacity(planes);
    if capacity > required {
        Ok(())
    } else {
        Err(BraggError::CapacityError {
            planes,
            capacity,
            required,
        })
    }
}

/// 按晶面顺序生成 Bragg 边
pub fn tabulate(model: &MaterialModel, capacity: usize) -> Result<Vec<BraggEdge>> {
    let planes = model.planes();
    check_capacity(planes.len(), capacity)?;

    let structure = model.structure();
    let xsectfact = 0.5 / (structure.volume * structure.n_atoms as f64);

    Ok(planes
        .iter()
        .map(|plane| {
            let wl = 2.0 * plane.d_spacing;
            let energy = wl2ekin(wl);
            let fdm = plane.fsquared * plane.multiplicity as f64 * plane.d_spacing;
            BraggEdge {
                energy,
                weighted_xs: energy * fdm * xsectfact * wl * wl,
            }
        })
        .collect())
}
