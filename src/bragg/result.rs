//! # 提取结果
//!
//! 一次提取的全部输出：Bragg 边列表和所请求核素的截面、均方位移、份额与再分配标志。
//!
//! ## 依赖关系
//! - 被 `bragg/mod.rs` 构造
//! - 被 `bragg/export.rs` 和 `commands/` 使用

use crate::bragg::tabulator::{check_capacity, BraggEdge};
use crate::error::Result;

use serde::Serialize;

/// Bragg 边提取结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BraggEdgeResult {
    /// 材料名称
    pub material: String,
    /// 温度（K）
    pub temperature: f64,
    /// 晶面数
    pub plane_count: usize,
    /// 按晶面顺序的 (能量, 加权截面)
    pub edges: Vec<BraggEdge>,
    /// 束缚非相干截面（barn）
    pub bound_incoherent_xs: f64,
    /// 束缚相干截面（barn）
    pub bound_coherent_xs: f64,
    /// 自由原子散射截面（barn）
    pub free_atom_xs: f64,
    /// 均方位移（Å²）
    pub mean_squared_displacement: f64,
    /// 所请求核素在材料中的份额
    pub isotope_fraction: f64,
    /// 所有 VDOS 组分中的最小归一化非相干贡献
    pub global_min_incoherent_fraction: f64,
    /// 是否将非弹性非相干散射再分配到该核素
    pub redistribute: bool,
}

impl BraggEdgeResult {
    /// 以交错布局写入调用方缓冲区：每个晶面两个槽位，能量在前
    ///
    /// 缓冲区长度必须大于 `2 * plane_count`。返回写入的槽位数。
    pub fn pack_into(&self, buffer: &mut [f64]) -> Result<usize> {
        check_capacity(self.plane_count, buffer.len())?;
        for (slot, edge) in buffer.chunks_exact_mut(2).zip(&self.edges) {
            slot[0] = edge.energy;
            slot[1] = edge.weighted_xs;
        }
        Ok(2 * self.edges.len())
    }

    /// 交错布局的拥有型副本
    pub fn packed(&self) -> Vec<f64> {
        self.edges
            .iter()
            .flat_map(|e| [e.energy, e.weighted_xs])
            .collect()
    }

    /// 相干弹性截面 σ(E) = (1/E) Σ_{Eᵢ ≤ E} wᵢ（barn）
    pub fn coherent_elastic_xs(&self, energy: f64) -> f64 {
        if !(energy > 0.0) {
            return 0.0;
        }
        let sum: f64 = self
            .edges
            .iter()
            .filter(|e| e.energy <= energy)
            .map(|e| e.weighted_xs)
            .sum();
        sum / energy
    }

    /// 最低 Bragg 边能量（截止能量），无晶面时为 `None`
    pub fn cutoff_energy(&self) -> Option<f64> {
        self.edges.iter().map(|e| e.energy).min_by(f64::total_cmp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn result() -> BraggEdgeResult {
        BraggEdgeResult {
            material: "test".to_string(),
            temperature: 293.6,
            plane_count: 2,
            edges: vec![
                BraggEdge {
                    energy: 0.002,
                    weighted_xs: 0.01,
                },
                BraggEdge {
                    energy: 0.005,
                    weighted_xs: 0.03,
                },
            ],
            bound_incoherent_xs: 80.0,
            bound_coherent_xs: 1.0,
            free_atom_xs: 20.0,
            mean_squared_displacement: 0.02,
            isotope_fraction: 0.5,
            global_min_incoherent_fraction: 80.0,
            redistribute: true,
        }
    }

    #[test]
    fn test_pack_into() {
        let r = result();
        let mut buffer = vec![-1.0; 5];
        assert_eq!(r.pack_into(&mut buffer).unwrap(), 4);
        assert_eq!(buffer, vec![0.002, 0.01, 0.005, 0.03, -1.0]);
        assert_eq!(r.packed(), buffer[..4].to_vec());
    }

    #[test]
    fn test_pack_into_too_short() {
        let r = result();
        let mut buffer = vec![0.0; 4];
        let err = r.pack_into(&mut buffer).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Capacity);
        assert_eq!(buffer, vec![0.0; 4]);
    }

    #[test]
    fn test_coherent_elastic_step_function() {
        let r = result();
        assert_eq!(r.coherent_elastic_xs(0.001), 0.0);
        assert!((r.coherent_elastic_xs(0.002) - 0.01 / 0.002).abs() < 1e-12);
        assert!((r.coherent_elastic_xs(0.004) - 0.01 / 0.004).abs() < 1e-12);
        assert!((r.coherent_elastic_xs(0.01) - 0.04 / 0.01).abs() < 1e-12);
        assert_eq!(r.coherent_elastic_xs(0.0), 0.0);
        assert_eq!(r.cutoff_energy(), Some(0.002));
    }
}
