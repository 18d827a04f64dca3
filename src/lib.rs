//! # braggedge - 面向 LEAPR 的 Bragg 边提取库
//!
//! 从多晶材料模型中提取所请求核素（同位素或天然元素）在给定温度下的
//! Bragg 边（能量, 加权截面）对，以及束缚相干/非相干截面、自由原子截面、
//! 均方位移、份额和非相干再分配标志。
//!
//! ## 依赖关系
//! ```text
//! lib.rs
//!   ├── bragg/     (加载、匹配、校验、Bragg 边计算)
//!   ├── parsers/   (配置字符串与 NCMAT 解析、材料提供者)
//!   ├── physics/   (原子数据库、均方位移、晶面生成)
//!   ├── models/    (数据模型)
//!   └── error.rs   (错误处理)
//! ```

pub mod bragg;
pub mod error;
pub mod models;
pub mod parsers;
pub mod physics;

pub use bragg::{extract_bragg_edges, BraggEdge, BraggEdgeResult, MaterialProvider};
pub use error::{BraggError, ErrorKind, Result};
pub use parsers::{MatCfg, NcmatProvider};

/// 使用内置 NCMAT 提供者提取 Bragg 边
///
/// 材料文件在工作目录中查找。
pub fn extract_from_ncmat(
    cfg: &str,
    temperature: f64,
    target_z: u32,
    target_a: u32,
    capacity: usize,
) -> Result<BraggEdgeResult> {
    extract_bragg_edges(
        &NcmatProvider::new(),
        cfg,
        temperature,
        target_z,
        target_a,
        capacity,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const POLYETHYLENE_LIKE: &str = r#"NCMAT v4
# 简化的 CH2 晶体
@CELL
  lengths 7.4 4.9 2.55
  angles 90 90 90
@ATOMPOSITIONS
  C 0.04 0.06 1/4
  C 0.96 0.94 3/4
  H 0.18 0.03 1/4
  H 0.82 0.97 3/4
  H 0.04 0.27 1/4
  H 0.96 0.73 3/4
@DYNINFO
  element C
  fraction 1/3
  type vdos
  vdos_egrid 0.005 0.2
  vdos_density 0.05 0.2 0.5 0.9 1.0 0.7 0.3 0.1
@DYNINFO
  element H
  fraction 2/3
  type vdos
  vdos_egrid 0.005 0.4
  vdos_density 0.01 0.1 0.3 0.6 0.8 1.0 0.9 0.6
    0.4 0.3 0.2 0.1
"#;

    #[test]
    fn test_extract_from_ncmat_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ch2.ncmat");
        fs::write(&path, POLYETHYLENE_LIKE).unwrap();
        let cfg = format!("{};dcutoff=1.0", path.display());

        let h = extract_from_ncmat(&cfg, 293.6, 1, 0, 10_000).unwrap();
        let c = extract_from_ncmat(&cfg, 293.6, 6, 0, 10_000).unwrap();

        assert!(h.plane_count > 0);
        assert_eq!(h.packed(), c.packed());
        assert!((h.isotope_fraction - 2.0 / 3.0).abs() < 1e-12);
        assert!(h.mean_squared_displacement > c.mean_squared_displacement);
        // 碳的 f/(1−f)·σ_inc 远小于氢
        assert!(c.redistribute);
        assert!(!h.redistribute);

        // 晶面按 d 降序，即能量升序
        assert!(h.edges.windows(2).all(|w| w[0].energy <= w[1].energy));
    }

    #[test]
    fn test_extract_temperature_dependence() {
        let provider = NcmatProvider::new().with_inline("ch2.ncmat", POLYETHYLENE_LIKE);
        let cfg = "ch2.ncmat;dcutoff=1.0";
        let cold = extract_bragg_edges(&provider, cfg, 20.0, 1, 0, 10_000).unwrap();
        let hot = extract_bragg_edges(&provider, cfg, 600.0, 1, 0, 10_000).unwrap();

        assert!(hot.mean_squared_displacement > cold.mean_squared_displacement);
        assert_eq!(hot.bound_incoherent_xs, cold.bound_incoherent_xs);
        // Debye-Waller 因子使高温下的相干弹性截面降低
        assert!(hot.coherent_elastic_xs(10.0) < cold.coherent_elastic_xs(10.0));
    }

    #[test]
    fn test_deuterium_request_not_found() {
        let provider = NcmatProvider::new().with_inline("ch2.ncmat", POLYETHYLENE_LIKE);
        let err = extract_bragg_edges(&provider, "ch2.ncmat", 293.6, 1, 2, 10_000).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
