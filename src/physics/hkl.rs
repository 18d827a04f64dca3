//! # 衍射晶面生成
//!
//! 从晶胞和原子表计算多晶材料的衍射晶面族列表。
//!
//! ## 算法概述
//! 1. 计算倒格矢
//! 2. 遍历 d 间距在 [dcutoff, dcutoffup] 内的 (hkl) 点
//! 3. 计算中子相干结构因子（含 Debye-Waller 因子）
//! 4. 按 d 间距和结构因子合并等效晶面，统计多重度
//! 5. 按 d 间距降序排列
//!
//! ## 依赖关系
//! - 被 `parsers/ncmat.rs` 调用
//! - 使用 `models/structure.rs` 的 Lattice
//! - 使用 `models/material.rs` 的 AtomInfo、DiffractionPlane

use crate::error::{BraggError, Result};
use crate::models::{AtomInfo, DiffractionPlane, Lattice};
use crate::physics::constants::FM2_TO_BARN;

use std::f64::consts::PI;

/// 结构因子平方低于该值（barn）的晶面被丢弃
pub const DEFAULT_FSQUARED_CUT: f64 = 1e-5;

/// 合并晶面时使用的相对容差
const GROUPING_TOLERANCE: f64 = 1e-6;

/// 枚举 (hkl) 点数上限
const MAX_HKL_POINTS: usize = 50_000_000;

/// 单个 (hkl) 反射
#[derive(Debug, Clone)]
struct Reflection {
    d_spacing: f64,
    fsquared: f64,
    hkl: [i32; 3],
}

/// 晶面族（合并中）
#[derive(Debug, Clone)]
struct Family {
    d_spacing: f64,
    fsquared: f64,
    multiplicity: u32,
    hkl: [i32; 3],
}

/// 晶面生成器
#[derive(Debug, Clone)]
pub struct PlaneGenerator {
    /// d 间距下限（Å）
    dcutoff: f64,
    /// d 间距上限（Å）
    dcutoff_up: f64,
    /// 结构因子平方下限（barn）
    fsquared_cut: f64,
}

impl PlaneGenerator {
    /// 创建新的晶面生成器
    pub fn new(dcutoff: f64, dcutoff_up: f64) -> Self {
        Self {
            dcutoff,
            dcutoff_up,
            fsquared_cut: DEFAULT_FSQUARED_CUT,
        }
    }

    pub fn with_fsquared_cut(mut self, fsquared_cut: f64) -> Self {
        self.fsquared_cut = fsquared_cut;
        self
    }

    /// 生成晶面族列表
    pub fn generate(&self, lattice: &Lattice, atoms: &[AtomInfo]) -> Result<Vec<DiffractionPlane>> {
        if !(self.dcutoff > 0.0) || self.dcutoff_up <= self.dcutoff {
            return Err(BraggError::ConfigurationError(format!(
                "invalid d-spacing range [{}, {}]",
                self.dcutoff, self.dcutoff_up
            )));
        }

        let recip = lattice.reciprocal();
        if recip == [[0.0; 3]; 3] {
            return Err(BraggError::ConfigurationError(
                "unit cell has zero volume".to_string(),
            ));
        }

        // |h| <= |a| / dcutoff，依此类推
        let (a, b, c, _, _, _) = lattice.parameters();
        let h_bound = (a / self.dcutoff).ceil();
        let k_bound = (b / self.dcutoff).ceil();
        let l_bound = (c / self.dcutoff).ceil();

        // 以浮点计算枚举点数，避免整数溢出
        let points = (2.0 * h_bound + 1.0) * (2.0 * k_bound + 1.0) * (2.0 * l_bound + 1.0);
        if !(points <= MAX_HKL_POINTS as f64) {
            return Err(BraggError::ConfigurationError(format!(
                "dcutoff {} Å is too small for this unit cell ({:.3e} hkl points)",
                self.dcutoff, points
            )));
        }

        let h_max = h_bound as i32;
        let k_max = k_bound as i32;
        let l_max = l_bound as i32;

        let mut reflections = Vec::new();

        for h in -h_max..=h_max {
            for k in -k_max..=k_max {
                for l in -l_max..=l_max {
                    if h == 0 && k == 0 && l == 0 {
                        continue;
                    }

                    let g = calculate_g(&recip, h, k, l);
                    let g_mag = (g[0] * g[0] + g[1] * g[1] + g[2] * g[2]).sqrt();
                    if g_mag < 1e-10 {
                        continue;
                    }

                    let d = 2.0 * PI / g_mag;
                    if d < self.dcutoff || d > self.dcutoff_up {
                        continue;
                    }

                    let fsquared = structure_factor_squared(atoms, [h, k, l], d);
                    if fsquared < self.fsquared_cut {
                        continue;
                    }

                    reflections.push(Reflection {
                        d_spacing: d,
                        fsquared,
                        hkl: [h, k, l],
                    });
                }
            }
        }

        Ok(group_families(reflections))
    }
}

/// 计算倒格矢 G = h*b1 + k*b2 + l*b3
fn calculate_g(recip: &[[f64; 3]; 3], h: i32, k: i32, l: i32) -> [f64; 3] {
    let hf = h as f64;
    let kf = k as f64;
    let lf = l as f64;

    [
        hf * recip[0][0] + kf * recip[1][0] + lf * recip[2][0],
        hf * recip[0][1] + kf * recip[1][1] + lf * recip[2][1],
        hf * recip[0][2] + kf * recip[1][2] + lf * recip[2][2],
    ]
}

/// 中子相干结构因子平方（barn）
///
/// F = Σⱼ bⱼ exp(−2π² msdⱼ / d²) exp(2πi h·rⱼ)
fn structure_factor_squared(atoms: &[AtomInfo], hkl: [i32; 3], d: f64) -> f64 {
    let mut f_real = 0.0;
    let mut f_imag = 0.0;

    for atom in atoms {
        let debye_waller = (-2.0 * PI * PI * atom.msd / (d * d)).exp();
        let amplitude = atom.species.coherent_scattering_length * debye_waller;

        for r in &atom.positions {
            let phase =
                2.0 * PI * (hkl[0] as f64 * r[0] + hkl[1] as f64 * r[1] + hkl[2] as f64 * r[2]);
            f_real += amplitude * phase.cos();
            f_imag += amplitude * phase.sin();
        }
    }

    (f_real * f_real + f_imag * f_imag) * FM2_TO_BARN
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= GROUPING_TOLERANCE * a.abs().max(b.abs()).max(1e-12)
}

/// 合并等效晶面
fn group_families(mut reflections: Vec<Reflection>) -> Vec<DiffractionPlane> {
    reflections.sort_by(|x, y| {
        y.d_spacing
            .total_cmp(&x.d_spacing)
            .then_with(|| y.hkl.cmp(&x.hkl))
    });

    let mut families: Vec<Family> = Vec::new();

    for r in reflections {
        let found = families
            .iter()
            .rev()
            .take_while(|f| close(f.d_spacing, r.d_spacing))
            .position(|f| close(f.fsquared, r.fsquared))
            .map(|p| families.len() - 1 - p);

        match found {
            Some(i) => {
                let family = &mut families[i];
                family.multiplicity += 1;
                if r.hkl > family.hkl {
                    family.hkl = r.hkl;
                }
            }
            None => families.push(Family {
                d_spacing: r.d_spacing,
                fsquared: r.fsquared,
                multiplicity: 1,
                hkl: r.hkl,
            }),
        }
    }

    families
        .into_iter()
        .map(|f| DiffractionPlane::new(f.d_spacing, f.fsquared, f.multiplicity).with_hkl(f.hkl))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AtomSpecies;
    use approx::assert_relative_eq;

    fn aluminium(msd: f64, positions: Vec<[f64; 3]>) -> AtomInfo {
        let species = AtomSpecies::natural("Al", 13, 26.9815386, 3.449, 0.0082, 0.231);
        AtomInfo::new(species, 0, msd).with_positions(positions)
    }

    #[test]
    fn test_simple_cubic_families() {
        let lattice = Lattice::from_parameters(4.0, 4.0, 4.0, 90.0, 90.0, 90.0);
        let atoms = vec![aluminium(0.0, vec![[0.0, 0.0, 0.0]])];

        let planes = PlaneGenerator::new(1.5, f64::INFINITY)
            .generate(&lattice, &atoms)
            .unwrap();

        // h²+k²+l² = 1, 2, 3, 4, 5, 6
        let multiplicities: Vec<u32> = planes.iter().map(|p| p.multiplicity).collect();
        assert_eq!(multiplicities, vec![6, 12, 8, 6, 24, 24]);

        assert_relative_eq!(planes[0].d_spacing, 4.0, max_relative = 1e-12);
        assert_eq!(planes[0].hkl, Some([1, 0, 0]));
        for p in &planes {
            assert_relative_eq!(p.fsquared, 3.449 * 3.449 * 0.01, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_fcc_extinctions() {
        let a = 4.04958;
        let lattice = Lattice::from_parameters(a, a, a, 90.0, 90.0, 90.0);
        let atoms = vec![aluminium(
            0.0,
            vec![
                [0.0, 0.0, 0.0],
                [0.0, 0.5, 0.5],
                [0.5, 0.0, 0.5],
                [0.5, 0.5, 0.0],
            ],
        )];

        let planes = PlaneGenerator::new(1.0, f64::INFINITY)
            .generate(&lattice, &atoms)
            .unwrap();

        // 面心立方：(111), (200), (220), (311), (222), (400)
        assert_eq!(planes.len(), 6);
        assert_eq!(planes[0].hkl, Some([1, 1, 1]));
        assert_eq!(planes[0].multiplicity, 8);
        assert_eq!(planes[1].hkl, Some([2, 0, 0]));
        assert_eq!(planes[1].multiplicity, 6);
        assert_relative_eq!(planes[0].d_spacing, a / 3.0_f64.sqrt(), max_relative = 1e-12);
        assert_relative_eq!(
            planes[0].fsquared,
            16.0 * 3.449 * 3.449 * 0.01,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_debye_waller_reduces_fsquared() {
        let lattice = Lattice::from_parameters(4.0, 4.0, 4.0, 90.0, 90.0, 90.0);
        let cold = vec![aluminium(0.0, vec![[0.0, 0.0, 0.0]])];
        let hot = vec![aluminium(0.02, vec![[0.0, 0.0, 0.0]])];

        let generator = PlaneGenerator::new(1.5, f64::INFINITY);
        let cold_planes = generator.generate(&lattice, &cold).unwrap();
        let hot_planes = generator.generate(&lattice, &hot).unwrap();

        let d = hot_planes[0].d_spacing;
        let expected = cold_planes[0].fsquared * (-4.0 * PI * PI * 0.02 / (d * d)).exp();
        assert_relative_eq!(hot_planes[0].fsquared, expected, max_relative = 1e-9);
    }

    #[test]
    fn test_upper_cutoff_and_ordering() {
        let lattice = Lattice::from_parameters(4.0, 4.0, 4.0, 90.0, 90.0, 90.0);
        let atoms = vec![aluminium(0.0, vec![[0.0, 0.0, 0.0]])];

        let planes = PlaneGenerator::new(1.5, 3.0).generate(&lattice, &atoms).unwrap();
        assert!(planes.iter().all(|p| p.d_spacing <= 3.0 && p.d_spacing >= 1.5));
        assert!(planes.windows(2).all(|w| w[0].d_spacing > w[1].d_spacing));
    }

    #[test]
    fn test_fsquared_cut_drops_weak_planes() {
        let lattice = Lattice::from_parameters(4.0, 4.0, 4.0, 90.0, 90.0, 90.0);
        let atoms = vec![aluminium(0.02, vec![[0.0, 0.0, 0.0]])];

        let all = PlaneGenerator::new(1.0, f64::INFINITY)
            .generate(&lattice, &atoms)
            .unwrap();
        let strong = PlaneGenerator::new(1.0, f64::INFINITY)
            .with_fsquared_cut(0.1)
            .generate(&lattice, &atoms)
            .unwrap();

        assert!(strong.len() < all.len());
        assert!(strong.iter().all(|p| p.fsquared >= 0.1));
    }

    #[test]
    fn test_invalid_range() {
        let lattice = Lattice::from_parameters(4.0, 4.0, 4.0, 90.0, 90.0, 90.0);
        assert!(PlaneGenerator::new(0.0, 1.0).generate(&lattice, &[]).is_err());
        assert!(PlaneGenerator::new(2.0, 1.0).generate(&lattice, &[]).is_err());
    }

    #[test]
    fn test_tiny_dcutoff_rejected() {
        let lattice = Lattice::from_parameters(4.0, 4.0, 4.0, 90.0, 90.0, 90.0);
        let atoms = vec![aluminium(0.0, vec![[0.0, 0.0, 0.0]])];

        for dcutoff in [1e-3, 1e-6, 1e-12] {
            let err = PlaneGenerator::new(dcutoff, f64::INFINITY)
                .generate(&lattice, &atoms)
                .unwrap_err();
            assert_eq!(err.kind(), crate::error::ErrorKind::Configuration);
        }
    }
}
