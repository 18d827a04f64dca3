//! # 原子物种数据模型
//!
//! 描述一个元素、同位素或混合物的身份以及其静态中子截面。
//!
//! ## 约定
//! - 质量数 `a == 0` 表示天然元素（未区分同位素）
//! - 散射长度单位 fm，截面单位 barn，质量单位 amu
//!
//! ## 依赖关系
//! - 被 `physics/atomdb.rs`、`models/material.rs` 和 `bragg/` 使用

use crate::error::{BraggError, Result};
use crate::physics::constants::{FM2_TO_BARN, NEUTRON_MASS_AMU};

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// 请求的核素 (Z, A)，A = 0 表示天然元素
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nuclide {
    pub z: u32,
    pub a: u32,
}

impl Nuclide {
    pub fn new(z: u32, a: u32) -> Self {
        Nuclide { z, a }
    }

    /// 天然元素
    pub fn natural(z: u32) -> Self {
        Nuclide { z, a: 0 }
    }

    pub fn is_natural(&self) -> bool {
        self.a == 0
    }
}

impl fmt::Display for Nuclide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 0 {
            write!(f, "Z={} natural", self.z)
        } else {
            write!(f, "Z={} A={}", self.z, self.a)
        }
    }
}

/// 混合物中的一个组分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixtureComponent {
    pub fraction: f64,
    pub species: AtomSpecies,
}

/// 物种类别
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SpeciesKind {
    /// 天然元素（同位素丰度按自然界取值）
    NaturalElement,
    /// 单一同位素
    SingleIsotope,
    /// 按原子数分数混合的多个物种
    Mixture(Vec<MixtureComponent>),
}

/// 原子物种
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomSpecies {
    /// 标签（如 "H", "D", "Li6", 或 @ATOMDB 中自定义的名字）
    pub label: String,
    /// 原子序数，混合不同元素时为 0
    pub z: u32,
    /// 质量数，天然元素与混合物为 0
    pub a: u32,
    /// 原子质量（amu）
    pub mass: f64,
    /// 束缚相干散射长度（fm）
    pub coherent_scattering_length: f64,
    /// 束缚非相干截面（barn）
    pub incoherent_xs: f64,
    /// 2200 m/s 吸收截面（barn）
    pub absorption_xs: f64,
    pub kind: SpeciesKind,
}

impl AtomSpecies {
    /// 创建天然元素
    pub fn natural(
        label: impl Into<String>,
        z: u32,
        mass: f64,
        coherent_scattering_length: f64,
        incoherent_xs: f64,
        absorption_xs: f64,
    ) -> Self {
        AtomSpecies {
            label: label.into(),
            z,
            a: 0,
            mass,
            coherent_scattering_length,
            incoherent_xs,
            absorption_xs,
            kind: SpeciesKind::NaturalElement,
        }
    }

    /// 创建单一同位素
    pub fn isotope(
        label: impl Into<String>,
        z: u32,
        a: u32,
        mass: f64,
        coherent_scattering_length: f64,
        incoherent_xs: f64,
        absorption_xs: f64,
    ) -> Self {
        AtomSpecies {
            label: label.into(),
            z,
            a,
            mass,
            coherent_scattering_length,
            incoherent_xs,
            absorption_xs,
            kind: SpeciesKind::SingleIsotope,
        }
    }

    /// 按原子数分数混合多个物种
    ///
    /// 分数必须为正且总和为 1。相干散射长度、质量和吸收截面按分数线性平均，
    /// 非相干截面包含由散射长度不同带来的无序贡献。
    pub fn mixture(label: impl Into<String>, parts: Vec<(f64, AtomSpecies)>) -> Result<Self> {
        let label = label.into();
        if parts.is_empty() {
            return Err(BraggError::ConfigurationError(format!(
                "mixture '{}' has no components",
                label
            )));
        }
        if let Some((f, s)) = parts.iter().find(|(f, _)| !(*f > 0.0 && *f <= 1.0)) {
            return Err(BraggError::ConfigurationError(format!(
                "mixture '{}' has invalid fraction {} for '{}'",
                label, f, s.label
            )));
        }
        let total: f64 = parts.iter().map(|(f, _)| f).sum();
        if (total - 1.0).abs() > 1e-6 {
            return Err(BraggError::ConfigurationError(format!(
                "mixture '{}' fractions sum to {} instead of 1",
                label, total
            )));
        }

        let mass = parts.iter().map(|(f, s)| f * s.mass).sum();
        let b_mix: f64 = parts
            .iter()
            .map(|(f, s)| f * s.coherent_scattering_length)
            .sum();
        let total_bound: f64 = parts.iter().map(|(f, s)| f * s.bound_xs()).sum();
        let absorption_xs = parts.iter().map(|(f, s)| f * s.absorption_xs).sum();
        let incoherent_xs = (total_bound - coherent_xs_from_length(b_mix)).max(0.0);

        let first_z = parts[0].1.z;
        let same_z = parts
            .iter()
            .all(|(_, s)| s.is_element() && s.z == first_z);

        Ok(AtomSpecies {
            label,
            z: if same_z { first_z } else { 0 },
            a: 0,
            mass,
            coherent_scattering_length: b_mix,
            incoherent_xs,
            absorption_xs,
            kind: SpeciesKind::Mixture(
                parts
                    .into_iter()
                    .map(|(fraction, species)| MixtureComponent { fraction, species })
                    .collect(),
            ),
        })
    }

    /// 是否对应唯一确定的元素
    pub fn is_element(&self) -> bool {
        match &self.kind {
            SpeciesKind::NaturalElement | SpeciesKind::SingleIsotope => true,
            SpeciesKind::Mixture(parts) => parts
                .iter()
                .all(|p| p.species.is_element() && p.species.z == self.z),
        }
    }

    pub fn is_single_isotope(&self) -> bool {
        matches!(self.kind, SpeciesKind::SingleIsotope)
    }

    pub fn is_natural_element(&self) -> bool {
        matches!(self.kind, SpeciesKind::NaturalElement)
    }

    /// 束缚相干截面（barn）
    pub fn coherent_xs(&self) -> f64 {
        coherent_xs_from_length(self.coherent_scattering_length)
    }

    /// 束缚总散射截面（barn）
    pub fn bound_xs(&self) -> f64 {
        self.coherent_xs() + self.incoherent_xs
    }

    /// 自由原子散射截面（barn）
    pub fn free_scattering_xs(&self) -> f64 {
        let ratio = self.mass / (self.mass + NEUTRON_MASS_AMU);
        self.bound_xs() * ratio * ratio
    }

    /// 以 (Z, A) 表示的身份，天然元素的 A 记为 0
    pub fn nuclide(&self) -> Nuclide {
        if self.is_natural_element() {
            Nuclide::natural(self.z)
        } else {
            Nuclide::new(self.z, self.a)
        }
    }
}

fn coherent_xs_from_length(b: f64) -> f64 {
    4.0 * PI * b * b * FM2_TO_BARN
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn hydrogen() -> AtomSpecies {
        AtomSpecies::natural("H", 1, 1.00794, -3.7390, 80.26, 0.3326)
    }

    fn deuterium() -> AtomSpecies {
        AtomSpecies::isotope("D", 1, 2, 2.01410178, 6.671, 2.05, 0.000519)
    }

    #[test]
    fn test_coherent_xs_hydrogen() {
        assert_relative_eq!(hydrogen().coherent_xs(), 1.7568, max_relative = 1e-3);
    }

    #[test]
    fn test_free_xs_smaller_than_bound() {
        let h = hydrogen();
        assert!(h.free_scattering_xs() < h.bound_xs());
        // 氢的自由截面约为束缚截面的 1/4
        assert_relative_eq!(
            h.free_scattering_xs() / h.bound_xs(),
            0.2508,
            max_relative = 1e-2
        );
    }

    #[test]
    fn test_nuclide_identity() {
        assert_eq!(hydrogen().nuclide(), Nuclide::natural(1));
        assert_eq!(deuterium().nuclide(), Nuclide::new(1, 2));
        assert!(hydrogen().is_element());
        assert!(deuterium().is_single_isotope());
    }

    #[test]
    fn test_mixture_same_element() {
        let mix =
            AtomSpecies::mixture("Hx", vec![(0.9, hydrogen()), (0.1, deuterium())]).unwrap();
        assert_eq!(mix.z, 1);
        assert_eq!(mix.a, 0);
        assert!(mix.is_element());
        assert!(!mix.is_single_isotope());
        assert!(!mix.is_natural_element());
        assert_relative_eq!(
            mix.coherent_scattering_length,
            0.9 * -3.7390 + 0.1 * 6.671,
            max_relative = 1e-12
        );
        // 总束缚截面守恒
        let expected_total = 0.9 * hydrogen().bound_xs() + 0.1 * deuterium().bound_xs();
        assert_relative_eq!(mix.bound_xs(), expected_total, max_relative = 1e-12);
    }

    #[test]
    fn test_mixture_of_elements_is_not_element() {
        let carbon = AtomSpecies::natural("C", 6, 12.0107, 6.6460, 0.001, 0.0035);
        let mix = AtomSpecies::mixture("CH", vec![(0.5, carbon), (0.5, hydrogen())]).unwrap();
        assert!(!mix.is_element());
        assert_eq!(mix.z, 0);
    }

    #[test]
    fn test_mixture_bad_fractions() {
        assert!(AtomSpecies::mixture("X", vec![(0.5, hydrogen())]).is_err());
        assert!(AtomSpecies::mixture("X", vec![]).is_err());
        assert!(AtomSpecies::mixture("X", vec![(1.5, hydrogen()), (-0.5, deuterium())]).is_err());
    }
}
