//! # 晶胞结构数据模型
//!
//! 定义晶格与晶胞内原子位置，由 NCMAT 解析器产生，供晶面生成使用。
//!
//! ## 依赖关系
//! - 被 `parsers/ncmat.rs` 和 `physics/hkl.rs` 使用
//! - 无外部模块依赖

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// 晶格参数表示
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lattice {
    /// 晶格向量矩阵 (3x3)，行向量表示 a, b, c
    /// [[a1, a2, a3], [b1, b2, b3], [c1, c2, c3]]
    pub matrix: [[f64; 3]; 3],
}

impl Lattice {
    /// 从晶格参数 (a, b, c, alpha, beta, gamma) 创建晶格
    /// 角度单位：度
    pub fn from_parameters(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Self {
        let alpha_rad = alpha.to_radians();
        let beta_rad = beta.to_radians();
        let gamma_rad = gamma.to_radians();

        let cos_alpha = alpha_rad.cos();
        let cos_beta = beta_rad.cos();
        let cos_gamma = gamma_rad.cos();
        let sin_gamma = gamma_rad.sin();

        let a_vec = [a, 0.0, 0.0];
        let b_vec = [b * cos_gamma, b * sin_gamma, 0.0];

        let c1 = c * cos_beta;
        let c2 = c * (cos_alpha - cos_beta * cos_gamma) / sin_gamma;
        let c3 = (c * c - c1 * c1 - c2 * c2).sqrt();
        let c_vec = [c1, c2, c3];

        Lattice {
            matrix: [a_vec, b_vec, c_vec],
        }
    }

    /// 从晶格向量矩阵创建
    pub fn from_vectors(matrix: [[f64; 3]; 3]) -> Self {
        Lattice { matrix }
    }

    /// 获取晶格参数 (a, b, c, alpha, beta, gamma)
    pub fn parameters(&self) -> (f64, f64, f64, f64, f64, f64) {
        let a_vec = self.matrix[0];
        let b_vec = self.matrix[1];
        let c_vec = self.matrix[2];

        let a = norm(&a_vec);
        let b = norm(&b_vec);
        let c = norm(&c_vec);

        let alpha = (dot(&b_vec, &c_vec) / (b * c)).acos().to_degrees();
        let beta = (dot(&a_vec, &c_vec) / (a * c)).acos().to_degrees();
        let gamma = (dot(&a_vec, &b_vec) / (a * b)).acos().to_degrees();

        (a, b, c, alpha, beta, gamma)
    }

    /// 计算晶格体积（Å³，取绝对值）
    pub fn volume(&self) -> f64 {
        let [a, b, c] = self.matrix;
        dot(&a, &cross(&b, &c)).abs()
    }

    /// 倒格矢矩阵（含 2π 因子），行向量为 b1, b2, b3
    ///
    /// 体积为零时返回零矩阵。
    pub fn reciprocal(&self) -> [[f64; 3]; 3] {
        let [a, b, c] = self.matrix;

        let b_cross_c = cross(&b, &c);
        let volume = dot(&a, &b_cross_c);
        if volume.abs() < 1e-10 {
            return [[0.0; 3]; 3];
        }

        let factor = 2.0 * PI / volume;
        let scale = |v: [f64; 3]| [v[0] * factor, v[1] * factor, v[2] * factor];

        [scale(b_cross_c), scale(cross(&c, &a)), scale(cross(&a, &b))]
    }
}

/// 晶胞中的一个原子位置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomSite {
    /// 物种标签（对应 @ATOMPOSITIONS 中的名字）
    pub label: String,

    /// 分数坐标 [x, y, z]
    pub position: [f64; 3],
}

impl AtomSite {
    pub fn new(label: impl Into<String>, position: [f64; 3]) -> Self {
        AtomSite {
            label: label.into(),
            position,
        }
    }
}

/// 晶胞
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitCell {
    /// 材料名称
    pub name: String,

    /// 晶格
    pub lattice: Lattice,

    /// 原子位置列表
    pub sites: Vec<AtomSite>,
}

impl UnitCell {
    pub fn new(name: impl Into<String>, lattice: Lattice, sites: Vec<AtomSite>) -> Self {
        UnitCell {
            name: name.into(),
            lattice,
            sites,
        }
    }

    /// 按首次出现顺序列出不同的物种标签
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for site in &self.sites {
            if !labels.contains(&site.label.as_str()) {
                labels.push(site.label.as_str());
            }
        }
        labels
    }

    /// 某物种的全部分数坐标
    pub fn positions_of(&self, label: &str) -> Vec<[f64; 3]> {
        self.sites
            .iter()
            .filter(|s| s.label == label)
            .map(|s| s.position)
            .collect()
    }
}

/// 向量叉积
fn cross(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// 向量点积
fn dot(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn norm(a: &[f64; 3]) -> f64 {
    dot(a, a).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice_from_parameters_cubic() {
        let lattice = Lattice::from_parameters(5.0, 5.0, 5.0, 90.0, 90.0, 90.0);
        let (a, b, c, alpha, beta, gamma) = lattice.parameters();

        assert!((a - 5.0).abs() < 1e-6);
        assert!((b - 5.0).abs() < 1e-6);
        assert!((c - 5.0).abs() < 1e-6);
        assert!((alpha - 90.0).abs() < 1e-6);
        assert!((beta - 90.0).abs() < 1e-6);
        assert!((gamma - 90.0).abs() < 1e-6);
    }

    #[test]
    fn test_lattice_volume_cubic() {
        let lattice = Lattice::from_parameters(5.0, 5.0, 5.0, 90.0, 90.0, 90.0);
        assert!((lattice.volume() - 125.0).abs() < 1e-6);
    }

    #[test]
    fn test_lattice_hexagonal() {
        let lattice = Lattice::from_parameters(3.0, 3.0, 5.0, 90.0, 90.0, 120.0);
        let (a, b, c, _, _, gamma) = lattice.parameters();

        assert!((a - 3.0).abs() < 0.01);
        assert!((b - 3.0).abs() < 0.01);
        assert!((c - 5.0).abs() < 0.01);
        assert!((gamma - 120.0).abs() < 0.01);
        // V = a² c sin(120°)
        let expected = 9.0 * 5.0 * (120.0_f64).to_radians().sin();
        assert!((lattice.volume() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_reciprocal_cubic() {
        let lattice = Lattice::from_vectors([[4.0, 0.0, 0.0], [0.0, 4.0, 0.0], [0.0, 0.0, 4.0]]);
        let recip = lattice.reciprocal();
        assert!((recip[0][0] - 2.0 * PI / 4.0).abs() < 1e-12);
        assert!(recip[0][1].abs() < 1e-12);
        assert!((recip[2][2] - 2.0 * PI / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_unit_cell_labels() {
        let lattice = Lattice::from_parameters(5.0, 5.0, 5.0, 90.0, 90.0, 90.0);
        let sites = vec![
            AtomSite::new("Na", [0.0, 0.0, 0.0]),
            AtomSite::new("Cl", [0.5, 0.0, 0.0]),
            AtomSite::new("Na", [0.5, 0.5, 0.0]),
        ];
        let cell = UnitCell::new("NaCl", lattice, sites);

        assert_eq!(cell.labels(), vec!["Na", "Cl"]);
        assert_eq!(cell.positions_of("Na").len(), 2);
    }
}
