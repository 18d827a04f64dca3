//! # 中子散射原子数据库
//!
//! 提供常见天然元素与同位素的束缚散射长度、非相干截面和吸收截面。
//!
//! ## 标签约定
//! - `Al`, `Fe` ...: 天然元素
//! - `H2`, `Li6`, `U235` ...: 元素符号后接质量数表示单一同位素
//! - `D`, `T`: 分别等价于 `H2`, `H3`
//!
//! ## 数据来源
//! V. F. Sears, Neutron News 3 (1992) 26-37
//!
//! ## 依赖关系
//! - 被 `parsers/ncmat.rs` 调用解析物种标签
//! - 纯静态数据，无外部依赖

use crate::models::AtomSpecies;

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// 单个核素的中子数据
#[derive(Debug, Clone, Copy)]
pub struct NuclearData {
    pub z: u32,
    /// 质量数，天然元素为 0
    pub a: u32,
    /// 原子质量（amu）
    pub mass: f64,
    /// 束缚相干散射长度（fm）
    pub b_coh: f64,
    /// 束缚非相干截面（barn）
    pub sigma_inc: f64,
    /// 吸收截面（barn）
    pub sigma_abs: f64,
}

const fn entry(z: u32, a: u32, mass: f64, b_coh: f64, sigma_inc: f64, sigma_abs: f64) -> NuclearData {
    NuclearData {
        z,
        a,
        mass,
        b_coh,
        sigma_inc,
        sigma_abs,
    }
}

/// (元素符号, 数据)
static TABLE: &[(&str, NuclearData)] = &[
    // 氢
    ("H", entry(1, 0, 1.00794, -3.7390, 80.26, 0.3326)),
    ("H", entry(1, 1, 1.00782503, -3.7406, 80.27, 0.3326)),
    ("H", entry(1, 2, 2.01410178, 6.671, 2.05, 0.000519)),
    ("H", entry(1, 3, 3.01604928, 4.792, 0.14, 0.0)),
    // 氦
    ("He", entry(2, 0, 4.002602, 3.26, 0.0, 0.00747)),
    // 锂
    ("Li", entry(3, 0, 6.941, -1.90, 0.92, 70.5)),
    ("Li", entry(3, 6, 6.0151223, 2.00, 0.46, 940.0)),
    ("Li", entry(3, 7, 7.0160040, -2.22, 0.78, 0.0454)),
    // 铍
    ("Be", entry(4, 0, 9.012182, 7.79, 0.0018, 0.0076)),
    ("Be", entry(4, 9, 9.012182, 7.79, 0.0018, 0.0076)),
    // 硼
    ("B", entry(5, 0, 10.811, 5.30, 1.70, 767.0)),
    ("B", entry(5, 10, 10.0129370, -0.1, 3.0, 3835.0)),
    ("B", entry(5, 11, 11.0093054, 6.65, 0.21, 0.0055)),
    // 碳
    ("C", entry(6, 0, 12.0107, 6.6460, 0.001, 0.0035)),
    ("C", entry(6, 12, 12.0, 6.6511, 0.0, 0.00353)),
    ("C", entry(6, 13, 13.0033548, 6.19, 0.034, 0.00137)),
    // 氮
    ("N", entry(7, 0, 14.0067, 9.36, 0.50, 1.90)),
    // 氧
    ("O", entry(8, 0, 15.9994, 5.803, 0.0008, 0.00019)),
    ("O", entry(8, 16, 15.9949146, 5.803, 0.0, 0.0001)),
    // 氟
    ("F", entry(9, 0, 18.9984032, 5.654, 0.0008, 0.0096)),
    // 钠
    ("Na", entry(11, 0, 22.98976928, 3.63, 1.62, 0.53)),
    // 镁
    ("Mg", entry(12, 0, 24.3050, 5.375, 0.08, 0.063)),
    // 铝
    ("Al", entry(13, 0, 26.9815386, 3.449, 0.0082, 0.231)),
    // 硅
    ("Si", entry(14, 0, 28.0855, 4.1491, 0.004, 0.171)),
    // 氯
    ("Cl", entry(17, 0, 35.453, 9.5770, 5.3, 33.5)),
    // 钙
    ("Ca", entry(20, 0, 40.078, 4.70, 0.05, 0.43)),
    // 钛
    ("Ti", entry(22, 0, 47.867, -3.438, 2.87, 6.09)),
    // 钒
    ("V", entry(23, 0, 50.9415, -0.3824, 5.08, 5.08)),
    // 铁
    ("Fe", entry(26, 0, 55.845, 9.45, 0.40, 2.56)),
    // 镍
    ("Ni", entry(28, 0, 58.6934, 10.3, 5.2, 4.49)),
    // 铜
    ("Cu", entry(29, 0, 63.546, 7.718, 0.55, 3.78)),
    // 锌
    ("Zn", entry(30, 0, 65.38, 5.680, 0.077, 1.11)),
    // 钇
    ("Y", entry(39, 0, 88.90585, 7.75, 0.15, 1.28)),
    // 锆
    ("Zr", entry(40, 0, 91.224, 7.16, 0.02, 0.185)),
    // 铌
    ("Nb", entry(41, 0, 92.90638, 7.054, 0.0024, 1.15)),
    // 钼
    ("Mo", entry(42, 0, 95.96, 6.715, 0.04, 2.48)),
    // 铅
    ("Pb", entry(82, 0, 207.2, 9.405, 0.003, 0.171)),
    // 铀
    ("U", entry(92, 0, 238.02891, 8.417, 0.005, 7.57)),
    ("U", entry(92, 235, 235.0439299, 10.47, 0.2, 680.9)),
    ("U", entry(92, 238, 238.0507882, 8.402, 0.0, 2.68)),
];

/// 按标签索引的数据库（天然元素为符号本身，同位素为符号加质量数）
pub static NUCLEAR_DATA: LazyLock<HashMap<String, NuclearData>> = LazyLock::new(|| {
    TABLE
        .iter()
        .map(|(sym, d)| (table_key(sym, d.a), *d))
        .collect()
});

static LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z][a-z]?)(\d*)$").expect("valid species label regex"));

fn table_key(symbol: &str, a: u32) -> String {
    if a == 0 {
        symbol.to_string()
    } else {
        format!("{}{}", symbol, a)
    }
}

/// 查询原子数据
pub fn lookup(symbol: &str, a: u32) -> Option<&'static NuclearData> {
    NUCLEAR_DATA.get(table_key(symbol, a).as_str())
}

/// 将物种标签解析为内置物种
///
/// 未收录或格式不符的标签返回 `None`。
pub fn species_from_label(label: &str) -> Option<AtomSpecies> {
    let (symbol, a) = match label {
        "D" => ("H", 2),
        "T" => ("H", 3),
        _ => {
            let caps = LABEL_RE.captures(label)?;
            let symbol = caps.get(1)?.as_str();
            let digits = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            let a = if digits.is_empty() {
                0
            } else {
                digits.parse().ok()?
            };
            (symbol, a)
        }
    };

    let data = lookup(symbol, a)?;
    let species = if data.a == 0 {
        AtomSpecies::natural(label, data.z, data.mass, data.b_coh, data.sigma_inc, data.sigma_abs)
    } else {
        AtomSpecies::isotope(
            label,
            data.z,
            data.a,
            data.mass,
            data.b_coh,
            data.sigma_inc,
            data.sigma_abs,
        )
    };
    Some(species)
}
