//! # 均方位移计算
//!
//! 根据 Debye 模型或显式振动态密度（VDOS）计算原子在给定温度下的各向同性均方位移。
//!
//! ## 公式
//! - Debye: msd = 3ħ²/(M k_B T_D) · [ (T/T_D)² ∫₀^{T_D/T} x/(eˣ−1) dx + 1/4 ]
//! - VDOS:  msd = ħ²/(2M) · ∫ ρ(E)/E · coth(E/2k_BT) dE / ∫ ρ(E) dE
//!
//! VDOS 在首个网格点以下按 ρ ∝ E² 外推到零能量。
//!
//! ## 依赖关系
//! - 被 `parsers/ncmat.rs` 调用
//! - 使用 `physics/constants.rs`、`models/material.rs` 的 VdosCurve

use crate::error::{BraggError, Result};
use crate::models::VdosCurve;
use crate::physics::constants::{BOLTZMANN_EV, HBAR2_OVER_2AMU, HBAR2_OVER_AMU_KB};

/// Simpson 积分的区间数（必须为偶数）
const SIMPSON_INTERVALS: usize = 2000;

/// Debye 模型均方位移（Å²）
///
/// `mass` 单位 amu，温度单位 K。
pub fn debye_msd(debye_temperature: f64, temperature: f64, mass: f64) -> Result<f64> {
    check_positive("Debye temperature", debye_temperature)?;
    check_positive("temperature", temperature)?;
    check_positive("atomic mass", mass)?;

    let x = debye_temperature / temperature;
    // 被积函数在 t > 60 后可忽略
    let integral = simpson(bose_weight, 0.0, x.min(60.0), SIMPSON_INTERVALS);
    let bracket = integral / (x * x) + 0.25;

    Ok(3.0 * HBAR2_OVER_AMU_KB / (mass * debye_temperature) * bracket)
}

/// 由 VDOS 曲线计算均方位移（Å²）
pub fn vdos_msd(curve: &VdosCurve, temperature: f64, mass: f64) -> Result<f64> {
    check_positive("temperature", temperature)?;
    check_positive("atomic mass", mass)?;

    let kt = BOLTZMANN_EV * temperature;
    let energies = curve.energies();
    let density = curve.density();

    let emin = energies[0];
    let rho0 = density[0];

    // 低能外推段 ρ(E) = ρ0 (E/emin)²
    let low_norm = rho0 * emin / 3.0;
    let low_weighted = simpson(
        |e| rho0 / (emin * emin) * e_coth(e, kt),
        0.0,
        emin,
        SIMPSON_INTERVALS,
    );

    let mut norm = low_norm;
    let mut weighted = low_weighted;
    for i in 1..energies.len() {
        let (e0, e1) = (energies[i - 1], energies[i]);
        let (r0, r1) = (density[i - 1], density[i]);
        let de = e1 - e0;
        norm += 0.5 * de * (r0 + r1);
        weighted += 0.5 * de * (r0 / (e0 * e0) * e_coth(e0, kt) + r1 / (e1 * e1) * e_coth(e1, kt));
    }

    if !(norm > 0.0) {
        return Err(BraggError::ConfigurationError(
            "VDOS curve integrates to zero".to_string(),
        ));
    }

    Ok(HBAR2_OVER_2AMU / mass * weighted / norm)
}

/// t/(eᵗ−1)，t = 0 处取极限 1
fn bose_weight(t: f64) -> f64 {
    if t == 0.0 {
        1.0
    } else {
        t / t.exp_m1()
    }
}

/// E·coth(E/2kT)，E = 0 处取极限 2kT
fn e_coth(e: f64, kt: f64) -> f64 {
    if e == 0.0 {
        2.0 * kt
    } else {
        e / (e / (2.0 * kt)).tanh()
    }
}

fn simpson<F: Fn(f64) -> f64>(f: F, a: f64, b: f64, n: usize) -> f64 {
    let h = (b - a) / n as f64;
    let mut sum = f(a) + f(b);
    for i in 1..n {
        let w = if i % 2 == 1 { 4.0 } else { 2.0 };
        sum += w * f(a + i as f64 * h);
    }
    sum * h / 3.0
}

fn check_positive(what: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(BraggError::ConfigurationError(format!(
            "{} must be positive, got {}",
            what, value
        )))
    }
}
