//! # 物理常数
//!
//! 中子能量、波长换算以及热位移计算所用的常数。

/// E·λ² = h²/(2 m_n)，单位 eV·Å²
pub const EKIN_WLSQ: f64 = 0.081804209605330899;

/// 中子质量（amu）
pub const NEUTRON_MASS_AMU: f64 = 1.00866491595;

/// Boltzmann 常数（eV/K）
pub const BOLTZMANN_EV: f64 = 8.617333262e-5;

/// ħ²/(amu·k_B)，单位 Å²·K
pub const HBAR2_OVER_AMU_KB: f64 = 48.508734121;

/// ħ²/(2·amu)，单位 eV·Å²
pub const HBAR2_OVER_2AMU: f64 = 2.0900796402e-3;

/// 散射长度 b（fm）平方换算为截面（barn）：σ = 4π b² / 100
pub const FM2_TO_BARN: f64 = 0.01;

/// 中子波长（Å）转动能（eV）
///
/// 波长为 0 时返回正无穷。
pub fn wl2ekin(wavelength: f64) -> f64 {
    if wavelength == 0.0 {
        return f64::INFINITY;
    }
    EKIN_WLSQ / (wavelength * wavelength)
}

/// 中子动能（eV）转波长（Å）
pub fn ekin2wl(energy: f64) -> f64 {
    if energy == 0.0 {
        return f64::INFINITY;
    }
    (EKIN_WLSQ / energy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_thermal_neutron() {
        // 1.798 Å 对应约 25.3 meV
        assert_relative_eq!(wl2ekin(1.798), 0.0253, max_relative = 1e-3);
    }

    #[test]
    fn test_wl2ekin_inverse() {
        let wl = 4.0;
        assert_relative_eq!(ekin2wl(wl2ekin(wl)), wl, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_wavelength() {
        assert!(wl2ekin(0.0).is_infinite());
    }
}
