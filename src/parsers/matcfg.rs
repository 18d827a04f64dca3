//! # 材料配置字符串解析
//!
//! 解析形如 `Al_sg225.ncmat;temp=293.6K;dcutoff=0.4` 的材料配置字符串。
//!
//! ## 格式说明
//! ```text
//! <文件名>[;key=value]*
//! ```
//! - `temp`: 温度（K，可带 `K` 后缀）
//! - `dcutoff` / `dcutoffup`: 晶面 d 间距下限/上限（Å）
//! - `mos`, `dir1`, `dir2`, `dirtol`: 单晶参数，出现任何一个即视为单晶
//!
//! ## 依赖关系
//! - 被 `bragg/loader.rs` 和 `parsers/ncmat.rs` 使用

use crate::error::{BraggError, Result};

/// 默认温度（K）
pub const DEFAULT_TEMPERATURE: f64 = 293.15;

/// 默认 d 间距下限（Å）
pub const DEFAULT_DCUTOFF: f64 = 0.5;

const SINGLE_CRYSTAL_KEYS: [&str; 4] = ["mos", "dir1", "dir2", "dirtol"];

/// 材料配置
#[derive(Debug, Clone, PartialEq)]
pub struct MatCfg {
    filename: String,
    temperature: Option<f64>,
    dcutoff: f64,
    dcutoff_up: f64,
    single_crystal_keys: Vec<String>,
}

impl MatCfg {
    /// 解析配置字符串
    pub fn parse(cfg: &str) -> Result<Self> {
        let mut parts = cfg.split(';');

        let filename = parts.next().unwrap_or("").trim().to_string();
        if filename.is_empty() {
            return Err(config_error(cfg, "missing material file name"));
        }

        let mut parsed = MatCfg {
            filename,
            temperature: None,
            dcutoff: DEFAULT_DCUTOFF,
            dcutoff_up: f64::INFINITY,
            single_crystal_keys: Vec::new(),
        };

        for part in parts {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| config_error(cfg, &format!("expected key=value, got '{}'", part)))?;
            let key = key.trim().to_lowercase();
            let value = value.trim();

            match key.as_str() {
                "temp" => {
                    let number = value.strip_suffix('K').unwrap_or(value).trim();
                    let t = parse_positive(cfg, "temp", number)?;
                    parsed.temperature = Some(t);
                }
                "dcutoff" => parsed.dcutoff = parse_positive(cfg, "dcutoff", value)?,
                "dcutoffup" => parsed.dcutoff_up = parse_positive(cfg, "dcutoffup", value)?,
                k if SINGLE_CRYSTAL_KEYS.contains(&k) => {
                    parsed.single_crystal_keys.push(key.clone());
                }
                _ => {
                    return Err(config_error(cfg, &format!("unknown parameter '{}'", key)));
                }
            }
        }

        if parsed.dcutoff_up <= parsed.dcutoff {
            return Err(config_error(
                cfg,
                &format!(
                    "dcutoffup ({}) must exceed dcutoff ({})",
                    parsed.dcutoff_up, parsed.dcutoff
                ),
            ));
        }

        Ok(parsed)
    }

    /// 设置温度，覆盖配置字符串中的 `temp`
    pub fn set_temperature(&mut self, temperature: f64) -> Result<()> {
        if !(temperature.is_finite() && temperature > 0.0) {
            return Err(BraggError::ConfigurationError(format!(
                "temperature must be positive, got {}",
                temperature
            )));
        }
        self.temperature = Some(temperature);
        Ok(())
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn temperature(&self) -> Option<f64> {
        self.temperature
    }

    /// 生效温度：未设置时取默认值
    pub fn effective_temperature(&self) -> f64 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    pub fn dcutoff(&self) -> f64 {
        self.dcutoff
    }

    pub fn dcutoff_up(&self) -> f64 {
        self.dcutoff_up
    }

    /// 是否请求了单晶参数
    pub fn is_single_crystal(&self) -> bool {
        !self.single_crystal_keys.is_empty()
    }
}

fn parse_positive(cfg: &str, key: &str, value: &str) -> Result<f64> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(config_error(
            cfg,
            &format!("parameter '{}' needs a positive number, got '{}'", key, value),
        )),
    }
}

fn config_error(cfg: &str, reason: &str) -> BraggError {
    BraggError::ConfigurationError(format!("{} (in \"{}\")", reason, cfg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_plain_filename() {
        let cfg = MatCfg::parse("Al_sg225.ncmat").unwrap();
        assert_eq!(cfg.filename(), "Al_sg225.ncmat");
        assert_eq!(cfg.temperature(), None);
        assert_eq!(cfg.effective_temperature(), DEFAULT_TEMPERATURE);
        assert_eq!(cfg.dcutoff(), DEFAULT_DCUTOFF);
        assert!(!cfg.is_single_crystal());
    }

    #[test]
    fn test_parse_parameters() {
        let cfg = MatCfg::parse(" PE.ncmat ; temp=350K;dcutoff = 0.3 ; dcutoffup=5;").unwrap();
        assert_eq!(cfg.filename(), "PE.ncmat");
        assert_eq!(cfg.temperature(), Some(350.0));
        assert_eq!(cfg.dcutoff(), 0.3);
        assert_eq!(cfg.dcutoff_up(), 5.0);
    }

    #[test]
    fn test_single_crystal_detection() {
        let cfg = MatCfg::parse("Ge.ncmat;mos=0.3deg;dir1=@crys_hkl:5,1,1@lab:0,0,1").unwrap();
        assert!(cfg.is_single_crystal());
    }

    #[test]
    fn test_set_temperature_overrides() {
        let mut cfg = MatCfg::parse("Al.ncmat;temp=100").unwrap();
        cfg.set_temperature(600.0).unwrap();
        assert_eq!(cfg.temperature(), Some(600.0));
        assert!(cfg.set_temperature(0.0).is_err());
        assert!(cfg.set_temperature(f64::NAN).is_err());
    }

    #[test]
    fn test_invalid_strings() {
        for bad in [
            "",
            "  ;temp=300",
            "Al.ncmat;temp",
            "Al.ncmat;temp=-5",
            "Al.ncmat;colour=blue",
            "Al.ncmat;dcutoff=2;dcutoffup=1",
        ] {
            let err = MatCfg::parse(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Configuration, "input: {:?}", bad);
        }
    }
}
