//! # 材料加载
//!
//! 解析配置字符串、设置温度并通过材料提供者构建模型，拒绝单晶材料。
//!
//! ## 依赖关系
//! - 被 `bragg/mod.rs` 的提取流程调用
//! - 使用 `parsers/matcfg.rs`

use crate::error::{BraggError, Result};
use crate::models::MaterialModel;
use crate::parsers::MatCfg;

/// 材料模型提供者
///
/// 给定已解析的配置（已包含生效温度），构建多晶材料模型。
pub trait MaterialProvider {
    fn build(&self, cfg: &MatCfg) -> Result<MaterialModel>;
}

/// 加载材料模型
///
/// 显式温度覆盖配置字符串中的 `temp`。
pub fn load_material<P: MaterialProvider + ?Sized>(
    provider: &P,
    cfg: &str,
    temperature: f64,
) -> Result<MaterialModel> {
    let mut matcfg = MatCfg::parse(cfg)?;
    matcfg.set_temperature(temperature)?;

    if matcfg.is_single_crystal() {
        return Err(single_crystal_error(matcfg.filename()));
    }

    let model = provider.build(&matcfg)?;
    if model.is_single_crystal() {
        return Err(single_crystal_error(model.name()));
    }

    Ok(model)
}

fn single_crystal_error(name: &str) -> BraggError {
    BraggError::ConfigurationError(format!(
        "'{}' is a single crystal; only polycrystalline materials are supported",
        name
    ))
}
