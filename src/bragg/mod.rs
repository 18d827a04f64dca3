//! # Bragg 边提取模块
//!
//! 为 LEAPR 散射核生成器从多晶材料模型中提取 Bragg 边与所请求核素的截面数据。
//!
//! ## 流程
//! 加载（拒绝单晶）→ 组分匹配与排序（单次遍历）→ 匹配校验 → Bragg 边列表（单次遍历）
//!
//! ## 子模块
//! - `loader`: 材料提供者接口与加载
//! - `matcher`: 物种匹配与再分配排序
//! - `validator`: 匹配校验
//! - `tabulator`: Bragg 边计算
//! - `result`: 提取结果
//! - `export`: 数据导出
//!
//! ## 依赖关系
//! - 被 `lib.rs` 和 `commands/` 使用
//! - 使用 `models/`、`parsers/`、`physics/`

pub mod export;
pub mod loader;
pub mod matcher;
pub mod result;
pub mod tabulator;
pub mod validator;

pub use loader::{load_material, MaterialProvider};
pub use matcher::{scan_components, IncoherentRanking, MatchResult, SpeciesScan};
pub use result::BraggEdgeResult;
pub use tabulator::BraggEdge;

use crate::error::Result;
use crate::models::{MaterialModel, Nuclide};

/// 从材料配置中提取所请求核素的 Bragg 边数据
///
/// `target_a = 0` 表示天然元素。`capacity` 为调用方输出缓冲区的槽位数，
/// 必须大于晶面数的两倍。
pub fn extract_bragg_edges<P: MaterialProvider + ?Sized>(
    provider: &P,
    cfg: &str,
    temperature: f64,
    target_z: u32,
    target_a: u32,
    capacity: usize,
) -> Result<BraggEdgeResult> {
    let model = load_material(provider, cfg, temperature)?;
    extract_from_model(&model, Nuclide::new(target_z, target_a), capacity)
}

/// 对已加载的模型执行匹配、校验与列表计算
pub fn extract_from_model(
    model: &MaterialModel,
    target: Nuclide,
    capacity: usize,
) -> Result<BraggEdgeResult> {
    let scan = scan_components(model, target);
    let validated = validator::validate(scan, target)?;
    let edges = tabulator::tabulate(model, capacity)?;

    let matched = validated.matched;
    Ok(BraggEdgeResult {
        material: model.name().to_string(),
        temperature: model.temperature(),
        plane_count: edges.len(),
        edges,
        bound_incoherent_xs: matched.incoherent_xs,
        bound_coherent_xs: matched.coherent_xs,
        free_atom_xs: matched.free_scattering_xs,
        mean_squared_displacement: matched.msd,
        isotope_fraction: matched.fraction,
        global_min_incoherent_fraction: validated.min_incoherent_contribution,
        redistribute: validated.redistribute,
    })
}
