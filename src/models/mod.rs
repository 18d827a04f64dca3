//! # 数据模型模块
//!
//! 定义原子物种、晶胞结构和多晶材料模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`、`physics/` 和 `bragg/` 使用
//! - 子模块: species, structure, material

pub mod material;
pub mod species;
pub mod structure;

pub use material::{
    AtomIndex, AtomInfo, DiffractionPlane, DynamicInfo, MaterialBuilder, MaterialModel,
    StructureInfo, VdosCurve,
};
pub use species::{AtomSpecies, MixtureComponent, Nuclide, SpeciesKind};
pub use structure::{AtomSite, Lattice, UnitCell};
