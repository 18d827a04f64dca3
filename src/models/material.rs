//! # 材料模型
//!
//! 材料提供者产生的多晶材料描述：原子表、动力学组分、晶胞信息和衍射晶面列表。
//!
//! 模型只能通过 [`MaterialBuilder`] 构造，构造时校验提取流程依赖的前提条件
//! （晶胞体积与原子数为正、d 间距为正、组分分数在 [0, 1] 内等），
//! 因此后续各阶段可以直接使用这些数值。
//!
//! ## 依赖关系
//! - 被 `parsers/ncmat.rs` 构造
//! - 被 `bragg/` 各阶段读取
//! - 使用 `models/species.rs`、`models/structure.rs`

use crate::error::{BraggError, Result};
use crate::models::species::AtomSpecies;
use crate::models::structure::Lattice;

use serde::{Deserialize, Serialize};

/// 原子表索引
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AtomIndex(pub usize);

/// 原子级信息，每个不同物种一条
#[derive(Debug, Clone, PartialEq)]
pub struct AtomInfo {
    pub species: AtomSpecies,
    /// 每个晶胞中的原子数
    pub count: usize,
    /// 均方位移（Å²）
    pub msd: f64,
    /// Debye 温度（K），如有
    pub debye_temperature: Option<f64>,
    /// 分数坐标
    pub positions: Vec<[f64; 3]>,
}

impl AtomInfo {
    pub fn new(species: AtomSpecies, count: usize, msd: f64) -> Self {
        AtomInfo {
            species,
            count,
            msd,
            debye_temperature: None,
            positions: Vec::new(),
        }
    }

    pub fn with_debye_temperature(mut self, debye_temperature: f64) -> Self {
        self.debye_temperature = Some(debye_temperature);
        self
    }

    pub fn with_positions(mut self, positions: Vec<[f64; 3]>) -> Self {
        self.count = positions.len();
        self.positions = positions;
        self
    }
}

/// 振动态密度曲线
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VdosCurve {
    /// 能量网格（eV），严格递增且首点为正
    energies: Vec<f64>,
    /// 未归一化的态密度
    density: Vec<f64>,
}

impl VdosCurve {
    /// 由能量网格与态密度创建
    ///
    /// `egrid` 可以是两个端点（等间距展开）或与 `density` 等长的完整网格。
    pub fn new(egrid: &[f64], density: Vec<f64>) -> Result<Self> {
        if density.len() < 2 {
            return Err(BraggError::ConfigurationError(
                "VDOS density needs at least two points".to_string(),
            ));
        }

        let energies: Vec<f64> = if egrid.len() == 2 && density.len() != 2 {
            let (emin, emax) = (egrid[0], egrid[1]);
            let n = density.len();
            (0..n)
                .map(|i| emin + (emax - emin) * i as f64 / (n - 1) as f64)
                .collect()
        } else if egrid.len() == density.len() {
            egrid.to_vec()
        } else {
            return Err(BraggError::ConfigurationError(format!(
                "VDOS energy grid has {} points but density has {}",
                egrid.len(),
                density.len()
            )));
        };

        if !(energies[0] > 0.0) || energies.iter().any(|e| !e.is_finite()) {
            return Err(BraggError::ConfigurationError(
                "VDOS energy grid must start above zero".to_string(),
            ));
        }
        if energies.windows(2).any(|w| w[1] <= w[0]) {
            return Err(BraggError::ConfigurationError(
                "VDOS energy grid must be strictly increasing".to_string(),
            ));
        }
        if density.iter().any(|d| !d.is_finite() || *d < 0.0) {
            return Err(BraggError::ConfigurationError(
                "VDOS density must be finite and non-negative".to_string(),
            ));
        }
        if density.iter().all(|d| *d == 0.0) {
            return Err(BraggError::ConfigurationError(
                "VDOS density is identically zero".to_string(),
            ));
        }

        Ok(VdosCurve { energies, density })
    }

    pub fn energies(&self) -> &[f64] {
        &self.energies
    }

    pub fn density(&self) -> &[f64] {
        &self.density
    }
}

/// 动力学组分（封闭的和类型）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DynamicInfo {
    /// 无非弹性散射
    Sterile { atom: AtomIndex, fraction: f64 },
    /// 自由气体
    FreeGas { atom: AtomIndex, fraction: f64 },
    /// 预先计算的散射核
    ScatteringKernel { atom: AtomIndex, fraction: f64 },
    /// Debye 模型态密度
    VdosDebye {
        atom: AtomIndex,
        fraction: f64,
        debye_temperature: f64,
    },
    /// 显式给出的振动态密度
    Vdos {
        atom: AtomIndex,
        fraction: f64,
        curve: VdosCurve,
    },
}

impl DynamicInfo {
    pub fn atom(&self) -> AtomIndex {
        match self {
            DynamicInfo::Sterile { atom, .. }
            | DynamicInfo::FreeGas { atom, .. }
            | DynamicInfo::ScatteringKernel { atom, .. }
            | DynamicInfo::VdosDebye { atom, .. }
            | DynamicInfo::Vdos { atom, .. } => *atom,
        }
    }

    pub fn fraction(&self) -> f64 {
        match self {
            DynamicInfo::Sterile { fraction, .. }
            | DynamicInfo::FreeGas { fraction, .. }
            | DynamicInfo::ScatteringKernel { fraction, .. }
            | DynamicInfo::VdosDebye { fraction, .. }
            | DynamicInfo::Vdos { fraction, .. } => *fraction,
        }
    }

    /// NCMAT 中的类型名
    pub fn type_name(&self) -> &'static str {
        match self {
            DynamicInfo::Sterile { .. } => "sterile",
            DynamicInfo::FreeGas { .. } => "freegas",
            DynamicInfo::ScatteringKernel { .. } => "scatknl",
            DynamicInfo::VdosDebye { .. } => "vdosdebye",
            DynamicInfo::Vdos { .. } => "vdos",
        }
    }

    /// 仅对显式 VDOS 组分返回其曲线
    pub fn vdos_curve(&self) -> Option<&VdosCurve> {
        match self {
            DynamicInfo::Vdos { curve, .. } => Some(curve),
            _ => None,
        }
    }
}

/// 衍射晶面族
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffractionPlane {
    /// d 间距（Å）
    pub d_spacing: f64,
    /// 结构因子平方（barn）
    pub fsquared: f64,
    /// 多重度
    pub multiplicity: u32,
    /// 代表性 Miller 指数
    pub hkl: Option<[i32; 3]>,
}

impl DiffractionPlane {
    pub fn new(d_spacing: f64, fsquared: f64, multiplicity: u32) -> Self {
        DiffractionPlane {
            d_spacing,
            fsquared,
            multiplicity,
            hkl: None,
        }
    }

    pub fn with_hkl(mut self, hkl: [i32; 3]) -> Self {
        self.hkl = Some(hkl);
        self
    }
}

/// 晶胞信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureInfo {
    pub lattice: Option<Lattice>,
    /// 晶胞体积（Å³）
    pub volume: f64,
    /// 每个晶胞中的原子数
    pub n_atoms: usize,
}

/// 多晶材料模型
#[derive(Debug, Clone)]
pub struct MaterialModel {
    name: String,
    temperature: f64,
    single_crystal: bool,
    structure: StructureInfo,
    atoms: Vec<AtomInfo>,
    dynamics: Vec<DynamicInfo>,
    planes: Vec<DiffractionPlane>,
}

impl MaterialModel {
    pub fn builder(name: impl Into<String>, temperature: f64) -> MaterialBuilder {
        MaterialBuilder::new(name, temperature)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 温度（K）
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn is_single_crystal(&self) -> bool {
        self.single_crystal
    }

    pub fn structure(&self) -> &StructureInfo {
        &self.structure
    }

    pub fn atoms(&self) -> &[AtomInfo] {
        &self.atoms
    }

    /// 按索引查询原子信息，索引在构造时已校验
    pub fn atom(&self, index: AtomIndex) -> &AtomInfo {
        &self.atoms[index.0]
    }

    pub fn dynamics(&self) -> &[DynamicInfo] {
        &self.dynamics
    }

    pub fn planes(&self) -> &[DiffractionPlane] {
        &self.planes
    }
}

/// 材料模型构造器
#[derive(Debug, Clone)]
pub struct MaterialBuilder {
    name: String,
    temperature: f64,
    single_crystal: bool,
    lattice: Option<Lattice>,
    volume: Option<f64>,
    n_atoms: Option<usize>,
    atoms: Vec<AtomInfo>,
    dynamics: Vec<DynamicInfo>,
    planes: Vec<DiffractionPlane>,
}

impl MaterialBuilder {
    pub fn new(name: impl Into<String>, temperature: f64) -> Self {
        MaterialBuilder {
            name: name.into(),
            temperature,
            single_crystal: false,
            lattice: None,
            volume: None,
            n_atoms: None,
            atoms: Vec::new(),
            dynamics: Vec::new(),
            planes: Vec::new(),
        }
    }

    pub fn single_crystal(&mut self, single_crystal: bool) -> &mut Self {
        self.single_crystal = single_crystal;
        self
    }

    /// 设置晶格；未显式给出体积时由晶格计算
    pub fn lattice(&mut self, lattice: Lattice) -> &mut Self {
        self.lattice = Some(lattice);
        self
    }

    pub fn volume(&mut self, volume: f64) -> &mut Self {
        self.volume = Some(volume);
        self
    }

    /// 设置每晶胞原子数；未给出时取原子表计数之和
    pub fn n_atoms(&mut self, n_atoms: usize) -> &mut Self {
        self.n_atoms = Some(n_atoms);
        self
    }

    pub fn add_atom(&mut self, atom: AtomInfo) -> AtomIndex {
        self.atoms.push(atom);
        AtomIndex(self.atoms.len() - 1)
    }

    pub fn add_dynamic(&mut self, dynamic: DynamicInfo) -> &mut Self {
        self.dynamics.push(dynamic);
        self
    }

    pub fn add_plane(&mut self, plane: DiffractionPlane) -> &mut Self {
        self.planes.push(plane);
        self
    }

    pub fn planes(&mut self, planes: Vec<DiffractionPlane>) -> &mut Self {
        self.planes = planes;
        self
    }

    /// 校验并生成模型
    pub fn build(self) -> Result<MaterialModel> {
        let invalid = |msg: String| Err(BraggError::ConfigurationError(msg));

        if !(self.temperature.is_finite() && self.temperature > 0.0) {
            return invalid(format!(
                "temperature must be positive, got {}",
                self.temperature
            ));
        }

        let volume = match (self.volume, &self.lattice) {
            (Some(v), _) => v,
            (None, Some(lattice)) => lattice.volume(),
            (None, None) => return invalid("unit cell volume is not defined".to_string()),
        };
        if !(volume.is_finite() && volume > 0.0) {
            return invalid(format!("unit cell volume must be positive, got {}", volume));
        }

        let n_atoms = self
            .n_atoms
            .unwrap_or_else(|| self.atoms.iter().map(|a| a.count).sum());
        if n_atoms == 0 {
            return invalid("unit cell contains no atoms".to_string());
        }

        for atom in &self.atoms {
            if !(atom.msd.is_finite() && atom.msd >= 0.0) {
                return invalid(format!(
                    "mean-squared displacement of '{}' must be non-negative, got {}",
                    atom.species.label, atom.msd
                ));
            }
        }

        let mut total_fraction = 0.0;
        for dynamic in &self.dynamics {
            if dynamic.atom().0 >= self.atoms.len() {
                return invalid(format!(
                    "dynamic component refers to unknown atom #{}",
                    dynamic.atom().0
                ));
            }
            let fraction = dynamic.fraction();
            if !(0.0..=1.0).contains(&fraction) {
                return invalid(format!(
                    "fraction of '{}' must lie in [0, 1], got {}",
                    self.atoms[dynamic.atom().0].species.label,
                    fraction
                ));
            }
            total_fraction += fraction;
        }
        if total_fraction > 1.0 + 1e-6 {
            return invalid(format!(
                "dynamic component fractions sum to {} (more than 1)",
                total_fraction
            ));
        }

        for plane in &self.planes {
            if !(plane.d_spacing.is_finite() && plane.d_spacing > 0.0) {
                return invalid(format!(
                    "d-spacing must be positive, got {}",
                    plane.d_spacing
                ));
            }
            if !(plane.fsquared.is_finite() && plane.fsquared >= 0.0) {
                return invalid(format!(
                    "squared structure factor must be non-negative, got {}",
                    plane.fsquared
                ));
            }
            if plane.multiplicity == 0 {
                return invalid("plane multiplicity must be at least 1".to_string());
            }
        }

        Ok(MaterialModel {
            name: self.name,
            temperature: self.temperature,
            single_crystal: self.single_crystal,
            structure: StructureInfo {
                lattice: self.lattice,
                volume,
                n_atoms,
            },
            atoms: self.atoms,
            dynamics: self.dynamics,
            planes: self.planes,
        })
    }
}
