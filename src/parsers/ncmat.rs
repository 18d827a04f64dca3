//! # NCMAT 材料文件解析器
//!
//! 解析 NCMAT 文本格式并构建多晶材料模型。
//!
//! ## NCMAT 格式说明
//! ```text
//! NCMAT v4
//! @CELL
//!   lengths 4.04958 4.04958 4.04958
//!   angles 90 90 90
//! @ATOMPOSITIONS
//!   Al 0 0 0
//!   Al 0 1/2 1/2
//! @DEBYETEMPERATURE
//!   Al 410
//! @DYNINFO
//!   element Al
//!   fraction 1
//!   type vdosdebye
//! @ATOMDB
//!   Hx is 0.9 H 0.1 D
//! ```
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `models/`、`physics/atomdb.rs`、`physics/msd.rs`、`physics/hkl.rs`

use crate::error::{BraggError, Result};
use crate::models::{
    AtomIndex, AtomInfo, AtomSite, AtomSpecies, DynamicInfo, Lattice, MaterialModel, UnitCell,
    VdosCurve,
};
use crate::parsers::matcfg::MatCfg;
use crate::physics::{atomdb, msd, PlaneGenerator};

use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// 混合物嵌套深度上限
const MAX_MIXTURE_DEPTH: usize = 8;

/// 可接受但不使用的段
const IGNORED_SECTIONS: [&str; 5] = [
    "SPACEGROUP",
    "DENSITY",
    "STATEOFMATTER",
    "OTHERPHASES",
    "TEMPERATURE",
];

/// @DYNINFO 段的原始内容
#[derive(Debug, Clone, Default)]
pub struct RawDynInfo {
    fields: Vec<(String, Vec<String>)>,
}

impl RawDynInfo {
    fn get(&self, key: &str) -> Option<&[String]> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_slice())
    }

    fn single(&self, key: &str) -> std::result::Result<String, String> {
        match self.get(key) {
            Some([value]) => Ok(value.clone()),
            Some(_) => Err(format!("@DYNINFO key '{}' needs exactly one value", key)),
            None => Err(format!("@DYNINFO is missing '{}'", key)),
        }
    }

    fn numbers(&self, key: &str) -> std::result::Result<Vec<f64>, String> {
        let values = self
            .get(key)
            .ok_or_else(|| format!("@DYNINFO is missing '{}'", key))?;
        values
            .iter()
            .map(|v| parse_number(v))
            .collect::<Option<Vec<f64>>>()
            .ok_or_else(|| format!("@DYNINFO key '{}' has non-numeric values", key))
    }
}

/// @ATOMDB 条目
#[derive(Debug, Clone, PartialEq)]
pub enum AtomDbEntry {
    /// 自定义物种数据
    Define {
        label: String,
        mass: f64,
        b_coh: f64,
        sigma_inc: f64,
        sigma_abs: f64,
    },
    /// 混合物
    Mixture {
        label: String,
        parts: Vec<(f64, String)>,
    },
}

impl AtomDbEntry {
    fn label(&self) -> &str {
        match self {
            AtomDbEntry::Define { label, .. } | AtomDbEntry::Mixture { label, .. } => label,
        }
    }
}

/// 解析后的 NCMAT 内容
#[derive(Debug, Clone)]
pub struct NcmatData {
    pub name: String,
    pub version: u32,
    pub cell: UnitCell,
    pub global_debye_temperature: Option<f64>,
    pub debye_temperatures: HashMap<String, f64>,
    pub dyninfos: Vec<RawDynInfo>,
    pub atomdb: Vec<AtomDbEntry>,
}

/// 解析 .ncmat 文件
pub fn parse_ncmat_file(path: &Path) -> Result<NcmatData> {
    let content = fs::read_to_string(path).map_err(|e| BraggError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_ncmat_content(
        &content,
        path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown"),
    )
}

/// 从字符串内容解析 NCMAT 格式
pub fn parse_ncmat_content(content: &str, name: &str) -> Result<NcmatData> {
    let err = |reason: String| BraggError::parse("ncmat", name, reason);

    let mut lines = content
        .lines()
        .map(|l| l.split('#').next().unwrap_or("").trim())
        .enumerate()
        .filter(|(_, l)| !l.is_empty());

    let version = match lines.next() {
        Some((_, header)) => parse_header(header).ok_or_else(|| {
            err(format!("expected 'NCMAT v<N>' header, got '{}'", header))
        })?,
        None => return Err(err("empty file".to_string())),
    };

    // 按段收集行 (段名, [(行号, 内容)])
    let mut sections: Vec<(String, Vec<(usize, &str)>)> = Vec::new();
    for (lineno, line) in lines {
        if let Some(section) = line.strip_prefix('@') {
            sections.push((section.trim().to_uppercase(), Vec::new()));
        } else if let Some((_, body)) = sections.last_mut() {
            body.push((lineno + 1, line));
        } else {
            return Err(err(format!("line {}: content outside of any section", lineno + 1)));
        }
    }

    let mut lengths: Option<[f64; 3]> = None;
    let mut angles: Option<[f64; 3]> = None;
    let mut sites: Vec<AtomSite> = Vec::new();
    let mut have_positions = false;
    let mut global_debye_temperature = None;
    let mut debye_temperatures = HashMap::new();
    let mut dyninfos = Vec::new();
    let mut atomdb = Vec::new();

    for (section, body) in &sections {
        match section.as_str() {
            "CELL" => {
                for (lineno, line) in body {
                    let tokens: Vec<&str> = line.split_whitespace().collect();
                    let values = parse_numbers(&tokens[1..])
                        .filter(|v| v.len() == 3)
                        .ok_or_else(|| err(format!("line {}: expected three numbers", lineno)))?;
                    let triple = [values[0], values[1], values[2]];
                    match tokens[0].to_lowercase().as_str() {
                        "lengths" => lengths = Some(triple),
                        "angles" => angles = Some(triple),
                        other => {
                            return Err(err(format!(
                                "line {}: unknown @CELL keyword '{}'",
                                lineno, other
                            )))
                        }
                    }
                }
            }
            "ATOMPOSITIONS" => {
                have_positions = true;
                for (lineno, line) in body {
                    let tokens: Vec<&str> = line.split_whitespace().collect();
                    let coords = parse_numbers(&tokens[1..])
                        .filter(|v| v.len() == 3)
                        .ok_or_else(|| {
                            err(format!("line {}: expected '<label> x y z'", lineno))
                        })?;
                    sites.push(AtomSite::new(tokens[0], [coords[0], coords[1], coords[2]]));
                }
            }
            "DEBYETEMPERATURE" => {
                for (lineno, line) in body {
                    let tokens: Vec<&str> = line.split_whitespace().collect();
                    match tokens.as_slice() {
                        [value] => {
                            global_debye_temperature = Some(parse_number(value).ok_or_else(
                                || err(format!("line {}: invalid Debye temperature", lineno)),
                            )?);
                        }
                        [label, value] => {
                            let t = parse_number(value).ok_or_else(|| {
                                err(format!("line {}: invalid Debye temperature", lineno))
                            })?;
                            debye_temperatures.insert(label.to_string(), t);
                        }
                        _ => {
                            return Err(err(format!(
                                "line {}: expected '[label] <temperature>'",
                                lineno
                            )))
                        }
                    }
                }
            }
            "DYNINFO" => dyninfos.push(parse_dyninfo(body, &err)?),
            "ATOMDB" => {
                for (lineno, line) in body {
                    atomdb.push(parse_atomdb_line(line).ok_or_else(|| {
                        err(format!("line {}: malformed @ATOMDB entry '{}'", lineno, line))
                    })?);
                }
            }
            s if IGNORED_SECTIONS.contains(&s) || s.starts_with("CUSTOM_") => {}
            other => return Err(err(format!("unknown section @{}", other))),
        }
    }

    let lengths = lengths.ok_or_else(|| err("missing @CELL lengths".to_string()))?;
    let angles = angles.unwrap_or([90.0, 90.0, 90.0]);
    if !have_positions || sites.is_empty() {
        return Err(err("missing @ATOMPOSITIONS".to_string()));
    }

    let lattice = Lattice::from_parameters(
        lengths[0], lengths[1], lengths[2], angles[0], angles[1], angles[2],
    );

    Ok(NcmatData {
        name: name.to_string(),
        version,
        cell: UnitCell::new(name, lattice, sites),
        global_debye_temperature,
        debye_temperatures,
        dyninfos,
        atomdb,
    })
}

/// 由解析结果和配置构建材料模型
pub fn build_material(data: &NcmatData, cfg: &MatCfg) -> Result<MaterialModel> {
    let temperature = cfg.effective_temperature();
    let labels = data.cell.labels();
    let err = |reason: String| BraggError::parse("ncmat", data.name.as_str(), reason);

    let index_of: HashMap<&str, AtomIndex> = labels
        .iter()
        .enumerate()
        .map(|(i, l)| (*l, AtomIndex(i)))
        .collect();

    // 动力学组分
    let mut dynamics: Vec<DynamicInfo> = Vec::new();
    for raw in &data.dyninfos {
        let dynamic = convert_dyninfo(raw, &index_of, data, &err)?;
        if dynamics.iter().any(|d| d.atom() == dynamic.atom()) {
            return Err(err(format!(
                "duplicate @DYNINFO for '{}'",
                labels[dynamic.atom().0]
            )));
        }
        dynamics.push(dynamic);
    }

    // 原子表
    let mut atoms = Vec::with_capacity(labels.len());
    for (i, label) in labels.iter().enumerate() {
        let species = resolve_species(label, &data.atomdb, 0)
            .map_err(|reason| err(format!("atom '{}': {}", label, reason)))?;

        let dynamic = dynamics.iter().find(|d| d.atom() == AtomIndex(i));
        let debye_temperature = match dynamic {
            Some(DynamicInfo::VdosDebye {
                debye_temperature, ..
            }) => Some(*debye_temperature),
            _ => data
                .debye_temperatures
                .get(*label)
                .copied()
                .or(data.global_debye_temperature),
        };

        let displacement = match (dynamic.and_then(|d| d.vdos_curve()), debye_temperature) {
            (Some(curve), _) => msd::vdos_msd(curve, temperature, species.mass)?,
            (None, Some(td)) => msd::debye_msd(td, temperature, species.mass)?,
            (None, None) => {
                return Err(err(format!(
                    "cannot determine mean-squared displacement of '{}' (no VDOS or Debye temperature)",
                    label
                )))
            }
        };

        let mut info =
            AtomInfo::new(species, 0, displacement).with_positions(data.cell.positions_of(label));
        if let Some(td) = debye_temperature {
            info = info.with_debye_temperature(td);
        }
        atoms.push(info);
    }

    let planes = PlaneGenerator::new(cfg.dcutoff(), cfg.dcutoff_up())
        .generate(&data.cell.lattice, &atoms)?;

    let mut builder = MaterialModel::builder(data.name.as_str(), temperature);
    builder
        .lattice(data.cell.lattice.clone())
        .single_crystal(cfg.is_single_crystal());
    for atom in atoms {
        builder.add_atom(atom);
    }
    for dynamic in dynamics {
        builder.add_dynamic(dynamic);
    }
    builder.planes(planes);
    builder.build()
}

fn parse_header(header: &str) -> Option<u32> {
    let mut tokens = header.split_whitespace();
    if tokens.next()? != "NCMAT" {
        return None;
    }
    let version = tokens.next()?.strip_prefix('v')?.parse().ok()?;
    if tokens.next().is_some() {
        return None;
    }
    Some(version)
}

/// 解析数字，支持 `p/q` 分数形式
pub fn parse_number(token: &str) -> Option<f64> {
    let value = match token.split_once('/') {
        Some((p, q)) => {
            let p: f64 = p.parse().ok()?;
            let q: f64 = q.parse().ok()?;
            if q == 0.0 {
                return None;
            }
            p / q
        }
        None => token.parse().ok()?,
    };
    value.is_finite().then_some(value)
}

fn parse_numbers(tokens: &[&str]) -> Option<Vec<f64>> {
    tokens.iter().map(|t| parse_number(t)).collect()
}

fn parse_dyninfo<F>(body: &[(usize, &str)], err: &F) -> Result<RawDynInfo>
where
    F: Fn(String) -> BraggError,
{
    let mut raw = RawDynInfo::default();
    for (lineno, line) in body {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if parse_number(tokens[0]).is_some() {
            // 续行：追加到上一个键
            let (_, values) = raw
                .fields
                .last_mut()
                .ok_or_else(|| err(format!("line {}: value without a key", lineno)))?;
            values.extend(tokens.iter().map(|t| t.to_string()));
        } else {
            raw.fields.push((
                tokens[0].to_lowercase(),
                tokens[1..].iter().map(|t| t.to_string()).collect(),
            ));
        }
    }
    Ok(raw)
}

fn convert_dyninfo<F>(
    raw: &RawDynInfo,
    index_of: &HashMap<&str, AtomIndex>,
    data: &NcmatData,
    err: &F,
) -> Result<DynamicInfo>
where
    F: Fn(String) -> BraggError,
{
    let single = |key: &str| raw.single(key).map_err(|reason| err(reason));
    let numbers = |key: &str| raw.numbers(key).map_err(|reason| err(reason));

    let element = single("element")?;
    let atom = *index_of
        .get(element.as_str())
        .ok_or_else(|| err(format!("@DYNINFO refers to unknown element '{}'", element)))?;
    let fraction = parse_number(&single("fraction")?)
        .ok_or_else(|| err(format!("invalid fraction for '{}'", element)))?;

    let dynamic = match single("type")?.as_str() {
        "sterile" => DynamicInfo::Sterile { atom, fraction },
        "freegas" => DynamicInfo::FreeGas { atom, fraction },
        "scatknl" => DynamicInfo::ScatteringKernel { atom, fraction },
        "vdosdebye" => {
            let debye_temperature = match raw.get("debye_temp") {
                Some(_) => parse_number(&single("debye_temp")?)
                    .ok_or_else(|| err(format!("invalid debye_temp for '{}'", element)))?,
                None => data
                    .debye_temperatures
                    .get(&element)
                    .copied()
                    .or(data.global_debye_temperature)
                    .ok_or_else(|| {
                        err(format!("vdosdebye for '{}' needs a Debye temperature", element))
                    })?,
            };
            DynamicInfo::VdosDebye {
                atom,
                fraction,
                debye_temperature,
            }
        }
        "vdos" => {
            let curve = VdosCurve::new(&numbers("vdos_egrid")?, numbers("vdos_density")?)
                .map_err(|e| err(format!("VDOS of '{}': {}", element, e)))?;
            DynamicInfo::Vdos {
                atom,
                fraction,
                curve,
            }
        }
        other => {
            return Err(err(format!(
                "unknown @DYNINFO type '{}' for '{}'",
                other, element
            )))
        }
    };

    Ok(dynamic)
}

fn parse_atomdb_line(line: &str) -> Option<AtomDbEntry> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let label = tokens.first()?.to_string();

    if tokens.get(1) == Some(&"is") {
        let rest = &tokens[2..];
        if rest.is_empty() || rest.len() % 2 != 0 {
            return None;
        }
        let parts = rest
            .chunks(2)
            .map(|pair| Some((parse_number(pair[0])?, pair[1].to_string())))
            .collect::<Option<Vec<_>>>()?;
        return Some(AtomDbEntry::Mixture { label, parts });
    }

    if tokens.len() != 5 {
        return None;
    }
    Some(AtomDbEntry::Define {
        label,
        mass: parse_number(tokens[1].strip_suffix('u')?)?,
        b_coh: parse_number(tokens[2].strip_suffix("fm")?)?,
        sigma_inc: parse_number(tokens[3].strip_suffix('b')?)?,
        sigma_abs: parse_number(tokens[4].strip_suffix('b')?)?,
    })
}

/// 解析物种标签：@ATOMDB 优先，其次内置数据库
fn resolve_species(
    label: &str,
    atomdb: &[AtomDbEntry],
    depth: usize,
) -> std::result::Result<AtomSpecies, String> {
    if depth > MAX_MIXTURE_DEPTH {
        return Err("mixture definitions nest too deeply".to_string());
    }

    match atomdb.iter().rev().find(|e| e.label() == label) {
        Some(AtomDbEntry::Mixture { parts, .. }) => {
            let resolved = parts
                .iter()
                .map(|(f, l)| Ok((*f, resolve_species(l, atomdb, depth + 1)?)))
                .collect::<std::result::Result<Vec<_>, String>>()?;
            AtomSpecies::mixture(label, resolved).map_err(|e| e.to_string())
        }
        Some(AtomDbEntry::Define {
            mass,
            b_coh,
            sigma_inc,
            sigma_abs,
            ..
        }) => {
            // Z 与 A 取自标签本身
            let mut species = atomdb::species_from_label(label)
                .ok_or_else(|| format!("cannot infer Z and A from custom label '{}'", label))?;
            species.mass = *mass;
            species.coherent_scattering_length = *b_coh;
            species.incoherent_xs = *sigma_inc;
            species.absorption_xs = *sigma_abs;
            Ok(species)
        }
        None => atomdb::species_from_label(label)
            .ok_or_else(|| format!("unknown species '{}'", label)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use approx::assert_relative_eq;

    const ALUMINIUM: &str = r#"NCMAT v4
# Aluminium, fcc
@CELL
  lengths 4.04958 4.04958 4.04958
  angles 90 90 90
@SPACEGROUP
  225
@ATOMPOSITIONS
  Al 0 0 0
  Al 0 1/2 1/2
  Al 1/2 0 1/2
  Al 1/2 1/2 0
@DEBYETEMPERATURE
  Al 410.4
@DYNINFO
  element Al
  fraction 1
  type vdosdebye
"#;

    fn cfg(s: &str) -> MatCfg {
        MatCfg::parse(s).unwrap()
    }

    #[test]
    fn test_parse_aluminium() {
        let data = parse_ncmat_content(ALUMINIUM, "Al_sg225.ncmat").unwrap();
        assert_eq!(data.version, 4);
        assert_eq!(data.cell.sites.len(), 4);
        assert_eq!(data.debye_temperatures.get("Al"), Some(&410.4));
        assert_eq!(data.dyninfos.len(), 1);
        assert_relative_eq!(data.cell.sites[1].position[1], 0.5);
    }

    #[test]
    fn test_build_aluminium_model() {
        let data = parse_ncmat_content(ALUMINIUM, "Al_sg225.ncmat").unwrap();
        let model = build_material(&data, &cfg("Al_sg225.ncmat;temp=293.15;dcutoff=1.0")).unwrap();

        assert_eq!(model.structure().n_atoms, 4);
        assert_relative_eq!(model.structure().volume, 4.04958_f64.powi(3), max_relative = 1e-9);
        assert_eq!(model.atoms().len(), 1);
        assert_eq!(model.atoms()[0].debye_temperature, Some(410.4));
        assert!(model.atoms()[0].msd > 0.005 && model.atoms()[0].msd < 0.02);

        assert_eq!(model.dynamics()[0].type_name(), "vdosdebye");
        assert_eq!(model.planes()[0].hkl, Some([1, 1, 1]));
        assert_eq!(model.planes()[0].multiplicity, 8);
    }

    #[test]
    fn test_vdos_with_continuation_lines() {
        let content = r#"NCMAT v4
@CELL
  lengths 3 3 3
@ATOMPOSITIONS
  C 0 0 0
  H 1/2 1/2 1/2
@DYNINFO
  element C
  fraction 1/2
  type vdosdebye
  debye_temp 500
@DYNINFO
  element H
  fraction 1/2
  type vdos
  vdos_egrid 0.01 0.2
  vdos_density 0.1 0.4
    0.9 1.0 0.5
"#;
        let data = parse_ncmat_content(content, "CH").unwrap();
        let model = build_material(&data, &cfg("CH")).unwrap();

        let curve = model.dynamics()[1].vdos_curve().unwrap();
        assert_eq!(curve.density().len(), 5);
        assert_relative_eq!(model.dynamics()[0].fraction(), 0.5);
        assert_eq!(model.atoms()[0].debye_temperature, Some(500.0));
        assert_eq!(model.atoms()[1].debye_temperature, None);
    }

    #[test]
    fn test_atomdb_mixture() {
        let content = r#"NCMAT v4
@CELL
  lengths 3 3 3
@ATOMPOSITIONS
  Hx 0 0 0
@DEBYETEMPERATURE
  300
@ATOMDB
  Hx is 0.9 H 0.1 D
@DYNINFO
  element Hx
  fraction 1
  type sterile
"#;
        let data = parse_ncmat_content(content, "mix").unwrap();
        let model = build_material(&data, &cfg("mix")).unwrap();
        let species = &model.atoms()[0].species;
        assert_eq!(species.z, 1);
        assert!(species.is_element());
        assert!(!species.is_natural_element());
    }

    #[test]
    fn test_atomdb_custom_definition() {
        let entry = parse_atomdb_line("H2 2.0141u 6.671fm 2.05b 0.000519b").unwrap();
        let atomdb = vec![entry];
        let species = resolve_species("H2", &atomdb, 0).unwrap();
        assert_eq!(species.a, 2);
        assert_relative_eq!(species.mass, 2.0141);

        assert!(parse_atomdb_line("H2 2.0141 6.671fm 2.05b 0.000519b").is_none());
        assert!(parse_atomdb_line("Hx is 0.9 H 0.1").is_none());
    }

    #[test]
    fn test_mixture_cycle_detected() {
        let atomdb = vec![
            parse_atomdb_line("Xa is 1 Xb").unwrap(),
            parse_atomdb_line("Xb is 1 Xa").unwrap(),
        ];
        assert!(resolve_species("Xa", &atomdb, 0).is_err());
    }

    #[test]
    fn test_parse_number_fractions() {
        assert_eq!(parse_number("1/2"), Some(0.5));
        assert_eq!(parse_number("2/3"), Some(2.0 / 3.0));
        assert_eq!(parse_number("0.25"), Some(0.25));
        assert_eq!(parse_number("1/0"), None);
        assert_eq!(parse_number("abc"), None);
    }

    #[test]
    fn test_malformed_files() {
        let cases = [
            "",
            "NCMAT\n@CELL\n lengths 1 1 1\n",
            "NCMAT v4\n lengths 1 1 1\n",
            "NCMAT v4\n@CELL\n lengths 1 1\n@ATOMPOSITIONS\n Al 0 0 0\n",
            "NCMAT v4\n@CELL\n lengths 4 4 4\n",
            "NCMAT v4\n@CELL\n lengths 4 4 4\n@ATOMPOSITIONS\n Al 0 0\n",
            "NCMAT v4\n@CELL\n lengths 4 4 4\n@ATOMPOSITIONS\n Al 0 0 0\n@BOGUS\n x\n",
        ];
        for content in cases {
            let err = parse_ncmat_content(content, "bad").unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Configuration, "content: {:?}", content);
        }
    }

    #[test]
    fn test_build_errors() {
        let unknown_species = "NCMAT v4\n@CELL\n lengths 4 4 4\n@ATOMPOSITIONS\n Qq 0 0 0\n@DEBYETEMPERATURE\n 300\n";
        let data = parse_ncmat_content(unknown_species, "bad").unwrap();
        assert!(build_material(&data, &cfg("bad")).is_err());

        let no_msd = "NCMAT v4\n@CELL\n lengths 4 4 4\n@ATOMPOSITIONS\n Al 0 0 0\n";
        let data = parse_ncmat_content(no_msd, "bad").unwrap();
        assert!(build_material(&data, &cfg("bad")).is_err());

        let dangling = "NCMAT v4\n@CELL\n lengths 4 4 4\n@ATOMPOSITIONS\n Al 0 0 0\n@DEBYETEMPERATURE\n 300\n@DYNINFO\n element Fe\n fraction 1\n type sterile\n";
        let data = parse_ncmat_content(dangling, "bad").unwrap();
        assert!(build_material(&data, &cfg("bad")).is_err());

        let duplicate = "NCMAT v4\n@CELL\n lengths 4 4 4\n@ATOMPOSITIONS\n Al 0 0 0\n@DEBYETEMPERATURE\n 300\n@DYNINFO\n element Al\n fraction 0.5\n type sterile\n@DYNINFO\n element Al\n fraction 0.5\n type freegas\n";
        let data = parse_ncmat_content(duplicate, "bad").unwrap();
        assert!(build_material(&data, &cfg("bad")).is_err());
    }
}
