//! # inspect 子命令实现
//!
//! 打印材料模型：晶胞信息、原子表、动力学组分及其归一化非相干贡献、前若干个晶面。
//!
//! ## 依赖关系
//! - 使用 `cli/inspect.rs` 定义的 InspectArgs
//! - 使用 `braggedge::bragg::load_material` 加载模型

use crate::cli::inspect::InspectArgs;
use crate::commands::build_provider;
use crate::utils::output;

use braggedge::bragg::{load_material, matcher};
use braggedge::models::{DynamicInfo, MaterialModel, SpeciesKind};
use braggedge::physics::wl2ekin;
use braggedge::Result;

use tabled::{Table, Tabled};

/// 执行材料查看
pub fn execute(args: InspectArgs) -> Result<()> {
    output::print_header("Material Inspection");

    let provider = build_provider(&args.data_path.dirs);
    let model = load_material(&provider, &args.cfg, args.temperature)?;

    output::print_success(&format!(
        "Loaded material: {} at {} K",
        model.name(),
        model.temperature()
    ));

    print_structure(&model);
    print_atoms(&model);
    print_dynamics(&model);
    print_planes(&model, args.planes);

    Ok(())
}

fn print_structure(model: &MaterialModel) {
    let structure = model.structure();
    output::print_header("Unit Cell");
    if let Some(lattice) = &structure.lattice {
        let (a, b, c, alpha, beta, gamma) = lattice.parameters();
        output::print_info(&format!("a, b, c = {:.5}, {:.5}, {:.5} Å", a, b, c));
        output::print_info(&format!(
            "α, β, γ = {:.3}°, {:.3}°, {:.3}°",
            alpha, beta, gamma
        ));
    }
    output::print_info(&format!("Volume: {:.5} Å³", structure.volume));
    output::print_info(&format!("Atoms per cell: {}", structure.n_atoms));
    output::print_info(&format!("Diffraction planes: {}", model.planes().len()));
}

fn print_atoms(model: &MaterialModel) {
    #[derive(Tabled)]
    struct AtomRow {
        #[tabled(rename = "Label")]
        label: String,
        #[tabled(rename = "Z")]
        z: u32,
        #[tabled(rename = "A")]
        a: String,
        #[tabled(rename = "Count")]
        count: usize,
        #[tabled(rename = "Mass (u)")]
        mass: String,
        #[tabled(rename = "σ_coh (b)")]
        coherent: String,
        #[tabled(rename = "σ_inc (b)")]
        incoherent: String,
        #[tabled(rename = "MSD (Å²)")]
        msd: String,
        #[tabled(rename = "T_D (K)")]
        debye: String,
    }

    let rows: Vec<AtomRow> = model
        .atoms()
        .iter()
        .map(|atom| {
            let s = &atom.species;
            AtomRow {
                label: s.label.clone(),
                z: s.z,
                a: match &s.kind {
                    SpeciesKind::NaturalElement => "nat".to_string(),
                    SpeciesKind::SingleIsotope => s.a.to_string(),
                    SpeciesKind::Mixture(parts) => format!("mix({})", parts.len()),
                },
                count: atom.count,
                mass: format!("{:.4}", s.mass),
                coherent: format!("{:.4}", s.coherent_xs()),
                incoherent: format!("{:.4}", s.incoherent_xs),
                msd: format!("{:.5e}", atom.msd),
                debye: atom
                    .debye_temperature
                    .map(|t| format!("{:.1}", t))
                    .unwrap_or_else(|| "-".to_string()),
            }
        })
        .collect();

    output::print_header("Atoms");
    println!("{}", Table::new(&rows));
}

fn print_dynamics(model: &MaterialModel) {
    #[derive(Tabled)]
    struct DynamicRow {
        #[tabled(rename = "Atom")]
        atom: String,
        #[tabled(rename = "Type")]
        kind: String,
        #[tabled(rename = "Fraction")]
        fraction: String,
        #[tabled(rename = "f/(1-f)·σ_inc")]
        contribution: String,
    }

    if model.dynamics().is_empty() {
        output::print_warning("No dynamic components defined");
        return;
    }

    let rows: Vec<DynamicRow> = model
        .dynamics()
        .iter()
        .map(|d| {
            let species = &model.atom(d.atom()).species;
            let contribution = match d {
                DynamicInfo::Vdos { fraction, .. } => format!(
                    "{:.5e}",
                    matcher::incoherent_contribution(*fraction, species.incoherent_xs)
                ),
                _ => "-".to_string(),
            };
            DynamicRow {
                atom: species.label.clone(),
                kind: d.type_name().to_string(),
                fraction: format!("{:.5}", d.fraction()),
                contribution,
            }
        })
        .collect();

    output::print_header("Dynamic Components");
    println!("{}", Table::new(&rows));
}

fn print_planes(model: &MaterialModel, count: usize) {
    #[derive(Tabled)]
    struct PlaneRow {
        #[tabled(rename = "(hkl)")]
        hkl: String,
        #[tabled(rename = "d (Å)")]
        d_spacing: String,
        #[tabled(rename = "F² (b)")]
        fsquared: String,
        #[tabled(rename = "Mult.")]
        multiplicity: u32,
        #[tabled(rename = "Edge E (eV)")]
        energy: String,
    }

    let rows: Vec<PlaneRow> = model
        .planes()
        .iter()
        .take(count)
        .map(|p| PlaneRow {
            hkl: p
                .hkl
                .map(|[h, k, l]| format!("({} {} {})", h, k, l))
                .unwrap_or_else(|| "-".to_string()),
            d_spacing: format!("{:.5}", p.d_spacing),
            fsquared: format!("{:.5}", p.fsquared),
            multiplicity: p.multiplicity,
            energy: format!("{:.6e}", wl2ekin(2.0 * p.d_spacing)),
        })
        .collect();

    if !rows.is_empty() {
        output::print_header(&format!("Leading {} Planes", rows.len()));
        println!("{}", Table::new(&rows));
    }
}
