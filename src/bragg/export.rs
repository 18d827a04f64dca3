//! # 结果导出
//!
//! 导出 Bragg 边到 CSV 和 DAT 格式。
//!
//! ## 支持格式
//! - CSV: 每行一个 Bragg 边（能量、加权截面、波长）；标量结果另存于 `<stem>_summary.csv`
//! - DAT: 带注释头的纯文本两列数据，头部记录标量结果
//!
//! ## 依赖关系
//! - 被 `commands/extract.rs` 调用
//! - 使用 `bragg/result.rs` 的 BraggEdgeResult
//! - 使用 `csv` 库写入 CSV 文件

use crate::bragg::BraggEdgeResult;
use crate::error::{BraggError, Result};
use crate::physics::ekin2wl;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// 导出为 CSV 格式
///
/// 只写 Bragg 边数据行。截面、MSD、丰度和重分配标志由 [`summary_to_csv`] 写出。
pub fn to_csv(result: &BraggEdgeResult, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record(["energy_ev", "weighted_xs", "wavelength_aa"])?;

    for edge in &result.edges {
        wtr.write_record(&[
            format!("{:.10e}", edge.energy),
            format!("{:.10e}", edge.weighted_xs),
            format!("{:.6}", ekin2wl(edge.energy)),
        ])?;
    }

    wtr.flush().map_err(|e| BraggError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 标量结果文件路径：`edges.csv` -> `edges_summary.csv`
pub fn summary_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("bragg_edges");
    path.with_file_name(format!("{}_summary.csv", stem))
}

/// 以 `quantity,value` 两列导出标量结果
pub fn summary_to_csv(result: &BraggEdgeResult, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record(["quantity", "value"])?;
    let rows = [
        ("material", result.material.clone()),
        ("temperature_k", result.temperature.to_string()),
        ("plane_count", result.plane_count.to_string()),
        ("bound_incoherent_xs_b", format!("{:.10e}", result.bound_incoherent_xs)),
        ("bound_coherent_xs_b", format!("{:.10e}", result.bound_coherent_xs)),
        ("free_atom_xs_b", format!("{:.10e}", result.free_atom_xs)),
        ("msd_aa2", format!("{:.10e}", result.mean_squared_displacement)),
        ("fraction", format!("{:.10e}", result.isotope_fraction)),
        (
            "min_incoherent_contribution",
            format!("{:.10e}", result.global_min_incoherent_fraction),
        ),
        ("redistribute", result.redistribute.to_string()),
    ];
    for (quantity, value) in &rows {
        wtr.write_record([*quantity, value.as_str()])?;
    }

    wtr.flush().map_err(|e| BraggError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 导出为 DAT 格式
pub fn to_dat(result: &BraggEdgeResult, output_path: &Path) -> Result<()> {
    let write_err = |e: std::io::Error| BraggError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    };

    let file = File::create(output_path).map_err(write_err)?;
    let mut out = BufWriter::new(file);

    write_dat(result, &mut out).map_err(write_err)?;
    out.flush().map_err(write_err)?;

    Ok(())
}

fn write_dat<W: Write>(result: &BraggEdgeResult, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "# Bragg edges: {}", result.material)?;
    writeln!(out, "# Temperature: {} K", result.temperature)?;
    writeln!(out, "# Planes: {}", result.plane_count)?;
    writeln!(out, "# Bound incoherent XS: {:.6} barn", result.bound_incoherent_xs)?;
    writeln!(out, "# Bound coherent XS: {:.6} barn", result.bound_coherent_xs)?;
    writeln!(out, "# Free atom XS: {:.6} barn", result.free_atom_xs)?;
    writeln!(out, "# MSD: {:.6e} Aa^2", result.mean_squared_displacement)?;
    writeln!(out, "# Fraction: {:.6}", result.isotope_fraction)?;
    writeln!(
        out,
        "# Min incoherent contribution: {:.6e}",
        result.global_min_incoherent_fraction
    )?;
    writeln!(out, "# Redistribute: {}", result.redistribute)?;
    writeln!(out, "# Columns: energy (eV), energy-weighted XS (eV*barn)")?;
    writeln!(out, "#")?;

    for edge in &result.edges {
        writeln!(out, "{:.10e}\t{:.10e}", edge.energy, edge.weighted_xs)?;
    }

    Ok(())
}
