//! # extract 子命令实现
//!
//! 为请求的核素提取 Bragg 边和截面数据。
//!
//! ## 功能
//! - 单温度模式：打印结果汇总和 Bragg 边表格，可选导出
//! - 多温度扫描：各温度点并行独立提取（rayon），逐点导出
//! - 导出数据文件 (CSV/DAT)
//!
//! ## 依赖关系
//! - 使用 `cli/extract.rs` 定义的 ExtractArgs
//! - 使用 `batch/` 模块进行并行扫描
//! - 使用 `braggedge::bragg` 进行提取

use crate::batch::{BatchRunner, ProcessResult};
use crate::cli::extract::{ExtractArgs, OutputFormat};
use crate::commands::build_provider;
use crate::utils::{output, progress};

use braggedge::bragg::{self, export};
use braggedge::models::Nuclide;
use braggedge::{BraggEdgeResult, BraggError, NcmatProvider, Result};

use std::path::{Path, PathBuf};

/// 执行提取
pub fn execute(mut args: ExtractArgs) -> Result<()> {
    output::print_header("Bragg Edge Extraction");

    let requested = args.temperatures.len();
    args.temperatures = unique_temperatures(&args.temperatures);
    if args.temperatures.len() < requested {
        output::print_warning(&format!(
            "Ignoring {} duplicate temperature point(s)",
            requested - args.temperatures.len()
        ));
    }

    let target = Nuclide::new(args.z, args.a);
    output::print_info(&format!("Material: {}", args.cfg));
    output::print_info(&format!("Requested species: {}", target));
    output::print_info(&format!("Output capacity (maxb): {}", args.maxb));

    let provider = build_provider(&args.data_path.dirs);
    let format = resolve_format(args.format, args.output.as_deref());

    if args.temperatures.len() == 1 {
        execute_single(&args, &provider, args.temperatures[0], format)
    } else {
        execute_sweep(&args, &provider, format)
    }
}

/// 单温度模式
fn execute_single(
    args: &ExtractArgs,
    provider: &NcmatProvider,
    temperature: f64,
    format: OutputFormat,
) -> Result<()> {
    let spinner = progress::create_spinner(&format!("Extracting at {} K", temperature));
    let result = bragg::extract_bragg_edges(
        provider,
        &args.cfg,
        temperature,
        args.z,
        args.a,
        args.maxb,
    );
    spinner.finish_and_clear();
    let result = result?;

    output::print_success(&format!(
        "Extracted {} Bragg edges at {} K",
        result.plane_count, result.temperature
    ));
    print_summary_table(std::slice::from_ref(&result));

    match (&args.output, format) {
        (Some(path), OutputFormat::Csv | OutputFormat::Dat) => {
            if path.exists() && !args.overwrite {
                output::print_skip(&format!(
                    "Output exists, use --overwrite to replace: {}",
                    path.display()
                ));
            } else {
                write_result(&result, path, format)?;
                output::print_success(&format!("Bragg edges saved to '{}'", path.display()));
            }
        }
        _ => print_edge_table(&result, args.rows),
    }

    Ok(())
}

/// 多温度扫描模式
fn execute_sweep(args: &ExtractArgs, provider: &NcmatProvider, format: OutputFormat) -> Result<()> {
    let runner = BatchRunner::new(args.jobs);
    output::print_info(&format!(
        "Temperature sweep: {} points on {} threads",
        args.temperatures.len(),
        runner.jobs()
    ));

    let outcome = runner.run(args.temperatures.clone(), |&temperature| {
        process_temperature(args, provider, temperature, format)
    })?;

    output::print_separator();
    print_summary_table(&outcome.outputs);

    for reason in &outcome.skips {
        output::print_skip(reason);
    }

    if !outcome.failures.is_empty() {
        output::print_warning("Failed temperature points:");
        for (point, err) in &outcome.failures {
            output::print_error(&format!("  {}: {}", point, err));
        }
    }

    output::print_done(&format!(
        "Sweep complete: {} success, {} skipped, {} failed",
        outcome.success, outcome.skipped, outcome.failed
    ));

    if outcome.failed > 0 {
        return Err(BraggError::InvalidArgument(format!(
            "{} of {} temperature points failed",
            outcome.failed,
            outcome.total()
        )));
    }

    Ok(())
}

/// 处理单个温度点
fn process_temperature(
    args: &ExtractArgs,
    provider: &NcmatProvider,
    temperature: f64,
    format: OutputFormat,
) -> ProcessResult<BraggEdgeResult> {
    let label = format!("T = {} K", temperature);

    let output_path = args
        .output
        .as_deref()
        .filter(|_| format != OutputFormat::Table)
        .map(|path| suffixed_path(path, temperature));

    if let Some(path) = &output_path {
        if path.exists() && !args.overwrite {
            return ProcessResult::Skipped(format!(
                "Output exists, skipping: {}",
                path.display()
            ));
        }
    }

    let result = match bragg::extract_bragg_edges(
        provider,
        &args.cfg,
        temperature,
        args.z,
        args.a,
        args.maxb,
    ) {
        Ok(r) => r,
        Err(e) => return ProcessResult::Failed(label, format!("[{}] {}", e.kind(), e)),
    };

    if let Some(path) = &output_path {
        if let Err(e) = write_result(&result, path, format) {
            return ProcessResult::Failed(label, e.to_string());
        }
    }

    ProcessResult::Success(result)
}

fn write_result(result: &BraggEdgeResult, path: &Path, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Csv => {
            export::to_csv(result, path)?;
            export::summary_to_csv(result, &export::summary_path(path))
        }
        OutputFormat::Dat => export::to_dat(result, path),
        OutputFormat::Table => Ok(()),
    }
}

/// 去除重复温度点，保留首次出现的顺序
fn unique_temperatures(temperatures: &[f64]) -> Vec<f64> {
    let mut unique: Vec<f64> = Vec::with_capacity(temperatures.len());
    for &t in temperatures {
        if !unique.contains(&t) {
            unique.push(t);
        }
    }
    unique
}

/// 确定输出格式：显式指定优先，其次由扩展名推断
fn resolve_format(format: Option<OutputFormat>, output: Option<&Path>) -> OutputFormat {
    if let Some(format) = format {
        return format;
    }
    match output {
        None => OutputFormat::Table,
        Some(path) => guess_format_from_extension(path),
    }
}

/// 从文件扩展名推断输出格式
fn guess_format_from_extension(path: &Path) -> OutputFormat {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .as_deref()
    {
        Some("csv") => OutputFormat::Csv,
        _ => OutputFormat::Dat,
    }
}

/// 在文件名后追加温度：`edges.csv` -> `edges_T293.6.csv`
fn suffixed_path(path: &Path, temperature: f64) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("bragg_edges");
    let name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_T{}.{}", stem, temperature, ext),
        None => format!("{}_T{}", stem, temperature),
    };
    path.with_file_name(name)
}

/// 打印结果汇总表格
fn print_summary_table(results: &[BraggEdgeResult]) {
    use tabled::{Table, Tabled};

    #[derive(Tabled)]
    struct SummaryRow {
        #[tabled(rename = "T (K)")]
        temperature: String,
        #[tabled(rename = "Edges")]
        planes: usize,
        #[tabled(rename = "σ_inc (b)")]
        incoherent: String,
        #[tabled(rename = "σ_coh (b)")]
        coherent: String,
        #[tabled(rename = "σ_free (b)")]
        free: String,
        #[tabled(rename = "MSD (Å²)")]
        msd: String,
        #[tabled(rename = "Fraction")]
        fraction: String,
        #[tabled(rename = "Redistribute")]
        redistribute: String,
    }

    let rows: Vec<SummaryRow> = results
        .iter()
        .map(|r| SummaryRow {
            temperature: format!("{:.2}", r.temperature),
            planes: r.plane_count,
            incoherent: format!("{:.5}", r.bound_incoherent_xs),
            coherent: format!("{:.5}", r.bound_coherent_xs),
            free: format!("{:.5}", r.free_atom_xs),
            msd: format!("{:.5e}", r.mean_squared_displacement),
            fraction: format!("{:.4}", r.isotope_fraction),
            redistribute: if r.redistribute { "yes" } else { "no" }.to_string(),
        })
        .collect();

    if !rows.is_empty() {
        output::print_header("Extraction Summary");
        println!("{}", Table::new(&rows));
    }
}

/// 打印 Bragg 边表格
fn print_edge_table(result: &BraggEdgeResult, count: usize) {
    use tabled::{Table, Tabled};

    #[derive(Tabled)]
    struct EdgeRow {
        #[tabled(rename = "#")]
        index: usize,
        #[tabled(rename = "E (eV)")]
        energy: String,
        #[tabled(rename = "λ (Å)")]
        wavelength: String,
        #[tabled(rename = "E·σ (eV·b)")]
        weighted: String,
    }

    let rows: Vec<EdgeRow> = result
        .edges
        .iter()
        .take(count)
        .enumerate()
        .map(|(i, e)| EdgeRow {
            index: i + 1,
            energy: format!("{:.6e}", e.energy),
            wavelength: format!("{:.4}", braggedge::physics::ekin2wl(e.energy)),
            weighted: format!("{:.6e}", e.weighted_xs),
        })
        .collect();

    if !rows.is_empty() {
        output::print_header(&format!("First {} Bragg Edges", rows.len()));
        println!("{}", Table::new(&rows));
        if result.edges.len() > count {
            output::print_info(&format!("... and {} more", result.edges.len() - count));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffixed_path() {
        assert_eq!(
            suffixed_path(Path::new("out/edges.csv"), 293.6),
            PathBuf::from("out/edges_T293.6.csv")
        );
        assert_eq!(
            suffixed_path(Path::new("edges"), 600.0),
            PathBuf::from("edges_T600")
        );
    }

    #[test]
    fn test_unique_temperatures() {
        assert_eq!(
            unique_temperatures(&[600.0, 293.6, 600.0, 77.0, 293.6]),
            vec![600.0, 293.6, 77.0]
        );
        assert_eq!(unique_temperatures(&[293.6]), vec![293.6]);
    }

    #[test]
    fn test_resolve_format() {
        assert_eq!(resolve_format(None, None), OutputFormat::Table);
        assert_eq!(resolve_format(None, Some(Path::new("a.CSV"))), OutputFormat::Csv);
        assert_eq!(resolve_format(None, Some(Path::new("a.dat"))), OutputFormat::Dat);
        assert_eq!(
            resolve_format(Some(OutputFormat::Csv), Some(Path::new("a.dat"))),
            OutputFormat::Csv
        );
    }
}
