//! # plot 子命令实现
//!
//! 从一个或多个 `calculate` 输出表生成对比图：
//! - `ev`: 采样点（散点+折线）与样条插值曲线
//! - `pv`: 全部模型族的压强-体积曲线
//! - `bm`: Birch–Murnaghan 各阶对比
//!
//! 多个输入文件视为多个数据集，按文件名区分、按调色板
//! 分配颜色。P–V 图的体积网格取所有数据集采样范围的并集。
//!
//! ## 依赖关系
//! - 使用 `cli/plot.rs` 定义的参数
//! - 使用 `models/record.rs` 读取数据
//! - 使用 `plot/curves.rs` 渲染

use crate::cli::plot::{PlotArgs, PlotCommands, PlotCurveArgs};
use crate::commands::calculate::pressure_params_from_rows;
use crate::eos::{self, EosModel};
use crate::error::{EosKitError, Result};
use crate::models::{read_rows, EosRow, RowKind};
use crate::plot::{render_chart, Series, SeriesKind};
use crate::utils::output;

use std::path::Path;

/// 执行绘图
pub fn execute(args: PlotArgs) -> Result<()> {
    match args.command {
        PlotCommands::Ev(args) => plot_ev(&args),
        PlotCommands::Pv(args) => plot_pv(&args, &EosModel::ALL, "Pressure-Volume Curves"),
        PlotCommands::Bm(args) => plot_pv(
            &args,
            &EosModel::BM_ONLY,
            "Birch-Murnaghan Order Comparison",
        ),
    }
}

/// 一个已加载的数据集（文件名主干作为标签）
struct Dataset {
    name: String,
    rows: Vec<EosRow>,
}

fn load_datasets(files: &[std::path::PathBuf]) -> Result<Vec<Dataset>> {
    files
        .iter()
        .map(|path| {
            let rows = read_rows(path)?;
            Ok(Dataset {
                name: dataset_name(path),
                rows,
            })
        })
        .collect()
}

fn dataset_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset")
        .to_string()
}

/// 取数据集中某类别的 (Volume, Energy) 点，按体积排序
fn curve_points(rows: &[EosRow], kind: RowKind) -> Vec<(f64, f64)> {
    let mut points: Vec<(f64, f64)> = rows
        .iter()
        .filter(|r| r.kind == kind)
        .filter_map(|r| Some((r.volume?, r.energy?)))
        .collect();
    points.sort_by(|a, b| a.0.total_cmp(&b.0));
    points
}

// ─────────────────────────────────────────────────────────────
// E–V 图
// ─────────────────────────────────────────────────────────────

fn plot_ev(args: &PlotCurveArgs) -> Result<()> {
    output::print_header("Energy-Volume Plot");
    let datasets = load_datasets(&args.files)?;

    let mut series = Vec::new();
    for (idx, ds) in datasets.iter().enumerate() {
        let raw = curve_points(&ds.rows, RowKind::Raw);
        let interp = curve_points(&ds.rows, RowKind::Interpolated);
        if raw.is_empty() && interp.is_empty() {
            return Err(EosKitError::MissingData(format!(
                "dataset '{}' has no Raw or Interpolated rows",
                ds.name
            )));
        }
        if interp.is_empty() {
            output::print_warning(&format!(
                "dataset '{}' has no Interpolated rows, plotting raw samples only",
                ds.name
            ));
        } else {
            series.push(Series {
                label: format!("{} (spline)", ds.name),
                points: interp,
                color_idx: idx,
                kind: SeriesKind::Line,
            });
        }
        if !raw.is_empty() {
            series.push(Series {
                label: ds.name.clone(),
                points: raw,
                color_idx: idx,
                kind: SeriesKind::PointsWithLine,
            });
        }
    }

    let title = args.title.as_deref().unwrap_or("Energy-Volume Curves");
    render_chart(
        &args.output,
        args.width,
        args.height,
        title,
        "Volume (A^3)",
        "Energy (eV)",
        &series,
    )?;
    output::print_done(&format!("Wrote '{}'", args.output.display()));
    Ok(())
}

// ─────────────────────────────────────────────────────────────
// P–V 图（pv 与 bm 共用，仅模型族不同）
// ─────────────────────────────────────────────────────────────

fn plot_pv(args: &PlotCurveArgs, models: &[EosModel], default_title: &str) -> Result<()> {
    output::print_header(default_title);
    if args.grid_points < 2 {
        return Err(EosKitError::InvalidInput(
            "--grid-points must be at least 2".to_string(),
        ));
    }
    let datasets = load_datasets(&args.files)?;

    // 共用体积网格：所有数据集采样范围的并集
    let mut vmin = f64::INFINITY;
    let mut vmax = f64::NEG_INFINITY;
    for ds in &datasets {
        for (v, _) in curve_points(&ds.rows, RowKind::Raw) {
            vmin = vmin.min(v);
            vmax = vmax.max(v);
        }
    }
    if !vmin.is_finite() || !vmax.is_finite() || vmin >= vmax {
        return Err(EosKitError::MissingData(
            "no Raw rows found to span the volume grid".to_string(),
        ));
    }
    let vgrid = eos::linspace(vmin, vmax, args.grid_points);

    let mut series = Vec::new();
    for (idx, ds) in datasets.iter().enumerate() {
        let params = pressure_params_from_rows(&ds.rows).map_err(|e| {
            EosKitError::MissingData(format!("dataset '{}': {}", ds.name, e))
        })?;
        for model in models {
            let points: Vec<(f64, f64)> = vgrid
                .iter()
                .map(|&v| (v, model.pressure(v, &params)))
                .collect();
            series.push(Series {
                label: format!("{}-{}", ds.name, model),
                points,
                color_idx: idx,
                kind: SeriesKind::Line,
            });
        }
    }

    let title = args.title.as_deref().unwrap_or(default_title);
    render_chart(
        &args.output,
        args.width,
        args.height,
        title,
        "Volume (A^3)",
        "Pressure (GPa)",
        &series,
    )?;
    output::print_done(&format!("Wrote '{}'", args.output.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eos::{FitModel, FitResult};
    use std::path::PathBuf;

    #[test]
    fn test_dataset_name_from_stem() {
        assert_eq!(dataset_name(&PathBuf::from("out/chgnet.csv")), "chgnet");
        assert_eq!(dataset_name(&PathBuf::from("mace.csv")), "mace");
    }

    #[test]
    fn test_curve_points_filters_and_sorts() {
        let rows = vec![
            EosRow::raw(19.0, -39.8),
            EosRow::interpolated(18.0, -40.1),
            EosRow::raw(17.0, -40.0),
            EosRow::eos_fit(&FitResult {
                model: FitModel::BirchMurnaghan,
                v0: 18.7,
                e0: -40.5,
                bulk_modulus_gpa: 208.0,
                b0p: Some(4.0),
                sjeos_coeffs: None,
            }),
        ];
        let raw = curve_points(&rows, RowKind::Raw);
        assert_eq!(raw, vec![(17.0, -40.0), (19.0, -39.8)]);
        let interp = curve_points(&rows, RowKind::Interpolated);
        assert_eq!(interp, vec![(18.0, -40.1)]);
    }
}
