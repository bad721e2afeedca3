//! # calculate 子命令实现
//!
//! EOS 计算驱动：在固定体积网格上采样所选后端的能量，
//! 样条插值到细网格，拟合五种参考模型，评估 P–V 曲线族，
//! 并把全部行并入一张按 `Type` 判别的联合 CSV。
//!
//! ## 流程
//! 1. 构建能量后端（封闭枚举，未知名称在 CLI 层即被拒绝）
//! 2. 并行评估采样体积的能量（rayon + 进度条）
//! 3. `Raw` 行 → 样条 `Interpolated` 行（细网格同时是 P–V
//!    曲线的展示网格）
//! 4. 拟合 birchmurnaghan/murnaghan/sjeos/taylor/birch → `EOS` 行
//! 5. 由 BM 拟合参数（高阶导数取缺省常数）与 SJEOS 拟合系数
//!    评估 `PV` 行
//! 6. 联合写出 `<output_dir>/<label>.csv`
//!
//! ## 依赖关系
//! - 使用 `cli/calculate.rs` 定义的 CalculateArgs
//! - 使用 `calculators/`, `eos/`, `models/record.rs`
//! - 使用 `utils/` 输出与进度条

use crate::calculators;
use crate::cli::calculate::CalculateArgs;
use crate::eos::{
    self, fit, CubicSpline, EosModel, FitModel, FitResult, PressureParams, DEFAULT_B0P,
    DEFAULT_B0PP, DEFAULT_B0PPP,
};
use crate::error::{EosKitError, Result};
use crate::models::{write_rows, EosRow, RowKind};
use crate::utils::{output, progress};

use rayon::prelude::*;
use std::fs;
use tabled::{Table, Tabled};

/// 拟合摘要表行
#[derive(Tabled)]
struct FitSummaryRow {
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "V0 (A^3)")]
    v0: String,
    #[tabled(rename = "E0 (eV)")]
    e0: String,
    #[tabled(rename = "B0 (GPa)")]
    b0: String,
}

/// 执行 EOS 计算
pub fn execute(args: CalculateArgs) -> Result<()> {
    output::print_header("Equation of State Calculation");

    if args.fine_points < 2 {
        return Err(EosKitError::InvalidInput(format!(
            "--fine-points must be at least 2, got {}",
            args.fine_points
        )));
    }

    let calculator = calculators::build(args.calculator, args.energies.as_deref())?;
    let label = args
        .label
        .clone()
        .unwrap_or_else(|| calculator.label().to_string());
    output::print_info(&format!(
        "Backend: {} (dataset label '{}')",
        args.calculator, label
    ));

    let volumes = eos::mgo_volume_grid();
    let vfine = eos::linspace(volumes[0], *volumes.last().unwrap(), args.fine_points);

    // ─────────────────────────────────────────────────────────
    // 能量采样（并行）
    // ─────────────────────────────────────────────────────────
    let jobs = if args.jobs == 0 {
        num_cpus::get()
    } else {
        args.jobs
    };
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .map_err(|e| EosKitError::Other(e.to_string()))?;

    let pb = progress::create_progress_bar(volumes.len() as u64, "Evaluating energies");
    let energies: Result<Vec<f64>> = pool.install(|| {
        volumes
            .par_iter()
            .map(|&v| {
                let e = calculator.energy(v);
                pb.inc(1);
                e
            })
            .collect()
    });
    pb.finish_and_clear();
    let energies = energies?;
    output::print_info(&format!(
        "Sampled {} volumes in [{:.3}, {:.3}] A^3",
        volumes.len(),
        volumes[0],
        volumes.last().unwrap()
    ));

    let mut rows: Vec<EosRow> = volumes
        .iter()
        .zip(&energies)
        .map(|(&v, &e)| EosRow::raw(v, e))
        .collect();

    // ─────────────────────────────────────────────────────────
    // EOS 拟合
    // ─────────────────────────────────────────────────────────
    let spinner = progress::create_spinner("Fitting EOS models");
    let mut fits: Vec<FitResult> = Vec::with_capacity(FitModel::ALL.len());
    for model in FitModel::ALL {
        fits.push(fit(model, &volumes, &energies)?);
    }
    spinner.finish_and_clear();

    let summary: Vec<FitSummaryRow> = fits
        .iter()
        .map(|f| FitSummaryRow {
            model: f.model.to_string(),
            v0: format!("{:.4}", f.v0),
            e0: format!("{:.4}", f.e0),
            b0: format!("{:.2}", f.bulk_modulus_gpa),
        })
        .collect();
    println!("{}", Table::new(summary));

    rows.extend(fits.iter().map(EosRow::eos_fit));

    // ─────────────────────────────────────────────────────────
    // 样条插值（细网格）
    // ─────────────────────────────────────────────────────────
    let spline = CubicSpline::new(&volumes, &energies)?;
    rows.extend(vfine.iter().map(|&v| EosRow::interpolated(v, spline.eval(v))));

    // ─────────────────────────────────────────────────────────
    // P–V 曲线族
    // ─────────────────────────────────────────────────────────
    let params = pressure_params(&fits)?;
    for &v in &vfine {
        for model in EosModel::ALL {
            rows.push(EosRow::pv(model, v, model.pressure(v, &params)));
        }
    }

    // ─────────────────────────────────────────────────────────
    // 写出联合表
    // ─────────────────────────────────────────────────────────
    fs::create_dir_all(&args.output_dir).map_err(|e| EosKitError::FileWriteError {
        path: args.output_dir.display().to_string(),
        source: e,
    })?;
    let out_path = args.output_dir.join(format!("{}.csv", label));
    write_rows(&out_path, &rows)?;

    output::print_done(&format!(
        "Wrote {} rows to '{}'",
        rows.len(),
        out_path.display()
    ));
    Ok(())
}

/// 由拟合结果组装 P–V 评估参数
///
/// BM/Murnaghan 族使用 birchmurnaghan 拟合的 (v0, B0[GPa])，
/// 高阶导数取缺省常数；SJEOS 使用自身拟合系数（eV/Å³ 单位制）。
pub fn pressure_params(fits: &[FitResult]) -> Result<PressureParams> {
    let bm = fits
        .iter()
        .find(|f| f.model == FitModel::BirchMurnaghan)
        .ok_or_else(|| EosKitError::MissingData("no birchmurnaghan fit".to_string()))?;
    let sjeos = fits
        .iter()
        .find(|f| f.model == FitModel::Sjeos)
        .and_then(|f| f.sjeos_coeffs)
        .ok_or_else(|| EosKitError::MissingData("no sjeos fit coefficients".to_string()))?;
    Ok(PressureParams {
        v0: bm.v0,
        b0: bm.bulk_modulus_gpa,
        b0p: DEFAULT_B0P,
        b0pp: DEFAULT_B0PP,
        b0ppp: DEFAULT_B0PPP,
        sjeos,
    })
}

/// 从联合表的 `EOS` 行复原 P–V 评估参数（绘图端使用）
pub fn pressure_params_from_rows(rows: &[EosRow]) -> Result<PressureParams> {
    let find = |model: &str| {
        rows.iter()
            .find(|r| r.kind == RowKind::Eos && r.model.as_deref() == Some(model))
    };
    let bm = find("birchmurnaghan")
        .ok_or_else(|| EosKitError::MissingData("no birchmurnaghan EOS row".to_string()))?;
    let (v0, b0) = match (bm.v0, bm.bulk_modulus_gpa) {
        (Some(v0), Some(b0)) => (v0, b0),
        _ => {
            return Err(EosKitError::MissingData(
                "birchmurnaghan EOS row is missing v0 or Bulk_Modulus_GPa".to_string(),
            ))
        }
    };
    let sj = find("sjeos")
        .ok_or_else(|| EosKitError::MissingData("no sjeos EOS row".to_string()))?;
    let sjeos = match (sj.a, sj.b, sj.c, sj.d) {
        (Some(a), Some(b), Some(c), Some(d)) => [a, b, c, d],
        _ => {
            return Err(EosKitError::MissingData(
                "sjeos EOS row is missing coefficient columns".to_string(),
            ))
        }
    };
    Ok(PressureParams {
        v0,
        b0,
        b0p: DEFAULT_B0P,
        b0pp: DEFAULT_B0PP,
        b0ppp: DEFAULT_B0PPP,
        sjeos,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eos::models::birch_murnaghan_pressure_3rd;
    use crate::eos::mgo_volume_grid;

    /// 端到端：reference 后端 → 拟合 → P–V 参数
    #[test]
    fn test_fit_pipeline_on_reference_backend() {
        use crate::calculators::EnergyModel;

        let backend = crate::calculators::reference::ReferenceBm3::literature();
        let volumes = mgo_volume_grid();
        let energies: Vec<f64> = volumes
            .iter()
            .map(|&v| backend.energy(v).unwrap())
            .collect();

        let fits: Vec<FitResult> = FitModel::ALL
            .iter()
            .map(|&m| fit(m, &volumes, &energies).unwrap())
            .collect();

        // BM3 拟合必须精确回收文献参数
        let bm = fits
            .iter()
            .find(|f| f.model == FitModel::BirchMurnaghan)
            .unwrap();
        assert!((bm.v0 - 11.25).abs() < 1e-4, "v0 = {}", bm.v0);
        assert!((bm.e0 - (-320.0)).abs() < 1e-6, "e0 = {}", bm.e0);
        assert!(
            (bm.bulk_modulus_gpa - 160.0).abs() < 0.1,
            "B0 = {}",
            bm.bulk_modulus_gpa
        );

        let params = pressure_params(&fits).unwrap();
        // P–V 行与公式库直接评估一致
        let v = 0.95 * params.v0;
        let p = EosModel::Bm3.pressure(v, &params);
        assert!(
            (p - birch_murnaghan_pressure_3rd(v, params.v0, params.b0, DEFAULT_B0P)).abs()
                < 1e-12
        );
        // 平衡点处压强为零
        assert!(EosModel::Murnaghan.pressure(params.v0, &params).abs() < 1e-9);
    }

    #[test]
    fn test_pressure_params_requires_bm_fit() {
        assert!(pressure_params(&[]).is_err());
    }

    /// 写入联合表后能复原与拟合端一致的 P–V 参数
    #[test]
    fn test_pressure_params_round_trip_through_rows() {
        let fits = vec![
            FitResult {
                model: FitModel::BirchMurnaghan,
                v0: 18.7,
                e0: -40.5,
                bulk_modulus_gpa: 208.0,
                b0p: Some(4.0),
                sjeos_coeffs: None,
            },
            FitResult {
                model: FitModel::Sjeos,
                v0: 18.69,
                e0: -40.5,
                bulk_modulus_gpa: 207.0,
                b0p: None,
                sjeos_coeffs: Some([1.5, -2.0, 0.5, -40.0]),
            },
        ];
        let direct = pressure_params(&fits).unwrap();
        let rows: Vec<EosRow> = fits.iter().map(EosRow::eos_fit).collect();
        let restored = pressure_params_from_rows(&rows).unwrap();
        assert_eq!(restored.v0, direct.v0);
        assert_eq!(restored.b0, direct.b0);
        assert_eq!(restored.sjeos, direct.sjeos);

        assert!(pressure_params_from_rows(&[]).is_err());
    }
}
