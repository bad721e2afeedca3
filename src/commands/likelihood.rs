//! # likelihood 子命令实现
//!
//! 从 `calculate` 输出表取 Birch–Murnaghan 拟合参数，评估所选
//! 能量模型，与参考曲线做高斯对数似然比较。
//!
//! ## 归一化约定
//! 两条曲线在比较前各自平移到最小值为零——去除任意能量
//! 零点，使似然只度量 EOS 形状差异。`log_likelihood_gaussian`
//! 本身保持对偏移敏感，归一化是本命令的职责。
//!
//! ## 依赖关系
//! - 使用 `cli/likelihood.rs` 定义的 LikelihoodArgs
//! - 使用 `eos/likelihood.rs`, `eos/models.rs`
//! - 使用 `models/record.rs` 读取数据

use crate::cli::likelihood::{EnergyEvalModel, LikelihoodArgs};
use crate::eos::likelihood::{log_likelihood_gaussian, normalize_to_minimum};
use crate::eos::models::{
    birch_murnaghan_energy_2nd, birch_murnaghan_energy_3rd, murnaghan_energy,
};
use crate::eos::{self, DEFAULT_B0P, GPA_TO_EV_A3};
use crate::error::{EosKitError, Result};
use crate::models::{read_curve, read_rows, EosRow, RowKind};
use crate::utils::output;

use colored::Colorize;

/// 执行似然比较
pub fn execute(args: LikelihoodArgs) -> Result<()> {
    output::print_header("Gaussian Log-Likelihood Comparison");

    if args.grid_points < 2 {
        return Err(EosKitError::InvalidInput(format!(
            "--grid-points must be at least 2, got {}",
            args.grid_points
        )));
    }

    // ─────────────────────────────────────────────────────────
    // Birch–Murnaghan 拟合参数
    // ─────────────────────────────────────────────────────────
    let rows = read_rows(&args.data)?;
    let bm = find_eos_row(&rows, "birchmurnaghan").ok_or_else(|| {
        EosKitError::MissingData(format!(
            "no EOS row for model 'birchmurnaghan' in '{}'",
            args.data.display()
        ))
    })?;
    let (v0, e0, b0_gpa) = match (bm.v0, bm.e0, bm.bulk_modulus_gpa) {
        (Some(v0), Some(e0), Some(b)) => (v0, e0, b),
        _ => {
            return Err(EosKitError::MissingData(
                "birchmurnaghan EOS row is missing fit parameters".to_string(),
            ))
        }
    };
    let b0 = b0_gpa * GPA_TO_EV_A3;

    output::print_info(&format!(
        "Fit parameters: V0 = {:.4} A^3, B0 = {:.2} GPa, B0' = {}, E0 = {:.4} eV",
        v0, b0_gpa, DEFAULT_B0P, e0
    ));

    // ─────────────────────────────────────────────────────────
    // 模型与参考曲线
    // ─────────────────────────────────────────────────────────
    let v_model = eos::linspace(0.9 * v0, 1.1 * v0, args.grid_points);
    let mut e_model: Vec<f64> = v_model
        .iter()
        .map(|&v| match args.model {
            EnergyEvalModel::Murnaghan => murnaghan_energy(v, v0, b0, DEFAULT_B0P, e0),
            EnergyEvalModel::Bm2 => birch_murnaghan_energy_2nd(v, v0, b0, e0),
            EnergyEvalModel::Bm3 => birch_murnaghan_energy_3rd(v, v0, b0, DEFAULT_B0P, e0),
        })
        .collect();

    let (v_ref, mut e_ref) = read_curve(&args.reference)?;

    print_range("Model energy", &e_model);
    print_range("Reference", &e_ref);

    // 归一化到各自最小值（去除任意能量零点）
    normalize_to_minimum(&mut e_model);
    normalize_to_minimum(&mut e_ref);
    output::print_info("Curves normalized to their minima");

    let logl = log_likelihood_gaussian(&v_ref, &e_ref, &v_model, &e_model, args.sigma)?;

    // ─────────────────────────────────────────────────────────
    // 结果
    // ─────────────────────────────────────────────────────────
    output::print_separator();
    println!("  MLIP data:      {}", args.data.display());
    println!("  Reference:      {}", args.reference.display());
    println!("  EOS model:      {}", args.model);
    println!("  Assumed sigma:  {} eV", args.sigma);
    println!(
        "  Log-likelihood: {}",
        format!("{:.6}", logl).bold()
    );
    output::print_separator();
    Ok(())
}

/// 在联合表中查找指定模型的 EOS 行
fn find_eos_row<'a>(rows: &'a [EosRow], model: &str) -> Option<&'a EosRow> {
    rows.iter()
        .find(|r| r.kind == RowKind::Eos && r.model.as_deref() == Some(model))
}

/// 打印曲线的最小/最大值（归一化前的诊断输出）
fn print_range(name: &str, e: &[f64]) {
    let min = e.iter().copied().fold(f64::INFINITY, f64::min);
    let max = e.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    output::print_info(&format!("{}: min = {:.6}, max = {:.6}", name, min, max));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eos::FitModel;

    #[test]
    fn test_find_eos_row_by_model() {
        let rows = vec![
            EosRow::raw(10.5, -34.9),
            EosRow::eos_fit(&crate::eos::FitResult {
                model: FitModel::Murnaghan,
                v0: 18.6,
                e0: -319.9,
                bulk_modulus_gpa: 158.0,
                b0p: Some(4.0),
                sjeos_coeffs: None,
            }),
            EosRow::eos_fit(&crate::eos::FitResult {
                model: FitModel::BirchMurnaghan,
                v0: 18.7,
                e0: -320.0,
                bulk_modulus_gpa: 160.0,
                b0p: Some(4.1),
                sjeos_coeffs: None,
            }),
        ];
        let bm = find_eos_row(&rows, "birchmurnaghan").unwrap();
        assert_eq!(bm.v0, Some(18.7));
        assert!(find_eos_row(&rows, "sjeos").is_none());
    }

    /// 网格点数不足 2 时在读文件之前即拒绝
    #[test]
    fn test_degenerate_grid_points_rejected() {
        for n in [0, 1] {
            let args = LikelihoodArgs {
                data: "does-not-exist.csv".into(),
                reference: "does-not-exist.csv".into(),
                model: EnergyEvalModel::Bm3,
                sigma: 2e-2,
                grid_points: n,
            };
            assert!(matches!(
                execute(args),
                Err(crate::error::EosKitError::InvalidInput(_))
            ));
        }
    }
}
