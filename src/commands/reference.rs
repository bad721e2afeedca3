//! # reference 子命令实现
//!
//! 在采样体积网格上用 3 阶 Birch–Murnaghan 公式与文献参数
//! 生成参考能量曲线，写出 Volume,Energy 两列 CSV。
//!
//! ## 依赖关系
//! - 使用 `cli/reference.rs` 定义的 ReferenceArgs
//! - 使用 `calculators/reference.rs` 的解析势
//! - 使用 `models/record.rs` 写出曲线

use crate::calculators::reference::ReferenceBm3;
use crate::calculators::EnergyModel;
use crate::cli::reference::ReferenceArgs;
use crate::eos::{self, GPA_TO_EV_A3};
use crate::error::Result;
use crate::models::write_curve;
use crate::utils::output;

/// 执行参考曲线生成
pub fn execute(args: ReferenceArgs) -> Result<()> {
    output::print_header("Literature Reference Curve");

    output::print_info(&format!(
        "BM3 parameters: V0 = {} A^3, B0 = {} GPa, B0' = {}, E0 = {} eV",
        args.v0, args.b0, args.b0p, args.e0
    ));

    let model = ReferenceBm3::new(args.v0, args.b0 * GPA_TO_EV_A3, args.b0p, args.e0);
    let volumes = eos::mgo_volume_grid();
    let energies = volumes
        .iter()
        .map(|&v| model.energy(v))
        .collect::<Result<Vec<f64>>>()?;

    write_curve(&args.output, &volumes, &energies)?;
    output::print_done(&format!(
        "Wrote '{}' with {} rows",
        args.output.display(),
        volumes.len()
    ));
    Ok(())
}
