//! # reference 子命令 CLI 定义
//!
//! 用文献 BM3 参数在采样体积网格上生成参考能量曲线。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/reference.rs`

use clap::Args;
use std::path::PathBuf;

/// reference 子命令参数
#[derive(Args, Debug)]
pub struct ReferenceArgs {
    /// Output CSV file
    #[arg(short, long, default_value = "mgo.csv")]
    pub output: PathBuf,

    /// Equilibrium volume V0 in Angstrom^3 per formula unit
    #[arg(long, default_value_t = crate::calculators::reference::LITERATURE_V0)]
    pub v0: f64,

    /// Bulk modulus B0 in GPa
    #[arg(long, default_value_t = crate::calculators::reference::LITERATURE_B0_GPA)]
    pub b0: f64,

    /// Pressure derivative B0'
    #[arg(long, default_value_t = crate::calculators::reference::LITERATURE_B0P)]
    pub b0p: f64,

    /// Equilibrium energy E0 in eV per formula unit
    #[arg(long, default_value_t = crate::calculators::reference::LITERATURE_E0)]
    pub e0: f64,
}
