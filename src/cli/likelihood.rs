//! # likelihood 子命令 CLI 定义
//!
//! 高斯对数似然比较：MLIP 拟合曲线 vs 文献参考曲线。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/likelihood.rs`

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 似然评估使用的能量模型（封闭集合）
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum EnergyEvalModel {
    /// Murnaghan
    Murnaghan,
    /// 2nd-order Birch-Murnaghan (B0' = 4)
    Bm2,
    /// 3rd-order Birch-Murnaghan
    #[default]
    Bm3,
}

impl std::fmt::Display for EnergyEvalModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnergyEvalModel::Murnaghan => write!(f, "murnaghan"),
            EnergyEvalModel::Bm2 => write!(f, "bm2"),
            EnergyEvalModel::Bm3 => write!(f, "bm3"),
        }
    }
}

/// likelihood 子命令参数
#[derive(Args, Debug)]
pub struct LikelihoodArgs {
    /// Combined CSV produced by `eoskit calculate`
    #[arg(long)]
    pub data: PathBuf,

    /// Reference Volume,Energy CSV (e.g. from `eoskit reference`)
    #[arg(long)]
    pub reference: PathBuf,

    /// Energy model evaluated from the Birch-Murnaghan fit parameters
    #[arg(short, long, value_enum, default_value_t = EnergyEvalModel::Bm3)]
    pub model: EnergyEvalModel,

    /// Assumed Gaussian noise std in eV (20 meV is a reasonable start)
    #[arg(short, long, default_value_t = 2e-2)]
    pub sigma: f64,

    /// Number of points on the model evaluation grid
    #[arg(long, default_value_t = 400)]
    pub grid_points: usize,
}
