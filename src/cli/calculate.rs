//! # calculate 子命令 CLI 定义
//!
//! EOS 计算驱动：选择能量后端，在固定体积网格上采样能量，
//! 拟合参考模型并写出联合输出表。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/calculate.rs`

use crate::calculators::CalculatorKind;

use clap::Args;
use std::path::PathBuf;

/// calculate 子命令参数
#[derive(Args, Debug)]
pub struct CalculateArgs {
    /// Output directory for the combined CSV (created if missing)
    pub output_dir: PathBuf,

    /// Energy backend
    #[arg(short, long, value_enum)]
    pub calculator: CalculatorKind,

    /// Volume,Energy CSV with precomputed MLIP energies (calculator 'table' only)
    #[arg(long)]
    pub energies: Option<PathBuf>,

    /// Label for the output file (default: backend label)
    #[arg(long)]
    pub label: Option<String>,

    /// Number of points on the fine evaluation grid
    #[arg(long, default_value_t = 500)]
    pub fine_points: usize,

    /// Number of parallel jobs for energy evaluation (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,
}
