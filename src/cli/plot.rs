//! # plot 子命令 CLI 定义
//!
//! 绘图统一入口，包含多个子命令：
//! - `ev`: 能量-体积曲线（采样点 + 插值）
//! - `pv`: 压强-体积曲线（全部模型族）
//! - `bm`: Birch–Murnaghan 阶数对比
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/plot.rs`

use clap::{Args, Subcommand};
use std::path::PathBuf;

/// plot 主命令参数
#[derive(Args, Debug)]
pub struct PlotArgs {
    #[command(subcommand)]
    pub command: PlotCommands,
}

/// plot 子命令
#[derive(Subcommand, Debug)]
pub enum PlotCommands {
    /// Energy-volume curves (raw samples + spline interpolation)
    Ev(PlotCurveArgs),

    /// Pressure-volume curves for all EOS model families
    Pv(PlotCurveArgs),

    /// Birch-Murnaghan order comparison (bm2..bm5)
    Bm(PlotCurveArgs),
}

/// 曲线图通用参数
#[derive(Args, Debug)]
pub struct PlotCurveArgs {
    /// Combined CSV files from `eoskit calculate` (one dataset per file)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output image (PNG, or SVG by extension)
    #[arg(short, long, default_value = "eos_plot.png")]
    pub output: PathBuf,

    /// Figure width in pixels (PNG) or points (SVG)
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Figure height in pixels (PNG) or points (SVG)
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Title for the plot
    #[arg(long)]
    pub title: Option<String>,

    /// Number of points on the shared volume grid (pv/bm)
    #[arg(long, default_value_t = 400)]
    pub grid_points: usize,
}
