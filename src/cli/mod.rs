//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `calculate`: EOS 计算驱动（采样 → 拟合 → 联合 CSV）
//! - `reference`: 生成文献 BM3 参考曲线
//! - `likelihood`: 拟合与参考曲线的高斯似然比较
//! - `plot`: 能量/压强-体积对比图（嵌套子命令）
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: calculate, likelihood, plot, reference

pub mod calculate;
pub mod likelihood;
pub mod plot;
pub mod reference;

use clap::{Parser, Subcommand};

/// EOSkit - 晶体状态方程分析工具箱
#[derive(Parser)]
#[command(name = "eoskit")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "An equation of state analysis toolkit for crystalline solids", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Sample an energy backend, fit EOS models and write the combined CSV
    Calculate(calculate::CalculateArgs),

    /// Generate the literature Birch-Murnaghan reference curve
    Reference(reference::ReferenceArgs),

    /// Compare a fitted EOS against a reference curve via Gaussian log-likelihood
    Likelihood(likelihood::LikelihoodArgs),

    /// Render energy-volume / pressure-volume comparison plots
    Plot(plot::PlotArgs),
}
