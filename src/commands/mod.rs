//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `eos/`, `calculators/`, `models/`, `plot/`, `utils/`
//! - 子模块: calculate, likelihood, plot, reference

pub mod calculate;
pub mod likelihood;
pub mod plot;
pub mod reference;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Calculate(args) => calculate::execute(args),
        Commands::Reference(args) => reference::execute(args),
        Commands::Likelihood(args) => likelihood::execute(args),
        Commands::Plot(args) => plot::execute(args),
    }
}
