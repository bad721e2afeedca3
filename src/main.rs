//! # EosKit - MgO 状态方程分析工具箱
//!
//! 将分散的 EOS 分析脚本用 Rust 重构，统一成单一可执行文件。
//!
//! ## 子命令
//! - `calculate`  - 采样能量后端、拟合 EOS、生成联合 CSV
//! - `reference`  - 生成文献参数的 Birch–Murnaghan 参考曲线
//! - `likelihood` - 模型曲线与参考曲线的高斯对数似然比较
//! - `plot`       - 曲线对比图
//!   - `ev` - 能量-体积曲线
//!   - `pv` - 压强-体积曲线（全部模型族）
//!   - `bm` - Birch–Murnaghan 阶数对比
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/         (命令行参数定义)
//!   ├── commands/    (命令执行逻辑)
//!   ├── calculators/ (能量后端)
//!   ├── eos/         (公式库、拟合、样条、似然)
//!   ├── models/      (CSV 数据模型)
//!   ├── plot/        (图表渲染)
//!   ├── utils/       (工具函数)
//!   └── error.rs     (错误处理)
//! ```

mod calculators;
mod cli;
mod commands;
mod eos;
mod error;
mod models;
mod plot;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
