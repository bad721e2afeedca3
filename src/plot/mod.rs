//! # 图表生成模块
//!
//! 使用 `plotters` 渲染能量-体积与压强-体积对比图。
//!
//! ## 子模块
//! - `curves`: 通用曲线图渲染
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs` 使用

pub mod curves;

pub use curves::{render_chart, Series, SeriesKind};
