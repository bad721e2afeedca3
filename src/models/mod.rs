//! # 数据模型模块
//!
//! 平坦行式输出表（Type 判别列）与曲线 CSV 的读写。
//!
//! ## 依赖关系
//! - 被 `commands/`, `calculators/table.rs` 使用
//! - 子模块: record

pub mod record;

pub use record::{read_curve, read_rows, write_curve, write_rows, EosRow, RowKind};
