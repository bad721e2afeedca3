//! # 能量计算后端模块
//!
//! 给定化学式单元体积，返回势能（eV）。岩盐 MgO 的晶胞由
//! 体积唯一确定（a = (4V)^(1/3)），后端只需体积一个输入。
//!
//! ## 后端
//! - `buckingham`: 原生 Born–Mayer–Huggins 刚性离子模型
//! - `reference`: 文献参数的 BM3 解析势
//! - `table`: 外部 MLIP 预计算能量表（m3gnet/chgnet/mace/... 在
//!   各自生态离线产出 Volume,Energy 表）
//!
//! ## 依赖关系
//! - 被 `commands/calculate.rs` 使用
//! - 子模块: buckingham, reference, table

pub mod buckingham;
pub mod reference;
pub mod table;

use crate::error::{EosKitError, Result};

use clap::ValueEnum;
use std::path::Path;

/// 能量后端接口
///
/// 体积单位 Å³/化学式单元，能量单位 eV。后端失败直接向上
/// 传播并终止本次运行（快速失败，无部分恢复）。
pub trait EnergyModel: Send + Sync {
    /// 后端名称（用于输出文件命名）
    fn label(&self) -> &str;

    /// 在给定体积下的势能
    fn energy(&self, volume: f64) -> Result<f64>;
}

/// 可用的计算后端（封闭集合，取代按字符串分发）
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum CalculatorKind {
    /// Born–Mayer–Huggins rigid-ion pair potential (native)
    Buckingham,
    /// Analytic 3rd-order Birch–Murnaghan with literature parameters
    Reference,
    /// Precomputed Volume,Energy table from an external MLIP run
    Table,
}

impl std::fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalculatorKind::Buckingham => write!(f, "buckingham"),
            CalculatorKind::Reference => write!(f, "reference"),
            CalculatorKind::Table => write!(f, "table"),
        }
    }
}

/// 构建后端实例
///
/// `table` 后端必须提供能量表路径，其余后端忽略该参数。
pub fn build(kind: CalculatorKind, energies: Option<&Path>) -> Result<Box<dyn EnergyModel>> {
    match kind {
        CalculatorKind::Buckingham => Ok(Box::new(buckingham::BuckinghamMgO::lewis_catlow())),
        CalculatorKind::Reference => Ok(Box::new(reference::ReferenceBm3::literature())),
        CalculatorKind::Table => {
            let path = energies.ok_or_else(|| {
                EosKitError::InvalidInput(
                    "calculator 'table' requires --energies <FILE>".to_string(),
                )
            })?;
            Ok(Box::new(table::TabulatedEnergies::from_csv(path)?))
        }
    }
}
