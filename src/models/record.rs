//! # 输出表数据模型
//!
//! 计算驱动产生的所有行共用一张平坦表，由 `Type` 判别列
//! 区分四类记录：
//! - `Raw`: 采样点 (Volume, Energy)
//! - `Interpolated`: 样条插值点 (Volume, Energy)
//! - `EOS`: 拟合结果 (Model, v0, e0, Bulk_Modulus_GPa[, a..d])
//! - `PV`: 压强-体积曲线点 (Model, Volume, Pressure)
//!
//! 各类记录只填充自己的列，其余列留空（csv + serde 的
//! `Option` 字段自动映射空单元格）。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `csv` + `serde` 读写

use crate::eos::FitResult;
use crate::error::{EosKitError, Result};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// 行类别判别器
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowKind {
    Raw,
    Interpolated,
    #[serde(rename = "EOS")]
    Eos,
    #[serde(rename = "PV")]
    Pv,
}

impl std::fmt::Display for RowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowKind::Raw => write!(f, "Raw"),
            RowKind::Interpolated => write!(f, "Interpolated"),
            RowKind::Eos => write!(f, "EOS"),
            RowKind::Pv => write!(f, "PV"),
        }
    }
}

/// 输出表的一行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EosRow {
    #[serde(rename = "Type")]
    pub kind: RowKind,
    #[serde(rename = "Model")]
    pub model: Option<String>,
    #[serde(rename = "Volume")]
    pub volume: Option<f64>,
    #[serde(rename = "Energy")]
    pub energy: Option<f64>,
    pub v0: Option<f64>,
    pub e0: Option<f64>,
    #[serde(rename = "Bulk_Modulus_GPa")]
    pub bulk_modulus_gpa: Option<f64>,
    #[serde(rename = "Pressure")]
    pub pressure: Option<f64>,
    /// SJEOS 拟合系数（仅 sjeos 的 EOS 行填充）
    pub a: Option<f64>,
    pub b: Option<f64>,
    pub c: Option<f64>,
    pub d: Option<f64>,
}

impl EosRow {
    fn empty(kind: RowKind) -> Self {
        EosRow {
            kind,
            model: None,
            volume: None,
            energy: None,
            v0: None,
            e0: None,
            bulk_modulus_gpa: None,
            pressure: None,
            a: None,
            b: None,
            c: None,
            d: None,
        }
    }

    /// 采样点行
    pub fn raw(volume: f64, energy: f64) -> Self {
        EosRow {
            volume: Some(volume),
            energy: Some(energy),
            ..EosRow::empty(RowKind::Raw)
        }
    }

    /// 插值点行
    pub fn interpolated(volume: f64, energy: f64) -> Self {
        EosRow {
            volume: Some(volume),
            energy: Some(energy),
            ..EosRow::empty(RowKind::Interpolated)
        }
    }

    /// 拟合结果行
    pub fn eos_fit(result: &FitResult) -> Self {
        let coeffs = result.sjeos_coeffs;
        EosRow {
            model: Some(result.model.to_string()),
            v0: Some(result.v0),
            e0: Some(result.e0),
            bulk_modulus_gpa: Some(result.bulk_modulus_gpa),
            a: coeffs.map(|c| c[0]),
            b: coeffs.map(|c| c[1]),
            c: coeffs.map(|c| c[2]),
            d: coeffs.map(|c| c[3]),
            ..EosRow::empty(RowKind::Eos)
        }
    }

    /// P–V 曲线点行
    pub fn pv(model: impl std::fmt::Display, volume: f64, pressure: f64) -> Self {
        EosRow {
            model: Some(model.to_string()),
            volume: Some(volume),
            pressure: Some(pressure),
            ..EosRow::empty(RowKind::Pv)
        }
    }
}

// ─────────────────────────────────────────────────────────────
// 读写
// ─────────────────────────────────────────────────────────────

/// 写出联合输出表
pub fn write_rows(path: &Path, rows: &[EosRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush().map_err(|e| EosKitError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(())
}

/// 读回联合输出表
pub fn read_rows(path: &Path) -> Result<Vec<EosRow>> {
    if !path.exists() {
        return Err(EosKitError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let mut rdr = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for record in rdr.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}

/// 简单曲线行（Volume, Energy 两列）
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CurveRow {
    #[serde(rename = "Volume")]
    volume: f64,
    #[serde(rename = "Energy")]
    energy: f64,
}

/// 写出 Volume,Energy 两列曲线（参考数据格式）
pub fn write_curve(path: &Path, volumes: &[f64], energies: &[f64]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for (&v, &e) in volumes.iter().zip(energies) {
        wtr.serialize(CurveRow {
            volume: v,
            energy: e,
        })?;
    }
    wtr.flush().map_err(|e| EosKitError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(())
}

/// 读入 Volume,Energy 两列曲线
pub fn read_curve(path: &Path) -> Result<(Vec<f64>, Vec<f64>)> {
    if !path.exists() {
        return Err(EosKitError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let mut rdr = csv::Reader::from_path(path)?;
    let mut volumes = Vec::new();
    let mut energies = Vec::new();
    for record in rdr.deserialize() {
        let row: CurveRow = record?;
        volumes.push(row.volume);
        energies.push(row.energy);
    }
    if volumes.is_empty() {
        return Err(EosKitError::MissingData(format!(
            "no data rows in '{}'",
            path.display()
        )));
    }
    Ok((volumes, energies))
}
