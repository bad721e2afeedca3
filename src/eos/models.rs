//! # 解析状态方程公式库
//!
//! 纯函数，无状态、无 I/O。给定物理参数，返回某一体积下的
//! 能量或压强。
//!
//! ## 包含模型
//! - Murnaghan
//! - Birch–Murnaghan 2/3/4/5 阶（有限应变展开）
//! - SJEOS（稳定化胶体模型）
//! - Birch 有限应变多项式（仅能量）
//!
//! ## 约定
//! - 体积 V、平衡体积 V0 单位 Å³；能量 eV；压强与 B0 同单位制
//!   （压强公式对 B0 线性，B0 以 GPa 传入即得 GPa 压强）
//! - 所有公式假定 V > 0；非正体积不做保护，按闭式产生 NaN/Inf
//!   （快速失败语义）
//! - 每个压强公式都是对应能量公式的解析负导数，二者数值一致性
//!   由单元测试保证
//!
//! ## 依赖关系
//! - 被 `eos/fit.rs`, `commands/` 使用

use crate::eos::EV_A3_TO_GPA;

/// 有限应变变量 η = (V0/V)^(2/3)
#[inline]
fn eta(v: f64, v0: f64) -> f64 {
    (v0 / v).powf(2.0 / 3.0)
}

/// 有限应变变量 f = (η − 1)/2
#[inline]
fn strain(v: f64, v0: f64) -> f64 {
    0.5 * (eta(v, v0) - 1.0)
}

// ─────────────────────────────────────────────────────────────
// Murnaghan
// ─────────────────────────────────────────────────────────────

/// Murnaghan 状态方程能量
pub fn murnaghan_energy(v: f64, v0: f64, b0: f64, b0p: f64, e0: f64) -> f64 {
    let term = (b0 * v) / (b0p * (b0p - 1.0));
    e0 + term * ((v0 / v).powf(b0p) * (b0p - 1.0) + 1.0) - (b0 * v0) / (b0p - 1.0)
}

/// Murnaghan 状态方程压强
pub fn murnaghan_pressure(v: f64, v0: f64, b0: f64, b0p: f64) -> f64 {
    (b0 / b0p) * ((v0 / v).powf(b0p) - 1.0)
}

// ─────────────────────────────────────────────────────────────
// Birch–Murnaghan 3 阶
// ─────────────────────────────────────────────────────────────

/// 3 阶 Birch–Murnaghan 能量
pub fn birch_murnaghan_energy_3rd(v: f64, v0: f64, b0: f64, b0p: f64, e0: f64) -> f64 {
    let e = eta(v, v0);
    let x = e - 1.0;
    let pref = 9.0 * v0 * b0 / 16.0;
    e0 + pref * (x.powi(3) * b0p + x.powi(2) * (6.0 - 4.0 * e))
}

/// 3 阶 Birch–Murnaghan 压强
pub fn birch_murnaghan_pressure_3rd(v: f64, v0: f64, b0: f64, b0p: f64) -> f64 {
    let e = eta(v, v0);
    1.5 * b0
        * (e.powf(3.5) - e.powf(2.5))
        * (1.0 + 0.75 * (b0p - 4.0) * (e - 1.0))
}

// ─────────────────────────────────────────────────────────────
// Birch–Murnaghan 2 阶（B0′ 固定为 4）
// ─────────────────────────────────────────────────────────────

/// 2 阶 Birch–Murnaghan 能量
pub fn birch_murnaghan_energy_2nd(v: f64, v0: f64, b0: f64, e0: f64) -> f64 {
    birch_murnaghan_energy_3rd(v, v0, b0, 4.0, e0)
}

/// 2 阶 Birch–Murnaghan 压强
pub fn birch_murnaghan_pressure_2nd(v: f64, v0: f64, b0: f64) -> f64 {
    birch_murnaghan_pressure_3rd(v, v0, b0, 4.0)
}

// ─────────────────────────────────────────────────────────────
// Birch–Murnaghan 4 阶
// ─────────────────────────────────────────────────────────────

/// 4 阶展开的组合系数 (B0″ + B0′(B0′−7) + 143/9)
#[inline]
fn quartic_coeff(b0p: f64, b0pp: f64) -> f64 {
    b0pp + b0p * (b0p - 7.0) + 143.0 / 9.0
}

/// 4 阶 Birch–Murnaghan 能量（有限应变 Taylor 展开）
pub fn birch_murnaghan_energy_4th(v: f64, v0: f64, b0: f64, b0p: f64, b0pp: f64, e0: f64) -> f64 {
    let f = strain(v, v0);
    e0 + (9.0 * v0 * b0 / 2.0)
        * (f.powi(2) + (b0p - 4.0) / 3.0 * f.powi(3) + quartic_coeff(b0p, b0pp) / 8.0 * f.powi(4))
}

/// 4 阶 Birch–Murnaghan 压强
pub fn birch_murnaghan_pressure_4th(v: f64, v0: f64, b0: f64, b0p: f64, b0pp: f64) -> f64 {
    let f = strain(v, v0);
    3.0 * b0
        * f
        * (1.0 + 2.0 * f).powf(2.5)
        * (1.0 + 0.5 * (b0p - 4.0) * f + 0.25 * quartic_coeff(b0p, b0pp) * f.powi(2))
}

// ─────────────────────────────────────────────────────────────
// Birch–Murnaghan 5 阶
// ─────────────────────────────────────────────────────────────

/// 5 阶 Birch–Murnaghan 能量
pub fn birch_murnaghan_energy_5th(
    v: f64,
    v0: f64,
    b0: f64,
    b0p: f64,
    b0pp: f64,
    b0ppp: f64,
    e0: f64,
) -> f64 {
    let f = strain(v, v0);
    e0 + (9.0 * v0 * b0 / 2.0)
        * (f.powi(2)
            + (b0p - 4.0) / 3.0 * f.powi(3)
            + quartic_coeff(b0p, b0pp) / 8.0 * f.powi(4)
            + b0ppp / 48.0 * f.powi(5))
}

/// 5 阶 Birch–Murnaghan 压强
pub fn birch_murnaghan_pressure_5th(
    v: f64,
    v0: f64,
    b0: f64,
    b0p: f64,
    b0pp: f64,
    b0ppp: f64,
) -> f64 {
    let f = strain(v, v0);
    3.0 * b0
        * f
        * (1.0 + 2.0 * f).powf(2.5)
        * (1.0
            + 0.5 * (b0p - 4.0) * f
            + 0.25 * quartic_coeff(b0p, b0pp) * f.powi(2)
            + 5.0 / 96.0 * b0ppp * f.powi(3))
}

// ─────────────────────────────────────────────────────────────
// SJEOS（稳定化胶体状态方程）
// ─────────────────────────────────────────────────────────────

/// SJEOS 能量。参数为拟合系数 (a, b, c, d)。
///
/// E(V) = a/V² + b/V^(4/3) + c/V^(2/3) + d
pub fn sjeos_energy(v: f64, a: f64, b: f64, c: f64, d: f64) -> f64 {
    a / v.powi(2) + b / v.powf(4.0 / 3.0) + c / v.powf(2.0 / 3.0) + d
}

/// SJEOS 压强 P = −dE/dV
pub fn sjeos_pressure(v: f64, a: f64, b: f64, c: f64, _d: f64) -> f64 {
    2.0 * a / v.powi(3) + (4.0 / 3.0) * b / v.powf(7.0 / 3.0) + (2.0 / 3.0) * c / v.powf(5.0 / 3.0)
}

// ─────────────────────────────────────────────────────────────
// Birch 有限应变多项式
// ─────────────────────────────────────────────────────────────

/// Birch 有限应变多项式能量（仅能量形式）
///
/// E(V) = E0 + Σ aₙ fⁿ，f 以 V0 为参考的有限应变
pub fn birch_energy(v: f64, v0: f64, a0: f64, a1: f64, a2: f64, a3: f64, e0: f64) -> f64 {
    let f = strain(v, v0);
    e0 + a0 * f + a1 * f.powi(2) + a2 * f.powi(3) + a3 * f.powi(4)
}

// ─────────────────────────────────────────────────────────────
// 压强模型封闭枚举（P–V 曲线族）
// ─────────────────────────────────────────────────────────────

/// P–V 曲线评估的参数集
///
/// `v0` 单位 Å³；`b0` 单位 GPa（BM/Murnaghan 族压强对 B0 线性，
/// 直接得到 GPa）；高阶导数无量纲。`sjeos` 为以 eV/Å³ 为单位制
/// 拟合出的 SJEOS 系数，压强评估时换算为 GPa。
#[derive(Debug, Clone, Copy)]
pub struct PressureParams {
    pub v0: f64,
    pub b0: f64,
    pub b0p: f64,
    pub b0pp: f64,
    pub b0ppp: f64,
    pub sjeos: [f64; 4],
}

/// P–V 曲线模型族（封闭集合，取代按字符串分发）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EosModel {
    Murnaghan,
    Bm2,
    Bm3,
    Bm4,
    Bm5,
    Sjeos,
}

impl EosModel {
    /// 全部模型族
    pub const ALL: [EosModel; 6] = [
        EosModel::Murnaghan,
        EosModel::Bm2,
        EosModel::Bm3,
        EosModel::Bm4,
        EosModel::Bm5,
        EosModel::Sjeos,
    ];

    /// 仅 Birch–Murnaghan 各阶（阶数对比图使用）
    pub const BM_ONLY: [EosModel; 4] = [EosModel::Bm2, EosModel::Bm3, EosModel::Bm4, EosModel::Bm5];

    /// 在体积 v 处评估压强（GPa）
    pub fn pressure(&self, v: f64, p: &PressureParams) -> f64 {
        match self {
            EosModel::Murnaghan => murnaghan_pressure(v, p.v0, p.b0, p.b0p),
            EosModel::Bm2 => birch_murnaghan_pressure_2nd(v, p.v0, p.b0),
            EosModel::Bm3 => birch_murnaghan_pressure_3rd(v, p.v0, p.b0, p.b0p),
            EosModel::Bm4 => birch_murnaghan_pressure_4th(v, p.v0, p.b0, p.b0p, p.b0pp),
            EosModel::Bm5 => {
                birch_murnaghan_pressure_5th(v, p.v0, p.b0, p.b0p, p.b0pp, p.b0ppp)
            }
            // SJEOS 系数基于 eV/Å³ 拟合，此处换算为 GPa
            EosModel::Sjeos => {
                let [a, b, c, d] = p.sjeos;
                sjeos_pressure(v, a, b, c, d) * EV_A3_TO_GPA
            }
        }
    }
}

impl std::fmt::Display for EosModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EosModel::Murnaghan => write!(f, "murnaghan"),
            EosModel::Bm2 => write!(f, "bm2"),
            EosModel::Bm3 => write!(f, "bm3"),
            EosModel::Bm4 => write!(f, "bm4"),
            EosModel::Bm5 => write!(f, "bm5"),
            EosModel::Sjeos => write!(f, "sjeos"),
        }
    }
}
