//! # 状态方程计算模块
//!
//! 提供解析状态方程（EOS）公式、曲线拟合、样条插值与
//! 高斯对数似然比较。
//!
//! ## 子模块
//! - `models`: 解析 EOS 能量/压强公式（Murnaghan, Birch–Murnaghan 2-5 阶, SJEOS, Birch 多项式）
//! - `fit`: 能量-体积数据的最小二乘拟合
//! - `spline`: 自然三次样条插值
//! - `likelihood`: 高斯对数似然比较
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/record.rs` 不涉及（纯数值，无 I/O）

pub mod fit;
pub mod likelihood;
pub mod models;
pub mod spline;

pub use fit::{fit, FitModel, FitResult};
pub use models::{EosModel, PressureParams};
pub use spline::CubicSpline;

// ─────────────────────────────────────────────────────────────
// 单位换算与默认常数
// ─────────────────────────────────────────────────────────────

/// 1 GPa 对应的 eV/Å³（与原始文献脚本保持同一字面值）
pub const GPA_TO_EV_A3: f64 = 6.241509e-3;

/// 1 eV/Å³ 对应的 GPa
pub const EV_A3_TO_GPA: f64 = 160.21766208;

/// 高阶导数缺省值：B0′。近似值，仅在未单独拟合高阶项时使用。
pub const DEFAULT_B0P: f64 = 4.0;

/// 高阶导数缺省值：B0″（近似为 0）
pub const DEFAULT_B0PP: f64 = 0.0;

/// 高阶导数缺省值：B0‴（近似为 0）
pub const DEFAULT_B0PPP: f64 = 0.0;

// ─────────────────────────────────────────────────────────────
// 体积网格
// ─────────────────────────────────────────────────────────────

/// MgO 采样体积网格（Å³ / 化学式单元）
///
/// 粗段 10.5–15.5 步长 0.5，细段 16.0–21.4 步长 0.3，
/// 另含单点 19.190，升序排列。
pub fn mgo_volume_grid() -> Vec<f64> {
    let mut volumes: Vec<f64> = (0..11).map(|i| 10.5 + 0.5 * i as f64).collect();
    volumes.extend((0..19).map(|i| 16.0 + 0.3 * i as f64));
    volumes.push(19.190);
    volumes.sort_by(|a, b| a.partial_cmp(b).unwrap());
    volumes
}

/// 在 [a, b] 上生成 n 个等距点（含端点）
pub fn linspace(a: f64, b: f64, n: usize) -> Vec<f64> {
    if n < 2 {
        return vec![a];
    }
    let step = (b - a) / (n - 1) as f64;
    (0..n).map(|i| a + step * i as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_grid() {
        let v = mgo_volume_grid();
        assert_eq!(v.len(), 31);
        assert!((v[0] - 10.5).abs() < 1e-12);
        assert!((v[v.len() - 1] - 21.4).abs() < 1e-9);
        // 单点 19.190 存在且网格严格递增
        assert!(v.iter().any(|&x| (x - 19.190).abs() < 1e-12));
        assert!(v.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_linspace() {
        let g = linspace(10.5, 21.4, 500);
        assert_eq!(g.len(), 500);
        assert!((g[0] - 10.5).abs() < 1e-12);
        assert!((g[499] - 21.4).abs() < 1e-12);
    }

    #[test]
    fn test_unit_conversion() {
        assert!((GPA_TO_EV_A3 * EV_A3_TO_GPA - 1.0).abs() < 1e-6);
    }
}
