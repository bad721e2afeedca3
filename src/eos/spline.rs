//! # 自然三次样条插值
//!
//! 对 (V, E) 采样点做三次样条插值，用于在细体积网格上
//! 重建能量曲线（对应 scipy 的 `InterpolatedUnivariateSpline(k=3)`）。
//!
//! ## 算法
//! 自然边界条件（端点二阶导数为 0），Thomas 算法求解
//! 三对角方程得到各节点二阶导数，分段三次求值。
//!
//! ## 依赖关系
//! - 被 `commands/calculate.rs` 使用

use crate::error::{EosKitError, Result};

/// 自然三次样条
#[derive(Debug, Clone)]
pub struct CubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    /// 各节点二阶导数
    m: Vec<f64>,
}

impl CubicSpline {
    /// 由严格递增的节点构建样条
    pub fn new(x: &[f64], y: &[f64]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(EosKitError::InvalidInput(format!(
                "spline: {} abscissae vs {} ordinates",
                x.len(),
                y.len()
            )));
        }
        if x.len() < 3 {
            return Err(EosKitError::InvalidInput(
                "spline: need at least 3 points".to_string(),
            ));
        }
        if !x.windows(2).all(|w| w[0] < w[1]) {
            return Err(EosKitError::InvalidInput(
                "spline: abscissae must be strictly increasing".to_string(),
            ));
        }

        let n = x.len();
        let h: Vec<f64> = (0..n - 1).map(|i| x[i + 1] - x[i]).collect();

        // 内点三对角方程：a m[i-1] + 2 m[i] + c m[i+1] = d
        let mut cp = vec![0.0; n];
        let mut dp = vec![0.0; n];
        for i in 1..n - 1 {
            let a = h[i - 1] / (h[i - 1] + h[i]);
            let c = h[i] / (h[i - 1] + h[i]);
            let d = 6.0 * ((y[i + 1] - y[i]) / h[i] - (y[i] - y[i - 1]) / h[i - 1])
                / (h[i - 1] + h[i]);
            let denom = 2.0 - a * cp[i - 1];
            cp[i] = c / denom;
            dp[i] = (d - a * dp[i - 1]) / denom;
        }

        // 自然边界：m[0] = m[n-1] = 0，回代求内点
        let mut m = vec![0.0; n];
        for i in (1..n - 1).rev() {
            m[i] = dp[i] - cp[i] * m[i + 1];
        }

        Ok(CubicSpline {
            x: x.to_vec(),
            y: y.to_vec(),
            m,
        })
    }

    /// 求值。节点范围外按端部区间的三次多项式外推。
    pub fn eval(&self, v: f64) -> f64 {
        let n = self.x.len();
        // 定位所在区间
        let i = match self
            .x
            .binary_search_by(|xi| xi.partial_cmp(&v).unwrap())
        {
            Ok(i) => i.min(n - 2),
            Err(0) => 0,
            Err(i) => (i - 1).min(n - 2),
        };

        let h = self.x[i + 1] - self.x[i];
        let lo = self.x[i + 1] - v;
        let hi = v - self.x[i];
        self.m[i] * lo.powi(3) / (6.0 * h)
            + self.m[i + 1] * hi.powi(3) / (6.0 * h)
            + (self.y[i] / h - self.m[i] * h / 6.0) * lo
            + (self.y[i + 1] / h - self.m[i + 1] * h / 6.0) * hi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spline_reproduces_knots() {
        let x: Vec<f64> = (0..20).map(|i| 10.0 + 0.5 * i as f64).collect();
        let y: Vec<f64> = x.iter().map(|&v| (v - 15.0).powi(2) - 320.0).collect();
        let s = CubicSpline::new(&x, &y).unwrap();
        for (xi, yi) in x.iter().zip(&y) {
            assert!((s.eval(*xi) - yi).abs() < 1e-9, "knot mismatch at {}", xi);
        }
    }

    #[test]
    fn test_spline_accuracy_on_smooth_curve() {
        // 0.1 间隔采样 sin，内点误差应远小于 1e-3
        let x: Vec<f64> = (0..41).map(|i| 0.1 * i as f64).collect();
        let y: Vec<f64> = x.iter().map(|v| v.sin()).collect();
        let s = CubicSpline::new(&x, &y).unwrap();
        for i in 0..40 {
            let xm = 0.05 + 0.1 * i as f64;
            assert!(
                (s.eval(xm) - xm.sin()).abs() < 1e-3,
                "spline error too large at {}",
                xm
            );
        }
    }

    #[test]
    fn test_spline_rejects_bad_input() {
        assert!(CubicSpline::new(&[1.0, 2.0], &[0.0, 0.0]).is_err());
        assert!(CubicSpline::new(&[1.0, 1.0, 2.0], &[0.0, 0.0, 0.0]).is_err());
        assert!(CubicSpline::new(&[1.0, 2.0, 3.0], &[0.0, 0.0]).is_err());
    }
}
