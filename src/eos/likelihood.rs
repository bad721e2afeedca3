//! # 高斯对数似然比较
//!
//! 将模型 EOS 曲线与参考（文献）能量曲线做高斯似然比较：
//! 模型曲线线性插值到参考体积网格，逐点残差，返回
//! −½ Σ(r/σ)² − N·ln(σ√(2π))。
//!
//! σ 为外部给定的噪声尺度，不做估计。这是一个简单的模型
//! 比较度量，不含优化循环、后验或重采样。
//!
//! ## 依赖关系
//! - 被 `commands/likelihood.rs` 使用

use crate::error::{EosKitError, Result};

use std::f64::consts::PI;

/// 一维线性插值（np.interp 语义：范围外取端点值）
///
/// `xs` 必须升序。
pub fn interp_linear(x: f64, xs: &[f64], ys: &[f64]) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[xs.len() - 1] {
        return ys[ys.len() - 1];
    }
    let i = match xs.binary_search_by(|xi| xi.partial_cmp(&x).unwrap()) {
        Ok(i) => return ys[i],
        Err(i) => i - 1,
    };
    let t = (x - xs[i]) / (xs[i + 1] - xs[i]);
    ys[i] + t * (ys[i + 1] - ys[i])
}

/// 曲线整体平移，使最小值为 0（去除任意能量零点）
pub fn normalize_to_minimum(e: &mut [f64]) {
    let min = e.iter().copied().fold(f64::INFINITY, f64::min);
    for x in e.iter_mut() {
        *x -= min;
    }
}

/// 高斯对数似然
///
/// 假定 E_model(V) = E_ref(V) + N(0, σ²)。注意：本函数对整体
/// 能量偏移敏感；调用方（`commands/likelihood.rs`）在调用前
/// 先用 [`normalize_to_minimum`] 将两条曲线归零。
pub fn log_likelihood_gaussian(
    v_ref: &[f64],
    e_ref: &[f64],
    v_model: &[f64],
    e_model: &[f64],
    sigma: f64,
) -> Result<f64> {
    if v_ref.len() != e_ref.len() || v_model.len() != e_model.len() {
        return Err(EosKitError::InvalidInput(
            "likelihood: volume and energy arrays differ in length".to_string(),
        ));
    }
    if v_ref.is_empty() || v_model.is_empty() {
        return Err(EosKitError::InvalidInput(
            "likelihood: empty curve".to_string(),
        ));
    }
    if sigma <= 0.0 {
        return Err(EosKitError::InvalidInput(format!(
            "likelihood: sigma must be positive, got {}",
            sigma
        )));
    }

    let chi2: f64 = v_ref
        .iter()
        .zip(e_ref)
        .map(|(&v, &e)| {
            let r = interp_linear(v, v_model, e_model) - e;
            (r / sigma).powi(2)
        })
        .sum();

    let n = e_ref.len() as f64;
    Ok(-0.5 * chi2 - n * (sigma * (2.0 * PI).sqrt()).ln())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interp_linear() {
        let xs = [1.0, 2.0, 4.0];
        let ys = [10.0, 20.0, 40.0];
        assert_eq!(interp_linear(1.5, &xs, &ys), 15.0);
        assert_eq!(interp_linear(3.0, &xs, &ys), 30.0);
        assert_eq!(interp_linear(2.0, &xs, &ys), 20.0);
        // 范围外取端点值
        assert_eq!(interp_linear(0.0, &xs, &ys), 10.0);
        assert_eq!(interp_linear(9.0, &xs, &ys), 40.0);
    }

    #[test]
    fn test_identical_curves_give_normalization_term() {
        let v: Vec<f64> = (0..50).map(|i| 10.0 + 0.2 * i as f64).collect();
        let e: Vec<f64> = v.iter().map(|&x| (x - 15.0).powi(2)).collect();
        let sigma = 0.02;
        let logl = log_likelihood_gaussian(&v, &e, &v, &e, sigma).unwrap();
        let expected = -(v.len() as f64) * (sigma * (2.0 * PI).sqrt()).ln();
        assert!((logl - expected).abs() < 1e-9);
    }

    #[test]
    fn test_raw_function_is_offset_sensitive() {
        // 函数本身对整体偏移敏感（归零是调用方的职责）
        let v: Vec<f64> = (0..50).map(|i| 10.0 + 0.2 * i as f64).collect();
        let e: Vec<f64> = v.iter().map(|&x| (x - 15.0).powi(2)).collect();
        let shifted: Vec<f64> = e.iter().map(|x| x + 1.0).collect();
        let a = log_likelihood_gaussian(&v, &e, &v, &e, 0.02).unwrap();
        let b = log_likelihood_gaussian(&v, &e, &v, &shifted, 0.02).unwrap();
        assert!(b < a);
    }

    #[test]
    fn test_offset_invariance_after_normalization() {
        // 调用方路径：两条曲线各自归零后，整体偏移不影响结果
        let v: Vec<f64> = (0..50).map(|i| 10.0 + 0.2 * i as f64).collect();
        let e_ref: Vec<f64> = v.iter().map(|&x| (x - 15.0).powi(2) - 320.0).collect();
        let e_model: Vec<f64> = v.iter().map(|&x| 1.05 * (x - 15.1).powi(2) - 40.5).collect();
        let e_model_shifted: Vec<f64> = e_model.iter().map(|x| x + 123.456).collect();

        let mut r = e_ref.clone();
        normalize_to_minimum(&mut r);

        let mut m1 = e_model.clone();
        normalize_to_minimum(&mut m1);
        let mut m2 = e_model_shifted.clone();
        normalize_to_minimum(&mut m2);

        let l1 = log_likelihood_gaussian(&v, &r, &v, &m1, 0.02).unwrap();
        let l2 = log_likelihood_gaussian(&v, &r, &v, &m2, 0.02).unwrap();
        assert!((l1 - l2).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_bad_sigma() {
        let v = [1.0, 2.0];
        let e = [0.0, 0.0];
        assert!(log_likelihood_gaussian(&v, &e, &v, &e, 0.0).is_err());
        assert!(log_likelihood_gaussian(&v, &e, &v, &e, -1.0).is_err());
    }
}
