//! # 统一错误处理模块
//!
//! 定义 EOSkit 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// EOSkit 统一错误类型
#[derive(Error, Debug)]
pub enum EosKitError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error(transparent)]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 数据错误
    // ─────────────────────────────────────────────────────────────
    #[error("Missing data: {0}")]
    MissingData(String),

    #[error("No tabulated energy for volume {volume} A^3 in '{path}'")]
    MissingVolume { volume: f64, path: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ─────────────────────────────────────────────────────────────
    // 数值错误
    // ─────────────────────────────────────────────────────────────
    #[error("EOS fit failed for model '{model}': {reason}")]
    FitFailed { model: String, reason: String },

    #[error("Linear least squares failed: {0}")]
    LeastSquares(String),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("Plotting failed: {0}")]
    PlotError(String),

    #[error("{0}")]
    Other(String),
}

/// 统一 Result 类型别名
pub type Result<T> = std::result::Result<T, EosKitError>;
