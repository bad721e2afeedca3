//! # 预计算能量表后端
//!
//! 读入外部 MLIP（m3gnet, chgnet, mace, sevenn, mattersim,
//! orb, grace, ...）离线产出的 Volume,Energy 表，按体积查表
//! 返回能量。预训练网络势本身是 Python 生态的外部协作者，
//! 不在本 crate 内重建。
//!
//! ## 语义
//! - 查表按最近体积匹配，容差 1e-6 Å³
//! - 请求的体积不在表内时报错（快速失败）
//!
//! ## 依赖关系
//! - 被 `calculators/mod.rs` 构建
//! - 使用 `models/record.rs` 读取曲线 CSV

use crate::calculators::EnergyModel;
use crate::error::{EosKitError, Result};
use crate::models::read_curve;

use std::path::Path;

/// 体积匹配容差（Å³）
const VOLUME_TOLERANCE: f64 = 1e-6;

/// 预计算能量表
pub struct TabulatedEnergies {
    /// (volume, energy)，按体积升序
    entries: Vec<(f64, f64)>,
    label: String,
    path: String,
}

impl TabulatedEnergies {
    /// 从 Volume,Energy CSV 加载；标签取文件主名
    pub fn from_csv(path: &Path) -> Result<Self> {
        let (volumes, energies) = read_curve(path)?;
        let mut entries: Vec<(f64, f64)> = volumes.into_iter().zip(energies).collect();
        entries.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());

        let label = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("table")
            .to_string();
        Ok(TabulatedEnergies {
            entries,
            label,
            path: path.display().to_string(),
        })
    }
}

impl EnergyModel for TabulatedEnergies {
    fn label(&self) -> &str {
        &self.label
    }

    fn energy(&self, volume: f64) -> Result<f64> {
        // 二分定位最近条目
        let i = self
            .entries
            .partition_point(|&(v, _)| v < volume)
            .min(self.entries.len() - 1);
        let mut best = self.entries[i];
        if i > 0 {
            let prev = self.entries[i - 1];
            if (prev.0 - volume).abs() < (best.0 - volume).abs() {
                best = prev;
            }
        }
        if (best.0 - volume).abs() > VOLUME_TOLERANCE {
            return Err(EosKitError::MissingVolume {
                volume,
                path: self.path.clone(),
            });
        }
        Ok(best.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::write_curve;

    fn fixture() -> TabulatedEnergies {
        let dir = std::env::temp_dir().join("eoskit_table_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("mace.csv");
        write_curve(&path, &[10.5, 11.0, 11.5], &[-34.9, -35.8, -36.5]).unwrap();
        TabulatedEnergies::from_csv(&path).unwrap()
    }

    #[test]
    fn test_lookup_exact_and_near_match() {
        let t = fixture();
        assert_eq!(t.energy(11.0).unwrap(), -35.8);
        // 容差内的近邻匹配
        assert_eq!(t.energy(11.0 + 5e-7).unwrap(), -35.8);
    }

    #[test]
    fn test_label_from_file_stem() {
        let t = fixture();
        assert_eq!(t.label(), "mace");
    }

    #[test]
    fn test_missing_volume_is_error() {
        let t = fixture();
        let err = t.energy(12.0).unwrap_err();
        assert!(matches!(err, EosKitError::MissingVolume { .. }));
    }
}
