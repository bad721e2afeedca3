//! # 文献参数 BM3 解析后端
//!
//! 用发表的 MgO 状态方程参数直接评估 3 阶 Birch–Murnaghan
//! 能量。作为行为良好的"理想势"，用于管线端到端自检与
//! 似然比较的基准。
//!
//! ## 依赖关系
//! - 被 `calculators/mod.rs` 构建
//! - 使用 `eos/models.rs` 的 BM3 公式

use crate::calculators::EnergyModel;
use crate::eos::models::birch_murnaghan_energy_3rd;
use crate::eos::GPA_TO_EV_A3;
use crate::error::{EosKitError, Result};

/// 文献 MgO 平衡体积（Å³/化学式单元）
pub const LITERATURE_V0: f64 = 11.25;

/// 文献 MgO 体弹模量（GPa）
pub const LITERATURE_B0_GPA: f64 = 160.0;

/// 文献 MgO B0′
pub const LITERATURE_B0P: f64 = 4.1;

/// 文献 MgO 平衡能量（eV/化学式单元）
pub const LITERATURE_E0: f64 = -320.0;

/// BM3 解析势
pub struct ReferenceBm3 {
    v0: f64,
    b0: f64,
    b0p: f64,
    e0: f64,
}

impl ReferenceBm3 {
    /// 文献参数实例
    pub fn literature() -> Self {
        ReferenceBm3 {
            v0: LITERATURE_V0,
            b0: LITERATURE_B0_GPA * GPA_TO_EV_A3,
            b0p: LITERATURE_B0P,
            e0: LITERATURE_E0,
        }
    }

    /// 自定义参数实例（b0 单位 eV/Å³）
    pub fn new(v0: f64, b0: f64, b0p: f64, e0: f64) -> Self {
        ReferenceBm3 { v0, b0, b0p, e0 }
    }
}

impl EnergyModel for ReferenceBm3 {
    fn label(&self) -> &str {
        "reference"
    }

    fn energy(&self, volume: f64) -> Result<f64> {
        if volume <= 0.0 || !volume.is_finite() {
            return Err(EosKitError::InvalidInput(format!(
                "reference: volume must be positive, got {}",
                volume
            )));
        }
        Ok(birch_murnaghan_energy_3rd(
            volume, self.v0, self.b0, self.b0p, self.e0,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equilibrium_energy_is_e0() {
        let model = ReferenceBm3::literature();
        assert_eq!(model.energy(LITERATURE_V0).unwrap(), LITERATURE_E0);
    }

    #[test]
    fn test_energy_increases_away_from_equilibrium() {
        let model = ReferenceBm3::literature();
        let e0 = model.energy(LITERATURE_V0).unwrap();
        assert!(model.energy(0.9 * LITERATURE_V0).unwrap() > e0);
        assert!(model.energy(1.1 * LITERATURE_V0).unwrap() > e0);
    }
}
