// ==========================================
// Sweet Hub - 单位换算纯函数库
// ==========================================
// 职责: 同组单位之间按基准因子换算、精度取整、展示规整
// 红线: 无状态、无副作用、无 I/O 操作
// ==========================================

use crate::domain::availability::Quantity;
use crate::domain::types::UnitGroup;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::unit_registry::UnitRegistry;

/// 原料级数量的默认小数位数
pub const DEFAULT_PRECISION: u32 = 3;

// 展示时优先使用的单位（从大到小）
const DISPLAY_UNITS_MASS: &[&str] = &["kg", "gram", "mg"];
const DISPLAY_UNITS_VOLUME: &[&str] = &["l", "ml"];
const DISPLAY_UNITS_COUNT: &[&str] = &["piece"];

// ==========================================
// UnitConverter - 纯函数工具类
// ==========================================
pub struct UnitConverter;

impl UnitConverter {
    /// 数量换算
    ///
    /// # 规则
    /// 1. from == to → 原样返回（不查注册表）
    /// 2. 任一单位未注册 → UnknownUnit
    /// 3. 分组不同 → IncompatibleUnits
    /// 4. 否则 → quantity * factor(from) / factor(to)
    ///
    /// 不做取整,也不对负数做截断;负数按线性比例换算
    pub fn convert(
        registry: &UnitRegistry,
        quantity: f64,
        from_unit: &str,
        to_unit: &str,
    ) -> EngineResult<f64> {
        if from_unit == to_unit {
            return Ok(quantity);
        }

        let from_group = registry.group_of(from_unit)?;
        let to_group = registry.group_of(to_unit)?;
        if from_group != to_group {
            return Err(EngineError::IncompatibleUnits {
                from: from_unit.to_string(),
                to: to_unit.to_string(),
                from_group,
                to_group,
            });
        }

        let from_factor = registry.factor_of(from_unit)?;
        let to_factor = registry.factor_of(to_unit)?;
        Ok(quantity * from_factor / to_factor)
    }

    /// 换算后按指定精度取整
    pub fn convert_rounded(
        registry: &UnitRegistry,
        quantity: f64,
        from_unit: &str,
        to_unit: &str,
        decimals: u32,
    ) -> EngineResult<f64> {
        Self::convert(registry, quantity, from_unit, to_unit)
            .map(|v| round_to_precision(v, decimals))
    }

    /// 两个单位是否可互相换算
    pub fn is_compatible(registry: &UnitRegistry, a: &str, b: &str) -> bool {
        if a == b {
            return true;
        }
        match (registry.group_of(a), registry.group_of(b)) {
            (Ok(ga), Ok(gb)) => ga == gb,
            _ => false,
        }
    }

    /// 展示规整: 选择使数值 >= 1 的最大常用单位
    ///
    /// # 示例
    /// - 1500 gram → 1.5 kg
    /// - 0.25 kg → 250 gram
    /// - 0 kg → 0 kg（零值保留原单位）
    ///
    /// 注册表中没有常用展示单位时,保留原单位
    pub fn normalize_for_display(
        registry: &UnitRegistry,
        quantity: f64,
        unit: &str,
    ) -> EngineResult<Quantity> {
        let group = registry.group_of(unit)?;

        if quantity == 0.0 {
            return Ok(Quantity {
                value: 0.0,
                unit: unit.to_string(),
            });
        }

        let candidates: Vec<&str> = display_units(group)
            .iter()
            .copied()
            .filter(|u| registry.contains(u))
            .collect();

        let Some(smallest) = candidates.last().copied() else {
            return Ok(Quantity {
                value: round_to_precision(quantity, DEFAULT_PRECISION),
                unit: unit.to_string(),
            });
        };

        for candidate in &candidates {
            let value = Self::convert(registry, quantity, unit, candidate)?;
            if value.abs() >= 1.0 {
                return Ok(Quantity {
                    value: round_to_precision(value, DEFAULT_PRECISION),
                    unit: candidate.to_string(),
                });
            }
        }

        let value = Self::convert(registry, quantity, unit, smallest)?;
        Ok(Quantity {
            value: round_to_precision(value, DEFAULT_PRECISION),
            unit: smallest.to_string(),
        })
    }
}

fn display_units(group: UnitGroup) -> &'static [&'static str] {
    match group {
        UnitGroup::Mass => DISPLAY_UNITS_MASS,
        UnitGroup::Volume => DISPLAY_UNITS_VOLUME,
        UnitGroup::Count => DISPLAY_UNITS_COUNT,
    }
}

/// 四舍五入到指定小数位（远离零取整）
pub fn round_to_precision(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}
