// ==========================================
// Sweet Hub - 单位注册表
// ==========================================
// 职责: 单位名称 → (分组, 相对基准单位的换算因子)
// 红线: 构造后不可变,进程启动时构建一次,按引用/Arc 注入引擎
// ==========================================

use crate::domain::types::UnitGroup;
use crate::engine::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// 标准单位表
// ==========================================
// (单位名称, 分组, 换算到基准单位的因子)
// 同义词各自登记,因子相同即视为同一单位
const STANDARD_UNITS: &[(&str, UnitGroup, f64)] = &[
    // 质量 (基准: gram)
    ("mg", UnitGroup::Mass, 0.001),
    ("g", UnitGroup::Mass, 1.0),
    ("gram", UnitGroup::Mass, 1.0),
    ("grams", UnitGroup::Mass, 1.0),
    ("kg", UnitGroup::Mass, 1000.0),
    ("kilogram", UnitGroup::Mass, 1000.0),
    ("kilograms", UnitGroup::Mass, 1000.0),
    ("quintal", UnitGroup::Mass, 100_000.0),
    ("tonne", UnitGroup::Mass, 1_000_000.0),
    // 体积 (基准: ml)
    ("ml", UnitGroup::Volume, 1.0),
    ("milliliter", UnitGroup::Volume, 1.0),
    ("millilitre", UnitGroup::Volume, 1.0),
    ("l", UnitGroup::Volume, 1000.0),
    ("liter", UnitGroup::Volume, 1000.0),
    ("litre", UnitGroup::Volume, 1000.0),
    ("liters", UnitGroup::Volume, 1000.0),
    ("litres", UnitGroup::Volume, 1000.0),
    // 计数 (基准: piece)
    ("piece", UnitGroup::Count, 1.0),
    ("pieces", UnitGroup::Count, 1.0),
    ("pcs", UnitGroup::Count, 1.0),
    ("nos", UnitGroup::Count, 1.0),
    ("dozen", UnitGroup::Count, 12.0),
];

// ==========================================
// UnitDefinition - 单位定义
// ==========================================
// 也用于 config_kv 中 custom_units 的 JSON 反序列化
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDefinition {
    pub name: String,
    pub group: UnitGroup,
    pub factor: f64,
}

impl UnitDefinition {
    pub fn new(name: &str, group: UnitGroup, factor: f64) -> Self {
        Self {
            name: name.to_string(),
            group,
            factor,
        }
    }
}

// ==========================================
// UnitRegistry - 单位注册表
// ==========================================
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    units: HashMap<String, UnitDefinition>,
}

impl UnitRegistry {
    /// 标准注册表（质量/体积/计数）
    pub fn standard() -> Self {
        let units = STANDARD_UNITS
            .iter()
            .map(|(name, group, factor)| {
                (name.to_string(), UnitDefinition::new(name, *group, *factor))
            })
            .collect();
        Self { units }
    }

    /// 从定义列表构建注册表
    ///
    /// # 错误
    /// - 名称为空、因子非正或非有限数 → InvalidUnitDefinition
    /// - 同名单位定义冲突（分组或因子不同）→ InvalidUnitDefinition
    pub fn from_definitions<I>(definitions: I) -> EngineResult<Self>
    where
        I: IntoIterator<Item = UnitDefinition>,
    {
        let mut registry = Self {
            units: HashMap::new(),
        };
        registry.insert_all(definitions)?;
        Ok(registry)
    }

    /// 在当前注册表基础上追加定义,返回新的注册表（原注册表保持不变）
    pub fn extended_with<I>(&self, definitions: I) -> EngineResult<Self>
    where
        I: IntoIterator<Item = UnitDefinition>,
    {
        let mut registry = self.clone();
        registry.insert_all(definitions)?;
        Ok(registry)
    }

    fn insert_all<I>(&mut self, definitions: I) -> EngineResult<()>
    where
        I: IntoIterator<Item = UnitDefinition>,
    {
        for definition in definitions {
            let name = definition.name.trim();
            if name.is_empty() {
                return Err(EngineError::InvalidUnitDefinition(
                    "单位名称不能为空".to_string(),
                ));
            }
            if !definition.factor.is_finite() || definition.factor <= 0.0 {
                return Err(EngineError::InvalidUnitDefinition(format!(
                    "单位 {} 的换算因子必须为正数, 实际 {}",
                    name, definition.factor
                )));
            }

            if let Some(existing) = self.units.get(name) {
                // 完全相同的重复定义允许,冲突定义拒绝
                if existing.group != definition.group || existing.factor != definition.factor {
                    return Err(EngineError::InvalidUnitDefinition(format!(
                        "单位 {} 已定义为 {}×{}, 与新定义 {}×{} 冲突",
                        name, existing.group, existing.factor, definition.group, definition.factor
                    )));
                }
                continue;
            }

            self.units.insert(
                name.to_string(),
                UnitDefinition::new(name, definition.group, definition.factor),
            );
        }
        Ok(())
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 查询单位所属分组
    pub fn group_of(&self, unit: &str) -> EngineResult<UnitGroup> {
        self.lookup(unit).map(|d| d.group)
    }

    /// 查询单位相对基准单位的换算因子
    pub fn factor_of(&self, unit: &str) -> EngineResult<f64> {
        self.lookup(unit).map(|d| d.factor)
    }

    /// 单位是否已注册
    pub fn contains(&self, unit: &str) -> bool {
        self.units.contains_key(unit)
    }

    /// 某分组下的全部单位,按因子从大到小、名称升序排列
    pub fn units_in(&self, group: UnitGroup) -> Vec<&UnitDefinition> {
        let mut units: Vec<&UnitDefinition> =
            self.units.values().filter(|d| d.group == group).collect();
        units.sort_by(|a, b| {
            b.factor
                .total_cmp(&a.factor)
                .then_with(|| a.name.cmp(&b.name))
        });
        units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    // 名称大小写敏感,按调用方提供的原样查找
    fn lookup(&self, unit: &str) -> EngineResult<&UnitDefinition> {
        self.units.get(unit).ok_or_else(|| EngineError::UnknownUnit {
            unit: unit.to_string(),
        })
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
