// ==========================================
// Sweet Hub - 原料可用性判定引擎
// ==========================================
// 职责: 需求原料清单 × 仓库快照 → 三分区结果
// 输入: 需求原料(名称/数量/单位) + 库存快照(名称/数量/单位)
// 输出: available / insufficient / unavailable
// 红线: 只读,不扣减库存;单条原料失败不阻断其余原料判定
// ==========================================

use crate::domain::availability::{
    AvailabilityResult, AvailableIngredient, InsufficientIngredient, UnavailableIngredient,
};
use crate::domain::ingredient::{IngredientRequirement, StockDeduction, StoreStockRecord};
use crate::domain::types::UnavailableReason;
use crate::engine::conversion::{round_to_precision, UnitConverter, DEFAULT_PRECISION};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::unit_registry::UnitRegistry;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// 浮点换算误差容差
const CONVERSION_TOLERANCE: f64 = 1e-9;

// ==========================================
// AvailabilityChecker - 可用性判定引擎
// ==========================================
pub struct AvailabilityChecker {
    registry: Arc<UnitRegistry>,
    precision: u32,
}

impl AvailabilityChecker {
    /// 构造函数
    ///
    /// # 参数
    /// - `registry`: 单位注册表（启动时构建,共享只读）
    pub fn new(registry: Arc<UnitRegistry>) -> Self {
        Self {
            registry,
            precision: DEFAULT_PRECISION,
        }
    }

    /// 设置换算后取整的小数位数
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    pub fn registry(&self) -> &UnitRegistry {
        &self.registry
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 判定原料可用性
    ///
    /// 规则:
    /// 1) 按名称（去空白、大小写不敏感）匹配第一条库存记录;无匹配 → unavailable(NOT_IN_STOCK)
    /// 2) 库存剩余量换算到需求单位;单位跨组 → unavailable(INCOMPATIBLE_UNITS)
    /// 3) 换算值（未取整）>= 需求 → available;否则 → insufficient
    /// 4) 多条需求命中同一库存记录时,前面 available 的需求先占用库存,后面的需求只看剩余量
    ///
    /// 结果中的库存数量按精度取整,仅用于展示。
    ///
    /// # 错误
    /// - UnknownUnit: 需求或库存引用未注册单位,直接返回给调用方
    #[instrument(skip_all, fields(
        requirements_count = requirements.len(),
        stock_count = stock.len()
    ))]
    pub fn check(
        &self,
        requirements: &[IngredientRequirement],
        stock: &[StoreStockRecord],
    ) -> EngineResult<AvailabilityResult> {
        let mut result = AvailabilityResult::default();
        // 库存记录下标 → 已被占用的数量（库存单位）
        let mut claimed: HashMap<usize, f64> = HashMap::new();

        for requirement in requirements {
            let Some(idx) = stock.iter().position(|r| r.matches_name(&requirement.name)) else {
                debug!(ingredient = %requirement.name, "库存中无此原料");
                result.unavailable.push(UnavailableIngredient {
                    name: requirement.name.clone(),
                    unit: requirement.unit.clone(),
                    required: requirement.quantity,
                    reason: UnavailableReason::NotInStock,
                });
                continue;
            };
            let record = &stock[idx];
            let remaining = record.quantity - claimed.get(&idx).copied().unwrap_or(0.0);

            let in_stock = match UnitConverter::convert(
                &self.registry,
                remaining,
                &record.unit,
                &requirement.unit,
            ) {
                Ok(v) => v,
                Err(EngineError::IncompatibleUnits { .. }) => {
                    debug!(
                        ingredient = %requirement.name,
                        required_unit = %requirement.unit,
                        stock_unit = %record.unit,
                        "库存单位与需求单位不兼容"
                    );
                    result.unavailable.push(UnavailableIngredient {
                        name: requirement.name.clone(),
                        unit: requirement.unit.clone(),
                        required: requirement.quantity,
                        reason: UnavailableReason::IncompatibleUnits {
                            stock_unit: record.unit.clone(),
                        },
                    });
                    continue;
                }
                Err(e) => return Err(e),
            };

            if in_stock + CONVERSION_TOLERANCE >= requirement.quantity {
                let used = UnitConverter::convert(
                    &self.registry,
                    requirement.quantity,
                    &requirement.unit,
                    &record.unit,
                )?;
                *claimed.entry(idx).or_insert(0.0) += used;

                result.available.push(AvailableIngredient {
                    name: requirement.name.clone(),
                    required: requirement.quantity,
                    unit: requirement.unit.clone(),
                    in_stock: round_to_precision(in_stock, self.precision),
                    stock_name: record.name.clone(),
                    stock_unit: record.unit.clone(),
                    stock_quantity: record.quantity,
                });
            } else {
                debug!(
                    ingredient = %requirement.name,
                    required = requirement.quantity,
                    available = in_stock,
                    unit = %requirement.unit,
                    "库存不足"
                );
                result.insufficient.push(InsufficientIngredient {
                    name: requirement.name.clone(),
                    unit: requirement.unit.clone(),
                    required: requirement.quantity,
                    available: round_to_precision(in_stock.max(0.0), self.precision),
                });
            }
        }

        debug!(
            available = result.available.len(),
            insufficient = result.insufficient.len(),
            unavailable = result.unavailable.len(),
            "可用性判定完成"
        );
        Ok(result)
    }

    /// 生成扣减清单
    ///
    /// 仅针对 available 分区,按库存记录合并:同一库存记录只产生一条扣减,
    /// 数量为各需求换算到库存单位后的合计,取整后不超过该记录现有数量。
    /// insufficient / unavailable 原料一律不扣减。
    pub fn plan_deductions(&self, result: &AvailabilityResult) -> EngineResult<Vec<StockDeduction>> {
        // (扣减, 库存现有量),保持首次出现顺序
        let mut merged: Vec<(StockDeduction, f64)> = Vec::new();

        for item in &result.available {
            let quantity =
                UnitConverter::convert(&self.registry, item.required, &item.unit, &item.stock_unit)?;
            match merged.iter_mut().find(|(d, _)| d.stock_name == item.stock_name) {
                Some((deduction, _)) => deduction.quantity += quantity,
                None => merged.push((
                    StockDeduction {
                        stock_name: item.stock_name.clone(),
                        quantity,
                        unit: item.stock_unit.clone(),
                    },
                    item.stock_quantity,
                )),
            }
        }

        Ok(merged
            .into_iter()
            .map(|(mut deduction, on_hand)| {
                deduction.quantity = round_to_precision(deduction.quantity, self.precision).min(on_hand);
                deduction
            })
            .collect())
    }
}
