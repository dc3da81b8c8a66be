// ==========================================
// Sweet Hub - 库存预警引擎
// ==========================================
// 职责: 找出低于预警阈值的库存记录,并规整展示数量
// 红线: 只读;未注册单位的记录仍然预警,展示保留原单位
// ==========================================

use crate::domain::availability::{Quantity, StockAlert};
use crate::domain::ingredient::StoreStockRecord;
use crate::engine::conversion::UnitConverter;
use crate::engine::unit_registry::UnitRegistry;
use std::sync::Arc;
use tracing::warn;

pub struct StockAlertEngine {
    registry: Arc<UnitRegistry>,
}

impl StockAlertEngine {
    pub fn new(registry: Arc<UnitRegistry>) -> Self {
        Self { registry }
    }

    /// 收集库存预警
    ///
    /// 条件: min_quantity 已设置 且 quantity < min_quantity
    /// 顺序: 断货优先,其次按名称
    pub fn collect(&self, stock: &[StoreStockRecord]) -> Vec<StockAlert> {
        let mut alerts: Vec<StockAlert> = stock
            .iter()
            .filter_map(|record| {
                let min_quantity = record.min_quantity?;
                if record.quantity >= min_quantity {
                    return None;
                }

                let display = match UnitConverter::normalize_for_display(
                    &self.registry,
                    record.quantity,
                    &record.unit,
                ) {
                    Ok(q) => q,
                    Err(e) => {
                        warn!(stock_name = %record.name, error = %e, "库存单位无法规整,按原单位展示");
                        Quantity {
                            value: record.quantity,
                            unit: record.unit.clone(),
                        }
                    }
                };

                Some(StockAlert {
                    name: record.name.clone(),
                    quantity: record.quantity,
                    unit: record.unit.clone(),
                    min_quantity,
                    display,
                    out_of_stock: record.quantity <= 0.0,
                })
            })
            .collect();

        alerts.sort_by(|a, b| {
            b.out_of_stock
                .cmp(&a.out_of_stock)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        alerts
    }
}
