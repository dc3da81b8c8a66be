// ==========================================
// Sweet Hub - 原料需求与库存领域模型
// ==========================================
// 职责: 定义配方原料需求、仓库库存记录
// 红线: 不含换算逻辑,不含数据访问逻辑
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// IngredientRequirement - 原料需求
// ==========================================
// 来源: 配方定义,可经缩放重算
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientRequirement {
    pub name: String,  // 原料名称
    pub quantity: f64, // 需求数量 (>= 0)
    pub unit: String,  // 单位名称
}

impl IngredientRequirement {
    pub fn new(name: &str, quantity: f64, unit: &str) -> Self {
        Self {
            name: name.to_string(),
            quantity,
            unit: unit.to_string(),
        }
    }
}

// ==========================================
// StoreStockRecord - 仓库库存记录
// ==========================================
// 归属: 仓库/储藏室;核心计算只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreStockRecord {
    pub name: String,              // 原料名称（大小写不敏感唯一）
    pub quantity: f64,             // 当前库存 (>= 0)
    pub unit: String,              // 库存单位
    pub min_quantity: Option<f64>, // 库存预警阈值（同库存单位）

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>, // 最后更新时间
}

impl StoreStockRecord {
    pub fn new(name: &str, quantity: f64, unit: &str) -> Self {
        Self {
            name: name.to_string(),
            quantity,
            unit: unit.to_string(),
            min_quantity: None,
            updated_at: None,
        }
    }

    pub fn with_min_quantity(mut self, min_quantity: f64) -> Self {
        self.min_quantity = Some(min_quantity);
        self
    }

    /// 名称匹配: 去除首尾空白后大小写不敏感的精确匹配
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }
}

// ==========================================
// StockDeduction - 待扣减库存
// ==========================================
// 数量已换算为库存记录自身的单位
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockDeduction {
    pub stock_name: String,
    pub quantity: f64,
    pub unit: String,
}

// ==========================================
// StockMovement - 库存流水
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockMovement {
    pub movement_id: i64,
    pub batch_id: String,
    pub stock_name: String,
    pub movement_type: crate::domain::types::MovementType,
    pub quantity: f64,
    pub unit: String,
    pub quantity_before: f64,
    pub quantity_after: f64,
    pub operator: String,
    pub created_at: DateTime<Utc>,
}
