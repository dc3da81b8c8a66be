// ==========================================
// Sweet Hub - 原料可用性领域模型
// ==========================================
// 红线: 每条输入原料必须且只能落入一个分区
//       (available / insufficient / unavailable)
// ==========================================

use crate::domain::types::UnavailableReason;
use serde::{Deserialize, Serialize};

// ==========================================
// AvailableIngredient - 库存充足
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableIngredient {
    pub name: String,            // 需求原料名称
    pub required: f64,           // 需求数量（需求单位）
    pub unit: String,            // 需求单位
    pub in_stock: f64,           // 换算后的剩余库存（需求单位,已取整）
    pub stock_name: String,      // 匹配到的库存记录名称
    pub stock_unit: String,      // 库存记录单位
    pub stock_quantity: f64,     // 库存记录现有数量（库存单位）
}

// ==========================================
// InsufficientIngredient - 库存不足
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsufficientIngredient {
    pub name: String,
    pub unit: String,     // 需求单位
    pub required: f64,    // 需求数量
    pub available: f64,   // 换算后的剩余库存（已取整）
}

impl InsufficientIngredient {
    /// 缺口数量
    pub fn shortfall(&self) -> f64 {
        (self.required - self.available).max(0.0)
    }
}

// ==========================================
// UnavailableIngredient - 无法使用
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnavailableIngredient {
    pub name: String,
    pub unit: String,
    pub required: f64,
    pub reason: UnavailableReason,
}

// ==========================================
// AvailabilityResult - 可用性分区结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityResult {
    pub available: Vec<AvailableIngredient>,
    pub insufficient: Vec<InsufficientIngredient>,
    pub unavailable: Vec<UnavailableIngredient>,
}

impl AvailabilityResult {
    /// 分区内原料总数（应等于输入原料数）
    pub fn total(&self) -> usize {
        self.available.len() + self.insufficient.len() + self.unavailable.len()
    }

    /// 是否全部原料充足
    pub fn is_fully_available(&self) -> bool {
        self.insufficient.is_empty() && self.unavailable.is_empty()
    }

    /// 是否存在不足或不可用原料
    pub fn has_shortage(&self) -> bool {
        !self.is_fully_available()
    }
}

// ==========================================
// Quantity - 数量 + 单位（用于展示）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: String,
}

// ==========================================
// StockAlert - 库存预警
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAlert {
    pub name: String,
    pub quantity: f64,          // 原始库存
    pub unit: String,           // 原始单位
    pub min_quantity: f64,      // 预警阈值（原始单位）
    pub display: Quantity,      // 规整后的展示数量
    pub out_of_stock: bool,     // 是否已断货
}
