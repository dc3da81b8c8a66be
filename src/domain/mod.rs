// ==========================================
// Sweet Hub - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod availability;
pub mod ingredient;
pub mod recipe;
pub mod types;

// 重导出核心类型
pub use availability::{
    AvailabilityResult, AvailableIngredient, InsufficientIngredient, Quantity, StockAlert,
    UnavailableIngredient,
};
pub use ingredient::{IngredientRequirement, StockDeduction, StockMovement, StoreStockRecord};
pub use recipe::Recipe;
pub use types::{MovementType, UnavailableReason, UnitGroup};
