// ==========================================
// Sweet Hub - 引擎层
// ==========================================
// 职责: 单位换算、原料可用性、配方缩放、库存预警
// 红线: 引擎不拼 SQL,不持有可变共享状态
// ==========================================

pub mod availability;
pub mod conversion;
pub mod error;
pub mod scaling;
pub mod stock_alert;
pub mod unit_registry;

// 重导出核心引擎
pub use availability::AvailabilityChecker;
pub use conversion::{round_to_precision, UnitConverter, DEFAULT_PRECISION};
pub use error::{EngineError, EngineResult};
pub use scaling::RecipeScaler;
pub use stock_alert::StockAlertEngine;
pub use unit_registry::{UnitDefinition, UnitRegistry};
