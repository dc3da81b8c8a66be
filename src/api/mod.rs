// ==========================================
// Sweet Hub - API 层
// ==========================================
// 职责: 业务接口,组合引擎与仓储
// 红线: 输入先经 InputValidator 校验再进入引擎
// ==========================================

pub mod error;
pub mod manufacturing_api;
pub mod store_room_api;
pub mod validator;

pub use error::{ApiError, ApiResult};
pub use manufacturing_api::{BatchPlan, ManufacturingApi, ProductionReport};
pub use store_room_api::{ImportSummary, StoreRoomApi};
pub use validator::InputValidator;
