// ==========================================
// Sweet Hub - 应用层
// ==========================================
// 职责: 组装配置、仓储、引擎与API
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_db_path, AppState};
