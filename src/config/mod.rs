// ==========================================
// Sweet Hub - 配置层
// ==========================================
// 职责: 系统配置管理
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod manufacturing_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager, ManufacturingSettings};
pub use manufacturing_config_trait::ManufacturingConfigReader;

/// 获取默认数据库路径
///
/// # 返回
/// - 环境变量 SWEET_HUB_DB_PATH（非空时优先）
/// - 否则: 用户数据目录/sweet-hub/sweet_hub.db
/// - 拿不到用户数据目录时: ./sweet_hub.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var("SWEET_HUB_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./sweet_hub.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("sweet-hub");
        // 目录创建失败时回退到当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("sweet_hub.db");
        }
    }

    path.to_string_lossy().to_string()
}
