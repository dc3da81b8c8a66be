// ==========================================
// Sweet Hub - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 说明: 仓储与配置共享同一 SQLite 连接
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{ManufacturingApi, StoreRoomApi};
use crate::config::config_manager::{ConfigManager, ManufacturingSettings};
use crate::db::{ensure_schema, open_sqlite_connection};
use crate::engine::availability::AvailabilityChecker;
use crate::engine::unit_registry::UnitRegistry;
use crate::repository::{RecipeRepository, StoreRoomRepository};

pub use crate::config::get_default_db_path;

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 生产API
    pub manufacturing_api: Arc<ManufacturingApi>,

    /// 储藏室API
    pub store_room_api: Arc<StoreRoomApi>,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,

    /// 单位注册表（启动时构建,只读共享）
    pub registry: Arc<UnitRegistry>,

    /// 启动时加载的生产配置
    pub settings: ManufacturingSettings,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开数据库并补齐表结构
    /// 2. 读取配置,构建单位注册表
    /// 3. 初始化Repository与Engine
    /// 4. 创建所有API实例
    pub async fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        ensure_schema(&conn).map_err(|e| format!("数据库表结构初始化失败: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 配置与单位注册表
        // ==========================================
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );
        let settings = ManufacturingSettings::load(config_manager.as_ref())
            .await
            .map_err(|e| format!("配置加载失败: {}", e))?;
        let registry = Arc::new(
            config_manager
                .build_unit_registry()
                .await
                .map_err(|e| format!("单位注册表构建失败: {}", e))?,
        );
        tracing::info!(
            units = registry.len(),
            precision = settings.quantity_precision,
            allow_partial = settings.allow_partial_production,
            "配置加载完成"
        );

        // ==========================================
        // Repository / Engine
        // ==========================================
        let recipe_repo = Arc::new(RecipeRepository::from_connection(conn.clone()));
        let store_room_repo = Arc::new(StoreRoomRepository::from_connection(conn.clone()));
        let checker = Arc::new(
            AvailabilityChecker::new(registry.clone()).with_precision(settings.quantity_precision),
        );

        // ==========================================
        // API
        // ==========================================
        let manufacturing_api = Arc::new(ManufacturingApi::new(
            recipe_repo,
            store_room_repo.clone(),
            checker,
            settings.clone(),
        ));
        let store_room_api = Arc::new(StoreRoomApi::new(
            store_room_repo,
            registry.clone(),
            settings.clone(),
        ));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            manufacturing_api,
            store_room_api,
            config_manager,
            registry,
            settings,
        })
    }
}
