// ==========================================
// Sweet Hub - 核心库
// ==========================================
// 职责: 甜品工坊的单位换算、配方缩放与原料可用性判定
// 技术栈: Rust + SQLite
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 换算与判定规则
pub mod engine;

// 导入层 - 库存文件
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/表结构）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{MovementType, UnavailableReason, UnitGroup};

// 领域实体
pub use domain::{
    AvailabilityResult, IngredientRequirement, Quantity, Recipe, StockAlert, StockDeduction,
    StockMovement, StoreStockRecord,
};

// 引擎
pub use engine::{
    AvailabilityChecker, EngineError, RecipeScaler, StockAlertEngine, UnitConverter,
    UnitDefinition, UnitRegistry,
};

// API
pub use api::{ManufacturingApi, StoreRoomApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
