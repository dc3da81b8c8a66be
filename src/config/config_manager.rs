// ==========================================
// Sweet Hub - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::manufacturing_config_trait::ManufacturingConfigReader;
use crate::db::open_sqlite_connection;
use crate::engine::unit_registry::{UnitDefinition, UnitRegistry};
use async_trait::async_trait;
use rusqlite::{params, Connection};
use serde_json::json;
use std::collections::HashMap;
use std::error::Error;
use std::sync::{Arc, Mutex};

/// 取整小数位数上限
const MAX_QUANTITY_PRECISION: u32 = 6;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 从 config_kv 表读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self.get_config_value(key)?.unwrap_or_else(|| default.to_string()))
    }

    /// 写入 global scope 配置（UPSERT）
    pub fn set_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    /// 获取所有配置的快照（JSON格式）
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt = conn.prepare(
            "SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key"
        )?;

        let mut config_map: HashMap<String, String> = HashMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
            ))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        let json_value = json!(config_map);
        Ok(serde_json::to_string(&json_value)?)
    }

    /// 构建单位注册表: 标准单位 + config_kv 中的自定义单位
    ///
    /// 自定义单位与标准单位冲突时返回错误,不做静默覆盖
    pub async fn build_unit_registry(&self) -> Result<UnitRegistry, Box<dyn Error>> {
        let custom_units = self.get_custom_units().await?;
        if custom_units.is_empty() {
            return Ok(UnitRegistry::standard());
        }

        tracing::info!(count = custom_units.len(), "加载自定义单位");
        Ok(UnitRegistry::standard().extended_with(custom_units)?)
    }
}

// ==========================================
// ManufacturingConfigReader Trait 实现
// ==========================================
#[async_trait]
impl ManufacturingConfigReader for ConfigManager {
    async fn get_quantity_precision(&self) -> Result<u32, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::QUANTITY_PRECISION, "3")?;
        let precision = value.trim().parse::<u32>().unwrap_or(3);
        Ok(precision.min(MAX_QUANTITY_PRECISION))
    }

    async fn get_custom_units(&self) -> Result<Vec<UnitDefinition>, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::CUSTOM_UNITS, "[]")?;
        let units: Vec<UnitDefinition> = serde_json::from_str(&value).unwrap_or_else(|_| {
            tracing::warn!(
                config_key = config_keys::CUSTOM_UNITS,
                raw_value = %value,
                "自定义单位配置格式错误，忽略"
            );
            Vec::new()
        });
        Ok(units)
    }

    async fn get_stock_alert_enabled(&self) -> Result<bool, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::STOCK_ALERT_ENABLED, "true")?;
        Ok(parse_bool(&value, true))
    }

    async fn get_allow_partial_production(&self) -> Result<bool, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::ALLOW_PARTIAL_PRODUCTION, "true")?;
        Ok(parse_bool(&value, true))
    }
}

fn parse_bool(v: &str, default: bool) -> bool {
    match v.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => true,
        "0" | "false" | "no" | "n" | "off" => false,
        _ => default,
    }
}

// ==========================================
// ManufacturingSettings - 生产配置快照
// ==========================================
// API 构造时一次性读取,之后同步使用
#[derive(Debug, Clone, PartialEq)]
pub struct ManufacturingSettings {
    pub quantity_precision: u32,
    pub stock_alert_enabled: bool,
    pub allow_partial_production: bool,
}

impl Default for ManufacturingSettings {
    fn default() -> Self {
        Self {
            quantity_precision: 3,
            stock_alert_enabled: true,
            allow_partial_production: true,
        }
    }
}

impl ManufacturingSettings {
    /// 从配置读取器加载
    pub async fn load<R: ManufacturingConfigReader + ?Sized>(
        reader: &R,
    ) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            quantity_precision: reader.get_quantity_precision().await?,
            stock_alert_enabled: reader.get_stock_alert_enabled().await?,
            allow_partial_production: reader.get_allow_partial_production().await?,
        })
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 数量精度
    pub const QUANTITY_PRECISION: &str = "quantity_precision";

    // 自定义单位 (JSON)
    pub const CUSTOM_UNITS: &str = "custom_units";

    // 储藏室
    pub const STOCK_ALERT_ENABLED: &str = "stock_alert_enabled";

    // 生产
    pub const ALLOW_PARTIAL_PRODUCTION: &str = "allow_partial_production";
}
