// ==========================================
// Sweet Hub - 生产配置读取 Trait
// ==========================================
// 职责: 定义生产/储藏室模块所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::engine::unit_registry::UnitDefinition;
use async_trait::async_trait;
use std::error::Error;

// ==========================================
// ManufacturingConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait ManufacturingConfigReader: Send + Sync {
    /// 获取数量取整小数位数
    ///
    /// # 默认值
    /// - 3（取值范围 0..=6,越界截断）
    async fn get_quantity_precision(&self) -> Result<u32, Box<dyn Error>>;

    /// 获取自定义单位定义
    ///
    /// 配置格式为 JSON:
    /// [{"name": "tola", "group": "MASS", "factor": 11.66}]
    ///
    /// # 默认值
    /// - 空列表（JSON 格式错误时同样返回空列表）
    async fn get_custom_units(&self) -> Result<Vec<UnitDefinition>, Box<dyn Error>>;

    /// 是否启用库存预警
    ///
    /// # 默认值
    /// - true
    async fn get_stock_alert_enabled(&self) -> Result<bool, Box<dyn Error>>;

    /// 原料不足时是否允许按可用原料部分生产
    ///
    /// # 默认值
    /// - true（部分生产,只扣减充足原料）
    async fn get_allow_partial_production(&self) -> Result<bool, Box<dyn Error>>;
}
