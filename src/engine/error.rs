// ==========================================
// Sweet Hub - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 约定: 全部为局部可恢复错误,不会导致进程退出
// ==========================================

use crate::domain::types::UnitGroup;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// 引用了未注册的单位
    #[error("未知单位: {unit}")]
    UnknownUnit { unit: String },

    /// 跨分组换算
    #[error("单位不兼容: {from}({from_group}) → {to}({to_group})")]
    IncompatibleUnits {
        from: String,
        to: String,
        from_group: UnitGroup,
        to_group: UnitGroup,
    },

    /// 配方基准产出数量非正
    #[error("无效配方: {0}")]
    InvalidRecipe(String),

    /// 自定义单位定义不合法（因子非正、重复定义冲突等）
    #[error("无效单位定义: {0}")]
    InvalidUnitDefinition(String),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
