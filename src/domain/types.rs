// ==========================================
// Sweet Hub - 领域类型定义
// ==========================================
// 职责: 单位分组、可用性分类等枚举
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 单位分组 (Unit Group)
// ==========================================
// 红线: 仅同组单位之间可换算,跨组换算一律报错
// 基准单位: Mass → gram, Volume → ml, Count → piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitGroup {
    Mass,   // 质量
    Volume, // 体积
    Count,  // 计数
}

impl fmt::Display for UnitGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitGroup::Mass => write!(f, "MASS"),
            UnitGroup::Volume => write!(f, "VOLUME"),
            UnitGroup::Count => write!(f, "COUNT"),
        }
    }
}

// ==========================================
// 不可用原因 (Unavailable Reason)
// ==========================================
// 用于向用户解释某原料为何被判定为"不可用"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnavailableReason {
    /// 仓库中没有同名原料
    NotInStock,
    /// 仓库记录的单位与需求单位不属于同一分组
    IncompatibleUnits { stock_unit: String },
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::NotInStock => write!(f, "NOT_IN_STOCK"),
            UnavailableReason::IncompatibleUnits { stock_unit } => {
                write!(f, "INCOMPATIBLE_UNITS({})", stock_unit)
            }
        }
    }
}

// ==========================================
// 库存流水类型 (Stock Movement Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    Deduct, // 生产领料扣减
    Import, // 文件导入覆盖
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl MovementType {
    /// 从数据库字符串解析流水类型,未识别时返回 None
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "DEDUCT" => Some(MovementType::Deduct),
            "IMPORT" => Some(MovementType::Import),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            MovementType::Deduct => "DEDUCT",
            MovementType::Import => "IMPORT",
        }
    }
}
