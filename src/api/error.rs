// ==========================================
// Sweet Hub - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，把引擎/仓储/导入错误转换为用户可读的错误消息
// ==========================================

use crate::engine::error::EngineError;
use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 单位与配方错误
    // ==========================================
    #[error("未知单位: {0}")]
    UnknownUnit(String),

    #[error("单位不兼容: {0}")]
    IncompatibleUnits(String),

    #[error("无效配方: {0}")]
    InvalidRecipe(String),

    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("业务规则违反: {0}")]
    BusinessRuleViolation(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    // ==========================================
    // 导入与配置错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    ImportError(String),

    #[error("配置错误: {0}")]
    ConfigError(String),
}

// ==========================================
// 从 EngineError 转换
// ==========================================
impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::UnknownUnit { unit } => ApiError::UnknownUnit(unit),
            EngineError::IncompatibleUnits {
                from,
                to,
                from_group,
                to_group,
            } => ApiError::IncompatibleUnits(format!(
                "{}({}) → {}({})",
                from, from_group, to, to_group
            )),
            EngineError::InvalidRecipe(msg) => ApiError::InvalidRecipe(msg),
            EngineError::InvalidUnitDefinition(msg) => ApiError::ConfigError(msg),
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// 目的: 将Repository层的技术错误转换为用户友好的业务错误
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::Duplicate(msg) => {
                ApiError::BusinessRuleViolation(format!("记录重复: {}", msg))
            }
            err @ (RepositoryError::InsufficientStock { .. }
            | RepositoryError::UnitChanged { .. }) => {
                ApiError::BusinessRuleViolation(err.to_string())
            }
            RepositoryError::ConstraintViolation(msg) => ApiError::InvalidInput(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::Database(msg) => ApiError::DatabaseError(msg),
        }
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        ApiError::ImportError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::UnitGroup;

    #[test]
    fn test_engine_error_conversion() {
        let err: ApiError = EngineError::UnknownUnit {
            unit: "cup".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::UnknownUnit(u) if u == "cup"));

        let err: ApiError = EngineError::IncompatibleUnits {
            from: "kg".to_string(),
            to: "liter".to_string(),
            from_group: UnitGroup::Mass,
            to_group: UnitGroup::Volume,
        }
        .into();
        assert!(matches!(err, ApiError::IncompatibleUnits(ref m) if m == "kg(MASS) → liter(VOLUME)"));
        assert_eq!(err.to_string(), "单位不兼容: kg(MASS) → liter(VOLUME)");
    }

    #[test]
    fn test_repository_error_conversion() {
        let err: ApiError = RepositoryError::NotFound {
            entity: "Recipe".to_string(),
            id: "R404".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err: ApiError = RepositoryError::InsufficientStock {
            name: "Sugar".to_string(),
            on_hand: 1.5,
            requested: 2.0,
            unit: "kg".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::BusinessRuleViolation(ref m) if m.contains("Sugar")));
    }
}
