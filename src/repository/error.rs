// ==========================================
// Sweet Hub - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 约定: SQLite 约束错误按消息归类;扣减复核失败有独立变体
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 记录 =====
    #[error("{entity} 不存在: {id}")]
    NotFound { entity: String, id: String },

    #[error("记录已存在: {0}")]
    Duplicate(String),

    // ===== 扣减复核 =====
    #[error("库存 {name} 不足: 现有 {on_hand} {unit}, 需扣减 {requested} {unit}")]
    InsufficientStock {
        name: String,
        on_hand: f64,
        requested: f64,
        unit: String,
    },

    #[error("库存 {name} 的单位已变更: 期望 {expected}, 实际 {actual}")]
    UnitChanged {
        name: String,
        expected: String,
        actual: String,
    },

    // ===== 数据库 =====
    #[error("约束违反: {0}")]
    ConstraintViolation(String),

    #[error("数据库锁获取失败: {0}")]
    LockError(String),

    #[error("数据库错误: {0}")]
    Database(String),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    RepositoryError::Duplicate(msg)
                } else if msg.contains("FOREIGN KEY") || msg.contains("CHECK") {
                    RepositoryError::ConstraintViolation(msg)
                } else {
                    RepositoryError::Database(msg)
                }
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "record".to_string(),
                id: "?".to_string(),
            },
            other => RepositoryError::Database(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
