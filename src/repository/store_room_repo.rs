// ==========================================
// Sweet Hub - 储藏室库存仓储
// ==========================================
// 红线: Repository 不含换算逻辑,只负责数据访问
// 约束: 扣减在单个事务内"重读 → 校验 → 更新 → 记流水",防止重复扣减
// ==========================================

use crate::domain::ingredient::{StockDeduction, StockMovement, StoreStockRecord};
use crate::domain::types::MovementType;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row, Transaction};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

// 浮点扣减残差容忍度
const QUANTITY_EPSILON: f64 = 1e-9;

/// 名称键: 去空白 + 小写,用于大小写不敏感唯一
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

// ==========================================
// StoreRoomRepository - 储藏室库存仓储
// ==========================================
pub struct StoreRoomRepository {
    conn: Arc<Mutex<Connection>>,
}

impl StoreRoomRepository {
    /// 创建新的 StoreRoomRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = crate::db::open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ==========================================
    // 写入接口
    // ==========================================

    /// 新增或覆盖库存记录（按名称键）
    pub fn upsert(&self, record: &StoreStockRecord) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        upsert_in(&conn, record)?;
        Ok(())
    }

    /// 批量导入库存记录,每条写一笔 IMPORT 流水
    ///
    /// # 返回
    /// - Ok(usize): 写入的记录数
    pub fn import_records(
        &self,
        batch_id: &str,
        records: &[StoreStockRecord],
        operator: &str,
    ) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let mut count = 0;
        for record in records {
            let before = find_in(&tx, &record.name)?.map(|r| r.quantity).unwrap_or(0.0);
            upsert_in(&tx, record)?;
            insert_movement(
                &tx,
                batch_id,
                &record.name,
                MovementType::Import,
                record.quantity,
                &record.unit,
                before,
                record.quantity,
                operator,
            )?;
            count += 1;
        }

        tx.commit()?;
        info!(batch_id, count, "库存导入完成");
        Ok(count)
    }

    /// 应用扣减清单
    ///
    /// 事务内逐条重读库存并校验:
    /// - 记录不存在 → NotFound
    /// - 单位与扣减单位不一致（判定后被修改）→ UnitChanged
    /// - 扣减后为负 → InsufficientStock
    ///
    /// 任一失败整批回滚。
    pub fn apply_deductions(
        &self,
        batch_id: &str,
        deductions: &[StockDeduction],
        operator: &str,
    ) -> RepositoryResult<Vec<StockMovement>> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        for deduction in deductions {
            let current = find_in(&tx, &deduction.stock_name)?.ok_or_else(|| {
                RepositoryError::NotFound {
                    entity: "StoreStockRecord".to_string(),
                    id: deduction.stock_name.clone(),
                }
            })?;

            if current.unit != deduction.unit {
                return Err(RepositoryError::UnitChanged {
                    name: current.name,
                    expected: deduction.unit.clone(),
                    actual: current.unit,
                });
            }

            let mut after = current.quantity - deduction.quantity;
            if after < 0.0 && after > -QUANTITY_EPSILON {
                after = 0.0;
            }
            if after < 0.0 {
                warn!(
                    stock_name = %current.name,
                    before = current.quantity,
                    deduct = deduction.quantity,
                    "扣减后库存为负,拒绝扣减"
                );
                return Err(RepositoryError::InsufficientStock {
                    name: current.name,
                    on_hand: current.quantity,
                    requested: deduction.quantity,
                    unit: current.unit,
                });
            }

            tx.execute(
                "UPDATE store_stock SET quantity = ?1, updated_at = ?2 WHERE name_key = ?3",
                params![after, Utc::now().to_rfc3339(), name_key(&current.name)],
            )?;
            insert_movement(
                &tx,
                batch_id,
                &current.name,
                MovementType::Deduct,
                deduction.quantity,
                &deduction.unit,
                current.quantity,
                after,
                operator,
            )?;
        }

        tx.commit()?;
        drop(conn);

        info!(batch_id, count = deductions.len(), "库存扣减完成");
        self.list_movements(batch_id)
    }

    /// 删除库存记录
    pub fn delete(&self, name: &str) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let changed = conn.execute(
            "DELETE FROM store_stock WHERE name_key = ?1",
            params![name_key(name)],
        )?;
        Ok(changed)
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 按名称查询（大小写不敏感）
    pub fn find_by_name(&self, name: &str) -> RepositoryResult<Option<StoreStockRecord>> {
        let conn = self.get_conn()?;
        find_in(&conn, name)
    }

    /// 库存快照（按名称排序）
    pub fn list_snapshot(&self) -> RepositoryResult<Vec<StoreStockRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT name, quantity, unit, min_quantity, updated_at
            FROM store_stock
            ORDER BY name_key ASC
            "#,
        )?;

        let records = stmt
            .query_map([], map_stock_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(records)
    }

    /// 查询批次流水
    pub fn list_movements(&self, batch_id: &str) -> RepositoryResult<Vec<StockMovement>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT movement_id, batch_id, stock_name, movement_type, quantity, unit,
                   quantity_before, quantity_after, operator, created_at
            FROM stock_movement
            WHERE batch_id = ?1
            ORDER BY movement_id ASC
            "#,
        )?;

        let movements = stmt
            .query_map(params![batch_id], |row| {
                Ok(StockMovement {
                    movement_id: row.get(0)?,
                    batch_id: row.get(1)?,
                    stock_name: row.get(2)?,
                    movement_type: parse_movement_type(&row.get::<_, String>(3)?)?,
                    quantity: row.get(4)?,
                    unit: row.get(5)?,
                    quantity_before: row.get(6)?,
                    quantity_after: row.get(7)?,
                    operator: row.get(8)?,
                    created_at: parse_timestamp(&row.get::<_, String>(9)?)
                        .unwrap_or_else(Utc::now),
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(movements)
    }
}

// ==========================================
// 内部辅助函数（连接/事务通用）
// ==========================================

fn upsert_in(conn: &Connection, record: &StoreStockRecord) -> RepositoryResult<usize> {
    let changed = conn.execute(
        r#"
        INSERT INTO store_stock (name, name_key, quantity, unit, min_quantity, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        ON CONFLICT(name_key) DO UPDATE SET
            name = excluded.name,
            quantity = excluded.quantity,
            unit = excluded.unit,
            min_quantity = excluded.min_quantity,
            updated_at = excluded.updated_at
        "#,
        params![
            record.name.trim(),
            name_key(&record.name),
            record.quantity,
            record.unit,
            record.min_quantity,
            Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(changed)
}

fn find_in(conn: &Connection, name: &str) -> RepositoryResult<Option<StoreStockRecord>> {
    let record = conn
        .query_row(
            r#"
            SELECT name, quantity, unit, min_quantity, updated_at
            FROM store_stock
            WHERE name_key = ?1
            "#,
            params![name_key(name)],
            map_stock_row,
        )
        .optional()?;
    Ok(record)
}

fn parse_movement_type(raw: &str) -> SqliteResult<MovementType> {
    MovementType::from_db_str(raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            format!("未知流水类型: {}", raw).into(),
        )
    })
}

#[allow(clippy::too_many_arguments)]
fn insert_movement(
    tx: &Transaction<'_>,
    batch_id: &str,
    stock_name: &str,
    movement_type: MovementType,
    quantity: f64,
    unit: &str,
    quantity_before: f64,
    quantity_after: f64,
    operator: &str,
) -> RepositoryResult<()> {
    tx.execute(
        r#"
        INSERT INTO stock_movement (
            batch_id, name_key, stock_name, movement_type, quantity, unit,
            quantity_before, quantity_after, operator, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        "#,
        params![
            batch_id,
            name_key(stock_name),
            stock_name.trim(),
            movement_type.to_db_str(),
            quantity,
            unit,
            quantity_before,
            quantity_after,
            operator,
            Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

fn map_stock_row(row: &Row<'_>) -> SqliteResult<StoreStockRecord> {
    Ok(StoreStockRecord {
        name: row.get(0)?,
        quantity: row.get(1)?,
        unit: row.get(2)?,
        min_quantity: row.get(3)?,
        updated_at: parse_timestamp(&row.get::<_, String>(4)?),
    })
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
