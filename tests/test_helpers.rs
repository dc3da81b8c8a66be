// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、测试数据生成等功能
// ==========================================

#![allow(dead_code)]

use rusqlite::Connection;
use std::error::Error;
use std::sync::{Arc, Mutex};
use sweet_hub::db::{ensure_schema, open_sqlite_connection};
use sweet_hub::domain::{Recipe, StoreStockRecord};
use sweet_hub::repository::StoreRoomRepository;
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    sweet_hub::logging::init_test();

    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = open_sqlite_connection(&db_path)?;
    ensure_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 打开测试数据库连接
pub fn open_test_connection(db_path: &str) -> Result<Connection, Box<dyn Error>> {
    Ok(open_sqlite_connection(db_path)?)
}

/// 共享连接（仓储 / 配置共用）
pub fn shared_connection(db_path: &str) -> Result<Arc<Mutex<Connection>>, Box<dyn Error>> {
    Ok(Arc::new(Mutex::new(open_test_connection(db_path)?)))
}

/// 写入 global 配置
pub fn insert_config(conn: &Connection, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
    conn.execute(
        "INSERT OR REPLACE INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)",
        [key, value],
    )?;
    Ok(())
}

/// Peda 配方: 基准产出 2 kg
pub fn peda_recipe() -> Recipe {
    Recipe::new("R-PEDA", "Peda", 2.0, "kg")
        .with_ingredient("khoya", 1.5, "kg")
        .with_ingredient("sugar", 500.0, "gram")
        .with_ingredient("cardamom", 10.0, "gram")
}

/// 默认储藏室库存
pub fn seed_store_room(repo: &StoreRoomRepository) -> Result<(), Box<dyn Error>> {
    for record in [
        StoreStockRecord::new("Khoya", 5.0, "kg").with_min_quantity(2.0),
        StoreStockRecord::new("Sugar", 1.5, "kg").with_min_quantity(5.0),
        StoreStockRecord::new("Cardamom", 50.0, "gram"),
        StoreStockRecord::new("Milk", 20.0, "liter"),
    ] {
        repo.upsert(&record)?;
    }
    Ok(())
}
