// ==========================================
// StoreRoomRepository 集成测试
// ==========================================
// 测试目标: 名称键唯一、扣减事务、负库存拒绝、流水记录
// ==========================================

mod test_helpers;

use sweet_hub::domain::types::MovementType;
use sweet_hub::domain::{StockDeduction, StoreStockRecord};
use sweet_hub::repository::{RepositoryError, StoreRoomRepository};
use test_helpers::{create_test_db, seed_store_room};

fn deduction(name: &str, quantity: f64, unit: &str) -> StockDeduction {
    StockDeduction {
        stock_name: name.to_string(),
        quantity,
        unit: unit.to_string(),
    }
}

#[test]
fn test_upsert_is_case_insensitive() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let repo = StoreRoomRepository::new(&db_path).unwrap();

    repo.upsert(&StoreStockRecord::new("Sugar", 1.0, "kg")).unwrap();
    repo.upsert(&StoreStockRecord::new("  sugar ", 3.0, "kg")).unwrap();

    let snapshot = repo.list_snapshot().unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].quantity, 3.0);
    assert_eq!(snapshot[0].name, "sugar");
    assert!(snapshot[0].updated_at.is_some());

    let found = repo.find_by_name("SUGAR").unwrap().unwrap();
    assert_eq!(found.quantity, 3.0);
}

#[test]
fn test_list_snapshot_sorted_by_name() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let repo = StoreRoomRepository::new(&db_path).unwrap();
    seed_store_room(&repo).unwrap();

    let names: Vec<String> = repo
        .list_snapshot()
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();

    assert_eq!(names, vec!["Cardamom", "Khoya", "Milk", "Sugar"]);
}

#[test]
fn test_apply_deductions_updates_stock_and_writes_movements() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let repo = StoreRoomRepository::new(&db_path).unwrap();
    seed_store_room(&repo).unwrap();

    let movements = repo
        .apply_deductions(
            "batch-1",
            &[deduction("khoya", 1.5, "kg"), deduction("cardamom", 10.0, "gram")],
            "halwai",
        )
        .unwrap();

    assert_eq!(movements.len(), 2);
    assert!(movements.iter().all(|m| m.movement_type == MovementType::Deduct));
    assert!(movements.iter().all(|m| m.batch_id == "batch-1" && m.operator == "halwai"));
    assert_eq!(movements[0].stock_name, "Khoya");
    assert_eq!(movements[0].quantity_before, 5.0);
    assert_eq!(movements[0].quantity_after, 3.5);

    assert_eq!(repo.find_by_name("Khoya").unwrap().unwrap().quantity, 3.5);
    assert_eq!(repo.find_by_name("Cardamom").unwrap().unwrap().quantity, 40.0);
}

#[test]
fn test_negative_stock_rejected_and_rolled_back() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let repo = StoreRoomRepository::new(&db_path).unwrap();
    seed_store_room(&repo).unwrap();

    let result = repo.apply_deductions(
        "batch-2",
        &[deduction("Khoya", 1.0, "kg"), deduction("Sugar", 2.0, "kg")],
        "halwai",
    );

    assert!(matches!(
        result,
        Err(RepositoryError::InsufficientStock { ref name, .. }) if name == "Sugar"
    ));
    // 整批回滚: 第一条扣减也不生效
    assert_eq!(repo.find_by_name("Khoya").unwrap().unwrap().quantity, 5.0);
    assert!(repo.list_movements("batch-2").unwrap().is_empty());
}

#[test]
fn test_unit_changed_since_check_is_rejected() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let repo = StoreRoomRepository::new(&db_path).unwrap();
    seed_store_room(&repo).unwrap();

    let result = repo.apply_deductions("batch-3", &[deduction("Khoya", 500.0, "gram")], "halwai");

    assert!(matches!(result, Err(RepositoryError::UnitChanged { .. })));
}

#[test]
fn test_missing_stock_record_is_not_found() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let repo = StoreRoomRepository::new(&db_path).unwrap();

    let result = repo.apply_deductions("batch-4", &[deduction("Saffron", 1.0, "gram")], "halwai");

    assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
}

#[test]
fn test_second_deduction_sees_first() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let repo = StoreRoomRepository::new(&db_path).unwrap();
    seed_store_room(&repo).unwrap();

    repo.apply_deductions("batch-a", &[deduction("Khoya", 3.0, "kg")], "a")
        .unwrap();
    let second = repo.apply_deductions("batch-b", &[deduction("Khoya", 3.0, "kg")], "b");

    assert!(second.is_err());
    assert_eq!(repo.find_by_name("Khoya").unwrap().unwrap().quantity, 2.0);
}

#[test]
fn test_import_records_writes_import_movements() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let repo = StoreRoomRepository::new(&db_path).unwrap();
    seed_store_room(&repo).unwrap();

    let imported = repo
        .import_records(
            "import-1",
            &[
                StoreStockRecord::new("Sugar", 25.0, "kg"),
                StoreStockRecord::new("Rose Water", 2.0, "l"),
            ],
            "store-keeper",
        )
        .unwrap();

    assert_eq!(imported, 2);
    let movements = repo.list_movements("import-1").unwrap();
    assert_eq!(movements.len(), 2);
    assert_eq!(movements[0].movement_type, MovementType::Import);
    assert_eq!(movements[0].quantity_before, 1.5);
    assert_eq!(movements[0].quantity_after, 25.0);
    assert_eq!(movements[1].quantity_before, 0.0);
}

#[test]
fn test_delete_stock_record() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let repo = StoreRoomRepository::new(&db_path).unwrap();
    seed_store_room(&repo).unwrap();

    assert_eq!(repo.delete("milk").unwrap(), 1);
    assert!(repo.find_by_name("Milk").unwrap().is_none());
    assert_eq!(repo.delete("milk").unwrap(), 0);
}
