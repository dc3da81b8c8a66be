// ==========================================
// StoreRoomApi 集成测试
// ==========================================
// 测试目标: 库存维护、库存预警、文件导入、单位换算
// ==========================================

mod test_helpers;

use std::io::Write;
use std::sync::Arc;

use sweet_hub::api::{ApiError, StoreRoomApi};
use sweet_hub::config::ManufacturingSettings;
use sweet_hub::domain::StoreStockRecord;
use sweet_hub::engine::UnitRegistry;
use sweet_hub::repository::StoreRoomRepository;
use tempfile::Builder;
use test_helpers::{create_test_db, seed_store_room};

fn build_api(db_path: &str, settings: ManufacturingSettings) -> StoreRoomApi {
    let repo = Arc::new(StoreRoomRepository::new(db_path).unwrap());
    seed_store_room(&repo).unwrap();
    StoreRoomApi::new(repo, Arc::new(UnitRegistry::standard()), settings)
}

#[test]
fn test_stock_alerts_below_threshold() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let api = build_api(&db_path, ManufacturingSettings::default());
    api.upsert_stock(&StoreStockRecord::new("Ghee", 0.0, "kg").with_min_quantity(1.0))
        .unwrap();

    let alerts = api.stock_alerts().unwrap();

    let names: Vec<&str> = alerts.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Ghee", "Sugar"]);
    assert!(alerts[0].out_of_stock);
    assert_eq!(alerts[1].display.value, 1.5);
    assert_eq!(alerts[1].display.unit, "kg");
}

#[test]
fn test_stock_alerts_disabled() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let settings = ManufacturingSettings {
        stock_alert_enabled: false,
        ..ManufacturingSettings::default()
    };
    let api = build_api(&db_path, settings);

    assert!(api.stock_alerts().unwrap().is_empty());
}

#[test]
fn test_upsert_stock_validates_input() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let api = build_api(&db_path, ManufacturingSettings::default());

    let unknown_unit = api.upsert_stock(&StoreStockRecord::new("Rice", 1.0, "cup"));
    assert!(matches!(unknown_unit, Err(ApiError::UnknownUnit(_))));

    let negative = api.upsert_stock(&StoreStockRecord::new("Rice", -1.0, "kg"));
    assert!(matches!(negative, Err(ApiError::InvalidInput(_))));

    api.upsert_stock(&StoreStockRecord::new("Rice", 10.0, "kg")).unwrap();
    assert_eq!(api.list_stock().unwrap().len(), 5);
}

#[test]
fn test_convert_quantity_uses_precision() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let api = build_api(&db_path, ManufacturingSettings::default());

    assert_eq!(api.convert_quantity(1234.5678, "gram", "kg").unwrap(), 1.235);
    assert!(matches!(
        api.convert_quantity(1.0, "kg", "liter"),
        Err(ApiError::IncompatibleUnits(_))
    ));

    let q = api.normalize(2500.0, "ml").unwrap();
    assert_eq!((q.value, q.unit.as_str()), (2.5, "l"));
}

#[test]
fn test_import_stock_file_csv() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let api = build_api(&db_path, ManufacturingSettings::default());

    let mut csv_file = Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(csv_file, "Name,Quantity,Unit,Min_Quantity").unwrap();
    writeln!(csv_file, "Sugar,25,kg,5").unwrap();
    writeln!(csv_file, "Rose Water,2,l,").unwrap();
    writeln!(csv_file, "Kewra,1,bottle,").unwrap();
    csv_file.flush().unwrap();

    let summary = api.import_stock_file(csv_file.path(), "store-keeper").unwrap();

    assert_eq!(summary.imported, 2);
    assert_eq!(summary.row_errors.len(), 1);
    assert_eq!(summary.row_errors[0].row, 4);
    assert!(!summary.batch_id.is_empty());

    let stock = api.list_stock().unwrap();
    let sugar = stock.iter().find(|r| r.name == "Sugar").unwrap();
    assert_eq!(sugar.quantity, 25.0);
    assert_eq!(sugar.min_quantity, Some(5.0));
}

#[test]
fn test_import_missing_file() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let api = build_api(&db_path, ManufacturingSettings::default());

    let result = api.import_stock_file("no_such_stock.csv", "store-keeper");

    assert!(matches!(result, Err(ApiError::ImportError(_))));
}
