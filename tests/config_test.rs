// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 验证配置读取、默认值、自定义单位加载
// ==========================================

mod test_helpers;

use sweet_hub::config::{config_keys, ConfigManager, ManufacturingConfigReader, ManufacturingSettings};
use sweet_hub::domain::types::UnitGroup;
use test_helpers::{create_test_db, insert_config, open_test_connection, shared_connection};

#[tokio::test]
async fn test_defaults_when_config_empty() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    let settings = ManufacturingSettings::load(&config_manager).await.unwrap();

    assert_eq!(settings, ManufacturingSettings::default());
    assert!(config_manager.get_custom_units().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_precision_is_clamped() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).unwrap();
    insert_config(&conn, config_keys::QUANTITY_PRECISION, "12").unwrap();

    let config_manager = ConfigManager::new(&db_path).unwrap();

    assert_eq!(config_manager.get_quantity_precision().await.unwrap(), 6);

    config_manager
        .set_config_value(config_keys::QUANTITY_PRECISION, "2")
        .unwrap();
    assert_eq!(config_manager.get_quantity_precision().await.unwrap(), 2);
}

#[tokio::test]
async fn test_boolean_flags() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::from_connection(shared_connection(&db_path).unwrap()).unwrap();

    config_manager
        .set_config_value(config_keys::STOCK_ALERT_ENABLED, "off")
        .unwrap();
    config_manager
        .set_config_value(config_keys::ALLOW_PARTIAL_PRODUCTION, "NO")
        .unwrap();

    let settings = ManufacturingSettings::load(&config_manager).await.unwrap();
    assert!(!settings.stock_alert_enabled);
    assert!(!settings.allow_partial_production);
}

#[tokio::test]
async fn test_custom_units_extend_registry() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).unwrap();
    config_manager
        .set_config_value(
            config_keys::CUSTOM_UNITS,
            r#"[{"name":"tola","group":"MASS","factor":11.66},{"name":"katori","group":"VOLUME","factor":150}]"#,
        )
        .unwrap();

    let registry = config_manager.build_unit_registry().await.unwrap();

    assert_eq!(registry.group_of("tola").unwrap(), UnitGroup::Mass);
    assert_eq!(registry.factor_of("katori").unwrap(), 150.0);
    assert!(registry.contains("kg"));
}

#[tokio::test]
async fn test_malformed_custom_units_ignored() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).unwrap();
    config_manager
        .set_config_value(config_keys::CUSTOM_UNITS, "not json")
        .unwrap();

    let registry = config_manager.build_unit_registry().await.unwrap();

    assert!(!registry.contains("not json"));
    assert!(registry.contains("gram"));
}

#[tokio::test]
async fn test_conflicting_custom_unit_fails_registry_build() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).unwrap();
    config_manager
        .set_config_value(
            config_keys::CUSTOM_UNITS,
            r#"[{"name":"kg","group":"MASS","factor":1}]"#,
        )
        .unwrap();

    assert!(config_manager.build_unit_registry().await.is_err());
}

#[tokio::test]
async fn test_config_snapshot_is_json() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).unwrap();
    config_manager
        .set_config_value(config_keys::QUANTITY_PRECISION, "4")
        .unwrap();

    let snapshot = config_manager.get_config_snapshot().unwrap();
    let value: serde_json::Value = serde_json::from_str(&snapshot).unwrap();

    assert_eq!(value[config_keys::QUANTITY_PRECISION], "4");
}
