// ==========================================
// Sweet Hub - 储藏室 API
// ==========================================
// 职责: 库存查询与维护、库存预警、库存文件导入、单位换算
// ==========================================

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::api::error::ApiResult;
use crate::api::validator::InputValidator;
use crate::config::ManufacturingSettings;
use crate::domain::availability::{Quantity, StockAlert};
use crate::domain::ingredient::StoreStockRecord;
use crate::engine::conversion::UnitConverter;
use crate::engine::stock_alert::StockAlertEngine;
use crate::engine::unit_registry::UnitRegistry;
use crate::importer::stock_importer::{RowError, StockImporter};
use crate::repository::store_room_repo::StoreRoomRepository;

// ==========================================
// ImportSummary - 库存导入结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSummary {
    pub batch_id: String,
    pub imported: usize,
    pub row_errors: Vec<RowError>,
}

pub struct StoreRoomApi {
    store_room_repo: Arc<StoreRoomRepository>,
    registry: Arc<UnitRegistry>,
    alert_engine: StockAlertEngine,
    settings: ManufacturingSettings,
}

impl StoreRoomApi {
    pub fn new(
        store_room_repo: Arc<StoreRoomRepository>,
        registry: Arc<UnitRegistry>,
        settings: ManufacturingSettings,
    ) -> Self {
        let alert_engine = StockAlertEngine::new(registry.clone());
        Self {
            store_room_repo,
            registry,
            alert_engine,
            settings,
        }
    }

    // ==========================================
    // 库存维护
    // ==========================================

    /// 库存快照（按名称排序）
    pub fn list_stock(&self) -> ApiResult<Vec<StoreStockRecord>> {
        Ok(self.store_room_repo.list_snapshot()?)
    }

    /// 新增或覆盖库存记录
    ///
    /// 单位必须已在注册表中登记
    pub fn upsert_stock(&self, record: &StoreStockRecord) -> ApiResult<()> {
        InputValidator::validate_stock_record(record)?;
        self.registry.group_of(&record.unit)?;
        self.store_room_repo.upsert(record)?;
        Ok(())
    }

    /// 库存预警（配置关闭时返回空列表）
    pub fn stock_alerts(&self) -> ApiResult<Vec<StockAlert>> {
        if !self.settings.stock_alert_enabled {
            return Ok(Vec::new());
        }
        let snapshot = self.store_room_repo.list_snapshot()?;
        Ok(self.alert_engine.collect(&snapshot))
    }

    // ==========================================
    // 库存导入
    // ==========================================

    /// 导入库存文件 (CSV / Excel)
    ///
    /// 行级错误不中断导入;合法行在同一事务内覆盖写入
    #[instrument(skip(self, file_path), fields(file = %file_path.as_ref().display()))]
    pub fn import_stock_file<P: AsRef<Path>>(
        &self,
        file_path: P,
        operator: &str,
    ) -> ApiResult<ImportSummary> {
        let outcome = StockImporter::with_registry(&self.registry).import_file(file_path.as_ref())?;

        let batch_id = Uuid::new_v4().to_string();
        let imported = self
            .store_room_repo
            .import_records(&batch_id, &outcome.records, operator)?;

        info!(
            batch_id = %batch_id,
            imported,
            row_errors = outcome.row_errors.len(),
            "库存文件导入完成"
        );

        Ok(ImportSummary {
            batch_id,
            imported,
            row_errors: outcome.row_errors,
        })
    }

    // ==========================================
    // 单位换算
    // ==========================================

    /// 数量换算（按配置精度取整）
    pub fn convert_quantity(&self, quantity: f64, from_unit: &str, to_unit: &str) -> ApiResult<f64> {
        Ok(UnitConverter::convert_rounded(
            &self.registry,
            quantity,
            from_unit,
            to_unit,
            self.settings.quantity_precision,
        )?)
    }

    /// 展示规整
    pub fn normalize(&self, quantity: f64, unit: &str) -> ApiResult<Quantity> {
        Ok(UnitConverter::normalize_for_display(
            &self.registry,
            quantity,
            unit,
        )?)
    }
}
