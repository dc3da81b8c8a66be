// ==========================================
// Sweet Hub - 生产 API
// ==========================================
// 职责: 配方管理、批次生产计划、领料扣减
// 流程: 配方缩放 → 库存可用性判定 → (生产时) 扣减可用原料
// 红线: 计划无副作用;扣减只针对 available 分区,缺料原料不扣减
// ==========================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::InputValidator;
use crate::config::ManufacturingSettings;
use crate::domain::availability::AvailabilityResult;
use crate::domain::ingredient::{IngredientRequirement, StockMovement};
use crate::domain::recipe::Recipe;
use crate::domain::types::UnavailableReason;
use crate::engine::availability::AvailabilityChecker;
use crate::engine::conversion::round_to_precision;
use crate::engine::scaling::RecipeScaler;
use crate::i18n::t_with_args;
use crate::repository::recipe_repo::RecipeRepository;
use crate::repository::store_room_repo::StoreRoomRepository;

// ==========================================
// BatchPlan - 批次生产计划
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchPlan {
    pub recipe_id: String,
    pub recipe_name: String,
    pub requested_quantity: f64,
    pub output_unit: String,
    pub ingredients: Vec<IngredientRequirement>, // 缩放后的原料需求
    pub availability: AvailabilityResult,
    pub warnings: Vec<String>, // 面向用户的缺料提示
}

// ==========================================
// ProductionReport - 批次生产结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionReport {
    pub batch_id: String,
    pub recipe_id: String,
    pub requested_quantity: f64,
    pub movements: Vec<StockMovement>, // 本批次扣减流水
    pub skipped: Vec<String>,          // 未扣减的原料名称
    pub warnings: Vec<String>,
    pub partial: bool,
}

/// 生产API
///
/// 职责：
/// 1. 配方登记与查询
/// 2. 批次计划（只读）
/// 3. 批次生产（扣减库存、记录流水）
/// 4. 临时原料清单可用性判定
pub struct ManufacturingApi {
    recipe_repo: Arc<RecipeRepository>,
    store_room_repo: Arc<StoreRoomRepository>,
    scaler: RecipeScaler,
    checker: Arc<AvailabilityChecker>,
    settings: ManufacturingSettings,
}

impl ManufacturingApi {
    /// 创建新的ManufacturingApi实例
    ///
    /// # 参数
    /// - recipe_repo: 配方仓储
    /// - store_room_repo: 储藏室库存仓储
    /// - checker: 可用性判定引擎（持有单位注册表）
    /// - settings: 生产配置快照
    pub fn new(
        recipe_repo: Arc<RecipeRepository>,
        store_room_repo: Arc<StoreRoomRepository>,
        checker: Arc<AvailabilityChecker>,
        settings: ManufacturingSettings,
    ) -> Self {
        let scaler = RecipeScaler::new().with_precision(settings.quantity_precision);
        Self {
            recipe_repo,
            store_room_repo,
            scaler,
            checker,
            settings,
        }
    }

    // ==========================================
    // 配方接口
    // ==========================================

    /// 登记配方
    ///
    /// 原料单位必须已在注册表中登记
    pub fn create_recipe(&self, recipe: &Recipe) -> ApiResult<()> {
        InputValidator::validate_recipe(recipe)?;

        let registry = self.checker.registry();
        for unit in std::iter::once(&recipe.output_unit)
            .chain(recipe.ingredients.iter().map(|i| &i.unit))
        {
            if !registry.contains(unit) {
                return Err(ApiError::UnknownUnit(unit.clone()));
            }
        }

        self.recipe_repo.create(recipe)?;
        info!(recipe_id = %recipe.recipe_id, ingredients = recipe.ingredients.len(), "配方已登记");
        Ok(())
    }

    /// 查询配方
    pub fn get_recipe(&self, recipe_id: &str) -> ApiResult<Recipe> {
        self.recipe_repo
            .find_by_id(recipe_id)?
            .ok_or_else(|| ApiError::NotFound(format!("配方(id={})不存在", recipe_id)))
    }

    /// 配方列表
    pub fn list_recipes(&self) -> ApiResult<Vec<Recipe>> {
        Ok(self.recipe_repo.list_all()?)
    }

    // ==========================================
    // 计划与生产
    // ==========================================

    /// 生成批次计划（无副作用）
    ///
    /// # 参数
    /// - recipe_id: 配方ID
    /// - requested_quantity: 请求产出量（配方产出单位）
    #[instrument(skip(self))]
    pub fn plan_batch(&self, recipe_id: &str, requested_quantity: f64) -> ApiResult<BatchPlan> {
        InputValidator::validate_requested_quantity(requested_quantity)?;

        let recipe = self.get_recipe(recipe_id)?;
        let ingredients = self.scaler.rescale(&recipe, requested_quantity)?;
        let snapshot = self.store_room_repo.list_snapshot()?;
        let availability = self.checker.check(&ingredients, &snapshot)?;
        let warnings = self.render_warnings(&availability);

        Ok(BatchPlan {
            recipe_id: recipe.recipe_id,
            recipe_name: recipe.name,
            requested_quantity,
            output_unit: recipe.output_unit,
            ingredients,
            availability,
            warnings,
        })
    }

    /// 生产批次: 扣减可用原料并记录流水
    ///
    /// # 错误
    /// - BusinessRuleViolation: 没有任何可用原料
    /// - BusinessRuleViolation: 存在缺料且配置不允许部分生产
    /// - BusinessRuleViolation: 判定后库存被并发修改（仓储层事务内复核）
    #[instrument(skip(self))]
    pub fn produce_batch(
        &self,
        recipe_id: &str,
        requested_quantity: f64,
        operator: &str,
    ) -> ApiResult<ProductionReport> {
        let plan = self.plan_batch(recipe_id, requested_quantity)?;
        let availability = &plan.availability;

        if availability.available.is_empty() {
            return Err(ApiError::BusinessRuleViolation(format!(
                "配方 {} 没有任何可用原料,无法生产",
                recipe_id
            )));
        }

        let partial = availability.has_shortage();
        if partial && !self.settings.allow_partial_production {
            return Err(ApiError::BusinessRuleViolation(format!(
                "配方 {} 存在缺料原料 {} 项,当前配置不允许部分生产",
                recipe_id,
                availability.insufficient.len() + availability.unavailable.len()
            )));
        }

        let deductions = self.checker.plan_deductions(availability)?;
        let batch_id = Uuid::new_v4().to_string();
        let movements = self
            .store_room_repo
            .apply_deductions(&batch_id, &deductions, operator)?;

        let skipped: Vec<String> = availability
            .insufficient
            .iter()
            .map(|i| i.name.clone())
            .chain(availability.unavailable.iter().map(|u| u.name.clone()))
            .collect();

        if partial {
            warn!(batch_id = %batch_id, recipe_id, skipped = ?skipped, "部分生产,缺料原料未扣减");
        }
        info!(batch_id = %batch_id, recipe_id, movements = movements.len(), "批次生产完成");

        let mut warnings = plan.warnings;
        if partial {
            let count = skipped.len().to_string();
            warnings.push(t_with_args("production.partial", &[("count", count.as_str())]));
        }

        Ok(ProductionReport {
            batch_id,
            recipe_id: plan.recipe_id,
            requested_quantity,
            movements,
            skipped,
            warnings,
            partial,
        })
    }

    /// 临时原料清单的可用性判定（不依赖已登记配方）
    pub fn check_requirements(
        &self,
        requirements: &[IngredientRequirement],
    ) -> ApiResult<AvailabilityResult> {
        requirements
            .iter()
            .try_for_each(InputValidator::validate_requirement)?;

        let snapshot = self.store_room_repo.list_snapshot()?;
        Ok(self.checker.check(requirements, &snapshot)?)
    }

    // 缺料提示: 不足原料给出缺口,不可用原料给出原因
    fn render_warnings(&self, availability: &AvailabilityResult) -> Vec<String> {
        let precision = self.settings.quantity_precision;
        let mut warnings = Vec::new();

        for item in &availability.insufficient {
            let required = item.required.to_string();
            let available = item.available.to_string();
            let shortfall = round_to_precision(item.shortfall(), precision).to_string();
            warnings.push(t_with_args(
                "availability.insufficient",
                &[
                    ("name", item.name.as_str()),
                    ("required", required.as_str()),
                    ("available", available.as_str()),
                    ("shortfall", shortfall.as_str()),
                    ("unit", item.unit.as_str()),
                ],
            ));
        }

        for item in &availability.unavailable {
            let message = match &item.reason {
                UnavailableReason::NotInStock => {
                    t_with_args("availability.not_in_stock", &[("name", item.name.as_str())])
                }
                UnavailableReason::IncompatibleUnits { stock_unit } => t_with_args(
                    "availability.incompatible_units",
                    &[
                        ("name", item.name.as_str()),
                        ("unit", item.unit.as_str()),
                        ("stock_unit", stock_unit.as_str()),
                    ],
                ),
            };
            warnings.push(message);
        }

        warnings
    }
}
