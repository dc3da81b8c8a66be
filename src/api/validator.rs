// ==========================================
// Sweet Hub - 边界输入校验器
// ==========================================
// 职责: 外部输入进入引擎前的结构校验
// 规则: 名称非空、数量为有限非负数、单位非空、配方产出 > 0
// ==========================================

use std::collections::HashSet;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::ingredient::{IngredientRequirement, StoreStockRecord};
use crate::domain::recipe::Recipe;

pub struct InputValidator;

impl InputValidator {
    /// 校验原料需求
    pub fn validate_requirement(requirement: &IngredientRequirement) -> ApiResult<()> {
        Self::require_name("原料名称", &requirement.name)?;
        Self::require_non_negative(&requirement.name, requirement.quantity)?;
        Self::require_unit(&requirement.name, &requirement.unit)
    }

    /// 校验库存记录
    pub fn validate_stock_record(record: &StoreStockRecord) -> ApiResult<()> {
        Self::require_name("库存名称", &record.name)?;
        Self::require_non_negative(&record.name, record.quantity)?;
        Self::require_unit(&record.name, &record.unit)?;
        if let Some(min_quantity) = record.min_quantity {
            Self::require_non_negative(&format!("{} 预警阈值", record.name), min_quantity)?;
        }
        Ok(())
    }

    /// 校验配方
    ///
    /// 配方必须有ID、名称、正的基准产出量和至少一条原料;
    /// 原料名称（去空白、大小写不敏感）不得重复
    pub fn validate_recipe(recipe: &Recipe) -> ApiResult<()> {
        Self::require_name("配方ID", &recipe.recipe_id)?;
        Self::require_name("配方名称", &recipe.name)?;
        if !recipe.output_quantity.is_finite() || recipe.output_quantity <= 0.0 {
            return Err(ApiError::InvalidRecipe(format!(
                "配方 {} 的基准产出量必须大于0, 实际 {}",
                recipe.recipe_id, recipe.output_quantity
            )));
        }
        Self::require_unit(&recipe.name, &recipe.output_unit)?;
        if recipe.ingredients.is_empty() {
            return Err(ApiError::InvalidRecipe(format!(
                "配方 {} 没有原料",
                recipe.recipe_id
            )));
        }
        recipe
            .ingredients
            .iter()
            .try_for_each(Self::validate_requirement)?;

        let mut seen = HashSet::new();
        for ingredient in &recipe.ingredients {
            if !seen.insert(ingredient.name.trim().to_lowercase()) {
                return Err(ApiError::InvalidRecipe(format!(
                    "配方 {} 的原料 {} 重复",
                    recipe.recipe_id, ingredient.name
                )));
            }
        }
        Ok(())
    }

    /// 校验请求产出量（必须为正的有限数）
    pub fn validate_requested_quantity(quantity: f64) -> ApiResult<()> {
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(ApiError::InvalidInput(format!(
                "请求产出量必须大于0, 实际 {}",
                quantity
            )));
        }
        Ok(())
    }

    fn require_name(field: &str, value: &str) -> ApiResult<()> {
        if value.trim().is_empty() {
            return Err(ApiError::InvalidInput(format!("{}不能为空", field)));
        }
        Ok(())
    }

    fn require_non_negative(owner: &str, quantity: f64) -> ApiResult<()> {
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(ApiError::InvalidInput(format!(
                "{} 的数量必须为非负数, 实际 {}",
                owner, quantity
            )));
        }
        Ok(())
    }

    fn require_unit(owner: &str, unit: &str) -> ApiResult<()> {
        if unit.trim().is_empty() {
            return Err(ApiError::InvalidInput(format!("{} 的单位不能为空", owner)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requirement() {
        assert!(InputValidator::validate_requirement(&IngredientRequirement::new("sugar", 0.0, "kg")).is_ok());
        assert!(InputValidator::validate_requirement(&IngredientRequirement::new(" ", 1.0, "kg")).is_err());
        assert!(InputValidator::validate_requirement(&IngredientRequirement::new("sugar", -1.0, "kg")).is_err());
        assert!(InputValidator::validate_requirement(&IngredientRequirement::new("sugar", f64::NAN, "kg")).is_err());
        assert!(InputValidator::validate_requirement(&IngredientRequirement::new("sugar", 1.0, "")).is_err());
    }

    #[test]
    fn test_validate_recipe() {
        let recipe = Recipe::new("R001", "Peda", 2.0, "kg").with_ingredient("khoya", 1.5, "kg");
        assert!(InputValidator::validate_recipe(&recipe).is_ok());

        let empty = Recipe::new("R002", "Empty", 2.0, "kg");
        assert!(matches!(InputValidator::validate_recipe(&empty), Err(ApiError::InvalidRecipe(_))));

        let zero = Recipe::new("R003", "Zero", 0.0, "kg").with_ingredient("khoya", 1.5, "kg");
        assert!(matches!(InputValidator::validate_recipe(&zero), Err(ApiError::InvalidRecipe(_))));

        let repeated = Recipe::new("R004", "Barfi", 1.0, "kg")
            .with_ingredient("sugar", 1.0, "kg")
            .with_ingredient(" Sugar", 200.0, "gram");
        assert!(matches!(InputValidator::validate_recipe(&repeated), Err(ApiError::InvalidRecipe(_))));
    }

    #[test]
    fn test_validate_requested_quantity() {
        assert!(InputValidator::validate_requested_quantity(2.5).is_ok());
        assert!(InputValidator::validate_requested_quantity(0.0).is_err());
        assert!(InputValidator::validate_requested_quantity(f64::INFINITY).is_err());
    }
}
