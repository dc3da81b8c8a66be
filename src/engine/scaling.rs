// ==========================================
// Sweet Hub - 配方缩放重算引擎
// ==========================================
// 职责: 按请求产出量等比例缩放配方原料
// 规则: ratio = requested / recipe.output_quantity
//       new_quantity = round(quantity * ratio, 3)
// 红线: 只改数量,不改单位;保持原料顺序;纯函数
// ==========================================

use crate::domain::ingredient::IngredientRequirement;
use crate::domain::recipe::Recipe;
use crate::engine::conversion::{round_to_precision, DEFAULT_PRECISION};
use crate::engine::error::{EngineError, EngineResult};
use tracing::instrument;

pub struct RecipeScaler {
    precision: u32,
}

impl RecipeScaler {
    pub fn new() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// 缩放配方原料
    ///
    /// # 参数
    /// - `recipe`: 配方（基准产出量必须 > 0）
    /// - `requested_output_quantity`: 请求产出量（与配方产出单位一致）
    ///
    /// # 错误
    /// - InvalidRecipe: 基准产出量 <= 0 或非有限数
    #[instrument(skip(self, recipe), fields(
        recipe_id = %recipe.recipe_id,
        base_output = recipe.output_quantity
    ))]
    pub fn rescale(
        &self,
        recipe: &Recipe,
        requested_output_quantity: f64,
    ) -> EngineResult<Vec<IngredientRequirement>> {
        if !recipe.output_quantity.is_finite() || recipe.output_quantity <= 0.0 {
            return Err(EngineError::InvalidRecipe(format!(
                "配方 {} 的基准产出量必须大于0, 实际 {}",
                recipe.recipe_id, recipe.output_quantity
            )));
        }

        let ratio = requested_output_quantity / recipe.output_quantity;

        Ok(recipe
            .ingredients
            .iter()
            .map(|ingredient| IngredientRequirement {
                name: ingredient.name.clone(),
                quantity: round_to_precision(ingredient.quantity * ratio, self.precision),
                unit: ingredient.unit.clone(),
            })
            .collect())
    }
}

impl Default for RecipeScaler {
    fn default() -> Self {
        Self::new()
    }
}
