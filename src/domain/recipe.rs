// ==========================================
// Sweet Hub - 配方领域模型
// ==========================================
// 生命周期: 操作员创建/编辑;排产时只读
// 红线: 单次缩放/可用性计算期间不可变
// ==========================================

use crate::domain::ingredient::IngredientRequirement;
use serde::{Deserialize, Serialize};

// ==========================================
// Recipe - 生产配方
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub recipe_id: String,                        // 配方ID
    pub name: String,                             // 产品名称
    pub output_quantity: f64,                     // 基准产出数量 (> 0)
    pub output_unit: String,                      // 产出单位
    pub ingredients: Vec<IngredientRequirement>,  // 原料清单（有序）
}

impl Recipe {
    pub fn new(recipe_id: &str, name: &str, output_quantity: f64, output_unit: &str) -> Self {
        Self {
            recipe_id: recipe_id.to_string(),
            name: name.to_string(),
            output_quantity,
            output_unit: output_unit.to_string(),
            ingredients: Vec::new(),
        }
    }

    pub fn with_ingredient(mut self, name: &str, quantity: f64, unit: &str) -> Self {
        self.ingredients
            .push(IngredientRequirement::new(name, quantity, unit));
        self
    }
}
