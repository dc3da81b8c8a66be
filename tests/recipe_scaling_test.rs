// ==========================================
// 配方缩放集成测试
// ==========================================

use sweet_hub::domain::Recipe;
use sweet_hub::engine::{EngineError, RecipeScaler};

fn ladoo() -> Recipe {
    Recipe::new("R-LADOO", "Besan Ladoo", 40.0, "piece")
        .with_ingredient("besan", 1.0, "kg")
        .with_ingredient("ghee", 400.0, "gram")
        .with_ingredient("sugar", 0.8, "kg")
}

#[test]
fn test_ratio_one_is_identity() {
    let recipe = ladoo();

    let scaled = RecipeScaler::new().rescale(&recipe, 40.0).unwrap();

    assert_eq!(scaled, recipe.ingredients);
}

#[test]
fn test_ratio_two_doubles_quantities() {
    let scaled = RecipeScaler::new().rescale(&ladoo(), 80.0).unwrap();

    let quantities: Vec<f64> = scaled.iter().map(|i| i.quantity).collect();
    assert_eq!(quantities, vec![2.0, 800.0, 1.6]);
}

#[test]
fn test_units_and_order_preserved() {
    let scaled = RecipeScaler::new().rescale(&ladoo(), 10.0).unwrap();

    let names: Vec<&str> = scaled.iter().map(|i| i.name.as_str()).collect();
    let units: Vec<&str> = scaled.iter().map(|i| i.unit.as_str()).collect();
    assert_eq!(names, vec!["besan", "ghee", "sugar"]);
    assert_eq!(units, vec!["kg", "gram", "kg"]);
    assert_eq!(scaled[0].quantity, 0.25);
}

#[test]
fn test_quantities_rounded_to_three_decimals() {
    let scaled = RecipeScaler::new().rescale(&ladoo(), 7.0).unwrap();

    // 1.0 * 7 / 40 = 0.175;400 * 7 / 40 = 70;0.8 * 7 / 40 = 0.14
    assert_eq!(scaled[0].quantity, 0.175);
    assert_eq!(scaled[1].quantity, 70.0);
    assert_eq!(scaled[2].quantity, 0.14);

    let coarse = RecipeScaler::new().with_precision(0).rescale(&ladoo(), 60.0).unwrap();
    assert_eq!(coarse[0].quantity, 2.0);
    assert_eq!(coarse[2].quantity, 1.0);
}

#[test]
fn test_zero_output_recipe_is_invalid() {
    let recipe = Recipe::new("R-BAD", "Broken", 0.0, "kg").with_ingredient("sugar", 1.0, "kg");

    let result = RecipeScaler::new().rescale(&recipe, 5.0);

    assert!(matches!(result, Err(EngineError::InvalidRecipe(_))));
}
