// ==========================================
// Sweet Hub - 配方仓储
// ==========================================
// 职责: recipe / recipe_ingredient 表的 CRUD
// 约束: 原料按 seq_no 存取,保证原料顺序往返一致
// ==========================================

use crate::domain::ingredient::IngredientRequirement;
use crate::domain::recipe::Recipe;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// RecipeRepository - 配方仓储
// ==========================================
pub struct RecipeRepository {
    conn: Arc<Mutex<Connection>>,
}

impl RecipeRepository {
    /// 创建新的 RecipeRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = crate::db::open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 创建配方（含原料清单）
    ///
    /// recipe_id 重复时返回 Duplicate
    pub fn create(&self, recipe: &Recipe) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        tx.execute(
            r#"
            INSERT INTO recipe (recipe_id, name, output_quantity, output_unit, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                recipe.recipe_id,
                recipe.name,
                recipe.output_quantity,
                recipe.output_unit,
                Utc::now().to_rfc3339(),
            ],
        )?;

        for (seq_no, ingredient) in recipe.ingredients.iter().enumerate() {
            tx.execute(
                r#"
                INSERT INTO recipe_ingredient (recipe_id, seq_no, name, quantity, unit)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    recipe.recipe_id,
                    seq_no as i64,
                    ingredient.name,
                    ingredient.quantity,
                    ingredient.unit,
                ],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// 按ID查询配方
    ///
    /// # 返回
    /// - Ok(Some(Recipe)): 找到配方
    /// - Ok(None): 未找到
    pub fn find_by_id(&self, recipe_id: &str) -> RepositoryResult<Option<Recipe>> {
        let conn = self.get_conn()?;
        let header = conn
            .query_row(
                r#"
                SELECT recipe_id, name, output_quantity, output_unit
                FROM recipe
                WHERE recipe_id = ?1
                "#,
                params![recipe_id],
                |row| {
                    Ok(Recipe {
                        recipe_id: row.get(0)?,
                        name: row.get(1)?,
                        output_quantity: row.get(2)?,
                        output_unit: row.get(3)?,
                        ingredients: Vec::new(),
                    })
                },
            )
            .optional()?;

        let Some(mut recipe) = header else {
            return Ok(None);
        };
        recipe.ingredients = load_ingredients(&conn, recipe_id)?;
        Ok(Some(recipe))
    }

    /// 查询全部配方（按名称排序）
    pub fn list_all(&self) -> RepositoryResult<Vec<Recipe>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT recipe_id, name, output_quantity, output_unit
            FROM recipe
            ORDER BY name ASC, recipe_id ASC
            "#,
        )?;

        let mut recipes = stmt
            .query_map([], |row| {
                Ok(Recipe {
                    recipe_id: row.get(0)?,
                    name: row.get(1)?,
                    output_quantity: row.get(2)?,
                    output_unit: row.get(3)?,
                    ingredients: Vec::new(),
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        for recipe in recipes.iter_mut() {
            recipe.ingredients = load_ingredients(&conn, &recipe.recipe_id)?;
        }
        Ok(recipes)
    }

    /// 删除配方（原料随外键级联删除）
    pub fn delete(&self, recipe_id: &str) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let changed = conn.execute("DELETE FROM recipe WHERE recipe_id = ?1", params![recipe_id])?;
        Ok(changed)
    }
}

fn load_ingredients(conn: &Connection, recipe_id: &str) -> RepositoryResult<Vec<IngredientRequirement>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT name, quantity, unit
        FROM recipe_ingredient
        WHERE recipe_id = ?1
        ORDER BY seq_no ASC
        "#,
    )?;

    let ingredients = stmt
        .query_map(params![recipe_id], |row| {
            Ok(IngredientRequirement {
                name: row.get(0)?,
                quantity: row.get(1)?,
                unit: row.get(2)?,
            })
        })?
        .collect::<SqliteResult<Vec<_>>>()?;
    Ok(ingredients)
}
