// ==========================================
// Sweet Hub - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod error;
pub mod recipe_repo;
pub mod store_room_repo;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use recipe_repo::RecipeRepository;
pub use store_room_repo::StoreRoomRepository;
