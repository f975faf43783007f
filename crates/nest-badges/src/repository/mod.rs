//! 数据库仓储层
//!
//! 提供徽章类型、用户徽章和用户的数据访问，封装 SQL 操作细节。
//!
//! ## 设计原则
//!
//! - 仓储只负责数据持久化，完整性约束交给数据库
//! - 约束冲突在仓储层归类为具体的 `BadgeError` 变体
//! - 用户徽章的读取始终在同一条语句里关联用户与徽章类型
//! - 定义 trait 接口以支持 mock 测试

mod badge_type_repo;
mod traits;
mod user_badge_repo;
mod user_repo;

pub use badge_type_repo::BadgeTypeRepository;
pub use traits::*;
pub use user_badge_repo::UserBadgeRepository;
pub use user_repo::UserRepository;
