//! Nest 徽章数据层
//!
//! 定义徽章类型（BadgeType）与用户徽章（UserBadge）两类持久化记录，
//! 以及基于 PostgreSQL 的仓储实现。
//!
//! ## 模块结构
//!
//! - `models`: 实体、写入参数与列表查询条件
//! - `error`: 错误类型定义，约束冲突按约束名归类
//! - `repository`: 仓储 trait 与 sqlx 实现
//!
//! ## 完整性约束
//!
//! 全部由数据库保证：徽章类型名称唯一、同一用户同一类型徽章唯一、
//! 删除用户或徽章类型时级联删除用户徽章。

pub mod error;
pub mod models;
pub mod repository;

pub use error::{BadgeError, Result};
pub use models::*;
pub use repository::{
    BadgeTypeRepository, BadgeTypeRepositoryTrait, UserBadgeRepository, UserBadgeRepositoryTrait,
    UserRepository, UserRepositoryTrait,
};
