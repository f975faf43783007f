//! 仓储 Trait 定义
//!
//! 定义仓储接口，便于上层依赖抽象而非具体实现，支持 mock 测试。
//! 启用 `mock` feature 时导出 mockall 生成的 `Mock*` 实现。

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    BadgeType, BadgeTypeChanges, BadgeTypeListQuery, NewBadgeType, NewUserBadge, Page, User,
    UserBadge, UserBadgeChanges, UserBadgeListQuery,
};

/// 徽章类型仓储接口
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait BadgeTypeRepositoryTrait: Send + Sync {
    async fn create(&self, new: &NewBadgeType) -> Result<BadgeType>;
    async fn get(&self, id: i64) -> Result<Option<BadgeType>>;
    async fn update(&self, id: i64, changes: &BadgeTypeChanges) -> Result<BadgeType>;
    async fn delete(&self, id: i64) -> Result<bool>;
    async fn list(&self, query: &BadgeTypeListQuery) -> Result<Page<BadgeType>>;
    async fn autocomplete(&self, term: &str, limit: i64) -> Result<Vec<BadgeType>>;
}

/// 用户徽章仓储接口
///
/// 返回的 `UserBadge` 都已携带关联的用户与徽章类型摘要
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait UserBadgeRepositoryTrait: Send + Sync {
    async fn create(&self, new: &NewUserBadge) -> Result<UserBadge>;
    async fn get(&self, id: i64) -> Result<Option<UserBadge>>;
    async fn update(&self, id: i64, changes: &UserBadgeChanges) -> Result<UserBadge>;
    async fn delete(&self, id: i64) -> Result<bool>;
    async fn list(&self, query: &UserBadgeListQuery) -> Result<Page<UserBadge>>;
}

/// 用户仓储接口（只读）
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    async fn get(&self, id: i64) -> Result<Option<User>>;
    async fn autocomplete(&self, term: &str, limit: i64) -> Result<Vec<User>>;
}
