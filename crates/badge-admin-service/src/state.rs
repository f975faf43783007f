//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use std::sync::Arc;

use nest_badges::{
    BadgeTypeRepository, BadgeTypeRepositoryTrait, UserBadgeRepository, UserBadgeRepositoryTrait,
    UserRepository, UserRepositoryTrait,
};
use nest_shared::config::AuthConfig;
use sqlx::PgPool;

use crate::admin::AdminSite;
use crate::auth::JwtManager;

/// Axum 应用共享状态
///
/// 仓储以 trait 对象持有，测试中可替换为 mock
#[derive(Clone)]
pub struct AppState {
    pub badge_types: Arc<dyn BadgeTypeRepositoryTrait>,
    pub user_badges: Arc<dyn UserBadgeRepositoryTrait>,
    pub users: Arc<dyn UserRepositoryTrait>,
    pub jwt_manager: Arc<JwtManager>,
    pub site: Arc<AdminSite>,
}

impl AppState {
    /// 基于 PostgreSQL 连接池创建应用状态
    pub fn new(pool: PgPool, auth: &AuthConfig) -> Self {
        Self::with_repositories(
            Arc::new(BadgeTypeRepository::new(pool.clone())),
            Arc::new(UserBadgeRepository::new(pool.clone())),
            Arc::new(UserRepository::new(pool)),
            JwtManager::new(auth),
        )
    }

    /// 使用自定义仓储实现创建应用状态
    pub fn with_repositories(
        badge_types: Arc<dyn BadgeTypeRepositoryTrait>,
        user_badges: Arc<dyn UserBadgeRepositoryTrait>,
        users: Arc<dyn UserRepositoryTrait>,
        jwt_manager: JwtManager,
    ) -> Self {
        Self {
            badge_types,
            user_badges,
            users,
            jwt_manager: Arc::new(jwt_manager),
            site: Arc::new(AdminSite::nest()),
        }
    }
}
