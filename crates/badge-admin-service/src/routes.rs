//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use axum::{
    Router, middleware,
    routing::{get, put},
};
use nest_shared::observability::middleware as obs_middleware;

use crate::{handlers, middleware::auth_middleware, state::AppState};

/// 面板配置路由
fn panel_routes() -> Router<AppState> {
    Router::new()
        .route("/panels", get(handlers::panel::list_panels))
        .route("/panels/{model}", get(handlers::panel::get_panel))
}

/// 徽章类型路由
fn badge_type_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/badge-types",
            get(handlers::badge_type::list_badge_types)
                .post(handlers::badge_type::create_badge_type),
        )
        .route(
            "/badge-types/autocomplete",
            get(handlers::autocomplete::autocomplete_badge_types),
        )
        .route(
            "/badge-types/{id}",
            put(handlers::badge_type::update_badge_type)
                .get(handlers::badge_type::get_badge_type)
                .delete(handlers::badge_type::delete_badge_type),
        )
}

/// 用户徽章路由
fn user_badge_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/user-badges",
            get(handlers::user_badge::list_user_badges)
                .post(handlers::user_badge::create_user_badge),
        )
        .route(
            "/user-badges/{id}",
            put(handlers::user_badge::update_user_badge)
                .get(handlers::user_badge::get_user_badge)
                .delete(handlers::user_badge::delete_user_badge),
        )
}

/// 用户选择器路由（用户记录只读）
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/autocomplete",
            get(handlers::autocomplete::autocomplete_users),
        )
        .route("/users/{id}", get(handlers::autocomplete::get_user))
}

/// 构建完整的 API 路由
///
/// 返回所有管理后台 API 路由（不含前缀，由调用方挂载到 /api/admin），
/// 全部路由都要求工作人员身份
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(panel_routes())
        .merge(badge_type_routes())
        .merge(user_badge_routes())
        .merge(user_routes())
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// 挂载到 /api/admin 并附加请求 ID 与追踪中间件
///
/// 追踪中间件挂在路由层，指标才能拿到匹配的路由模板
pub fn admin_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/admin", api_routes(state.clone()))
        .route_layer(middleware::from_fn(obs_middleware::http_tracing))
        .layer(middleware::from_fn(obs_middleware::request_id))
        .with_state(state)
}
