//! 用户徽章管理 API 处理器
//!
//! 列表与详情都返回关联的用户与徽章类型摘要；earned_at 只读。

use axum::{Json, extract::State};
use chrono::Utc;
use nest_badges::{NewUserBadge, UserBadgeChanges};
use nest_shared::observability::metrics::record_admin_change;
use tracing::info;
use validator::Validate;

use crate::{
    dto::{
        ApiResponse, CreateUserBadgeRequest, DeletedResponse, PageResponse, PaginationParams,
        UpdateUserBadgeRequest, UserBadgeDto, UserBadgeQueryFilter,
    },
    error::AdminError,
    extract::{ApiJson, ApiPath, ApiQuery},
    state::AppState,
};

const MODEL: &str = "user_badge";

/// 用户徽章列表
///
/// GET /api/admin/user-badges
pub async fn list_user_badges(
    State(state): State<AppState>,
    ApiQuery(pagination): ApiQuery<PaginationParams>,
    ApiQuery(filter): ApiQuery<UserBadgeQueryFilter>,
) -> Result<Json<ApiResponse<PageResponse<UserBadgeDto>>>, AdminError> {
    let query = filter.into_query(&pagination, Utc::now())?;
    let page = state.user_badges.list(&query).await?;

    Ok(Json(ApiResponse::success(PageResponse::from_page(
        page,
        pagination.page.max(1),
        query.limit,
    ))))
}

/// 授予用户徽章
///
/// POST /api/admin/user-badges
pub async fn create_user_badge(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateUserBadgeRequest>,
) -> Result<Json<ApiResponse<UserBadgeDto>>, AdminError> {
    req.validate()?;

    let user_badge = state
        .user_badges
        .create(&NewUserBadge::from(req))
        .await?;

    info!(
        user_badge_id = user_badge.id,
        login = %user_badge.user.login,
        badge_type = %user_badge.badge_type.name,
        "User badge created"
    );
    record_admin_change(MODEL, "create");

    Ok(Json(ApiResponse::success(user_badge.into())))
}

/// 用户徽章详情
///
/// GET /api/admin/user-badges/{id}
pub async fn get_user_badge(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiResponse<UserBadgeDto>>, AdminError> {
    let user_badge = state
        .user_badges
        .get(id)
        .await?
        .ok_or(AdminError::UserBadgeNotFound(id))?;

    Ok(Json(ApiResponse::success(user_badge.into())))
}

/// 更新用户徽章
///
/// PUT /api/admin/user-badges/{id}
pub async fn update_user_badge(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateUserBadgeRequest>,
) -> Result<Json<ApiResponse<UserBadgeDto>>, AdminError> {
    req.validate()?;

    let user_badge = state
        .user_badges
        .update(id, &UserBadgeChanges::from(req))
        .await?;

    info!(user_badge_id = id, "User badge updated");
    record_admin_change(MODEL, "update");

    Ok(Json(ApiResponse::success(user_badge.into())))
}

/// 删除用户徽章
///
/// DELETE /api/admin/user-badges/{id}
pub async fn delete_user_badge(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiResponse<DeletedResponse>>, AdminError> {
    if !state.user_badges.delete(id).await? {
        return Err(AdminError::UserBadgeNotFound(id));
    }

    info!(user_badge_id = id, "User badge deleted");
    record_admin_change(MODEL, "delete");

    Ok(Json(ApiResponse::success(DeletedResponse::success())))
}
