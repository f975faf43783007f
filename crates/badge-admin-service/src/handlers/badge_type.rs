//! 徽章类型管理 API 处理器
//!
//! 实现徽章类型的 CRUD。删除徽章类型会级联删除该类型的全部用户徽章。

use axum::{Json, extract::State};
use nest_badges::{BadgeType, BadgeTypeChanges, NewBadgeType};
use nest_shared::observability::metrics::record_admin_change;
use tracing::info;
use validator::Validate;

use crate::{
    dto::{
        ApiResponse, BadgeTypeQueryFilter, CreateBadgeTypeRequest, DeletedResponse, PageResponse,
        PaginationParams, UpdateBadgeTypeRequest,
    },
    error::AdminError,
    extract::{ApiJson, ApiPath, ApiQuery},
    state::AppState,
};

const MODEL: &str = "badge_type";

/// 徽章类型列表
///
/// GET /api/admin/badge-types
pub async fn list_badge_types(
    State(state): State<AppState>,
    ApiQuery(pagination): ApiQuery<PaginationParams>,
    ApiQuery(filter): ApiQuery<BadgeTypeQueryFilter>,
) -> Result<Json<ApiResponse<PageResponse<BadgeType>>>, AdminError> {
    let query = filter.into_query(&pagination)?;
    let page = state.badge_types.list(&query).await?;

    Ok(Json(ApiResponse::success(PageResponse::from_page(
        page,
        pagination.page.max(1),
        query.limit,
    ))))
}

/// 创建徽章类型
///
/// POST /api/admin/badge-types
pub async fn create_badge_type(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateBadgeTypeRequest>,
) -> Result<Json<ApiResponse<BadgeType>>, AdminError> {
    req.validate()?;

    let badge_type = state
        .badge_types
        .create(&NewBadgeType::from(req))
        .await?;

    info!(badge_type_id = badge_type.id, name = %badge_type.name, "Badge type created");
    record_admin_change(MODEL, "create");

    Ok(Json(ApiResponse::success(badge_type)))
}

/// 徽章类型详情
///
/// GET /api/admin/badge-types/{id}
pub async fn get_badge_type(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiResponse<BadgeType>>, AdminError> {
    let badge_type = state
        .badge_types
        .get(id)
        .await?
        .ok_or(AdminError::BadgeTypeNotFound(id))?;

    Ok(Json(ApiResponse::success(badge_type)))
}

/// 更新徽章类型
///
/// PUT /api/admin/badge-types/{id}
pub async fn update_badge_type(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateBadgeTypeRequest>,
) -> Result<Json<ApiResponse<BadgeType>>, AdminError> {
    req.validate()?;

    let badge_type = state
        .badge_types
        .update(id, &BadgeTypeChanges::from(req))
        .await?;

    info!(badge_type_id = id, "Badge type updated");
    record_admin_change(MODEL, "update");

    Ok(Json(ApiResponse::success(badge_type)))
}

/// 删除徽章类型
///
/// DELETE /api/admin/badge-types/{id}
pub async fn delete_badge_type(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiResponse<DeletedResponse>>, AdminError> {
    if !state.badge_types.delete(id).await? {
        return Err(AdminError::BadgeTypeNotFound(id));
    }

    info!(badge_type_id = id, "Badge type deleted");
    record_admin_change(MODEL, "delete");

    Ok(Json(ApiResponse::success(DeletedResponse::success())))
}
