//! 关联字段选择器
//!
//! 用户徽章表单中的 user / badge_type 字段使用异步搜索选择器，
//! 由这里提供候选项与已选值的回显。

use axum::{Json, extract::State};

use crate::{
    dto::{ApiResponse, AutocompleteItem, AutocompleteParams},
    error::AdminError,
    extract::{ApiPath, ApiQuery},
    state::AppState,
};

/// 搜索用户
///
/// GET /api/admin/users/autocomplete?term=
pub async fn autocomplete_users(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<AutocompleteParams>,
) -> Result<Json<ApiResponse<Vec<AutocompleteItem>>>, AdminError> {
    let users = state
        .users
        .autocomplete(params.term.trim(), params.limit())
        .await?;

    Ok(Json(ApiResponse::success(
        users.into_iter().map(AutocompleteItem::from).collect(),
    )))
}

/// 已选用户回显
///
/// GET /api/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiResponse<AutocompleteItem>>, AdminError> {
    let user = state
        .users
        .get(id)
        .await?
        .ok_or(AdminError::UserNotFound(id))?;

    Ok(Json(ApiResponse::success(user.into())))
}

/// 搜索徽章类型
///
/// GET /api/admin/badge-types/autocomplete?term=
pub async fn autocomplete_badge_types(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<AutocompleteParams>,
) -> Result<Json<ApiResponse<Vec<AutocompleteItem>>>, AdminError> {
    let badge_types = state
        .badge_types
        .autocomplete(params.term.trim(), params.limit())
        .await?;

    Ok(Json(ApiResponse::success(
        badge_types.into_iter().map(AutocompleteItem::from).collect(),
    )))
}
