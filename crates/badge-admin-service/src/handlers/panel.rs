//! 面板配置 API
//!
//! 前端据此渲染列表列、过滤器、搜索框与表单分组。

use axum::{Json, extract::State};

use crate::{
    dto::{ApiResponse, PanelDto},
    error::AdminError,
    extract::ApiPath,
    state::AppState,
};

/// 已注册的全部面板
///
/// GET /api/admin/panels
pub async fn list_panels(State(state): State<AppState>) -> Json<ApiResponse<Vec<PanelDto>>> {
    Json(ApiResponse::success(
        state.site.panels().iter().copied().map(PanelDto::from).collect(),
    ))
}

/// 单个面板配置
///
/// GET /api/admin/panels/{model}
pub async fn get_panel(
    State(state): State<AppState>,
    ApiPath(model): ApiPath<String>,
) -> Result<Json<ApiResponse<PanelDto>>, AdminError> {
    let panel = state
        .site
        .get(&model)
        .copied()
        .ok_or(AdminError::PanelNotFound(model))?;

    Ok(Json(ApiResponse::success(panel.into())))
}
