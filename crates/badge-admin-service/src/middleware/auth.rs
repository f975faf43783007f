//! JWT 认证中间件
//!
//! 验证请求中的 Bearer Token，要求工作人员身份，并将 Claims 注入请求扩展

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::error::AdminError;
use crate::state::AppState;

/// 认证中间件
///
/// 缺少或无效的 Token 返回 401；Token 有效但不是工作人员返回 403。
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let Some(token) = token else {
        return AdminError::Unauthorized("缺少认证 Token".to_string()).into_response();
    };

    let claims = match state.jwt_manager.verify_token(token) {
        Ok(claims) => claims,
        Err(e) => return e.into_response(),
    };

    if !claims.is_staff {
        warn!(login = %claims.login, "Non-staff user rejected from admin");
        return AdminError::Forbidden("仅限工作人员访问".to_string()).into_response();
    }

    request.extensions_mut().insert(claims);
    next.run(request).await
}
