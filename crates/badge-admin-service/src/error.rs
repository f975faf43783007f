//! 管理后台错误类型定义
//!
//! 所有 handler 统一返回 `AdminError`，由 `IntoResponse` 转成
//! `{success, code, message, data}` 结构的 JSON 响应。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use nest_badges::{BadgeError, OrderingError};
use serde_json::json;

/// 管理后台错误类型
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    // 认证错误
    #[error("未授权: {0}")]
    Unauthorized(String),
    #[error("禁止访问: {0}")]
    Forbidden(String),

    // 请求错误
    #[error("参数验证失败: {0}")]
    Validation(String),
    #[error("{0}")]
    InvalidOrdering(#[from] OrderingError),

    // 资源不存在
    #[error("管理面板不存在: {0}")]
    PanelNotFound(String),
    #[error("徽章类型不存在: {0}")]
    BadgeTypeNotFound(i64),
    #[error("用户徽章不存在: {0}")]
    UserBadgeNotFound(i64),
    #[error("用户不存在: {0}")]
    UserNotFound(i64),

    // 完整性冲突
    #[error("徽章类型名称已存在: {0}")]
    DuplicateBadgeTypeName(String),
    #[error("该用户已拥有此类型的徽章")]
    DuplicateUserBadge,
    #[error("引用的{entity}不存在: {id}")]
    MissingReference { entity: &'static str, id: i64 },

    // 系统错误
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),
    #[error("内部错误: {0}")]
    Internal(String),
}

impl AdminError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,

            Self::Validation(_) | Self::InvalidOrdering(_) => StatusCode::BAD_REQUEST,

            Self::PanelNotFound(_)
            | Self::BadgeTypeNotFound(_)
            | Self::UserBadgeNotFound(_)
            | Self::UserNotFound(_) => StatusCode::NOT_FOUND,

            Self::DuplicateBadgeTypeName(_) | Self::DuplicateUserBadge => StatusCode::CONFLICT,

            Self::MissingReference { .. } => StatusCode::UNPROCESSABLE_ENTITY,

            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidOrdering(_) => "INVALID_ORDERING",
            Self::PanelNotFound(_) => "PANEL_NOT_FOUND",
            Self::BadgeTypeNotFound(_) => "BADGE_TYPE_NOT_FOUND",
            Self::UserBadgeNotFound(_) => "USER_BADGE_NOT_FOUND",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::DuplicateBadgeTypeName(_) => "DUPLICATE_BADGE_TYPE_NAME",
            Self::DuplicateUserBadge => "DUPLICATE_USER_BADGE",
            Self::MissingReference { .. } => "MISSING_REFERENCE",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志
        let message = match &self {
            Self::Database(e) => {
                tracing::error!(error = %e, "数据库操作失败");
                "服务内部错误，请稍后重试".to_string()
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, "内部错误");
                "服务内部错误，请稍后重试".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "success": false,
            "code": self.error_code(),
            "message": message,
            "data": serde_json::Value::Null
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 从 validator 错误转换
impl From<validator::ValidationErrors> for AdminError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// 从徽章数据层错误转换
impl From<BadgeError> for AdminError {
    fn from(err: BadgeError) -> Self {
        match err {
            BadgeError::BadgeTypeNotFound(id) => Self::BadgeTypeNotFound(id),
            BadgeError::UserBadgeNotFound(id) => Self::UserBadgeNotFound(id),
            BadgeError::DuplicateBadgeTypeName(name) => Self::DuplicateBadgeTypeName(name),
            BadgeError::DuplicateUserBadge => Self::DuplicateUserBadge,
            BadgeError::MissingReference { entity, id } => Self::MissingReference { entity, id },
            BadgeError::Validation(msg) => Self::Validation(msg),
            BadgeError::Database(e) => Self::Database(e),
        }
    }
}

/// 服务层 Result 类型别名
pub type Result<T> = std::result::Result<T, AdminError>;
