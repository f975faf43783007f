//! 响应 DTO 定义

use nest_badges::{BadgeType, Page, User, UserBadge};

use crate::admin::ModelAdmin;
use serde::Serialize;

/// 分页响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl<T> PageResponse<T> {
    /// 创建分页响应
    pub fn new(items: Vec<T>, total: i64, page: i64, page_size: i64) -> Self {
        let total_pages = if page_size > 0 {
            (total + page_size - 1) / page_size
        } else {
            0
        };

        Self {
            items,
            total,
            page,
            page_size,
            total_pages,
        }
    }

    /// 由仓储分页结果构造
    pub fn from_page<U>(page: Page<U>, page_no: i64, page_size: i64) -> Self
    where
        T: From<U>,
    {
        let total = page.total;
        let items = page.items.into_iter().map(T::from).collect();
        Self::new(items, total, page_no, page_size)
    }
}

/// API 统一响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: "SUCCESS".to_string(),
            message: "操作成功".to_string(),
            data: Some(data),
        }
    }
}

/// 用户徽章响应，附带展示名
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBadgeDto {
    #[serde(flatten)]
    pub badge: UserBadge,
    /// "{徽章类型名} ({获得年份})"
    pub display_name: String,
}

impl From<UserBadge> for UserBadgeDto {
    fn from(badge: UserBadge) -> Self {
        Self {
            display_name: badge.display_name(),
            badge,
        }
    }
}

/// 面板配置，附带表单中可提交的字段
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelDto {
    #[serde(flatten)]
    pub panel: ModelAdmin,
    pub editable_fields: Vec<&'static str>,
}

impl From<ModelAdmin> for PanelDto {
    fn from(panel: ModelAdmin) -> Self {
        Self {
            editable_fields: panel.editable_fields(),
            panel,
        }
    }
}

/// 自动补全选项
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutocompleteItem {
    pub id: i64,
    pub text: String,
}

impl From<BadgeType> for AutocompleteItem {
    fn from(badge_type: BadgeType) -> Self {
        Self {
            id: badge_type.id,
            text: badge_type.name,
        }
    }
}

impl From<User> for AutocompleteItem {
    fn from(user: User) -> Self {
        let text = if user.name.is_empty() {
            user.login
        } else {
            format!("{} ({})", user.login, user.name)
        };
        Self { id: user.id, text }
    }
}

/// 删除成功响应
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedResponse {
    pub deleted: bool,
}

impl DeletedResponse {
    pub fn success() -> Self {
        Self { deleted: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use nest_badges::{BadgeTypeSummary, UserSummary};
    use serde_json::json;

    #[test]
    fn test_page_response_total_pages() {
        let page: PageResponse<i64> = PageResponse::new(vec![1, 2], 45, 1, 20);
        assert_eq!(page.total_pages, 3);

        let page: PageResponse<i64> = PageResponse::new(vec![], 0, 1, 20);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_api_response_serialization() {
        let json = serde_json::to_value(ApiResponse::success(DeletedResponse::success())).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["code"], "SUCCESS");
        assert_eq!(json["data"]["deleted"], true);
    }

    #[test]
    fn test_user_badge_dto_flattens_and_adds_display_name() {
        let earned_at = Utc.with_ymd_and_hms(2023, 11, 2, 9, 0, 0).unwrap();
        let badge = UserBadge {
            id: 1,
            user: UserSummary {
                id: 2,
                login: "arkid15r".into(),
                name: "Arkadii".into(),
            },
            badge_type: BadgeTypeSummary {
                id: 3,
                name: "WASPY Award Winner".into(),
                icon: "🏆".into(),
                color: "#FFD700".into(),
            },
            earned_at,
            reason: String::new(),
            metadata: json!({}),
            nest_created_at: earned_at,
            nest_updated_at: earned_at,
        };

        let json = serde_json::to_value(UserBadgeDto::from(badge)).unwrap();
        assert_eq!(json["displayName"], "WASPY Award Winner (2023)");
        assert_eq!(json["user"]["login"], "arkid15r");
        assert_eq!(json["badgeType"]["id"], 3);
        assert!(json.get("earnedAt").is_some());
    }

    #[test]
    fn test_autocomplete_item_from_user() {
        let now = Utc::now();
        let user = User {
            id: 5,
            login: "kasya".into(),
            name: String::new(),
            nest_created_at: now,
            nest_updated_at: now,
        };
        assert_eq!(AutocompleteItem::from(user.clone()).text, "kasya");

        let named = User {
            name: "Kate".into(),
            ..user
        };
        assert_eq!(AutocompleteItem::from(named).text, "kasya (Kate)");
    }
}
