//! 请求 DTO 定义
//!
//! 请求体不包含只读字段（earned_at、nest_created_at、nest_updated_at），
//! 客户端传入时会被忽略。

use chrono::{DateTime, Utc};
use nest_badges::{
    BadgeTypeChanges, BadgeTypeListQuery, EarnedAtPeriod, NewBadgeType, NewUserBadge,
    OrderingError, UserBadgeChanges, UserBadgeListQuery,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use validator::{Validate, ValidationError};

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("不能为空白".into()));
    }
    Ok(())
}

fn validate_json_object(value: &Value) -> Result<(), ValidationError> {
    if !value.is_object() {
        return Err(ValidationError::new("not_object").with_message("metadata 必须是 JSON 对象".into()));
    }
    Ok(())
}

fn into_object(value: Option<Value>) -> Option<Map<String, Value>> {
    match value {
        Some(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// 创建徽章类型请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBadgeTypeRequest {
    #[validate(
        length(min = 1, max = 100, message = "名称长度必须在1-100个字符之间"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
    pub description: Option<String>,
    #[validate(length(max = 50, message = "图标不能超过50个字符"))]
    pub icon: Option<String>,
    #[validate(length(max = 20, message = "颜色不能超过20个字符"))]
    pub color: Option<String>,
    pub is_active: Option<bool>,
}

impl From<CreateBadgeTypeRequest> for NewBadgeType {
    fn from(req: CreateBadgeTypeRequest) -> Self {
        Self {
            name: req.name.trim().to_string(),
            description: req.description,
            icon: req.icon,
            color: req.color,
            is_active: req.is_active,
        }
    }
}

/// 更新徽章类型请求，未传字段保持原值
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBadgeTypeRequest {
    #[validate(
        length(min = 1, max = 100, message = "名称长度必须在1-100个字符之间"),
        custom(function = "validate_not_blank")
    )]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(length(max = 50, message = "图标不能超过50个字符"))]
    pub icon: Option<String>,
    #[validate(length(max = 20, message = "颜色不能超过20个字符"))]
    pub color: Option<String>,
    pub is_active: Option<bool>,
}

impl From<UpdateBadgeTypeRequest> for BadgeTypeChanges {
    fn from(req: UpdateBadgeTypeRequest) -> Self {
        Self {
            name: req.name.map(|n| n.trim().to_string()),
            description: req.description,
            icon: req.icon,
            color: req.color,
            is_active: req.is_active,
        }
    }
}

/// 创建用户徽章请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserBadgeRequest {
    pub user_id: i64,
    pub badge_type_id: i64,
    pub reason: Option<String>,
    #[validate(custom(function = "validate_json_object"))]
    pub metadata: Option<Value>,
}

impl From<CreateUserBadgeRequest> for NewUserBadge {
    fn from(req: CreateUserBadgeRequest) -> Self {
        let mut new = NewUserBadge::new(req.user_id, req.badge_type_id);
        if let Some(reason) = req.reason {
            new = new.with_reason(reason);
        }
        if let Some(metadata) = into_object(req.metadata) {
            new = new.with_metadata(metadata);
        }
        new
    }
}

/// 更新用户徽章请求，未传字段保持原值
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserBadgeRequest {
    pub user_id: Option<i64>,
    pub badge_type_id: Option<i64>,
    pub reason: Option<String>,
    #[validate(custom(function = "validate_json_object"))]
    pub metadata: Option<Value>,
}

impl From<UpdateUserBadgeRequest> for UserBadgeChanges {
    fn from(req: UpdateUserBadgeRequest) -> Self {
        Self {
            user_id: req.user_id,
            badge_type_id: req.badge_type_id,
            reason: req.reason,
            metadata: into_object(req.metadata),
        }
    }
}

/// 分页查询参数
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    20
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl PaginationParams {
    /// 计算数据库查询的 offset，超大页码饱和到 i64::MAX
    pub fn offset(&self) -> i64 {
        self.page
            .saturating_sub(1)
            .max(0)
            .saturating_mul(self.limit())
    }

    /// 获取限制条数（最大100）
    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, 100)
    }
}

/// 徽章类型列表过滤
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeTypeQueryFilter {
    /// 搜索 name / description
    pub q: Option<String>,
    pub is_active: Option<bool>,
    /// 排序字段，`-` 前缀表示降序
    pub ordering: Option<String>,
}

impl BadgeTypeQueryFilter {
    pub fn into_query(
        self,
        pagination: &PaginationParams,
    ) -> Result<BadgeTypeListQuery, OrderingError> {
        Ok(BadgeTypeListQuery {
            search: self.q.filter(|q| !q.trim().is_empty()),
            is_active: self.is_active,
            ordering: parse_ordering(self.ordering.as_deref())?,
            limit: pagination.limit(),
            offset: pagination.offset(),
        })
    }
}

/// 用户徽章列表过滤
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBadgeQueryFilter {
    /// 搜索 user.login / user.name / badge_type.name / reason
    pub q: Option<String>,
    pub badge_type_id: Option<i64>,
    pub user_id: Option<i64>,
    pub earned_at: Option<EarnedAtPeriod>,
    pub ordering: Option<String>,
}

impl UserBadgeQueryFilter {
    /// `now` 用于计算 earned_at 过滤区间
    pub fn into_query(
        self,
        pagination: &PaginationParams,
        now: DateTime<Utc>,
    ) -> Result<UserBadgeListQuery, OrderingError> {
        Ok(UserBadgeListQuery {
            search: self.q.filter(|q| !q.trim().is_empty()),
            badge_type_id: self.badge_type_id,
            user_id: self.user_id,
            earned_at: self.earned_at.map(|period| period.range(now)),
            ordering: parse_ordering(self.ordering.as_deref())?,
            limit: pagination.limit(),
            offset: pagination.offset(),
        })
    }
}

/// 空值使用面板默认排序
fn parse_ordering<T>(raw: Option<&str>) -> Result<T, OrderingError>
where
    T: std::str::FromStr<Err = OrderingError> + Default,
{
    match raw.map(str::trim) {
        None | Some("") => Ok(T::default()),
        Some(s) => s.parse(),
    }
}

/// 自动补全查询参数
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutocompleteParams {
    #[serde(default)]
    pub term: String,
    #[serde(default = "default_autocomplete_limit")]
    pub limit: i64,
}

fn default_autocomplete_limit() -> i64 {
    20
}

impl AutocompleteParams {
    pub fn limit(&self) -> i64 {
        self.limit.clamp(1, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use nest_badges::{BadgeTypeSortField, Ordering, UserBadgeSortField};
    use serde_json::json;

    #[test]
    fn test_create_badge_type_validation() {
        let req: CreateBadgeTypeRequest = serde_json::from_value(json!({
            "name": "WASPY Award Winner",
            "icon": "fa-trophy"
        }))
        .unwrap();
        assert!(req.validate().is_ok());

        let new: NewBadgeType = req.into();
        assert_eq!(new.icon(), "fa-trophy");
        assert_eq!(new.color(), "#FFD700");

        let too_long: CreateBadgeTypeRequest =
            serde_json::from_value(json!({ "name": "x".repeat(101) })).unwrap();
        assert!(too_long.validate().is_err());

        let blank: CreateBadgeTypeRequest =
            serde_json::from_value(json!({ "name": "   " })).unwrap();
        assert!(blank.validate().is_err());

        let long_color: CreateBadgeTypeRequest = serde_json::from_value(json!({
            "name": "Mentor",
            "color": "c".repeat(21)
        }))
        .unwrap();
        let errors = long_color.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("color"));
    }

    #[test]
    fn test_update_badge_type_partial() {
        let req: UpdateBadgeTypeRequest =
            serde_json::from_value(json!({ "isActive": false })).unwrap();
        assert!(req.validate().is_ok());
        let changes: BadgeTypeChanges = req.into();
        assert_eq!(changes.is_active, Some(false));
        assert!(changes.name.is_none());
    }

    #[test]
    fn test_user_badge_request_ignores_readonly_fields() {
        let req: UpdateUserBadgeRequest = serde_json::from_value(json!({
            "reason": "keynote",
            "earnedAt": "2020-01-01T00:00:00Z",
            "nestCreatedAt": "2020-01-01T00:00:00Z"
        }))
        .unwrap();
        let changes: UserBadgeChanges = req.into();
        assert_eq!(
            changes,
            UserBadgeChanges {
                reason: Some("keynote".into()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_metadata_must_be_object() {
        let req: CreateUserBadgeRequest = serde_json::from_value(json!({
            "userId": 1,
            "badgeTypeId": 2,
            "metadata": ["not", "an", "object"]
        }))
        .unwrap();
        assert!(req.validate().is_err());

        let req: CreateUserBadgeRequest = serde_json::from_value(json!({
            "userId": 1,
            "badgeTypeId": 2,
            "metadata": { "year": 2024 }
        }))
        .unwrap();
        assert!(req.validate().is_ok());
        let new: NewUserBadge = req.into();
        assert_eq!(new.metadata["year"], 2024);
        assert_eq!(new.reason, "");
    }

    #[test]
    fn test_pagination_params() {
        let p = PaginationParams { page: 3, page_size: 10 };
        assert_eq!(p.offset(), 20);
        assert_eq!(p.limit(), 10);

        let p = PaginationParams { page: 0, page_size: 1000 };
        assert_eq!(p.offset(), 0);
        assert_eq!(p.limit(), 100);
    }

    #[test]
    fn test_pagination_extreme_pages_do_not_overflow() {
        let p = PaginationParams { page: i64::MAX, page_size: 20 };
        assert_eq!(p.offset(), i64::MAX);

        let p = PaginationParams { page: i64::MIN, page_size: 20 };
        assert_eq!(p.offset(), 0);

        let p = PaginationParams { page: i64::MAX / 20 + 1, page_size: 20 };
        assert_eq!(p.offset(), i64::MAX);
    }

    #[test]
    fn test_badge_type_filter_into_query() {
        let filter = BadgeTypeQueryFilter {
            q: Some("  ".into()),
            is_active: Some(true),
            ordering: Some("-nest_updated_at".into()),
        };
        let query = filter.into_query(&PaginationParams::default()).unwrap();
        assert_eq!(query.search, None);
        assert_eq!(query.is_active, Some(true));
        assert_eq!(query.ordering, Ordering::desc(BadgeTypeSortField::UpdatedAt));
        assert_eq!(query.limit, 20);

        let filter = BadgeTypeQueryFilter {
            ordering: Some("secret".into()),
            ..Default::default()
        };
        assert!(filter.into_query(&PaginationParams::default()).is_err());
    }

    #[test]
    fn test_user_badge_filter_into_query() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let filter = UserBadgeQueryFilter {
            earned_at: Some(EarnedAtPeriod::ThisMonth),
            badge_type_id: Some(4),
            ..Default::default()
        };
        let query = filter.into_query(&PaginationParams::default(), now).unwrap();
        let range = query.earned_at.unwrap();
        assert_eq!(range.start, Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
        assert_eq!(range.end, Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap());
        assert_eq!(query.badge_type_id, Some(4));
        assert_eq!(query.ordering, Ordering::desc(UserBadgeSortField::EarnedAt));
    }
}
