//! 用户徽章实体
//!
//! 记录某个用户获得的某类徽章。同一用户同一类型最多一条，
//! earned_at 由数据库在创建时写入，之后不可修改。

use std::fmt;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::badge_type::BadgeTypeSummary;
use super::user::UserSummary;

/// 徽章展示名："{徽章类型名} ({获得年份})"
pub fn display_name(badge_type_name: &str, earned_at: DateTime<Utc>) -> String {
    format!("{} ({})", badge_type_name, earned_at.year())
}

/// 用户徽章（携带关联的用户与徽章类型摘要）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBadge {
    pub id: i64,
    pub user: UserSummary,
    pub badge_type: BadgeTypeSummary,
    /// 获得时间（只读）
    pub earned_at: DateTime<Utc>,
    /// 获得原因或上下文
    pub reason: String,
    /// 附加信息（如奖项详情），始终为 JSON 对象
    pub metadata: Value,
    pub nest_created_at: DateTime<Utc>,
    pub nest_updated_at: DateTime<Utc>,
}

impl UserBadge {
    pub fn display_name(&self) -> String {
        display_name(&self.badge_type.name, self.earned_at)
    }
}

impl fmt::Display for UserBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.user.login, self.badge_type.name)
    }
}

/// 新建用户徽章参数
#[derive(Debug, Clone, PartialEq)]
pub struct NewUserBadge {
    pub user_id: i64,
    pub badge_type_id: i64,
    pub reason: String,
    pub metadata: Map<String, Value>,
}

impl NewUserBadge {
    pub fn new(user_id: i64, badge_type_id: i64) -> Self {
        Self {
            user_id,
            badge_type_id,
            reason: String::new(),
            metadata: Map::new(),
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }
}

/// 用户徽章部分更新参数
///
/// 不包含 earned_at：获得时间只在创建时写入
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserBadgeChanges {
    pub user_id: Option<i64>,
    pub badge_type_id: Option<i64>,
    pub reason: Option<String>,
    pub metadata: Option<Map<String, Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample(earned_at: DateTime<Utc>) -> UserBadge {
        UserBadge {
            id: 7,
            user: UserSummary {
                id: 1,
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
            reason: "Outstanding contribution".into(),
            metadata: json!({"award": "WASPY"}),
            nest_created_at: earned_at,
            nest_updated_at: earned_at,
        }
    }

    #[test]
    fn test_display_name_uses_earned_year() {
        let earned_at = Utc.with_ymd_and_hms(2024, 11, 3, 12, 0, 0).unwrap();
        assert_eq!(display_name("X", earned_at), "X (2024)");
        assert_eq!(sample(earned_at).display_name(), "WASPY Award Winner (2024)");
    }

    #[test]
    fn test_display_name_at_year_boundary() {
        let earned_at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(display_name("Chapter Leader", earned_at), "Chapter Leader (2025)");
    }

    #[test]
    fn test_display_is_login_and_badge_type() {
        let badge = sample(Utc::now());
        assert_eq!(badge.to_string(), "arkid15r - WASPY Award Winner");
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(sample(Utc::now())).unwrap();
        assert!(value.get("earnedAt").is_some());
        assert_eq!(value["badgeType"]["name"], "WASPY Award Winner");
        assert_eq!(value["user"]["login"], "arkid15r");
    }

    #[test]
    fn test_new_user_badge_builder() {
        let mut metadata = Map::new();
        metadata.insert("year".into(), json!(2024));
        let new = NewUserBadge::new(1, 2)
            .with_reason("Won the award")
            .with_metadata(metadata.clone());
        assert_eq!(new.reason, "Won the award");
        assert_eq!(new.metadata, metadata);
        assert_eq!(NewUserBadge::new(1, 2).metadata, Map::new());
    }
}
