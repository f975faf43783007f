//! 徽章类型实体
//!
//! 徽章类型是可复用的徽章模板（如 "WASPY Award Winner"），名称全局唯一。

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 默认图标
pub const DEFAULT_ICON: &str = "🏆";
/// 默认颜色（金色）
pub const DEFAULT_COLOR: &str = "#FFD700";
/// 名称最大长度
pub const NAME_MAX_LEN: u64 = 100;
/// 图标最大长度
pub const ICON_MAX_LEN: u64 = 50;
/// 颜色最大长度
pub const COLOR_MAX_LEN: u64 = 20;

/// 徽章类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BadgeType {
    pub id: i64,
    /// 名称（唯一）
    pub name: String,
    /// 徽章含义说明
    pub description: String,
    /// 图标 class 或 emoji
    pub icon: String,
    /// 颜色（十六进制或 CSS 颜色名）
    pub color: String,
    /// 是否启用
    pub is_active: bool,
    pub nest_created_at: DateTime<Utc>,
    pub nest_updated_at: DateTime<Utc>,
}

impl fmt::Display for BadgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// 徽章类型摘要，用于用户徽章列表中的关联展示
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeTypeSummary {
    pub id: i64,
    pub name: String,
    pub icon: String,
    pub color: String,
}

/// 新建徽章类型参数
///
/// 未指定的字段使用表定义的默认值
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewBadgeType {
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub is_active: Option<bool>,
}

impl NewBadgeType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    pub fn icon(&self) -> &str {
        self.icon.as_deref().unwrap_or(DEFAULT_ICON)
    }

    pub fn color(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_COLOR)
    }

    pub fn is_active(&self) -> bool {
        self.is_active.unwrap_or(true)
    }
}

/// 徽章类型部分更新参数，None 表示保持原值
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BadgeTypeChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_badge_type_defaults() {
        let new = NewBadgeType::new("WASPY Award Winner");
        assert_eq!(new.description(), "");
        assert_eq!(new.icon(), "🏆");
        assert_eq!(new.color(), "#FFD700");
        assert!(new.is_active());
    }

    #[test]
    fn test_new_badge_type_overrides() {
        let new = NewBadgeType {
            name: "Chapter Leader".into(),
            description: Some("Leads a chapter".into()),
            icon: Some("fa-users".into()),
            color: Some("teal".into()),
            is_active: Some(false),
        };
        assert_eq!(new.description(), "Leads a chapter");
        assert_eq!(new.icon(), "fa-users");
        assert_eq!(new.color(), "teal");
        assert!(!new.is_active());
    }

    #[test]
    fn test_display_is_name() {
        let now = Utc::now();
        let badge_type = BadgeType {
            id: 1,
            name: "Project Leader".into(),
            description: String::new(),
            icon: DEFAULT_ICON.into(),
            color: DEFAULT_COLOR.into(),
            is_active: true,
            nest_created_at: now,
            nest_updated_at: now,
        };
        assert_eq!(badge_type.to_string(), "Project Leader");
    }
}
