//! 领域模型
//!
//! - `badge_type`: 徽章类型及其写入参数
//! - `user_badge`: 用户徽章、关联展示信息及写入参数
//! - `user`: GitHub 用户（只读）
//! - `query`: 列表查询条件（过滤、搜索、排序、分页）

mod badge_type;
mod query;
mod user;
mod user_badge;

pub use badge_type::{
    BadgeType, BadgeTypeChanges, BadgeTypeSummary, COLOR_MAX_LEN, DEFAULT_COLOR, DEFAULT_ICON,
    ICON_MAX_LEN, NAME_MAX_LEN, NewBadgeType,
};
pub use query::{
    BadgeTypeListQuery, BadgeTypeSortField, EarnedAtPeriod, Ordering, OrderingError, Page,
    SortDirection, SortField, TimeRange, UserBadgeListQuery, UserBadgeSortField, escape_like,
    like_pattern, search_terms,
};
pub use user::{User, UserSummary};
pub use user_badge::{NewUserBadge, UserBadge, UserBadgeChanges, display_name};
