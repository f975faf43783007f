//! GitHub 用户
//!
//! 用户记录由 GitHub 同步模块维护，这里只读。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub login: String,
    pub name: String,
    pub nest_created_at: DateTime<Utc>,
    pub nest_updated_at: DateTime<Utc>,
}

/// 用户摘要，用于用户徽章列表中的关联展示
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i64,
    pub login: String,
    pub name: String,
}
