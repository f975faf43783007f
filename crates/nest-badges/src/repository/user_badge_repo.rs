//! 用户徽章仓储
//!
//! 所有读取语句都在同一条 SQL 里关联 github_users 与 nest_badge_types，
//! 列表页不会为每一行再单独查询用户或徽章类型。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

use super::traits::UserBadgeRepositoryTrait;
use crate::error::{BadgeError, Result};
use crate::models::{
    BadgeTypeSummary, NewUserBadge, Page, UserBadge, UserBadgeChanges, UserBadgeListQuery,
    UserSummary, like_pattern, search_terms,
};

/// 用户徽章 + 关联用户/徽章类型的查询列
const USER_BADGE_COLUMNS: &str = r#"
    ub.id,
    ub.user_id,
    u.login AS user_login,
    u.name AS user_name,
    ub.badge_type_id,
    bt.name AS badge_type_name,
    bt.icon AS badge_type_icon,
    bt.color AS badge_type_color,
    ub.earned_at,
    ub.reason,
    ub.metadata,
    ub.nest_created_at,
    ub.nest_updated_at
"#;

/// 关联用户与徽章类型
const USER_BADGE_JOINS: &str = r#"
    JOIN github_users u ON u.id = ub.user_id
    JOIN nest_badge_types bt ON bt.id = ub.badge_type_id
"#;

/// 用户徽章查询结果行（已展开关联字段）
#[derive(sqlx::FromRow)]
struct UserBadgeRow {
    id: i64,
    user_id: i64,
    user_login: String,
    user_name: String,
    badge_type_id: i64,
    badge_type_name: String,
    badge_type_icon: String,
    badge_type_color: String,
    earned_at: DateTime<Utc>,
    reason: String,
    metadata: Value,
    nest_created_at: DateTime<Utc>,
    nest_updated_at: DateTime<Utc>,
}

impl From<UserBadgeRow> for UserBadge {
    fn from(row: UserBadgeRow) -> Self {
        Self {
            id: row.id,
            user: UserSummary {
                id: row.user_id,
                login: row.user_login,
                name: row.user_name,
            },
            badge_type: BadgeTypeSummary {
                id: row.badge_type_id,
                name: row.badge_type_name,
                icon: row.badge_type_icon,
                color: row.badge_type_color,
            },
            earned_at: row.earned_at,
            reason: row.reason,
            metadata: row.metadata,
            nest_created_at: row.nest_created_at,
            nest_updated_at: row.nest_updated_at,
        }
    }
}

/// 列表查询结果行（带窗口函数统计的总数）
#[derive(sqlx::FromRow)]
struct UserBadgeListRow {
    #[sqlx(flatten)]
    row: UserBadgeRow,
    total_count: i64,
}

/// 追加过滤与搜索条件（列表与计数共用）
fn push_filters(qb: &mut QueryBuilder<'static, Postgres>, query: &UserBadgeListQuery) {
    qb.push(" WHERE TRUE");

    if let Some(badge_type_id) = query.badge_type_id {
        qb.push(" AND ub.badge_type_id = ").push_bind(badge_type_id);
    }
    if let Some(user_id) = query.user_id {
        qb.push(" AND ub.user_id = ").push_bind(user_id);
    }
    if let Some(range) = query.earned_at {
        qb.push(" AND ub.earned_at >= ").push_bind(range.start);
        qb.push(" AND ub.earned_at < ").push_bind(range.end);
    }

    for term in query.search.as_deref().map(search_terms).unwrap_or_default() {
        let pattern = like_pattern(&term);
        qb.push(" AND (u.login ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR u.name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR bt.name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR ub.reason ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

/// 构建列表查询语句：一条 SQL 同时取回用户、徽章类型与总数
pub(crate) fn build_list_query(query: &UserBadgeListQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!(
        "SELECT {}, COUNT(*) OVER() AS total_count FROM nest_user_badges ub {}",
        USER_BADGE_COLUMNS, USER_BADGE_JOINS
    ));
    push_filters(&mut qb, query);
    qb.push(" ORDER BY ").push(query.ordering.to_sql());
    qb.push(" LIMIT ").push_bind(query.limit);
    qb.push(" OFFSET ").push_bind(query.offset);
    qb
}

/// 用户徽章仓储
pub struct UserBadgeRepository {
    pool: PgPool,
}

impl UserBadgeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 仅统计总数，用于页码越界时补全 total
    async fn count(&self, query: &UserBadgeListQuery) -> Result<i64> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT COUNT(*) FROM nest_user_badges ub {}",
            USER_BADGE_JOINS
        ));
        push_filters(&mut qb, query);
        let total: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(total)
    }
}

#[async_trait]
impl UserBadgeRepositoryTrait for UserBadgeRepository {
    /// 创建用户徽章，earned_at 由数据库默认值写入
    async fn create(&self, new: &NewUserBadge) -> Result<UserBadge> {
        let sql = format!(
            r#"
            WITH ub AS (
                INSERT INTO nest_user_badges (user_id, badge_type_id, reason, metadata)
                VALUES ($1, $2, $3, $4)
                RETURNING *
            )
            SELECT {} FROM ub {}
            "#,
            USER_BADGE_COLUMNS, USER_BADGE_JOINS
        );

        let row = sqlx::query_as::<_, UserBadgeRow>(&sql)
            .bind(new.user_id)
            .bind(new.badge_type_id)
            .bind(&new.reason)
            .bind(Value::Object(new.metadata.clone()))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                BadgeError::from_user_badge_write(e, Some(new.user_id), Some(new.badge_type_id))
            })?;

        debug!(
            user_badge_id = row.id,
            user_id = new.user_id,
            badge_type_id = new.badge_type_id,
            "User badge inserted"
        );
        Ok(row.into())
    }

    async fn get(&self, id: i64) -> Result<Option<UserBadge>> {
        let sql = format!(
            "SELECT {} FROM nest_user_badges ub {} WHERE ub.id = $1",
            USER_BADGE_COLUMNS, USER_BADGE_JOINS
        );
        let row = sqlx::query_as::<_, UserBadgeRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// 部分更新；earned_at 不在可更新字段中
    async fn update(&self, id: i64, changes: &UserBadgeChanges) -> Result<UserBadge> {
        let sql = format!(
            r#"
            WITH ub AS (
                UPDATE nest_user_badges
                SET
                    user_id = COALESCE($2, user_id),
                    badge_type_id = COALESCE($3, badge_type_id),
                    reason = COALESCE($4, reason),
                    metadata = COALESCE($5, metadata),
                    nest_updated_at = NOW()
                WHERE id = $1
                RETURNING *
            )
            SELECT {} FROM ub {}
            "#,
            USER_BADGE_COLUMNS, USER_BADGE_JOINS
        );

        let row = sqlx::query_as::<_, UserBadgeRow>(&sql)
            .bind(id)
            .bind(changes.user_id)
            .bind(changes.badge_type_id)
            .bind(&changes.reason)
            .bind(changes.metadata.clone().map(Value::Object))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                BadgeError::from_user_badge_write(e, changes.user_id, changes.badge_type_id)
            })?
            .ok_or(BadgeError::UserBadgeNotFound(id))?;

        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM nest_user_badges WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, query: &UserBadgeListQuery) -> Result<Page<UserBadge>> {
        let rows = build_list_query(query)
            .build_query_as::<UserBadgeListRow>()
            .fetch_all(&self.pool)
            .await?;

        let Some(total) = rows.first().map(|r| r.total_count) else {
            let total = if query.offset > 0 {
                self.count(query).await?
            } else {
                0
            };
            return Ok(Page::new(Vec::new(), total));
        };

        let items = rows.into_iter().map(|r| r.row.into()).collect();
        Ok(Page::new(items, total))
    }
}
