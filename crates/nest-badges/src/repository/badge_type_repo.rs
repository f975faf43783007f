//! 徽章类型仓储
//!
//! 名称唯一性由 `nest_badge_types_name_key` 约束保证；删除时由外键级联删除用户徽章。

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

use super::traits::BadgeTypeRepositoryTrait;
use crate::error::{BadgeError, Result};
use crate::models::{
    BadgeType, BadgeTypeChanges, BadgeTypeListQuery, NewBadgeType, Page, like_pattern,
    search_terms,
};

const BADGE_TYPE_COLUMNS: &str = r#"
    bt.id, bt.name, bt.description, bt.icon, bt.color, bt.is_active,
    bt.nest_created_at, bt.nest_updated_at
"#;

/// 列表查询结果行（带窗口函数统计的总数）
#[derive(sqlx::FromRow)]
struct BadgeTypeListRow {
    #[sqlx(flatten)]
    badge_type: BadgeType,
    total_count: i64,
}

/// 追加过滤与搜索条件（列表与计数共用）
fn push_filters(qb: &mut QueryBuilder<'static, Postgres>, query: &BadgeTypeListQuery) {
    qb.push(" WHERE TRUE");

    if let Some(is_active) = query.is_active {
        qb.push(" AND bt.is_active = ").push_bind(is_active);
    }

    for term in query.search.as_deref().map(search_terms).unwrap_or_default() {
        let pattern = like_pattern(&term);
        qb.push(" AND (bt.name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR bt.description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

/// 构建列表查询语句
pub(crate) fn build_list_query(query: &BadgeTypeListQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!(
        "SELECT {}, COUNT(*) OVER() AS total_count FROM nest_badge_types bt",
        BADGE_TYPE_COLUMNS
    ));
    push_filters(&mut qb, query);
    qb.push(" ORDER BY ").push(query.ordering.to_sql());
    qb.push(" LIMIT ").push_bind(query.limit);
    qb.push(" OFFSET ").push_bind(query.offset);
    qb
}

/// 徽章类型仓储
pub struct BadgeTypeRepository {
    pool: PgPool,
}

impl BadgeTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 仅统计总数，用于页码越界时补全 total
    async fn count(&self, query: &BadgeTypeListQuery) -> Result<i64> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM nest_badge_types bt");
        push_filters(&mut qb, query);
        let total: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(total)
    }
}

#[async_trait]
impl BadgeTypeRepositoryTrait for BadgeTypeRepository {
    async fn create(&self, new: &NewBadgeType) -> Result<BadgeType> {
        let badge_type = sqlx::query_as::<_, BadgeType>(
            r#"
            INSERT INTO nest_badge_types AS bt (name, description, icon, color, is_active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING bt.id, bt.name, bt.description, bt.icon, bt.color, bt.is_active,
                      bt.nest_created_at, bt.nest_updated_at
            "#,
        )
        .bind(&new.name)
        .bind(new.description())
        .bind(new.icon())
        .bind(new.color())
        .bind(new.is_active())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| BadgeError::from_badge_type_write(e, Some(&new.name)))?;

        debug!(badge_type_id = badge_type.id, name = %badge_type.name, "Badge type inserted");
        Ok(badge_type)
    }

    async fn get(&self, id: i64) -> Result<Option<BadgeType>> {
        let sql = format!(
            "SELECT {} FROM nest_badge_types bt WHERE bt.id = $1",
            BADGE_TYPE_COLUMNS
        );
        let badge_type = sqlx::query_as::<_, BadgeType>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(badge_type)
    }

    async fn update(&self, id: i64, changes: &BadgeTypeChanges) -> Result<BadgeType> {
        let badge_type = sqlx::query_as::<_, BadgeType>(
            r#"
            UPDATE nest_badge_types AS bt
            SET
                name = COALESCE($2, bt.name),
                description = COALESCE($3, bt.description),
                icon = COALESCE($4, bt.icon),
                color = COALESCE($5, bt.color),
                is_active = COALESCE($6, bt.is_active),
                nest_updated_at = NOW()
            WHERE bt.id = $1
            RETURNING bt.id, bt.name, bt.description, bt.icon, bt.color, bt.is_active,
                      bt.nest_created_at, bt.nest_updated_at
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(&changes.icon)
        .bind(&changes.color)
        .bind(changes.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BadgeError::from_badge_type_write(e, changes.name.as_deref()))?
        .ok_or(BadgeError::BadgeTypeNotFound(id))?;

        Ok(badge_type)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM nest_badge_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, query: &BadgeTypeListQuery) -> Result<Page<BadgeType>> {
        let rows = build_list_query(query)
            .build_query_as::<BadgeTypeListRow>()
            .fetch_all(&self.pool)
            .await?;

        let Some(total) = rows.first().map(|r| r.total_count) else {
            // 当前页为空时窗口函数拿不到总数，页码越界才需要单独计数
            let total = if query.offset > 0 {
                self.count(query).await?
            } else {
                0
            };
            return Ok(Page::new(Vec::new(), total));
        };

        let items = rows.into_iter().map(|r| r.badge_type).collect();
        Ok(Page::new(items, total))
    }

    async fn autocomplete(&self, term: &str, limit: i64) -> Result<Vec<BadgeType>> {
        let sql = format!(
            r#"
            SELECT {} FROM nest_badge_types bt
            WHERE bt.name ILIKE $1 OR bt.description ILIKE $1
            ORDER BY bt.name ASC
            LIMIT $2
            "#,
            BADGE_TYPE_COLUMNS
        );
        let badge_types = sqlx::query_as::<_, BadgeType>(&sql)
            .bind(like_pattern(term.trim()))
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(badge_types)
    }
}
