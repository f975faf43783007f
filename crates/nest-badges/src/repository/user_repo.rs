//! 用户仓储（只读）
//!
//! 供用户徽章表单的用户选择器使用。

use async_trait::async_trait;
use sqlx::PgPool;

use super::traits::UserRepositoryTrait;
use crate::error::Result;
use crate::models::{User, escape_like};

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn get(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, login, name, nest_created_at, nest_updated_at
            FROM github_users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// 按 login 或 name 模糊匹配，login 前缀命中的排在前面
    async fn autocomplete(&self, term: &str, limit: i64) -> Result<Vec<User>> {
        let escaped = escape_like(term.trim());
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, login, name, nest_created_at, nest_updated_at
            FROM github_users
            WHERE login ILIKE $1 OR name ILIKE $1
            ORDER BY (login ILIKE $2) DESC, login ASC
            LIMIT $3
            "#,
        )
        .bind(format!("%{}%", escaped))
        .bind(format!("{}%", escaped))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}
