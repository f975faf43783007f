//! 基础设施错误类型
//!
//! 只覆盖配置加载、数据库连接和迁移等与业务无关的错误，
//! 业务错误由各 crate 自行定义。

use thiserror::Error;

/// 基础设施错误
#[derive(Debug, Error)]
pub enum SharedError {
    #[error("配置错误: {0}")]
    Config(#[from] config::ConfigError),

    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("数据库迁移失败: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, SharedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions_keep_source_message() {
        let err: SharedError = config::ConfigError::NotFound("server.port".into()).into();
        assert!(matches!(err, SharedError::Config(_)));
        assert!(err.to_string().starts_with("配置错误"));

        let err: SharedError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, SharedError::Database(_)));
        assert!(err.to_string().starts_with("数据库错误"));
    }
}
