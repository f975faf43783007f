//! 徽章数据层错误类型
//!
//! 存储层的完整性冲突（唯一约束、外键、非空）按约束名归类成具体变体，
//! 其余数据库错误原样透传。

use thiserror::Error;

/// 唯一约束：徽章类型名称
pub const BADGE_TYPE_NAME_CONSTRAINT: &str = "nest_badge_types_name_key";
/// 唯一约束：同一用户同一徽章类型
pub const USER_BADGE_UNIQUE_CONSTRAINT: &str = "unique_user_badge_type";
/// 外键：用户徽章 -> 用户
pub const USER_BADGE_USER_FK: &str = "nest_user_badges_user_id_fkey";
/// 外键：用户徽章 -> 徽章类型
pub const USER_BADGE_TYPE_FK: &str = "nest_user_badges_badge_type_id_fkey";

/// 徽章数据层错误类型
#[derive(Debug, Error)]
pub enum BadgeError {
    // === 记录不存在 ===
    #[error("徽章类型不存在: {0}")]
    BadgeTypeNotFound(i64),

    #[error("用户徽章不存在: {0}")]
    UserBadgeNotFound(i64),

    // === 完整性冲突 ===
    #[error("徽章类型名称已存在: {0}")]
    DuplicateBadgeTypeName(String),

    #[error("该用户已拥有此类型的徽章")]
    DuplicateUserBadge,

    #[error("引用的{entity}不存在: {id}")]
    MissingReference { entity: &'static str, id: i64 },

    // === 参数错误 ===
    #[error("参数校验失败: {0}")]
    Validation(String),

    // === 系统错误 ===
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, BadgeError>;

/// 存储层约束冲突分类
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    Unique(String),
    ForeignKey(String),
    NotNull(String),
    Check(String),
}

/// 从 sqlx 错误中识别约束冲突，非约束类错误返回 None
pub fn violation_of(err: &sqlx::Error) -> Option<Violation> {
    use sqlx::error::ErrorKind;

    let sqlx::Error::Database(db_err) = err else {
        return None;
    };
    let constraint = db_err.constraint().unwrap_or_default().to_string();

    match db_err.kind() {
        ErrorKind::UniqueViolation => Some(Violation::Unique(constraint)),
        ErrorKind::ForeignKeyViolation => Some(Violation::ForeignKey(constraint)),
        ErrorKind::NotNullViolation => Some(Violation::NotNull(constraint)),
        ErrorKind::CheckViolation => Some(Violation::Check(constraint)),
        _ => None,
    }
}

impl BadgeError {
    /// 归类徽章类型写入时的数据库错误
    pub fn from_badge_type_write(err: sqlx::Error, name: Option<&str>) -> Self {
        match violation_of(&err) {
            Some(Violation::Unique(c)) if c == BADGE_TYPE_NAME_CONSTRAINT => {
                Self::DuplicateBadgeTypeName(name.unwrap_or_default().to_string())
            }
            Some(Violation::NotNull(_)) | Some(Violation::Check(_)) => {
                Self::Validation(err.to_string())
            }
            _ => Self::Database(err),
        }
    }

    /// 归类用户徽章写入时的数据库错误
    ///
    /// `user_id` / `badge_type_id` 为本次写入引用的 ID，用于外键冲突时的提示
    pub fn from_user_badge_write(
        err: sqlx::Error,
        user_id: Option<i64>,
        badge_type_id: Option<i64>,
    ) -> Self {
        match violation_of(&err) {
            Some(Violation::Unique(c)) if c == USER_BADGE_UNIQUE_CONSTRAINT => {
                Self::DuplicateUserBadge
            }
            Some(Violation::ForeignKey(c)) if c == USER_BADGE_USER_FK => Self::MissingReference {
                entity: "用户",
                id: user_id.unwrap_or_default(),
            },
            Some(Violation::ForeignKey(c)) if c == USER_BADGE_TYPE_FK => Self::MissingReference {
                entity: "徽章类型",
                id: badge_type_id.unwrap_or_default(),
            },
            Some(Violation::NotNull(_)) | Some(Violation::Check(_)) => {
                Self::Validation(err.to_string())
            }
            _ => Self::Database(err),
        }
    }
}
