//! 列表查询条件
//!
//! 管理后台列表页的过滤、搜索、排序与分页参数。排序字段使用白名单枚举，
//! 只有列表展示列可以排序，拼接进 SQL 的列名全部来自这里的常量。

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 分页结果
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64) -> Self {
        Self { items, total }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

// ==================== 排序 ====================

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// 可排序字段
pub trait SortField: Sized + Copy {
    /// 按 admin 字段名解析（如 "earned_at"、"nest_created_at"）
    fn from_name(name: &str) -> Option<Self>;
    /// admin 字段名
    fn name(&self) -> &'static str;
    /// 对应的 SQL 列（带表别名）
    fn column(&self) -> &'static str;
    /// 保证分页稳定的兜底排序列
    fn tiebreak() -> &'static str;
    /// 面板默认排序
    fn default_ordering() -> Ordering<Self>;
}

/// 排序参数解析错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("不支持的排序字段: {0}")]
pub struct OrderingError(pub String);

/// 排序：字段 + 方向，字符串形式与 admin 一致（"-earned_at" 表示降序）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ordering<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: SortField> Ordering<F> {
    pub fn asc(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }

    /// 生成 ORDER BY 子句内容（不含关键字）
    pub fn to_sql(&self) -> String {
        let dir = self.direction.as_sql();
        format!("{} {}, {} {}", self.field.column(), dir, F::tiebreak(), dir)
    }
}

impl<F: SortField> Default for Ordering<F> {
    fn default() -> Self {
        F::default_ordering()
    }
}

impl<F: SortField> FromStr for Ordering<F> {
    type Err = OrderingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (direction, name) = match s.strip_prefix('-') {
            Some(rest) => (SortDirection::Desc, rest),
            None => (SortDirection::Asc, s),
        };
        let field = F::from_name(name).ok_or_else(|| OrderingError(s.to_string()))?;
        Ok(Self { field, direction })
    }
}

impl<F: SortField> fmt::Display for Ordering<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.direction == SortDirection::Desc {
            f.write_str("-")?;
        }
        f.write_str(self.field.name())
    }
}

/// 徽章类型列表可排序字段（与列表展示列一致）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTypeSortField {
    Name,
    Description,
    Icon,
    Color,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

impl SortField for BadgeTypeSortField {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "name" => Self::Name,
            "description" => Self::Description,
            "icon" => Self::Icon,
            "color" => Self::Color,
            "is_active" => Self::IsActive,
            "nest_created_at" => Self::CreatedAt,
            "nest_updated_at" => Self::UpdatedAt,
            _ => return None,
        })
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Icon => "icon",
            Self::Color => "color",
            Self::IsActive => "is_active",
            Self::CreatedAt => "nest_created_at",
            Self::UpdatedAt => "nest_updated_at",
        }
    }

    fn column(&self) -> &'static str {
        match self {
            Self::Name => "bt.name",
            Self::Description => "bt.description",
            Self::Icon => "bt.icon",
            Self::Color => "bt.color",
            Self::IsActive => "bt.is_active",
            Self::CreatedAt => "bt.nest_created_at",
            Self::UpdatedAt => "bt.nest_updated_at",
        }
    }

    fn tiebreak() -> &'static str {
        "bt.id"
    }

    fn default_ordering() -> Ordering<Self> {
        Ordering::asc(Self::Name)
    }
}

/// 用户徽章列表可排序字段（与列表展示列一致）
///
/// user / badge_type 两个外键列按关联记录的展示文本排序
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserBadgeSortField {
    User,
    BadgeType,
    EarnedAt,
    Reason,
    CreatedAt,
}

impl SortField for UserBadgeSortField {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "user" => Self::User,
            "badge_type" => Self::BadgeType,
            "earned_at" => Self::EarnedAt,
            "reason" => Self::Reason,
            "nest_created_at" => Self::CreatedAt,
            _ => return None,
        })
    }

    fn name(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::BadgeType => "badge_type",
            Self::EarnedAt => "earned_at",
            Self::Reason => "reason",
            Self::CreatedAt => "nest_created_at",
        }
    }

    fn column(&self) -> &'static str {
        match self {
            Self::User => "u.login",
            Self::BadgeType => "bt.name",
            Self::EarnedAt => "ub.earned_at",
            Self::Reason => "ub.reason",
            Self::CreatedAt => "ub.nest_created_at",
        }
    }

    fn tiebreak() -> &'static str {
        "ub.id"
    }

    fn default_ordering() -> Ordering<Self> {
        Ordering::desc(Self::EarnedAt)
    }
}

// ==================== 时间过滤 ====================

/// 左闭右开时间区间
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// earned_at 过滤选项（对应 admin 日期过滤器的可选项）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EarnedAtPeriod {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "past_7_days")]
    Past7Days,
    #[serde(rename = "this_month")]
    ThisMonth,
    #[serde(rename = "this_year")]
    ThisYear,
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

impl EarnedAtPeriod {
    /// 所有选项，按 admin 过滤器中的展示顺序
    pub const ALL: [EarnedAtPeriod; 4] = [
        Self::Today,
        Self::Past7Days,
        Self::ThisMonth,
        Self::ThisYear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Past7Days => "past_7_days",
            Self::ThisMonth => "this_month",
            Self::ThisYear => "this_year",
        }
    }

    /// 以 now 所在的 UTC 日期为基准计算区间
    pub fn range(&self, now: DateTime<Utc>) -> TimeRange {
        let today = now.date_naive();
        let tomorrow = today + Duration::days(1);
        let (start, end) = match self {
            Self::Today => (today, tomorrow),
            Self::Past7Days => (today - Duration::days(7), tomorrow),
            Self::ThisMonth => {
                let first = today - Duration::days(i64::from(today.day0()));
                (first, first + Months::new(1))
            }
            Self::ThisYear => {
                let first = today - Duration::days(i64::from(today.ordinal0()));
                (first, first + Months::new(12))
            }
        };
        TimeRange {
            start: midnight(start),
            end: midnight(end),
        }
    }
}

// ==================== 搜索 ====================

/// 拆分搜索词：按空白切分，双引号内的短语作为整体
///
/// 每个词都必须命中至少一个搜索字段（词之间是 AND，字段之间是 OR）
pub fn search_terms(q: &str) -> Vec<String> {
    let mut terms = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in q.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    terms.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        terms.push(current);
    }
    terms
}

/// 转义 LIKE 通配符（PostgreSQL 默认转义符为反斜杠）
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// 构造 ILIKE 包含匹配模式
pub fn like_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}

// ==================== 列表查询 ====================

/// 徽章类型列表查询
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeTypeListQuery {
    /// 搜索 name / description
    pub search: Option<String>,
    /// 过滤 is_active
    pub is_active: Option<bool>,
    pub ordering: Ordering<BadgeTypeSortField>,
    pub limit: i64,
    pub offset: i64,
}

impl Default for BadgeTypeListQuery {
    fn default() -> Self {
        Self {
            search: None,
            is_active: None,
            ordering: Ordering::default(),
            limit: 100,
            offset: 0,
        }
    }
}

/// 用户徽章列表查询
#[derive(Debug, Clone, PartialEq)]
pub struct UserBadgeListQuery {
    /// 搜索 user.login / user.name / badge_type.name / reason
    pub search: Option<String>,
    pub badge_type_id: Option<i64>,
    pub user_id: Option<i64>,
    pub earned_at: Option<TimeRange>,
    pub ordering: Ordering<UserBadgeSortField>,
    pub limit: i64,
    pub offset: i64,
}

impl Default for UserBadgeListQuery {
    fn default() -> Self {
        Self {
            search: None,
            badge_type_id: None,
            user_id: None,
            earned_at: None,
            ordering: Ordering::default(),
            limit: 100,
            offset: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_ordering() {
        let o: Ordering<UserBadgeSortField> = "-earned_at".parse().unwrap();
        assert_eq!(o, Ordering::desc(UserBadgeSortField::EarnedAt));
        assert_eq!(o.to_string(), "-earned_at");

        let o: Ordering<BadgeTypeSortField> = "name".parse().unwrap();
        assert_eq!(o, Ordering::asc(BadgeTypeSortField::Name));
        assert_eq!(o.to_string(), "name");
    }

    #[test]
    fn test_parse_ordering_rejects_unknown_field() {
        let err = "metadata".parse::<Ordering<UserBadgeSortField>>().unwrap_err();
        assert_eq!(err, OrderingError("metadata".into()));
        assert!("-password".parse::<Ordering<BadgeTypeSortField>>().is_err());
        assert!("name; DROP TABLE x".parse::<Ordering<BadgeTypeSortField>>().is_err());
    }

    #[test]
    fn test_default_orderings() {
        assert_eq!(Ordering::<BadgeTypeSortField>::default().to_string(), "name");
        assert_eq!(Ordering::<UserBadgeSortField>::default().to_string(), "-earned_at");
    }

    #[test]
    fn test_ordering_sql_uses_whitelisted_columns() {
        let o = Ordering::desc(UserBadgeSortField::User);
        assert_eq!(o.to_sql(), "u.login DESC, ub.id DESC");
        let o = Ordering::asc(BadgeTypeSortField::CreatedAt);
        assert_eq!(o.to_sql(), "bt.nest_created_at ASC, bt.id ASC");
    }

    #[test]
    fn test_earned_at_ranges() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap();

        let today = EarnedAtPeriod::Today.range(now);
        assert_eq!(today.start, Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap());
        assert_eq!(today.end, Utc.with_ymd_and_hms(2024, 3, 16, 0, 0, 0).unwrap());
        assert!(today.start <= now && now < today.end);

        let week = EarnedAtPeriod::Past7Days.range(now);
        assert_eq!(week.start, Utc.with_ymd_and_hms(2024, 3, 8, 0, 0, 0).unwrap());

        let month = EarnedAtPeriod::ThisMonth.range(now);
        assert_eq!(month.start, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(month.end, Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap());

        let year = EarnedAtPeriod::ThisYear.range(now);
        assert_eq!(year.start, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(year.end, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(year.end - year.start, Duration::days(366));
    }

    #[test]
    fn test_this_month_in_december() {
        let now = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        let month = EarnedAtPeriod::ThisMonth.range(now);
        assert_eq!(month.start, Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap());
        assert_eq!(month.end, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_earned_at_period_serde() {
        let p: EarnedAtPeriod = serde_json::from_str("\"past_7_days\"").unwrap();
        assert_eq!(p, EarnedAtPeriod::Past7Days);
        for p in EarnedAtPeriod::ALL {
            let s = serde_json::to_string(&p).unwrap();
            assert_eq!(s, format!("\"{}\"", p.as_str()));
        }
    }

    #[test]
    fn test_search_terms() {
        assert_eq!(search_terms("  waspy  award "), vec!["waspy", "award"]);
        assert_eq!(
            search_terms("\"chapter leader\" 2024"),
            vec!["chapter leader", "2024"]
        );
        assert!(search_terms("   ").is_empty());
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("waspy"), "%waspy%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
    }

    #[test]
    fn test_page_map() {
        let page = Page::new(vec![1, 2, 3], 10).map(|v| v * 2);
        assert_eq!(page.items, vec![2, 4, 6]);
        assert_eq!(page.total, 10);
        assert_eq!(Page::<i32>::empty().total, 0);
    }
}
