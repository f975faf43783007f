//! 认证模块
//!
//! 提供 JWT Token 验证

mod jwt;

pub use jwt::{Claims, JwtManager};
