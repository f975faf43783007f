//! 中间件模块
//!
//! 提供工作人员认证中间件

mod auth;

pub use auth::auth_middleware;
