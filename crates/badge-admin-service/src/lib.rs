//! Nest 徽章管理后台
//!
//! 为工作人员提供徽章类型与用户徽章的管理界面后端：
//! 面板配置（列表列、过滤、搜索、排序、表单分组、只读字段）与对应的 REST API。
//!
//! ## 模块结构
//!
//! - `admin`: 面板声明与注册表
//! - `auth`: JWT 验证
//! - `dto`: 请求和响应的数据传输对象
//! - `error`: 错误类型定义
//! - `extract`: 统一错误格式的请求提取器
//! - `handlers`: HTTP 请求处理器
//! - `middleware`: 工作人员认证中间件
//! - `routes`: 路由配置
//! - `state`: 应用状态
//!
//! ## 技术栈
//!
//! - Web 框架：Axum
//! - 数据验证：validator
//! - 序列化：serde (camelCase)

pub mod admin;
pub mod auth;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use admin::{AdminSite, Fieldset, ModelAdmin};
pub use error::{AdminError, Result};
pub use state::AppState;
