//! DTO 模块
//!
//! 包含所有请求和响应的数据传输对象

pub mod request;
pub mod response;

pub use request::{
    AutocompleteParams, BadgeTypeQueryFilter, CreateBadgeTypeRequest, CreateUserBadgeRequest,
    PaginationParams, UpdateBadgeTypeRequest, UpdateUserBadgeRequest, UserBadgeQueryFilter,
};

pub use response::{
    ApiResponse, AutocompleteItem, DeletedResponse, PageResponse, PanelDto, UserBadgeDto,
};
