//! 管理面板声明
//!
//! 每类记录一个 `ModelAdmin`，声明列表列、过滤器、搜索字段、默认排序、
//! 表单分组与只读字段。前端按此配置渲染列表页与编辑表单，
//! handler 也用它校验排序参数与过滤行为。

mod panels;

use serde::Serialize;

pub use panels::{BADGE_TYPE_ADMIN, USER_BADGE_ADMIN};

/// 表单字段分组
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fieldset {
    pub title: &'static str,
    pub fields: &'static [&'static str],
    /// 默认折叠
    pub collapsed: bool,
}

/// 单个模型的管理面板配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelAdmin {
    /// 面板标识（路由中使用）
    pub model: &'static str,
    pub verbose_name: &'static str,
    pub verbose_name_plural: &'static str,
    pub list_display: &'static [&'static str],
    pub list_filter: &'static [&'static str],
    /// 搜索字段，`__` 表示跨关联（如 `user__login`）
    pub search_fields: &'static [&'static str],
    /// 默认排序，`-` 前缀表示降序
    pub ordering: &'static [&'static str],
    /// 使用异步搜索选择器的外键字段
    pub autocomplete_fields: &'static [&'static str],
    pub fieldsets: &'static [Fieldset],
    pub readonly_fields: &'static [&'static str],
    /// 列表查询一并加载的关联
    pub list_select_related: &'static [&'static str],
}

impl ModelAdmin {
    /// 表单中出现的全部字段（按分组顺序）
    pub fn form_fields(&self) -> impl Iterator<Item = &'static str> {
        self.fieldsets.iter().flat_map(|fs| fs.fields.iter().copied())
    }

    pub fn is_readonly(&self, field: &str) -> bool {
        self.readonly_fields.iter().any(|f| *f == field)
    }

    /// 可编辑字段：表单字段去掉只读字段
    pub fn editable_fields(&self) -> Vec<&'static str> {
        self.form_fields().filter(|f| !self.is_readonly(f)).collect()
    }
}

/// 管理面板注册表
#[derive(Debug, Clone, Default)]
pub struct AdminSite {
    panels: Vec<ModelAdmin>,
}

impl AdminSite {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册徽章类型与用户徽章两个面板
    pub fn nest() -> Self {
        let mut site = Self::new();
        site.register(BADGE_TYPE_ADMIN);
        site.register(USER_BADGE_ADMIN);
        site
    }

    /// 注册面板；同名面板已存在时不覆盖并返回 false
    pub fn register(&mut self, panel: ModelAdmin) -> bool {
        if self.get(panel.model).is_some() {
            return false;
        }
        self.panels.push(panel);
        true
    }

    pub fn get(&self, model: &str) -> Option<&ModelAdmin> {
        self.panels.iter().find(|p| p.model == model)
    }

    pub fn panels(&self) -> &[ModelAdmin] {
        &self.panels
    }
}
