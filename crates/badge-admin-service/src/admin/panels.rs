//! 徽章类型与用户徽章的面板配置

use super::{Fieldset, ModelAdmin};

const TIMESTAMPS: Fieldset = Fieldset {
    title: "Timestamps",
    fields: &["nest_created_at", "nest_updated_at"],
    collapsed: true,
};

/// 徽章类型面板
pub const BADGE_TYPE_ADMIN: ModelAdmin = ModelAdmin {
    model: "badge_type",
    verbose_name: "Badge Type",
    verbose_name_plural: "Badge Types",
    list_display: &[
        "name",
        "description",
        "icon",
        "color",
        "is_active",
        "nest_created_at",
        "nest_updated_at",
    ],
    list_filter: &["is_active"],
    search_fields: &["name", "description"],
    ordering: &["name"],
    autocomplete_fields: &[],
    fieldsets: &[
        Fieldset {
            title: "Basic Information",
            fields: &["name", "description", "is_active"],
            collapsed: false,
        },
        Fieldset {
            title: "Appearance",
            fields: &["icon", "color"],
            collapsed: true,
        },
        TIMESTAMPS,
    ],
    readonly_fields: &["nest_created_at", "nest_updated_at"],
    list_select_related: &[],
};

/// 用户徽章面板
pub const USER_BADGE_ADMIN: ModelAdmin = ModelAdmin {
    model: "user_badge",
    verbose_name: "User Badge",
    verbose_name_plural: "User Badges",
    list_display: &["user", "badge_type", "earned_at", "reason", "nest_created_at"],
    list_filter: &["badge_type", "earned_at"],
    search_fields: &["user__login", "user__name", "badge_type__name", "reason"],
    ordering: &["-earned_at"],
    autocomplete_fields: &["user", "badge_type"],
    fieldsets: &[
        Fieldset {
            title: "Badge Information",
            fields: &["user", "badge_type", "earned_at", "reason"],
            collapsed: false,
        },
        Fieldset {
            title: "Metadata",
            fields: &["metadata"],
            collapsed: true,
        },
        TIMESTAMPS,
    ],
    readonly_fields: &["earned_at", "nest_created_at", "nest_updated_at"],
    list_select_related: &["user", "badge_type"],
};

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use nest_badges::{BadgeTypeSortField, Ordering, SortField, UserBadgeSortField};

    use super::*;

    fn assert_form_invariants(panel: &ModelAdmin) {
        let fields: Vec<_> = panel.form_fields().collect();
        let unique: HashSet<_> = fields.iter().collect();
        assert_eq!(fields.len(), unique.len(), "{}: 字段在多个分组中出现", panel.model);

        for readonly in panel.readonly_fields {
            assert!(fields.contains(readonly), "{}: 只读字段 {readonly} 不在表单中", panel.model);
        }
    }

    #[test]
    fn test_form_invariants() {
        assert_form_invariants(&BADGE_TYPE_ADMIN);
        assert_form_invariants(&USER_BADGE_ADMIN);
    }

    #[test]
    fn test_list_columns_are_sortable() {
        for column in BADGE_TYPE_ADMIN.list_display {
            assert!(BadgeTypeSortField::from_name(column).is_some(), "{column}");
        }
        for column in USER_BADGE_ADMIN.list_display {
            assert!(UserBadgeSortField::from_name(column).is_some(), "{column}");
        }
    }

    #[test]
    fn test_panel_ordering_matches_query_default() {
        let ordering: Ordering<BadgeTypeSortField> =
            BADGE_TYPE_ADMIN.ordering[0].parse().unwrap();
        assert_eq!(ordering, Ordering::default());

        let ordering: Ordering<UserBadgeSortField> =
            USER_BADGE_ADMIN.ordering[0].parse().unwrap();
        assert_eq!(ordering, Ordering::default());
    }

    #[test]
    fn test_collapsed_sections() {
        let collapsed = |panel: &ModelAdmin| -> Vec<&'static str> {
            panel
                .fieldsets
                .iter()
                .filter(|fs| fs.collapsed)
                .map(|fs| fs.title)
                .collect()
        };
        assert_eq!(collapsed(&BADGE_TYPE_ADMIN), vec!["Appearance", "Timestamps"]);
        assert_eq!(collapsed(&USER_BADGE_ADMIN), vec!["Metadata", "Timestamps"]);
    }

    #[test]
    fn test_user_badge_panel_relations() {
        assert!(USER_BADGE_ADMIN.is_readonly("earned_at"));
        assert!(!BADGE_TYPE_ADMIN.is_readonly("name"));
        assert_eq!(USER_BADGE_ADMIN.list_select_related, &["user", "badge_type"]);
        assert_eq!(USER_BADGE_ADMIN.autocomplete_fields, &["user", "badge_type"]);
    }
}
