pub mod autocomplete;
pub mod badge_type;
pub mod panel;
pub mod user_badge;
