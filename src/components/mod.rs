pub mod error_banner;
pub mod field_error;
pub mod nav_bar;
pub mod notification_bell;
pub mod route_guard;
pub mod status_badge;
