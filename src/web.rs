pub mod api;
pub mod messages;
