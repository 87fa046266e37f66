//! HTTP request handlers.

pub mod auth_handler;
pub mod event_handler;
pub mod student_handler;

pub use auth_handler::auth_routes;
pub use event_handler::event_routes;
pub use student_handler::student_routes;
