//! API layer - HTTP handlers and middleware
//!
//! - Request handlers and route tables
//! - Session-cookie middleware and cookie attributes
//! - Custom extractors
//! - OpenAPI document

pub mod cookies;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use cookies::CookiePolicy;
pub use openapi::ApiDoc;
pub use routes::{cors_layer, create_router};
pub use state::AppState;
