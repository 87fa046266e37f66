//! Campus Events - club events, student registrations and next-day reminders
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Users, events, registrations and access rules
//! - **services**: Use cases (auth, events, registrations, reminders)
//! - **infra**: PostgreSQL repositories and the Redis session store
//! - **jobs**: Email delivery and the daily reminder schedule
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared response types
//! - **utils**: Email templates
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server (and the reminder scheduler)
//! campus-events serve
//!
//! # Run migrations
//! campus-events migrate up
//!
//! # Send tomorrow's reminders now
//! campus-events jobs remind
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod jobs;
pub mod services;
pub mod types;
pub mod utils;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Event, SessionUser, User, UserRole};
pub use errors::{AppError, AppResult};
