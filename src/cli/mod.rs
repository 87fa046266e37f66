//! CLI module - Command-line interface for the application.
//!
//! - `serve` - Start the HTTP server and reminder scheduler
//! - `migrate` - Database migrations
//! - `jobs` - Email queue management and manual reminder runs

pub mod args;

pub use args::{Cli, Commands};
