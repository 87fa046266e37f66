//! Shared helpers.

pub mod templates;
