//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `migrate` - Database migrations
//! - `jobs` - Mail queue worker and inspection
//! - `offboard` - Offboard a patient or specialist
//! - `token` - Issue an access token for an account

pub mod args;

pub use args::{Cli, Commands};
