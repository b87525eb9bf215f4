//! Shared response types for the HTTP surface.

mod response;

pub use response::{ApiResponse, Created};
