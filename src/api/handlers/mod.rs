//! HTTP request handlers.

pub mod account_handler;
pub mod offboarding_handler;

pub use account_handler::account_routes;
pub use offboarding_handler::offboarding_routes;
