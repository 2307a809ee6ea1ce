//! HTTP request handlers.

pub mod account_handler;

pub use account_handler::{credential_routes, directory_routes};
