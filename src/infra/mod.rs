//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - Redis-backed rate limit counters

pub mod cache;
pub mod db;
pub mod repositories;

pub use cache::Cache;
pub use db::{Database, Migrator};
pub use repositories::{AccountRepository, AccountStore};
