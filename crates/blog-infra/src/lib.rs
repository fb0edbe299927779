//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL store via SeaORM
//! - without default features - in-memory only, no database dependencies

pub mod database;
pub mod store;

pub use database::{DatabaseConfig, DbConfigError};
pub use store::InMemoryPostStore;

#[cfg(feature = "postgres")]
pub use store::PostgresPostStore;
