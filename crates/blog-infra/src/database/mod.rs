//! Database configuration, connection management and SeaORM entities.

mod connections;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::{DatabaseConfig, DbConfigError};

#[cfg(feature = "postgres")]
pub use connections::connect;

#[cfg(feature = "postgres")]
pub use crate::store::PostgresPostStore;
