//! `PostStore` implementations - PostgreSQL and in-memory fallback.

mod memory;

#[cfg(feature = "postgres")]
mod postgres;

pub use memory::InMemoryPostStore;

#[cfg(feature = "postgres")]
pub use postgres::PostgresPostStore;
