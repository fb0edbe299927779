//! # Blog Core
//!
//! The domain layer of the blog backend.
//! Posts, their validation rules and the service that moves them through
//! their lifecycle. Storage is reached only through the `PostStore` port.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, ErrorKind, RepoError};
pub use services::PostService;
