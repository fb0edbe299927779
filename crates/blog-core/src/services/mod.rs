//! Application services built on the domain and ports.

mod post_service;

pub use post_service::PostService;
