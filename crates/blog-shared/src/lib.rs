//! # Blog Shared
//!
//! Wire types of the blog HTTP API, shared by the server and its clients.

pub mod dto;

pub use dto::{PostPayload, PostResponse, SearchQuery};
