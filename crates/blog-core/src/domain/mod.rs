//! Domain entities - the core business objects.

mod post;

pub use post::{
    MAX_CATEGORY_CHARS, MAX_TITLE_CHARS, Post, PostDraft, PostFields, PostId, PostRecord,
    timestamp_now,
};
