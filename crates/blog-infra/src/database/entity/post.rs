//! Post entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};

use blog_core::domain::{Post, PostRecord};
use blog_core::error::RepoError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub category: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Json,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl TryFrom<Model> for Post {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let tags: Vec<String> = serde_json::from_value(model.tags)
            .map_err(|e| RepoError::Decode(format!("post {} tags: {}", model.id, e)))?;

        Ok(Post::from(PostRecord {
            id: model.id,
            title: model.title,
            content: model.content,
            category: model.category,
            tags,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            deleted_at: model.deleted_at.map(Into::into),
            is_deleted: model.is_deleted,
        }))
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
///
/// An unassigned id (`0`) is left `NotSet` so the sequence picks it.
impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            id: if post.id > 0 { Set(post.id) } else { NotSet },
            is_deleted: Set(post.is_deleted()),
            deleted_at: Set(post.deleted_at().map(Into::into)),
            title: Set(post.title),
            content: Set(post.content),
            category: Set(post.category),
            tags: Set(Json::from(post.tags)),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
