//! PostgreSQL post store.

use async_trait::async_trait;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbBackend, DbConn, DbErr, EntityTrait,
    QueryFilter, QueryOrder, SqlErr, Statement,
};

use blog_core::domain::{Post, PostId};
use blog_core::error::RepoError;
use blog_core::ports::PostStore;

use crate::database::entity::post::{self, Entity as PostEntity};

/// Keeps the id sequence ahead of rows inserted with an explicit id.
const SYNC_ID_SEQUENCE: &str = "SELECT setval(pg_get_serial_sequence('posts', 'id'), \
     GREATEST((SELECT MAX(id) FROM posts), 1))";

fn db_error(err: DbErr) -> RepoError {
    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}

/// PostgreSQL post store backed by the `posts` table.
pub struct PostgresPostStore {
    db: DbConn,
}

impl PostgresPostStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostStore for PostgresPostStore {
    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let requested_id = post.id;

        let model = post::ActiveModel::from(post)
            .insert(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => RepoError::Duplicate(requested_id),
                _ => db_error(e),
            })?;

        if requested_id > 0 {
            self.db
                .execute(Statement::from_string(DbBackend::Postgres, SYNC_ID_SEQUENCE))
                .await
                .map_err(db_error)?;
        }

        tracing::debug!(post_id = model.id, "Inserted post");
        Post::try_from(model)
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        result.map(Post::try_from).transpose()
    }

    async fn exists_by_id(&self, id: PostId) -> Result<bool, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(result.is_some())
    }

    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        result.into_iter().map(Post::try_from).collect()
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let id = post.id;

        let mut changes = post::ActiveModel::from(post.clone());
        changes.id = NotSet;
        changes.created_at = NotSet;

        let result = PostEntity::update_many()
            .set(changes)
            .filter(post::Column::Id.eq(id))
            .filter(post::Column::IsDeleted.eq(false))
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected == 0 {
            return Err(if self.exists_by_id(id).await? {
                RepoError::Stale(id)
            } else {
                RepoError::Missing(id)
            });
        }

        tracing::debug!(post_id = id, deleted = post.is_deleted(), "Updated post");
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use serde_json::json;

    use super::*;

    fn model(id: i32) -> post::Model {
        let created = Utc.with_ymd_and_hms(2025, 10, 1, 10, 31, 14).unwrap();
        post::Model {
            id,
            title: "Post #1".to_owned(),
            content: "This is Post #1".to_owned(),
            category: Some("Technology".to_owned()),
            tags: json!(["csharp", "postgresql"]),
            created_at: created.into(),
            updated_at: created.into(),
            deleted_at: None,
            is_deleted: false,
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id_decodes_tags() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1)]])
            .into_connection();

        let store = PostgresPostStore::new(db);
        let post = store.find_by_id(1).await.unwrap().unwrap();

        assert_eq!(post.id, 1);
        assert_eq!(post.tags, vec!["csharp", "postgresql"]);
        assert_eq!(post.category.as_deref(), Some("Technology"));
        assert!(!post.is_deleted());
    }

    #[tokio::test]
    async fn test_deleted_row_keeps_deletion_state() {
        let mut row = model(2);
        let deleted = Utc.with_ymd_and_hms(2025, 10, 2, 8, 0, 0).unwrap();
        row.is_deleted = true;
        row.deleted_at = Some(deleted.into());
        row.updated_at = deleted.into();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row]])
            .into_connection();

        let post = PostgresPostStore::new(db).find_by_id(2).await.unwrap().unwrap();
        assert!(post.is_deleted());
        assert_eq!(post.deleted_at(), Some(deleted));
    }

    #[tokio::test]
    async fn test_malformed_tags_are_a_decode_error() {
        let mut row = model(3);
        row.tags = json!({ "not": "a list" });

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row]])
            .into_connection();

        let err = PostgresPostStore::new(db).find_by_id(3).await.unwrap_err();
        assert!(matches!(err, RepoError::Decode(_)));
    }

    #[tokio::test]
    async fn test_insert_returns_assigned_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(42)]])
            .into_connection();

        let draft = Post::try_from(model(42)).unwrap().with_id(0);
        let inserted = PostgresPostStore::new(db).insert(draft).await.unwrap();

        assert_eq!(inserted.id, 42);
        assert_eq!(inserted.title, "Post #1");
    }

    #[tokio::test]
    async fn test_insert_with_explicit_id_resyncs_sequence() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(5)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let post = Post::try_from(model(5)).unwrap();
        let inserted = PostgresPostStore::new(db).insert(post).await.unwrap();

        assert_eq!(inserted.id, 5);
    }

    #[tokio::test]
    async fn test_update_of_soft_deleted_row_is_stale() {
        let mut stored = model(5);
        stored.is_deleted = true;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(5)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .append_query_results([vec![stored]])
            .into_connection();

        let store = PostgresPostStore::new(db);
        let post = store.find_by_id(5).await.unwrap().unwrap();

        assert_eq!(store.update(post).await.unwrap_err(), RepoError::Stale(5));
    }

    #[tokio::test]
    async fn test_update_of_unknown_row_is_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(6)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .append_query_results([Vec::<post::Model>::new()])
            .into_connection();

        let store = PostgresPostStore::new(db);
        let post = store.find_by_id(6).await.unwrap().unwrap();

        assert_eq!(store.update(post).await.unwrap_err(), RepoError::Missing(6));
    }

    #[tokio::test]
    async fn test_update_applied_returns_post() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(7)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let store = PostgresPostStore::new(db);
        let mut post = store.find_by_id(7).await.unwrap().unwrap();
        post.title = "Edited".into();

        let updated = store.update(post).await.unwrap();
        assert_eq!(updated.title, "Edited");
    }
}
