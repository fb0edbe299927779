//! Schema migrations for the `posts` table.

pub use sea_orm_migration::prelude::*;

mod m20250930_000001_create_posts_table;
mod m20251001_103114_add_soft_delete_to_posts;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250930_000001_create_posts_table::Migration),
            Box::new(m20251001_103114_add_soft_delete_to_posts::Migration),
        ]
    }
}
