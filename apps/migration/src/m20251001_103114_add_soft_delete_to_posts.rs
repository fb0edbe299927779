use sea_orm_migration::prelude::*;

use crate::m20250930_000001_create_posts_table::Posts;

/// Soft deletion: additive, existing rows become "not deleted".
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Posts::Table)
                    .add_column(
                        ColumnDef::new(SoftDelete::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .add_column(
                        ColumnDef::new(SoftDelete::IsDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Posts::Table)
                    .drop_column(SoftDelete::DeletedAt)
                    .drop_column(SoftDelete::IsDeleted)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum SoftDelete {
    DeletedAt,
    IsDeleted,
}
