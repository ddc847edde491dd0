//! Create content type table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ContentType::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContentType::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContentType::AppLabel).string_len(100).not_null())
                    .col(ColumnDef::new(ContentType::Model).string_len(100).not_null())
                    .col(ColumnDef::new(ContentType::Name).string_len(100).not_null())
                    .to_owned(),
            )
            .await?;

        // Unique index: (app_label, model) - one row per installed model
        manager
            .create_index(
                Index::create()
                    .name("idx_content_type_app_label_model")
                    .table(ContentType::Table)
                    .col(ContentType::AppLabel)
                    .col(ContentType::Model)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContentType::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ContentType {
    Table,
    Id,
    AppLabel,
    Model,
    Name,
}
