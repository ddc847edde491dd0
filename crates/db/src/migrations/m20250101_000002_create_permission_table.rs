//! Create permission table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Permission::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Permission::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Permission::ContentTypeId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Permission::Codename).string_len(100).not_null())
                    .col(ColumnDef::new(Permission::Name).string_len(255).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_permission_content_type")
                            .from(Permission::Table, Permission::ContentTypeId)
                            .to(ContentType::Table, ContentType::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (content_type_id, codename) - guards concurrent permission syncs
        manager
            .create_index(
                Index::create()
                    .name("idx_permission_content_type_codename")
                    .table(Permission::Table)
                    .col(Permission::ContentTypeId)
                    .col(Permission::Codename)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Permission::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Permission {
    Table,
    Id,
    ContentTypeId,
    Codename,
    Name,
}

#[derive(Iden)]
enum ContentType {
    Table,
    Id,
}
