//! Create question history table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(QuestionHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QuestionHistory::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(QuestionHistory::QuestionId).string_len(32).null())
                    .col(
                        ColumnDef::new(QuestionHistory::CreationTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_question_history_question")
                            .from(QuestionHistory::Table, QuestionHistory::QuestionId)
                            .to(Question::Table, Question::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: question_id - at most one history row per question.
        // NULLs (orphaned rows) do not collide.
        manager
            .create_index(
                Index::create()
                    .name("idx_question_history_question_id")
                    .table(QuestionHistory::Table)
                    .col(QuestionHistory::QuestionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: creation_time (for listing history)
        manager
            .create_index(
                Index::create()
                    .name("idx_question_history_creation_time")
                    .table(QuestionHistory::Table)
                    .col(QuestionHistory::CreationTime)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(QuestionHistory::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum QuestionHistory {
    Table,
    Id,
    QuestionId,
    CreationTime,
}

#[derive(Iden)]
enum Question {
    Table,
    Id,
}
