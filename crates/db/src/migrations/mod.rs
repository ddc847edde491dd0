//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250101_000001_create_content_type_table;
mod m20250101_000002_create_permission_table;
mod m20250101_000003_create_question_table;
mod m20250101_000004_create_choice_table;
mod m20250101_000005_create_question_history_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_content_type_table::Migration),
            Box::new(m20250101_000002_create_permission_table::Migration),
            Box::new(m20250101_000003_create_question_table::Migration),
            Box::new(m20250101_000004_create_choice_table::Migration),
            Box::new(m20250101_000005_create_question_history_table::Migration),
        ]
    }
}
