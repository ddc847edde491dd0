//! Repository layer for database operations.

mod choice;
mod content_type;
mod permission;
mod question;
mod question_history;

pub use choice::ChoiceRepository;
pub use content_type::ContentTypeRepository;
pub use permission::PermissionRepository;
pub use question::QuestionRepository;
pub use question_history::QuestionHistoryRepository;

use polls_common::AppError;
use sea_orm::{DbErr, SqlErr};

/// Map an insert failure, keeping unique-key collisions distinguishable
/// from other storage errors.
pub(crate) fn map_insert_err(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => AppError::Conflict(msg),
        _ => AppError::Database(err.to_string()),
    }
}
