//! Question history repository.

use std::sync::Arc;

use polls_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, prelude::DateTimeWithTimeZone,
};
use tracing::debug;

use crate::entities::{QuestionHistory, question_history};

/// Question history repository for database operations.
#[derive(Clone)]
pub struct QuestionHistoryRepository {
    db: Arc<DatabaseConnection>,
}

impl QuestionHistoryRepository {
    /// Create a new question history repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a history row by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<question_history::Model>> {
        QuestionHistory::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the history row recorded for a question.
    pub async fn find_by_question(
        &self,
        question_id: &str,
    ) -> AppResult<Option<question_history::Model>> {
        QuestionHistory::find()
            .filter(question_history::Column::QuestionId.eq(question_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count history rows recorded for a question.
    pub async fn count_by_question(&self, question_id: &str) -> AppResult<u64> {
        QuestionHistory::find()
            .filter(question_history::Column::QuestionId.eq(question_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List history rows, newest first.
    pub async fn find_recent(&self, limit: u64) -> AppResult<Vec<question_history::Model>> {
        QuestionHistory::find()
            .order_by_desc(question_history::Column::CreationTime)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the history row for `question_id`, creating it with `id` and
    /// `creation_time` when absent.
    ///
    /// Returns the row and whether it was created by this call.
    pub async fn get_or_create(
        &self,
        id: String,
        question_id: &str,
        creation_time: DateTimeWithTimeZone,
    ) -> AppResult<(question_history::Model, bool)> {
        if let Some(existing) = self.find_by_question(question_id).await? {
            return Ok((existing, false));
        }

        self.create_or_fetch(id, question_id, creation_time).await
    }

    /// Insert the history row for `question_id` without looking it up first.
    ///
    /// The unique index on `question_id` makes this safe against a concurrent
    /// insert: losing the race falls back to reading the winner's row.
    /// Returns the row and whether it was created by this call.
    pub async fn create_or_fetch(
        &self,
        id: String,
        question_id: &str,
        creation_time: DateTimeWithTimeZone,
    ) -> AppResult<(question_history::Model, bool)> {
        let model = question_history::ActiveModel {
            id: Set(id),
            question_id: Set(Some(question_id.to_string())),
            creation_time: Set(creation_time),
        };

        match model.insert(self.db.as_ref()).await {
            Ok(created) => Ok((created, true)),
            Err(err) => match super::map_insert_err(err) {
                AppError::Conflict(msg) => {
                    debug!(question_id, error = %msg, "History row created concurrently");
                    self.find_by_question(question_id)
                        .await?
                        .map(|existing| (existing, false))
                        .ok_or(AppError::Conflict(msg))
                }
                other => Err(other),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_history(id: &str, question_id: Option<&str>) -> question_history::Model {
        question_history::Model {
            id: id.to_string(),
            question_id: question_id.map(ToString::to_string),
            creation_time: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_get_or_create_returns_existing() {
        let existing = create_test_history("h1", Some("q1"));

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing.clone()]])
                .into_connection(),
        );

        let repo = QuestionHistoryRepository::new(db);
        let (history, created) = repo
            .get_or_create("h2".to_string(), "q1", Utc::now().into())
            .await
            .unwrap();

        assert!(!created);
        assert_eq!(history, existing);
    }

    #[tokio::test]
    async fn test_get_or_create_inserts_when_missing() {
        let inserted = create_test_history("h1", Some("q1"));

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<question_history::Model>::new()])
                .append_query_results([[inserted.clone()]])
                .into_connection(),
        );

        let repo = QuestionHistoryRepository::new(db);
        let (history, created) = repo
            .get_or_create("h1".to_string(), "q1", inserted.creation_time)
            .await
            .unwrap();

        assert!(created);
        assert_eq!(history.question_id.as_deref(), Some("q1"));
    }

    #[tokio::test]
    async fn test_find_recent() {
        let h1 = create_test_history("h1", Some("q1"));
        let h2 = create_test_history("h2", None);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[h1, h2]])
                .into_connection(),
        );

        let repo = QuestionHistoryRepository::new(db);
        let result = repo.find_recent(10).await.unwrap();

        assert_eq!(result.len(), 2);
        assert!(result[1].question_id.is_none());
    }
}
