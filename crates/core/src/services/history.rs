//! Question history service.
//!
//! Keeps a one-to-one audit trail of question creations. The question
//! service calls [`HistoryService::record_question_saved`] after every save.

use polls_common::{AppResult, IdGenerator};
use polls_db::entities::{question, question_history};
use polls_db::repositories::QuestionHistoryRepository;
use tracing::debug;

/// Service for question history records.
#[derive(Clone)]
pub struct HistoryService {
    history_repo: QuestionHistoryRepository,
    id_gen: IdGenerator,
}

impl HistoryService {
    /// Create a new history service.
    #[must_use]
    pub const fn new(history_repo: QuestionHistoryRepository) -> Self {
        Self {
            history_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// React to a completed question save.
    ///
    /// On creation, finds or creates the history row for the question with
    /// the question's own `created` timestamp. Updates are ignored and
    /// return `None`. Calling this again for the same question returns the
    /// existing row without inserting a second one.
    pub async fn record_question_saved(
        &self,
        question: &question::Model,
        created: bool,
    ) -> AppResult<Option<question_history::Model>> {
        if !created {
            return Ok(None);
        }

        let (history, inserted) = self
            .history_repo
            .get_or_create(self.id_gen.generate(), &question.id, question.created)
            .await?;

        if inserted {
            debug!(
                question_id = %question.id,
                history_id = %history.id,
                "Recorded question creation"
            );
        }

        Ok(Some(history))
    }

    /// Get the history row of a question, if any.
    pub async fn find_for_question(
        &self,
        question_id: &str,
    ) -> AppResult<Option<question_history::Model>> {
        self.history_repo.find_by_question(question_id).await
    }

    /// List history rows, newest first.
    pub async fn list(&self, limit: u64) -> AppResult<Vec<question_history::Model>> {
        self.history_repo.find_recent(limit).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_question(id: &str) -> question::Model {
        let now = Utc::now();
        question::Model {
            id: id.to_string(),
            question_text: "Is this good?".to_string(),
            pub_date: now.into(),
            created: now.into(),
            modified: now.into(),
        }
    }

    #[tokio::test]
    async fn test_update_is_ignored() {
        // No query results: any database access would fail the test.
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = HistoryService::new(QuestionHistoryRepository::new(db));

        let result = service
            .record_question_saved(&create_test_question("q1"), false)
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_creation_inserts_history_with_question_timestamp() {
        let question = create_test_question("q1");
        let history = question_history::Model {
            id: "h1".to_string(),
            question_id: Some("q1".to_string()),
            creation_time: question.created,
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<question_history::Model>::new()])
                .append_query_results([[history.clone()]])
                .into_connection(),
        );
        let service = HistoryService::new(QuestionHistoryRepository::new(db));

        let result = service
            .record_question_saved(&question, true)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result.creation_time, question.created);
        assert_eq!(result.question_id.as_deref(), Some("q1"));
    }

    #[tokio::test]
    async fn test_repeated_creation_returns_existing() {
        let question = create_test_question("q1");
        let existing = question_history::Model {
            id: "h1".to_string(),
            question_id: Some("q1".to_string()),
            creation_time: question.created,
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing.clone()]])
                .into_connection(),
        );
        let service = HistoryService::new(QuestionHistoryRepository::new(db));

        let result = service.record_question_saved(&question, true).await.unwrap();

        assert_eq!(result, Some(existing));
    }
}
