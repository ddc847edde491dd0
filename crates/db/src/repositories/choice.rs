//! Choice repository.

use std::sync::Arc;

use polls_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, sea_query::Expr,
};

use crate::entities::{Choice, choice};

/// Choice repository for database operations.
#[derive(Clone)]
pub struct ChoiceRepository {
    db: Arc<DatabaseConnection>,
}

impl ChoiceRepository {
    /// Create a new choice repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a choice by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<choice::Model>> {
        Choice::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a choice by ID, returning error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<choice::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Choice {id} not found")))
    }

    /// Find all choices of a question, in creation order.
    pub async fn find_by_question(&self, question_id: &str) -> AppResult<Vec<choice::Model>> {
        Choice::find()
            .filter(choice::Column::QuestionId.eq(question_id))
            .order_by_asc(choice::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count the choices of a question.
    pub async fn count_by_question(&self, question_id: &str) -> AppResult<u64> {
        Choice::find()
            .filter(choice::Column::QuestionId.eq(question_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new choice.
    pub async fn create(&self, model: choice::ActiveModel) -> AppResult<choice::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(super::map_insert_err)
    }

    /// Increment the vote counter atomically.
    ///
    /// Returns whether the choice existed.
    pub async fn increment_votes(&self, id: &str) -> AppResult<bool> {
        let result = Choice::update_many()
            .col_expr(choice::Column::Votes, Expr::col(choice::Column::Votes).add(1))
            .filter(choice::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }

    /// Delete a choice. Returns whether a row was deleted.
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = Choice::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_choice(id: &str, question_id: &str, votes: i32) -> choice::Model {
        choice::Model {
            id: id.to_string(),
            question_id: question_id.to_string(),
            choice_text: format!("Choice {id}"),
            votes,
        }
    }

    #[tokio::test]
    async fn test_find_by_question() {
        let c1 = create_test_choice("c1", "q1", 0);
        let c2 = create_test_choice("c2", "q1", 3);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[c1, c2]])
                .into_connection(),
        );

        let repo = ChoiceRepository::new(db);
        let result = repo.find_by_question("q1").await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[1].votes, 3);
    }

    #[tokio::test]
    async fn test_increment_votes() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = ChoiceRepository::new(db);
        assert!(repo.increment_votes("c1").await.unwrap());
    }

    #[tokio::test]
    async fn test_increment_votes_missing_choice() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                }])
                .into_connection(),
        );

        let repo = ChoiceRepository::new(db);
        assert!(!repo.increment_votes("missing").await.unwrap());
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<choice::Model>::new()])
                .into_connection(),
        );

        let repo = ChoiceRepository::new(db);
        assert!(matches!(
            repo.get_by_id("missing").await,
            Err(AppError::NotFound(_))
        ));
    }
}
