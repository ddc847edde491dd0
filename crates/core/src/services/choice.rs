//! Choice service.

use polls_common::{AppError, AppResult, IdGenerator};
use polls_db::entities::choice;
use polls_db::repositories::{ChoiceRepository, QuestionRepository};
use sea_orm::Set;
use serde::Deserialize;
use tracing::{debug, info};
use validator::Validate;

/// Input for adding a choice to a question.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateChoiceInput {
    pub question_id: String,
    #[validate(length(min = 1, max = 200))]
    pub choice_text: String,
    #[serde(default)]
    pub votes: i32,
}

/// Service for managing choices and votes.
#[derive(Clone)]
pub struct ChoiceService {
    choice_repo: ChoiceRepository,
    question_repo: QuestionRepository,
    id_gen: IdGenerator,
}

impl ChoiceService {
    /// Create a new choice service.
    #[must_use]
    pub const fn new(choice_repo: ChoiceRepository, question_repo: QuestionRepository) -> Self {
        Self {
            choice_repo,
            question_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Get a choice by ID, returning error if not found.
    pub async fn get(&self, id: &str) -> AppResult<choice::Model> {
        self.choice_repo.get_by_id(id).await
    }

    /// List the choices of a question.
    pub async fn list_for_question(&self, question_id: &str) -> AppResult<Vec<choice::Model>> {
        self.choice_repo.find_by_question(question_id).await
    }

    /// Add a choice to an existing question.
    pub async fn create(&self, input: CreateChoiceInput) -> AppResult<choice::Model> {
        input
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let question = self.question_repo.get_by_id(&input.question_id).await?;

        let model = choice::ActiveModel {
            id: Set(self.id_gen.generate()),
            question_id: Set(question.id),
            choice_text: Set(input.choice_text),
            votes: Set(input.votes),
        };

        let choice = self.choice_repo.create(model).await?;
        info!(choice_id = %choice.id, question_id = %choice.question_id, "Added choice");
        Ok(choice)
    }

    /// Count one vote for a choice.
    pub async fn vote(&self, choice_id: &str) -> AppResult<choice::Model> {
        if !self.choice_repo.increment_votes(choice_id).await? {
            return Err(AppError::NotFound(format!("Choice {choice_id} not found")));
        }

        let choice = self.choice_repo.get_by_id(choice_id).await?;
        debug!(choice_id, votes = choice.votes, "Vote counted");
        Ok(choice)
    }

    /// Delete a choice.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        if !self.choice_repo.delete(id).await? {
            return Err(AppError::NotFound(format!("Choice {id} not found")));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use polls_db::entities::question;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn service(db: DatabaseConnection) -> ChoiceService {
        let db = Arc::new(db);
        ChoiceService::new(ChoiceRepository::new(db.clone()), QuestionRepository::new(db))
    }

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

    fn create_test_choice(id: &str, votes: i32) -> choice::Model {
        choice::Model {
            id: id.to_string(),
            question_id: "q1".to_string(),
            choice_text: "Yes".to_string(),
            votes,
        }
    }

    #[tokio::test]
    async fn test_create_for_missing_question() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<question::Model>::new()])
            .into_connection();

        let result = service(db)
            .create(CreateChoiceInput {
                question_id: "missing".to_string(),
                choice_text: "Yes".to_string(),
                votes: 0,
            })
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_long_text() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let result = service(db)
            .create(CreateChoiceInput {
                question_id: "q1".to_string(),
                choice_text: "x".repeat(201),
                votes: 0,
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_question("q1")]])
            .append_query_results([[create_test_choice("c1", 0)]])
            .into_connection();

        let result = service(db)
            .create(CreateChoiceInput {
                question_id: "q1".to_string(),
                choice_text: "Yes".to_string(),
                votes: 0,
            })
            .await
            .unwrap();

        assert_eq!(result.question_id, "q1");
        assert_eq!(result.votes, 0);
    }

    #[tokio::test]
    async fn test_vote() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_query_results([[create_test_choice("c1", 1)]])
            .into_connection();

        let result = service(db).vote("c1").await.unwrap();

        assert_eq!(result.votes, 1);
    }

    #[tokio::test]
    async fn test_vote_missing_choice() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let result = service(db).vote("missing").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_votes_default_to_zero() {
        let input: CreateChoiceInput =
            serde_json::from_str(r#"{"questionId": "q1", "choiceText": "Yes"}"#).unwrap();
        assert_eq!(input.votes, 0);
    }
}
