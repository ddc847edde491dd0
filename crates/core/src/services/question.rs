//! Question service.

use chrono::{DateTime, Utc};
use polls_common::{AppError, AppResult, IdGenerator};
use polls_db::entities::question;
use polls_db::repositories::QuestionRepository;
use sea_orm::{Set, prelude::DateTimeWithTimeZone};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use super::HistoryService;

/// Input for creating a question.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionInput {
    #[validate(length(min = 1, max = 200))]
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
}

/// Input for updating a question.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionInput {
    pub question_id: String,
    #[validate(length(min = 1, max = 200))]
    pub question_text: Option<String>,
    pub pub_date: Option<DateTime<Utc>>,
}

/// Service for managing questions.
#[derive(Clone)]
pub struct QuestionService {
    question_repo: QuestionRepository,
    history: HistoryService,
    id_gen: IdGenerator,
}

impl QuestionService {
    /// Create a new question service.
    #[must_use]
    pub const fn new(question_repo: QuestionRepository, history: HistoryService) -> Self {
        Self {
            question_repo,
            history,
            id_gen: IdGenerator::new(),
        }
    }

    /// Get a question by ID.
    pub async fn find(&self, id: &str) -> AppResult<Option<question::Model>> {
        self.question_repo.find_by_id(id).await
    }

    /// Get a question by ID, returning error if not found.
    pub async fn get(&self, id: &str) -> AppResult<question::Model> {
        self.question_repo.get_by_id(id).await
    }

    /// List the latest published questions, newest first.
    pub async fn list_recent(&self, limit: u64) -> AppResult<Vec<question::Model>> {
        self.question_repo.find_published(Utc::now(), limit).await
    }

    /// Create a question and record its creation in the history.
    ///
    /// The two inserts are not atomic: if recording the history fails, the
    /// error is returned and the question row stays.
    pub async fn create(&self, input: CreateQuestionInput) -> AppResult<question::Model> {
        input
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let now: DateTimeWithTimeZone = Utc::now().into();
        let model = question::ActiveModel {
            id: Set(self.id_gen.generate()),
            question_text: Set(input.question_text),
            pub_date: Set(input.pub_date.into()),
            created: Set(now),
            modified: Set(now),
        };

        let question = self.question_repo.create(model).await?;
        self.history.record_question_saved(&question, true).await?;

        info!(question_id = %question.id, "Created question");
        Ok(question)
    }

    /// Update a question's text and/or publish date.
    pub async fn update(&self, input: UpdateQuestionInput) -> AppResult<question::Model> {
        input
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let question = self.question_repo.get_by_id(&input.question_id).await?;
        let created = question.created;
        let mut active: question::ActiveModel = question.into();

        if let Some(question_text) = input.question_text {
            active.question_text = Set(question_text);
        }
        if let Some(pub_date) = input.pub_date {
            active.pub_date = Set(pub_date.into());
        }

        // modified never goes behind created, even with a skewed clock
        let now: DateTimeWithTimeZone = Utc::now().into();
        active.modified = Set(now.max(created));

        let question = self.question_repo.update(active).await?;
        self.history.record_question_saved(&question, false).await?;

        Ok(question)
    }

    /// Delete a question with its choices. Its history row is kept.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        if !self.question_repo.delete(id).await? {
            return Err(AppError::NotFound(format!("Question {id} not found")));
        }

        info!(question_id = %id, "Deleted question");
        Ok(())
    }
}
