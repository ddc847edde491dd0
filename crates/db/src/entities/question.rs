//! Question entity: a poll question with its publish date.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Maximum length of `question_text`, in characters.
pub const QUESTION_TEXT_MAX_LEN: u64 = 200;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "question")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub question_text: String,

    /// Date the question is published
    #[sea_orm(indexed)]
    pub pub_date: DateTimeWithTimeZone,

    /// Set once on insert
    pub created: DateTimeWithTimeZone,

    /// Bumped on every save, never earlier than `created`
    pub modified: DateTimeWithTimeZone,
}

impl Model {
    /// Whether the question was published within the day before `now`.
    ///
    /// Questions dated in the future are not considered recent.
    #[must_use]
    pub fn was_published_recently(&self, now: DateTime<Utc>) -> bool {
        let pub_date = self.pub_date.with_timezone(&Utc);
        now - Duration::days(1) <= pub_date && pub_date <= now
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.question_text)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::choice::Entity")]
    Choice,

    #[sea_orm(has_one = "super::question_history::Entity")]
    QuestionHistory,
}

impl Related<super::choice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Choice.def()
    }
}

impl Related<super::question_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QuestionHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
