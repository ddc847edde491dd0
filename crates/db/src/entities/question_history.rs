//! Question history entity.
//!
//! One row per question creation. The reference to the question is cleared
//! when the question is deleted, so the row outlives it as an audit record.

use std::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Display format of `creation_time`, e.g. `Jan. 01, 2024, 00:00:00`.
pub const CREATION_TIME_FORMAT: &str = "%b. %d, %Y, %X";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "question_history")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Question this row was recorded for (null once the question is deleted)
    #[sea_orm(nullable, unique)]
    pub question_id: Option<String>,

    pub creation_time: DateTimeWithTimeZone,
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.creation_time.format(CREATION_TIME_FORMAT))
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::question::Entity",
        from = "Column::QuestionId",
        to = "super::question::Column::Id",
        on_delete = "SetNull"
    )]
    Question,
}

impl Related<super::question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_display_formats_creation_time() {
        let history = Model {
            id: "h1".to_string(),
            question_id: None,
            creation_time: Utc.with_ymd_and_hms(2024, 1, 1, 13, 5, 9).unwrap().into(),
        };
        assert_eq!(history.to_string(), "Jan. 01, 2024, 13:05:09");
    }
}
