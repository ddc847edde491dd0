//! Permission entity, keyed by content type and codename.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "permission")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(indexed)]
    pub content_type_id: String,

    /// Machine name, e.g. `view_question`
    pub codename: String,

    /// Display name, e.g. `Can view question`
    pub name: String,
}

impl Model {
    /// Render as `<app_label> | <content type> | <name>`.
    #[must_use]
    pub fn label(&self, content_type: &super::content_type::Model) -> String {
        format!("{} | {} | {}", content_type.app_label, content_type.name, self.name)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::content_type::Entity",
        from = "Column::ContentTypeId",
        to = "super::content_type::Column::Id",
        on_delete = "Cascade"
    )]
    ContentType,
}

impl Related<super::content_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContentType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
