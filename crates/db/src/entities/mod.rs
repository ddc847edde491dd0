//! Database entities.

#![allow(missing_docs)]

pub mod choice;
pub mod content_type;
pub mod permission;
pub mod question;
pub mod question_history;

pub use choice::Entity as Choice;
pub use content_type::Entity as ContentType;
pub use permission::Entity as Permission;
pub use question::Entity as Question;
pub use question_history::Entity as QuestionHistory;
