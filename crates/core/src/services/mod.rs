//! Business logic services.

pub mod choice;
pub mod history;
pub mod permission;
pub mod question;

pub use choice::{ChoiceService, CreateChoiceInput};
pub use history::HistoryService;
pub use permission::{
    BOOTSTRAP_ACTIONS, DbPermissionRegistry, PermissionRegistry, PermissionRegistryHandle,
    PermissionService,
};
pub use question::{CreateQuestionInput, QuestionService, UpdateQuestionInput};
