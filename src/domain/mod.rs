//! Domain layer - core business logic and types.
//!
//! This layer contains pure domain models and error types
//! without any external dependencies (network, IO, etc.).

pub mod api;
pub mod error;
pub mod models;

pub use api::{ConversationApi, UserLookup};
pub use error::{AppError, Result};
pub use models::{
    Attachment, DeleteStats, ExportRecord, ExportStats, FileComment, FileObject, HistoryMessage,
    HistoryPage, ItemKind, StarredItem, StarredMessage, UserProfile,
};
