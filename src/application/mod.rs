//! Application layer - use cases and orchestration.
//!
//! This layer contains the main business logic for exporting starred
//! items and purging conversation history.

pub mod deleter;
pub mod exporter;

pub use deleter::delete_channel_history;
pub use exporter::{export_starred, ExportOutcome};
