//! Markdown ⇄ kanban board transcoder.
//!
//! `parse` turns a kanban markdown file into a [`KanbanBoard`], `generate`
//! writes one back. Both are pure; callers own loading and saving.

pub mod error;
pub mod generator;
pub mod links;
pub mod metadata;
pub mod parser;
pub mod types;

pub use error::StructureError;
pub use generator::generate;
pub use links::extract_links;
pub use metadata::{extract_metadata, CardMetadata};
pub use parser::parse;
pub use types::{CardLink, ColumnSummary, KanbanBoard, KanbanCard, KanbanColumn, Priority, Subtask};
