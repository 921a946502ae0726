//! draftpad - offline-first single-document editor
//!
//! Keeps one plain-text document persisted locally with debounced
//! autosave, and keeps the application's static assets served from a
//! versioned cache so everything works without a network.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod session;
pub mod ui;

pub use error::{DraftpadError, DraftpadResult};
