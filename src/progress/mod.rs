//! Learner progress tracking
//!
//! This module owns the single persisted progress record: which lessons and
//! exercises are done, the learner's current position, display preferences,
//! and study statistics including the daily streak. All reads and writes go
//! through [`ProgressStore`], which guarantees callers always see a
//! fully-shaped record even when the file on disk predates the current
//! schema.

pub mod merge;
pub mod model;
pub mod store;

// Re-exports
pub use model::{FontSize, PreferenceUpdate, Preferences, Stats, Theme, UserProgress};
pub use store::{ImportError, ProgressStore};
