//! Learnpath - a command line learning platform
//!
//! Learnpath tracks your way through a catalog of programming courses:
//! lessons completed, exercises solved, daily study streaks, and where to
//! pick up next. Progress lives in a single JSON file under the local data
//! directory and survives across sessions.

pub mod catalog;
pub mod insights;
pub mod progress;

pub use catalog::Catalog;
pub use progress::{ProgressStore, UserProgress};
