//! The course catalog
//!
//! Static, read-only content: courses owning ordered lessons, lessons
//! optionally owning exercises. The catalog is validated once at
//! construction (unique ids, every lesson's `course_id` matching its owning
//! course) and never mutated afterwards; progress tracking references it by
//! id only.

pub mod model;
pub mod sample;
pub mod storage;

// Re-exports
pub use model::{Catalog, CatalogError, Course, Difficulty, Exercise, Lesson};
pub use sample::sample;
pub use storage::load_dir;
