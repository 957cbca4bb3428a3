//! Progress persistence
//!
//! [`ProgressStore`] is the sole owner of the progress file. Every mutation
//! is a self-contained load-modify-save, so callers never hold stale state
//! and never see a partially-shaped record. The public surface does not
//! fail: a missing or corrupt file degrades to the default record, and a
//! failed write is logged and dropped rather than surfaced. The worst
//! outcome is losing the most recent mutation, never a crash.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use directories::ProjectDirs;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, warn};

use super::merge::repair;
use super::model::{PreferenceUpdate, UserProgress, push_unique};

/// Why an import was rejected. The existing progress file is untouched in
/// every case.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The supplied data is not valid JSON
    #[error("import data is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// The supplied data parsed, but is not a JSON object
    #[error("import data must be a JSON object")]
    NotAnObject,

    /// The supplied object has a field of the wrong type
    #[error("import data does not describe a progress record: {0}")]
    Shape(#[source] serde_json::Error),

    /// The record validated but could not be written
    #[error("failed to persist imported progress: {0:#}")]
    Persist(#[source] anyhow::Error),
}

/// Owns the persisted progress record
#[derive(Debug, Clone)]
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    /// Create a store backed by the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store backed by the default progress file under the
    /// platform data directory
    pub fn open() -> Result<Self> {
        let proj_dirs = ProjectDirs::from("", "", "learnpath")
            .context("Failed to determine data directory")?;
        Ok(Self::new(proj_dirs.data_dir().join("progress.json")))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the progress record, falling back to defaults.
    ///
    /// A missing file yields the default record without writing anything.
    /// Fields missing from an older file are filled from the defaults. A
    /// file that cannot be read, parsed, or shaped is treated as absent and
    /// logged as a warning.
    pub fn load(&self) -> UserProgress {
        match self.try_load() {
            Ok(progress) => progress,
            Err(err) => {
                warn!("Falling back to default progress: {err:#}");
                UserProgress::default()
            }
        }
    }

    fn try_load(&self) -> Result<UserProgress> {
        if !self.path.exists() {
            return Ok(UserProgress::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read progress from {:?}", self.path))?;
        let raw: Value =
            serde_json::from_str(&contents).with_context(|| "Failed to parse progress file")?;
        repair(raw).with_context(|| "Progress file does not match the expected shape")
    }

    /// Persist the full record, overwriting any prior value. A write failure
    /// is logged and dropped; the caller's in-memory record is unaffected.
    pub fn save(&self, progress: &UserProgress) {
        if let Err(err) = self.persist(progress) {
            error!("Failed to save progress: {err:#}");
        }
    }

    fn persist(&self, progress: &UserProgress) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory {:?}", parent))?;
        }

        let contents = serde_json::to_string_pretty(progress)
            .with_context(|| "Failed to serialize progress")?;

        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write progress to {:?}", self.path))?;

        Ok(())
    }

    /// Record a lesson as completed. Idempotent.
    pub fn mark_lesson_complete(&self, lesson_id: &str) {
        let mut progress = self.load();
        if push_unique(&mut progress.completed_lessons, lesson_id) {
            self.save(&progress);
        }
    }

    /// Record an exercise as completed. Idempotent.
    pub fn mark_exercise_complete(&self, exercise_id: &str) {
        let mut progress = self.load();
        if push_unique(&mut progress.completed_exercises, exercise_id) {
            self.save(&progress);
        }
    }

    /// Set the learner's current position and record the course as started.
    ///
    /// Neither id is checked against the catalog; that is the caller's
    /// concern. This is the only operation that writes `courses_started`.
    pub fn set_current_lesson(&self, course_id: &str, lesson_id: &str) {
        let mut progress = self.load();
        progress.current_course = Some(course_id.to_string());
        progress.current_lesson = Some(lesson_id.to_string());
        push_unique(&mut progress.stats.courses_started, course_id);
        self.save(&progress);
    }

    /// Apply a partial preference update; unspecified fields keep their
    /// prior value
    pub fn update_preferences(&self, update: PreferenceUpdate) {
        let mut progress = self.load();
        progress.preferences.apply(update);
        self.save(&progress);
    }

    /// Record study time against today and advance the streak. Zero minutes
    /// is a no-op.
    pub fn add_study_time(&self, minutes: u32) {
        self.add_study_time_on(minutes, Local::now().date_naive());
    }

    /// Record study time against an explicit day. Used by tests to exercise
    /// the streak transitions without a real clock.
    pub fn add_study_time_on(&self, minutes: u32, today: NaiveDate) {
        if minutes == 0 {
            return;
        }
        let mut progress = self.load();
        progress.stats.record_study(minutes, today);
        self.save(&progress);
    }

    /// Delete the persisted record entirely. The next [`load`](Self::load)
    /// yields the default record.
    pub fn reset(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => error!("Failed to reset progress at {:?}: {err}", self.path),
        }
    }

    /// Pretty-printed JSON of the current record. Read-only.
    pub fn export(&self) -> String {
        let progress = self.load();
        match serde_json::to_string_pretty(&progress) {
            Ok(contents) => contents,
            Err(err) => {
                error!("Failed to serialize progress for export: {err}");
                String::new()
            }
        }
    }

    /// Parse and persist an exported progress record, replacing the current
    /// one. The data must be a JSON object; missing fields are filled from
    /// the defaults through the same validation path as
    /// [`load`](Self::load), and wrong-typed fields are rejected. On any
    /// failure the existing record is left untouched.
    pub fn import(&self, data: &str) -> Result<(), ImportError> {
        let raw: Value = serde_json::from_str(data).map_err(ImportError::Parse)?;
        if !raw.is_object() {
            return Err(ImportError::NotAnObject);
        }

        let progress = repair(raw).map_err(ImportError::Shape)?;
        self.persist(&progress).map_err(ImportError::Persist)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::progress::model::{FontSize, Theme};

    fn store(dir: &TempDir) -> ProgressStore {
        ProgressStore::new(dir.path().join("progress.json"))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn load_without_file_returns_defaults_and_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        assert_eq!(store.load(), UserProgress::default());
        assert!(!store.path().exists());
    }

    #[test]
    fn load_with_corrupt_file_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::write(store.path(), "not json {{{").unwrap();

        assert_eq!(store.load(), UserProgress::default());
    }

    #[test]
    fn load_fills_missing_fields_from_older_file() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::write(store.path(), r#"{"completed_lessons":["html-1"],"stats":{"total_time_spent":45}}"#)
            .unwrap();

        let progress = store.load();
        assert_eq!(progress.completed_lessons, vec!["html-1"]);
        assert_eq!(progress.stats.total_time_spent, 45);
        assert_eq!(progress.stats.streak, 0);
        assert_eq!(progress.preferences.font_size, FontSize::Medium);
    }

    #[test]
    fn mark_lesson_complete_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.mark_lesson_complete("html-1");
        store.mark_lesson_complete("html-1");
        store.mark_lesson_complete("html-2");
        store.mark_lesson_complete("html-1");

        assert_eq!(store.load().completed_lessons, vec!["html-1", "html-2"]);
    }

    #[test]
    fn mark_exercise_complete_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.mark_exercise_complete("html-1-ex1");
        store.mark_exercise_complete("html-1-ex1");

        assert_eq!(store.load().completed_exercises, vec!["html-1-ex1"]);
    }

    #[test]
    fn first_session_sets_position_and_started_course() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.set_current_lesson("html", "html-1");

        let progress = store.load();
        assert_eq!(progress.current_course.as_deref(), Some("html"));
        assert_eq!(progress.current_lesson.as_deref(), Some("html-1"));
        assert_eq!(progress.stats.courses_started, vec!["html"]);
    }

    #[test]
    fn reopening_a_course_does_not_duplicate_started_entry() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.set_current_lesson("html", "html-1");
        store.set_current_lesson("html", "html-2");

        let progress = store.load();
        assert_eq!(progress.current_lesson.as_deref(), Some("html-2"));
        assert_eq!(progress.stats.courses_started, vec!["html"]);
    }

    #[test]
    fn update_preferences_only_touches_supplied_fields() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.update_preferences(PreferenceUpdate {
            theme: Some(Theme::Dark),
            ..Default::default()
        });

        let progress = store.load();
        assert_eq!(progress.preferences.theme, Theme::Dark);
        assert_eq!(progress.preferences.font_size, FontSize::Medium);
        assert_eq!(progress.preferences.language, "en");
    }

    #[test]
    fn study_time_accumulates_within_a_day() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let today = date(2026, 8, 31);

        store.add_study_time_on(10, today);
        store.add_study_time_on(10, today);

        let stats = store.load().stats;
        assert_eq!(stats.total_time_spent, 20);
        assert_eq!(stats.streak, 1);
        assert_eq!(stats.last_study_date, Some(today));
    }

    #[test]
    fn study_on_consecutive_days_extends_streak() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.add_study_time_on(5, date(2026, 8, 29));
        store.add_study_time_on(5, date(2026, 8, 30));
        store.add_study_time_on(5, date(2026, 8, 31));

        assert_eq!(store.load().stats.streak, 3);
    }

    #[test]
    fn study_after_a_gap_resets_streak() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.add_study_time_on(5, date(2026, 8, 27));
        store.add_study_time_on(5, date(2026, 8, 28));
        store.add_study_time_on(5, date(2026, 8, 31));

        let stats = store.load().stats;
        assert_eq!(stats.streak, 1);
        assert_eq!(stats.total_time_spent, 15);
    }

    #[test]
    fn save_to_unwritable_path_is_non_fatal() {
        let dir = TempDir::new().unwrap();
        // The would-be parent directory is a regular file, so every write
        // (and the create_dir_all before it) must fail.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let store = ProgressStore::new(blocker.join("progress.json"));

        let mut progress = UserProgress::default();
        progress.completed_lessons.push("html-1".into());
        store.save(&progress);
        store.mark_lesson_complete("html-2");

        // Nothing was persisted; the caller's record is theirs alone.
        assert_eq!(progress.completed_lessons, vec!["html-1"]);
        assert_eq!(store.load(), UserProgress::default());
    }

    #[test]
    fn reset_removes_the_file() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.mark_lesson_complete("html-1");
        assert!(store.path().exists());

        store.reset();
        assert!(!store.path().exists());
        assert_eq!(store.load(), UserProgress::default());

        // Resetting again is harmless.
        store.reset();
    }

    #[test]
    fn export_import_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.mark_lesson_complete("html-1");
        store.set_current_lesson("html", "html-2");
        store.add_study_time_on(25, date(2026, 8, 31));
        let before = store.load();

        let exported = store.export();
        store.reset();
        store.import(&exported).unwrap();

        assert_eq!(store.load(), before);
    }

    #[test]
    fn import_rejects_invalid_json() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.mark_lesson_complete("html-1");

        let err = store.import("{ truncated").unwrap_err();
        assert!(matches!(err, ImportError::Parse(_)));
        assert_eq!(store.load().completed_lessons, vec!["html-1"]);
    }

    #[test]
    fn import_rejects_non_objects() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        assert!(matches!(store.import("[1, 2, 3]").unwrap_err(), ImportError::NotAnObject));
        assert!(matches!(store.import("42").unwrap_err(), ImportError::NotAnObject));
    }

    #[test]
    fn import_rejects_wrong_typed_fields() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.mark_lesson_complete("html-1");

        let err = store.import(r#"{"stats":{"streak":"five"}}"#).unwrap_err();
        assert!(matches!(err, ImportError::Shape(_)));
        assert_eq!(store.load().completed_lessons, vec!["html-1"]);
    }

    #[test]
    fn import_fills_missing_fields() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.import(r#"{"completed_lessons":["css-1"]}"#).unwrap();

        let progress = store.load();
        assert_eq!(progress.completed_lessons, vec!["css-1"]);
        assert_eq!(progress.stats.streak, 0);
        assert_eq!(progress.preferences.theme, Theme::Light);
    }
}
