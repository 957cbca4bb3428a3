//! The persisted progress record

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// UI color scheme preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Text size preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Display preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Color scheme
    pub theme: Theme,

    /// Text size
    pub font_size: FontSize,

    /// Interface language code (e.g. "en")
    pub language: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self { theme: Theme::default(), font_size: FontSize::default(), language: "en".to_string() }
    }
}

/// A partial preference change. Only the supplied fields are applied;
/// everything else keeps its prior value.
#[derive(Debug, Clone, Default)]
pub struct PreferenceUpdate {
    pub theme: Option<Theme>,
    pub font_size: Option<FontSize>,
    pub language: Option<String>,
}

impl Preferences {
    /// Apply a partial update, leaving unspecified fields untouched
    pub fn apply(&mut self, update: PreferenceUpdate) {
        if let Some(theme) = update.theme {
            self.theme = theme;
        }
        if let Some(font_size) = update.font_size {
            self.font_size = font_size;
        }
        if let Some(language) = update.language {
            self.language = language;
        }
    }
}

/// Study statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Total study time in minutes
    pub total_time_spent: u64,

    /// Consecutive calendar days with recorded study time
    pub streak: u32,

    /// Last day study time was recorded
    pub last_study_date: Option<NaiveDate>,

    /// Courses the learner has opened at least once
    pub courses_started: Vec<String>,

    /// Never written by any operation; course completion is derived on read
    /// from the catalog (see `insights::completed_courses`)
    pub courses_completed: Vec<String>,
}

impl Stats {
    /// Record `minutes` of study on the given day and advance the streak.
    ///
    /// Zero minutes is a complete no-op: neither the total, the streak, nor
    /// the last study date changes. Otherwise the streak follows the
    /// calendar: unchanged when `today` was already recorded, incremented
    /// when the previous recorded day was yesterday, reset to 1 for any gap
    /// (including the first ever session).
    pub fn record_study(&mut self, minutes: u32, today: NaiveDate) {
        if minutes == 0 {
            return;
        }

        self.total_time_spent += u64::from(minutes);

        self.streak = if self.last_study_date == Some(today) {
            self.streak
        } else if self.last_study_date == today.pred_opt() {
            self.streak + 1
        } else {
            1
        };
        self.last_study_date = Some(today);
    }
}

/// The single persisted aggregate describing a learner's completion state,
/// preferences, and statistics. One instance per installation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgress {
    /// Completed lesson ids, insertion order, no duplicates
    pub completed_lessons: Vec<String>,

    /// Completed exercise ids, insertion order, no duplicates
    pub completed_exercises: Vec<String>,

    /// Course of the learner's last active position
    pub current_course: Option<String>,

    /// Lesson of the learner's last active position
    pub current_lesson: Option<String>,

    /// Display preferences
    pub preferences: Preferences,

    /// Study statistics
    pub stats: Stats,
}

/// Append `id` to `list` unless already present. Returns whether the list
/// changed.
pub(crate) fn push_unique(list: &mut Vec<String>, id: &str) -> bool {
    if list.iter().any(|existing| existing == id) {
        false
    } else {
        list.push(id.to_string());
        true
    }
}
