//! Progress-derived read models
//!
//! Pure functions joining the catalog with the progress record: per-course
//! completion, overall totals, the recommended course, and the next lesson
//! to continue with. Nothing here mutates state. Course completion is
//! derived here on every read rather than stored, so it can never drift
//! from the lesson-level record.

use crate::catalog::{Catalog, Course, Lesson};
use crate::progress::UserProgress;

/// Completion state of a single course
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseProgress {
    /// Lessons of this course marked complete
    pub completed: usize,
    /// Lessons in the course
    pub total: usize,
    /// Rounded completion percentage (0 for an empty course)
    pub percentage: u8,
}

impl CourseProgress {
    /// The course has at least one completed lesson
    pub fn is_started(&self) -> bool {
        self.completed > 0
    }

    /// Every lesson of a non-empty course is complete
    pub fn is_completed(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// Aggregate completion state across the whole catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overview {
    /// Lessons in the catalog
    pub total_lessons: usize,
    /// Lessons marked complete
    pub completed_lessons: usize,
    /// Estimated hours across all courses
    pub total_hours: u32,
    /// Estimated hours covered, proportional to lessons completed
    pub hours_learned: u32,
    /// Rounded overall completion percentage
    pub completion_percentage: u8,
}

/// Where to pick up next
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinueTarget {
    pub course_id: String,
    /// None when every lesson of the target course is already complete
    pub lesson_id: Option<String>,
}

fn percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        0
    } else {
        (completed as f64 / total as f64 * 100.0).round() as u8
    }
}

/// Completion state of one course
pub fn course_progress(course: &Course, progress: &UserProgress) -> CourseProgress {
    let completed = course
        .lessons
        .iter()
        .filter(|lesson| progress.completed_lessons.iter().any(|id| *id == lesson.id))
        .count();
    let total = course.lessons.len();
    CourseProgress { completed, total, percentage: percentage(completed, total) }
}

/// Aggregate completion across the catalog
pub fn overview(catalog: &Catalog, progress: &UserProgress) -> Overview {
    let total_lessons = catalog.lesson_count();
    let completed_lessons = catalog
        .courses()
        .iter()
        .map(|course| course_progress(course, progress).completed)
        .sum();
    let total_hours = catalog.total_hours();
    let hours_learned = if total_lessons == 0 {
        0
    } else {
        (completed_lessons as f64 / total_lessons as f64 * f64::from(total_hours)).round() as u32
    };

    Overview {
        total_lessons,
        completed_lessons,
        total_hours,
        hours_learned,
        completion_percentage: percentage(completed_lessons, total_lessons),
    }
}

/// The course the learner should look at next: the first course that is
/// started but not finished, or failing that the first course in the
/// catalog.
pub fn recommended_course<'a>(catalog: &'a Catalog, progress: &UserProgress) -> Option<&'a Course> {
    catalog
        .courses()
        .iter()
        .find(|course| {
            let p = course_progress(course, progress);
            p.is_started() && !p.is_completed()
        })
        .or_else(|| catalog.courses().first())
}

fn first_incomplete_lesson<'a>(course: &'a Course, progress: &UserProgress) -> Option<&'a Lesson> {
    course.lessons.iter().find(|lesson| !progress.completed_lessons.iter().any(|id| *id == lesson.id))
}

/// Where "continue learning" should land: the saved current position if the
/// learner has one, otherwise the first incomplete lesson of the
/// recommended course.
pub fn continue_target(catalog: &Catalog, progress: &UserProgress) -> Option<ContinueTarget> {
    if let (Some(course_id), Some(lesson_id)) = (&progress.current_course, &progress.current_lesson)
    {
        return Some(ContinueTarget {
            course_id: course_id.clone(),
            lesson_id: Some(lesson_id.clone()),
        });
    }

    let course = recommended_course(catalog, progress)?;
    Some(ContinueTarget {
        course_id: course.id.clone(),
        lesson_id: first_incomplete_lesson(course, progress).map(|l| l.id.clone()),
    })
}

/// Courses whose lessons are all complete, derived on read
pub fn completed_courses<'a>(catalog: &'a Catalog, progress: &UserProgress) -> Vec<&'a Course> {
    catalog
        .courses()
        .iter()
        .filter(|course| course_progress(course, progress).is_completed())
        .collect()
}
