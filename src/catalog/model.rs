//! Content model for the course catalog

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lesson difficulty rating
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// A practice exercise attached to a lesson
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// What the learner is asked to do
    pub description: String,
    /// Code the editor is pre-filled with
    pub starter_code: Option<String>,
    /// Reference solution
    pub solution: Option<String>,
    /// Progressive hints
    #[serde(default)]
    pub hints: Vec<String>,
    /// Language of the starter code
    pub language: Option<String>,
}

impl Exercise {
    /// Create a new exercise
    pub fn new(id: impl Into<String>, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            starter_code: None,
            solution: None,
            hints: Vec::new(),
            language: None,
        }
    }

    /// Set the starter code
    pub fn with_starter_code(mut self, code: impl Into<String>) -> Self {
        self.starter_code = Some(code.into());
        self
    }

    /// Set the reference solution
    pub fn with_solution(mut self, solution: impl Into<String>) -> Self {
        self.solution = Some(solution.into());
        self
    }
}

/// A single lesson within a course
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    /// Unique identifier across the whole catalog
    pub id: String,
    /// Id of the owning course; checked against the actual owner at
    /// catalog construction
    pub course_id: String,
    /// Display title
    pub title: String,
    /// One-line summary
    pub description: String,
    /// Lesson body (markdown)
    pub content: String,
    /// Illustrative code snippet
    pub code_example: Option<String>,
    /// Language of the code example
    pub language: Option<String>,
    /// Practice exercises
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    /// Difficulty rating
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Estimated time to complete, in minutes
    pub estimated_minutes: u32,
    /// Lesson ids that should be completed first
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

impl Lesson {
    /// Create a new lesson
    pub fn new(
        id: impl Into<String>,
        course_id: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            course_id: course_id.into(),
            title: title.into(),
            description: String::new(),
            content: String::new(),
            code_example: None,
            language: None,
            exercises: Vec::new(),
            difficulty: Difficulty::Beginner,
            estimated_minutes: 30,
            prerequisites: Vec::new(),
        }
    }
}

/// A course: an ordered sequence of lessons
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Unique identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// What the course covers
    pub description: String,
    /// Display icon (emoji)
    pub icon: String,
    /// Accent color (hex)
    pub color: String,
    /// Estimated total effort in hours
    pub estimated_hours: u32,
    /// Lessons in learning order
    pub lessons: Vec<Lesson>,
}

impl Course {
    /// Number of lessons in this course
    pub fn lesson_count(&self) -> usize {
        self.lessons.len()
    }

    /// Find a lesson by id
    pub fn lesson(&self, lesson_id: &str) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id == lesson_id)
    }
}

/// A structural problem found while building a catalog
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Two courses share an id
    #[error("duplicate course id: {0}")]
    DuplicateCourse(String),

    /// Two lessons share an id (anywhere in the catalog)
    #[error("duplicate lesson id: {0}")]
    DuplicateLesson(String),

    /// Two exercises share an id (anywhere in the catalog)
    #[error("duplicate exercise id: {0}")]
    DuplicateExercise(String),

    /// A lesson names a course other than the one it sits in
    #[error("lesson {lesson_id} declares course {declared}, but belongs to course {actual}")]
    CourseMismatch {
        lesson_id: String,
        declared: String,
        actual: String,
    },
}

/// The validated, immutable course catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    courses: Vec<Course>,
}

impl Catalog {
    /// Build a catalog, validating structure up front: course, lesson, and
    /// exercise ids must be unique, and every lesson's `course_id` must
    /// match the course it sits in.
    pub fn new(courses: Vec<Course>) -> Result<Self, CatalogError> {
        let mut course_ids = std::collections::HashSet::new();
        let mut lesson_ids = std::collections::HashSet::new();
        let mut exercise_ids = std::collections::HashSet::new();

        for course in &courses {
            if !course_ids.insert(course.id.as_str()) {
                return Err(CatalogError::DuplicateCourse(course.id.clone()));
            }
            for lesson in &course.lessons {
                if !lesson_ids.insert(lesson.id.as_str()) {
                    return Err(CatalogError::DuplicateLesson(lesson.id.clone()));
                }
                if lesson.course_id != course.id {
                    return Err(CatalogError::CourseMismatch {
                        lesson_id: lesson.id.clone(),
                        declared: lesson.course_id.clone(),
                        actual: course.id.clone(),
                    });
                }
                for exercise in &lesson.exercises {
                    if !exercise_ids.insert(exercise.id.as_str()) {
                        return Err(CatalogError::DuplicateExercise(exercise.id.clone()));
                    }
                }
            }
        }

        Ok(Self { courses })
    }

    /// All courses, in catalog order
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Find a course by id
    pub fn course(&self, course_id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == course_id)
    }

    /// Find a lesson by id, together with its owning course
    pub fn lesson(&self, lesson_id: &str) -> Option<(&Course, &Lesson)> {
        for course in &self.courses {
            if let Some(lesson) = course.lesson(lesson_id) {
                return Some((course, lesson));
            }
        }
        None
    }

    /// Total lesson count across all courses
    pub fn lesson_count(&self) -> usize {
        self.courses.iter().map(Course::lesson_count).sum()
    }

    /// Total estimated hours across all courses
    pub fn total_hours(&self) -> u32 {
        self.courses.iter().map(|c| c.estimated_hours).sum()
    }
}
