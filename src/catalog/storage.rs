//! Catalog loading
//!
//! A content directory holds one JSON file per course. Files are read in
//! name order, so prefixing filenames (`01-html.json`, `02-css.json`)
//! controls course order.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::{Catalog, Course};

/// Load a catalog from a directory of per-course JSON files
pub fn load_dir(dir: &Path) -> Result<Catalog> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read content directory {:?}", dir))?;

    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut courses = Vec::new();
    for path in paths {
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read course file {:?}", path))?;
        let course: Course = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse course file {:?}", path))?;
        courses.push(course);
    }

    Catalog::new(courses).with_context(|| format!("Invalid catalog in {:?}", dir))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn write_course(dir: &Path, file: &str, id: &str, lesson_id: &str) {
        let contents = format!(
            r##"{{
                "id": "{id}",
                "title": "Course {id}",
                "description": "",
                "icon": "x",
                "color": "#fff",
                "estimated_hours": 5,
                "lessons": [
                    {{
                        "id": "{lesson_id}",
                        "course_id": "{id}",
                        "title": "Lesson",
                        "description": "",
                        "content": "Body",
                        "code_example": null,
                        "language": null,
                        "estimated_minutes": 20
                    }}
                ]
            }}"##
        );
        fs::write(dir.join(file), contents).unwrap();
    }

    #[test]
    fn loads_courses_in_filename_order() {
        let dir = TempDir::new().unwrap();
        write_course(dir.path(), "02-css.json", "css", "css-1");
        write_course(dir.path(), "01-html.json", "html", "html-1");

        let catalog = load_dir(dir.path()).unwrap();
        let ids: Vec<_> = catalog.courses().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["html", "css"]);
    }

    #[test]
    fn ignores_non_json_files() {
        let dir = TempDir::new().unwrap();
        write_course(dir.path(), "html.json", "html", "html-1");
        fs::write(dir.path().join("README.md"), "# notes").unwrap();

        let catalog = load_dir(dir.path()).unwrap();
        assert_eq!(catalog.courses().len(), 1);
    }

    #[test]
    fn rejects_invalid_course_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.json"), "{ not valid").unwrap();

        assert!(load_dir(dir.path()).is_err());
    }

    #[test]
    fn rejects_structurally_invalid_catalog() {
        let dir = TempDir::new().unwrap();
        // Lesson claims to belong to a different course.
        write_course(dir.path(), "html.json", "html", "html-1");
        let contents = fs::read_to_string(dir.path().join("html.json"))
            .unwrap()
            .replace(r#""course_id": "html""#, r#""course_id": "css""#);
        fs::write(dir.path().join("html.json"), contents).unwrap();

        assert!(load_dir(dir.path()).is_err());
    }
}
