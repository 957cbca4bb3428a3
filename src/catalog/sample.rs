//! Built-in sample curriculum
//!
//! A compact web-development track used when no content directory is
//! supplied. Real deployments point the CLI at their own course files.

use super::model::{Catalog, Course, Difficulty, Exercise, Lesson};

fn intro_lesson(course_id: &str, topic: &str, language: &str) -> Lesson {
    let mut lesson = Lesson::new(format!("{course_id}-1"), course_id, format!("Introduction to {topic}"));
    lesson.description = format!("Understanding {topic} and its role in web development.");
    lesson.content = format!(
        "# Introduction to {topic}\n\n\
         What {topic} is for, its core concepts and syntax, and how it fits\n\
         into a working web page. Hands-on examples follow in later lessons."
    );
    lesson.language = Some(language.to_string());
    lesson.difficulty = Difficulty::Beginner;
    lesson.estimated_minutes = 30;
    lesson
}

/// The built-in sample catalog. Infallible: the content is fixed and known
/// to validate.
pub fn sample() -> Catalog {
    let mut html_structure = Lesson::new("html-2", "html", "Document Structure");
    html_structure.description = "Elements, nesting, and the anatomy of an HTML page.".to_string();
    html_structure.content = "# Document Structure\n\nEvery page is a tree: `<html>` holds \
                              `<head>` and `<body>`, and elements nest to describe meaning."
        .to_string();
    html_structure.code_example =
        Some("<!DOCTYPE html>\n<html>\n  <head><title>Hi</title></head>\n  <body></body>\n</html>".to_string());
    html_structure.language = Some("html".to_string());
    html_structure.estimated_minutes = 45;
    html_structure.prerequisites = vec!["html-1".to_string()];
    html_structure.exercises.push(
        Exercise::new("html-2-ex1", "Add a heading", "Give the page an <h1> with your name.")
            .with_starter_code("<body>\n\n</body>")
            .with_solution("<body>\n  <h1>Ada</h1>\n</body>"),
    );

    let mut css_selectors = Lesson::new("css-2", "css", "Selectors");
    css_selectors.description = "Targeting elements by tag, class, and id.".to_string();
    css_selectors.content = "# Selectors\n\nSelectors decide which elements a rule applies to; \
                             specificity decides which rule wins."
        .to_string();
    css_selectors.code_example = Some(".card { padding: 1rem; }\n#hero { color: teal; }".to_string());
    css_selectors.language = Some("css".to_string());
    css_selectors.difficulty = Difficulty::Intermediate;
    css_selectors.estimated_minutes = 40;
    css_selectors.prerequisites = vec!["css-1".to_string()];

    let courses = vec![
        Course {
            id: "html".to_string(),
            title: "HTML - HyperText Markup Language".to_string(),
            description: "The foundation of web development: semantic markup and page structure."
                .to_string(),
            icon: "🌐".to_string(),
            color: "#e44d26".to_string(),
            estimated_hours: 15,
            lessons: vec![intro_lesson("html", "HTML", "html"), html_structure],
        },
        Course {
            id: "css".to_string(),
            title: "CSS - Cascading Style Sheets".to_string(),
            description: "Styling, layout, and responsive design.".to_string(),
            icon: "🎨".to_string(),
            color: "#1572b6".to_string(),
            estimated_hours: 25,
            lessons: vec![intro_lesson("css", "CSS", "css"), css_selectors],
        },
        Course {
            id: "javascript".to_string(),
            title: "JavaScript - Programming for the Web".to_string(),
            description: "Programming fundamentals and web interactivity.".to_string(),
            icon: "⚡".to_string(),
            color: "#f7df1e".to_string(),
            estimated_hours: 35,
            lessons: vec![intro_lesson("javascript", "JavaScript", "javascript")],
        },
    ];

    match Catalog::new(courses) {
        Ok(catalog) => catalog,
        // Unreachable: the sample content is fixed and validated by tests.
        Err(err) => panic!("built-in sample catalog is invalid: {err}"),
    }
}
