use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use learnpath::catalog::{self, Catalog};
use learnpath::insights;
use learnpath::progress::{FontSize, PreferenceUpdate, ProgressStore, Theme};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "learnpath")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the progress file (defaults to the platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Directory of course JSON files (defaults to the built-in curriculum)
    #[arg(long, global = true)]
    content_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show overall progress, streak, and where to continue
    Dashboard,
    /// List courses with per-course completion
    Courses,
    /// Mark a lesson as completed
    CompleteLesson {
        /// Lesson id (e.g. html-1)
        lesson_id: String,
    },
    /// Mark an exercise as completed
    CompleteExercise {
        /// Exercise id (e.g. html-2-ex1)
        exercise_id: String,
    },
    /// Open a lesson: set the current position and record the course as started
    Open {
        /// Course id
        course_id: String,
        /// Lesson id
        lesson_id: String,
    },
    /// Record study time in minutes
    Study {
        /// Minutes studied (zero is ignored)
        minutes: u32,
    },
    /// Update display preferences
    Prefs {
        #[arg(long)]
        theme: Option<ThemeArg>,
        #[arg(long)]
        font_size: Option<FontSizeArg>,
        /// Interface language code (e.g. en)
        #[arg(long)]
        language: Option<String>,
    },
    /// Export progress as JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import progress from an exported JSON file
    Import {
        /// Path to the exported file
        file: PathBuf,
    },
    /// Delete all progress
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FontSizeArg {
    Small,
    Medium,
    Large,
}

impl From<FontSizeArg> for FontSize {
    fn from(arg: FontSizeArg) -> Self {
        match arg {
            FontSizeArg::Small => FontSize::Small,
            FontSizeArg::Medium => FontSize::Medium,
            FontSizeArg::Large => FontSize::Large,
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "learnpath=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    let store = match &cli.data_dir {
        Some(dir) => ProgressStore::new(dir.join("progress.json")),
        None => ProgressStore::open()?,
    };
    let catalog = match &cli.content_dir {
        Some(dir) => catalog::load_dir(dir)?,
        None => catalog::sample(),
    };

    match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Dashboard => print_dashboard(&catalog, &store),
        Commands::Courses => print_courses(&catalog, &store),
        Commands::CompleteLesson { lesson_id } => {
            store.mark_lesson_complete(&lesson_id);
            println!("Lesson {lesson_id} marked complete.");
        }
        Commands::CompleteExercise { exercise_id } => {
            store.mark_exercise_complete(&exercise_id);
            println!("Exercise {exercise_id} marked complete.");
        }
        Commands::Open { course_id, lesson_id } => {
            if catalog.lesson(&lesson_id).is_none() {
                println!("Note: lesson {lesson_id} is not in the loaded catalog.");
            }
            store.set_current_lesson(&course_id, &lesson_id);
            println!("Now on {course_id} / {lesson_id}.");
        }
        Commands::Study { minutes } => {
            store.add_study_time(minutes);
            let stats = store.load().stats;
            println!(
                "Recorded {minutes} min. Total {} min, streak {} day(s).",
                stats.total_time_spent, stats.streak
            );
        }
        Commands::Prefs { theme, font_size, language } => {
            store.update_preferences(PreferenceUpdate {
                theme: theme.map(Theme::from),
                font_size: font_size.map(FontSize::from),
                language,
            });
            let prefs = store.load().preferences;
            println!("Preferences: {:?}, {:?}, language {}", prefs.theme, prefs.font_size, prefs.language);
        }
        Commands::Export { output } => {
            let exported = store.export();
            match output {
                Some(path) => {
                    std::fs::write(&path, exported)?;
                    println!("Progress exported to {}.", path.display());
                }
                None => println!("{exported}"),
            }
        }
        Commands::Import { file } => {
            let data = std::fs::read_to_string(&file)?;
            match store.import(&data) {
                Ok(()) => println!("Progress imported from {}.", file.display()),
                Err(err) => {
                    eprintln!("Import failed: {err}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Reset { yes } => {
            if yes || confirm_reset()? {
                store.reset();
                println!("All progress has been reset.");
            } else {
                println!("Reset cancelled.");
            }
        }
    }

    Ok(())
}

fn confirm_reset() -> Result<bool> {
    print!("This permanently deletes all learning progress. Type 'yes' to confirm: ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("yes"))
}

fn print_dashboard(catalog: &Catalog, store: &ProgressStore) {
    let progress = store.load();
    let overview = insights::overview(catalog, &progress);

    println!("Lessons completed:  {}/{}", overview.completed_lessons, overview.total_lessons);
    println!("Hours learned:      ~{}h of {}h", overview.hours_learned, overview.total_hours);
    println!("Overall progress:   {}%", overview.completion_percentage);
    println!("Day streak:         {}", progress.stats.streak);
    println!("Study time:         {} min", progress.stats.total_time_spent);

    let completed = insights::completed_courses(catalog, &progress);
    if !completed.is_empty() {
        let ids: Vec<_> = completed.iter().map(|c| c.id.as_str()).collect();
        println!("Courses completed:  {}", ids.join(", "));
    }

    if let Some(target) = insights::continue_target(catalog, &progress) {
        match target.lesson_id {
            Some(lesson) => println!("Continue with:      {} / {}", target.course_id, lesson),
            None => println!("Continue with:      {}", target.course_id),
        }
    }
}

fn print_courses(catalog: &Catalog, store: &ProgressStore) {
    let progress = store.load();
    for course in catalog.courses() {
        let cp = insights::course_progress(course, &progress);
        let state = if cp.is_completed() {
            "completed"
        } else if cp.is_started() {
            "in progress"
        } else {
            "not started"
        };
        println!("{} {} - {} ({}/{} lessons, {}%, {})",
            course.icon, course.id, course.title, cp.completed, cp.total, cp.percentage, state);
    }
}
