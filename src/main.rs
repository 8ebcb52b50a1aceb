use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use course_access::api::CourseSummary;
use course_access::config::credentials::{TokenPair, mask_token};
use course_access::progress::LogNotifier;
use course_access::screen::{LessonMarker, Navigation, Submission, Tab};
use course_access::{Config, CourseAccess, CourseClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "course-access")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Override the course service URL
    #[arg(long, global = true)]
    server: Option<String>,

    /// Override the media host URL
    #[arg(long, global = true)]
    video_host: Option<String>,

    /// JSON file with the course data (id, name, reviews)
    #[arg(long, global = true)]
    course_data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store the access and refresh tokens
    Login {
        #[arg(long)]
        access_token: String,
        #[arg(long)]
        refresh_token: String,
    },
    /// Show completion progress of a course
    Progress { course_id: String },
    /// List the lessons of a course
    Lessons { course_id: String },
    /// Show one tab of a lesson: details, questions or reviews
    Show {
        course_id: String,
        /// Lesson number, starting at 1
        lesson: usize,
        /// Tab to show (about, qa, reviews)
        #[arg(short, long, default_value = "about")]
        tab: Tab,
    },
    /// Ask a question on a lesson
    Ask {
        course_id: String,
        lesson: usize,
        /// Question text
        question: Vec<String>,
    },
    /// Rate and review a course
    Review {
        course_id: String,
        #[arg(short, long, default_value_t = 1)]
        rating: u8,
        #[arg(short, long)]
        comment: String,
    },
    /// Mark a lesson as completed
    Complete { course_id: String, lesson: usize },
    /// Print the playable video URL of a lesson
    Video { course_id: String, lesson: usize },
}

type Screen = CourseAccess<CourseClient, LogNotifier>;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "course_access=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(server) = &cli.server {
        config.server_url = server.clone();
    }
    if let Some(video_host) = &cli.video_host {
        config.video_url = video_host.clone();
    }

    match &cli.command {
        Commands::Login { access_token, refresh_token } => {
            let store = config.credential_store()?;
            store.store(&TokenPair::new(access_token, refresh_token))?;
            println!("Stored access token {}", mask_token(access_token));
        }
        Commands::Progress { course_id } => {
            let screen = open(&cli, &config, course_id).await?;
            let rows = screen.lesson_rows();
            let done = rows.iter().filter(|r| r.is_completed).count();
            println!(
                "{}: {:.0}% ({} of {} lessons)",
                screen.course().name,
                screen.progress().ratio() * 100.0,
                done,
                rows.len()
            );
        }
        Commands::Lessons { course_id } => {
            let screen = open(&cli, &config, course_id).await?;
            for row in screen.lesson_rows() {
                let mark = if row.is_completed { "x" } else { " " };
                println!("[{}] {:>3}. {}", mark, row.number(), row.title);
            }
        }
        Commands::Show { course_id, lesson, tab } => {
            let mut screen = open_lesson(&cli, &config, course_id, *lesson).await?;
            screen.set_tab(*tab);
            print_lesson(&screen);
        }
        Commands::Ask { course_id, lesson, question } => {
            let mut screen = open_lesson(&cli, &config, course_id, *lesson).await?;
            screen.question_draft_mut().set(question.join(" "));
            match screen.submit_question().await? {
                Submission::Sent => println!("Question posted"),
                Submission::Failed => bail!("Question could not be posted"),
            }
        }
        Commands::Review { course_id, rating, comment } => {
            let mut screen = open(&cli, &config, course_id).await?;
            screen.review_form_mut().set_rating(*rating);
            screen.review_form_mut().set_comment(comment.clone());
            match screen.submit_review().await? {
                Submission::Sent => println!("Review posted"),
                Submission::Failed => bail!("Review could not be posted"),
            }
        }
        Commands::Complete { course_id, lesson } => {
            let mut screen = open_lesson(&cli, &config, course_id, *lesson).await?;
            match screen.mark_current_complete().await {
                Some(event) => {
                    println!("Marked complete, course at {:.0}%", event.progress * 100.0)
                }
                None => println!("Already completed"),
            }
        }
        Commands::Video { course_id, lesson } => {
            let screen = open_lesson(&cli, &config, course_id, *lesson).await?;
            match screen.video() {
                Some(source) => println!("{}", source.uri),
                None => bail!("Video is not available"),
            }
        }
    }

    Ok(())
}

fn course_summary(cli: &Cli, course_id: &str) -> Result<CourseSummary> {
    let Some(path) = &cli.course_data else {
        let id = course_id.to_string();
        return Ok(CourseSummary { name: id.clone(), id, reviews: Vec::new() });
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read course data from {:?}", path))?;
    let summary: CourseSummary =
        serde_json::from_str(&contents).with_context(|| "Failed to parse course data")?;
    if summary.id != course_id {
        bail!("Course data is for {}, not {}", summary.id, course_id);
    }
    Ok(summary)
}

async fn open(cli: &Cli, config: &Config, course_id: &str) -> Result<Screen> {
    let client = CourseClient::new(config, config.credential_store()?)?;
    let mut screen = CourseAccess::new(client, course_summary(cli, course_id)?, LogNotifier);
    if let Some(Navigation::CourseDetails { course_id }) = screen.enter().await {
        bail!("Course {} is not accessible", course_id);
    }
    Ok(screen)
}

async fn open_lesson(
    cli: &Cli,
    config: &Config,
    course_id: &str,
    lesson: usize,
) -> Result<Screen> {
    let mut screen = open(cli, config, course_id).await?;
    if lesson == 0 || !screen.select_lesson(lesson - 1).await {
        bail!("Lesson {} does not exist ({} lessons)", lesson, screen.lessons().len());
    }
    Ok(screen)
}

fn print_lesson(screen: &Screen) {
    let Some(current) = screen.current_lesson() else {
        return;
    };
    let status = match screen.current_marker() {
        Some(LessonMarker::Completed) => "completed",
        _ => "not completed",
    };
    println!("{}. {} ({})", screen.state().active_lesson + 1, current.title, status);

    let active = screen.state().tab;
    let bar: Vec<String> = Tab::all()
        .iter()
        .map(|tab| {
            if *tab == active { format!("[{}]", tab.label()) } else { tab.label().to_string() }
        })
        .collect();
    println!("{}\n", bar.join("  "));

    match active {
        Tab::About => {
            if !current.description.is_empty() {
                println!("{}", current.description);
            }
            for link in screen.reference_links() {
                println!("  Reference: {} <{}>", link.title, link.url);
            }
        }
        Tab::Questions => {
            for thread in screen.questions_newest_first() {
                let replies = thread.question_replies.len();
                println!("- {}: {} ({} replies)", thread.user.name, thread.question, replies);
            }
        }
        Tab::Reviews => {
            for review in screen.reviews() {
                let stars = "*".repeat(review.rating as usize);
                println!("- {} {:<5} {}", review.user.name, stars, review.comment);
            }
            if !screen.review_available() {
                println!("\nNo review from you yet; post one with `review`.");
            }
        }
    }
}
