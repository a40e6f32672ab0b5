use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use data_loader::{Dataset, UserId};
use pipeline::{InstructorSelection, RecommendationRow, build_user_context};
use server::{RecommendationOrchestrator, RecommendationTable, RecommenderConfig};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::info;

/// Course Recs - course recommendation engine
#[derive(Parser)]
#[command(name = "course-recs")]
#[command(about = "Recommend untaken courses and the best distinct instructor for each", long_about = None)]
struct Cli {
    /// Path to the course ratings dataset (.csv, .tsv or .json)
    #[arg(short, long, env = "COURSE_RECS_DATA", default_value = "data/courses.csv")]
    data: PathBuf,

    /// Output format for result tables
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Override the minimum rating for instructor assignment
    #[arg(long)]
    rating_floor: Option<f32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank courses the user has not taken, optionally assigning instructors
    Recommend {
        /// User ID to get recommendations for
        #[arg(long)]
        user_id: UserId,

        /// Number of unique courses to return (defaults to the configured limit)
        #[arg(long)]
        limit: Option<usize>,

        /// Recommended course to find an instructor for; repeat to pick several, order matters
        #[arg(long = "select", value_name = "COURSE")]
        select: Vec<String>,
    },

    /// Assign the best distinct instructor to each course, in the given order
    Instructors {
        /// Course name; repeat for several courses
        #[arg(long = "course", value_name = "COURSE", required = true)]
        courses: Vec<String>,
    },

    /// Show a user's rating history
    User {
        /// User ID to display
        #[arg(long)]
        user_id: UserId,
    },

    /// Search for courses by name
    Search {
        /// Course name to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so JSON output on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = RecommenderConfig::from_env()?;
    if let Some(floor) = cli.rating_floor {
        config.rating_floor = floor;
        config.validate()?;
    }

    info!("Loading course dataset from {}...", cli.data.display());
    let start = Instant::now();
    let dataset = Arc::new(
        Dataset::load_from_file(&cli.data).context("Failed to load course dataset")?,
    );
    eprintln!("{} Loaded dataset in {:?}", "✓".green(), start.elapsed());

    let (users, courses, records) = dataset.counts();
    info!("Indexed {} users, {} courses, {} ratings", users, courses, records);

    let orchestrator = RecommendationOrchestrator::new(dataset, config);

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            user_id,
            limit,
            select,
        } => handle_recommend(&orchestrator, user_id, limit, &select, cli.format)?,
        Commands::Instructors { courses } => {
            handle_instructors(&orchestrator, &courses, cli.format)?
        }
        Commands::User { user_id } => handle_user(orchestrator.dataset(), user_id),
        Commands::Search { title } => handle_search(orchestrator.dataset(), &title),
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(orchestrator, requests, concurrent).await?,
    }

    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    orchestrator: &RecommendationOrchestrator,
    user_id: UserId,
    limit: Option<usize>,
    select: &[String],
    format: OutputFormat,
) -> Result<()> {
    let table = orchestrator.get_recommendations(user_id, limit)?;

    let selection = if select.is_empty() {
        None
    } else {
        Some(orchestrator.select_instructors(&table, select)?)
    };

    match format {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "recommendations": table,
                "selection": selection,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Table => {
            print_recommendations(&table);
            if let Some(selection) = &selection {
                println!();
                print_selection(selection, orchestrator.config().rating_floor);
            }
        }
    }
    Ok(())
}

/// Handle the 'instructors' command
fn handle_instructors(
    orchestrator: &RecommendationOrchestrator,
    courses: &[String],
    format: OutputFormat,
) -> Result<()> {
    let selection = orchestrator.select_for_courses(courses)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&selection)?),
        OutputFormat::Table => print_selection(&selection, orchestrator.config().rating_floor),
    }
    Ok(())
}

/// Handle the 'user' command
fn handle_user(dataset: &Dataset, user_id: UserId) {
    let context = build_user_context(dataset, user_id);

    println!("{}", format!("User ID: {}", user_id).bold().blue());
    if !context.has_history() {
        println!("No ratings on record; every course is a candidate.");
        return;
    }

    println!("{}Courses taken: {}", "• ".green(), context.taken_courses.len());
    println!("{}Number of ratings: {}", "• ".cyan(), context.rating_count);
    println!("{}Average rating: {:.2}", "• ".cyan(), context.avg_rating);

    let mut history: Vec<_> = dataset.get_user_records(user_id).collect();
    history.sort_by(|a, b| {
        b.rating
            .partial_cmp(&a.rating)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    println!("Top rated courses:");
    for record in history.iter().take(10) {
        println!(
            "  - {} with {} (Rating: {:.2})",
            record.course_name, record.instructor, record.rating
        );
    }
}

/// Handle the 'search' command
fn handle_search(dataset: &Dataset, title: &str) {
    let title_lower = title.to_lowercase();

    // (name, relevance, avg rating, rating count, instructor count)
    let mut matches: Vec<(&str, u8, f32, u32, u32)> = dataset
        .course_names()
        .iter()
        .filter_map(|name| {
            let name_lower = name.to_lowercase();
            let relevance = if name_lower == title_lower {
                0
            } else if name_lower.contains(&title_lower) {
                1
            } else {
                return None;
            };
            let stats = dataset.get_course_stats(name);
            Some((
                name.as_str(),
                relevance,
                stats.map(|s| s.avg_rating).unwrap_or(0.0),
                stats.map(|s| s.rating_count).unwrap_or(0),
                stats.map(|s| s.instructor_count).unwrap_or(0),
            ))
        })
        .collect();

    // Exact match first, then by average rating
    matches.sort_by(|a, b| {
        a.1.cmp(&b.1)
            .then_with(|| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal))
    });

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("No matching courses.");
    }
    for (name, _, avg_rating, rating_count, instructor_count) in matches.iter().take(20) {
        println!(
            "{} avg {:.2} ({} ratings, {} instructors)",
            name, avg_rating, rating_count, instructor_count
        );
    }
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    orchestrator: RecommendationOrchestrator,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    if requests == 0 {
        bail!("requests must be at least 1");
    }

    let config = orchestrator.config().clone();
    let user_ids: Vec<UserId> = (0..requests)
        .map(|_| rand::random_range(config.min_user_id..=config.max_user_id))
        .collect();

    // Ranking is CPU-bound, so each request runs on the blocking pool
    let semaphore = Arc::new(Semaphore::new(concurrent.max(1)));
    let wall_clock = Instant::now();
    let mut handles = Vec::with_capacity(requests);
    for user_id in user_ids {
        let permit = semaphore.clone().acquire_owned().await?;
        let orchestrator = orchestrator.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let start = Instant::now();
            orchestrator.get_recommendations(user_id, None)?;
            Ok::<_, anyhow::Error>(start.elapsed())
        }));
    }

    let mut timings = Vec::with_capacity(requests);
    for handle in handles {
        timings.push(handle.await??);
    }
    let wall_time = wall_clock.elapsed();

    timings.sort();
    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / timings.len() as u32;
    let percentile = |p: f64| {
        let idx = ((timings.len() as f64 * p) as usize).min(timings.len() - 1);
        timings[idx]
    };
    let throughput = requests as f64 / wall_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} concurrent)", requests, concurrent.max(1));
    println!("Wall time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Print ranked courses as a table
fn print_recommendations(table: &RecommendationTable) {
    println!(
        "{}",
        format!("Unique Recommended Courses for user {}:", table.user_id)
            .bold()
            .blue()
    );
    if table.is_empty() {
        println!("No courses left to recommend.");
        return;
    }
    print_rows(&table.rows);
}

/// Print an instructor assignment, or the reason there is none
fn print_selection(selection: &InstructorSelection, rating_floor: f32) {
    println!(
        "{}",
        "Best Unique Instructor per Selected Course:".bold().blue()
    );
    match selection {
        InstructorSelection::Assigned(rows) => print_rows(rows),
        InstructorSelection::NoQualifyingRows => println!(
            "{}",
            format!(
                "No instructors found with rating {} or above for the selected courses.",
                rating_floor
            )
            .yellow()
        ),
        InstructorSelection::NothingSelected => println!("No courses selected."),
    }
}

fn print_rows(rows: &[RecommendationRow]) {
    let id_width = rows
        .iter()
        .map(|r| r.course_id.len())
        .max()
        .unwrap_or(0)
        .max("course_id".len());
    let name_width = rows
        .iter()
        .map(|r| r.course_name.chars().count())
        .max()
        .unwrap_or(0)
        .max("course_name".len());
    let instructor_width = rows
        .iter()
        .map(|r| r.instructor.chars().count())
        .max()
        .unwrap_or(0)
        .max("instructor".len());

    println!(
        "{:<id_width$}  {:>20}  {:<name_width$}  {:<instructor_width$}  {:>6}",
        "course_id", "recommendation_score", "course_name", "instructor", "rating"
    );
    for row in rows {
        println!(
            "{:<id_width$}  {:>20.2}  {:<name_width$}  {:<instructor_width$}  {:>6.2}",
            row.course_id,
            row.recommendation_score,
            row.course_name,
            row.instructor,
            row.rating
        );
    }
}
