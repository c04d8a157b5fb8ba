use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;
use tracing_subscriber::EnvFilter;

use academic_progression::config::{
    DEFAULT_CREDITS_PER_LEVEL, DEFAULT_GRADUATION_CREDITS, DEFAULT_MIN_GRADUATION_CGPA,
    DEFAULT_MIN_LEVEL_CREDITS,
};
use academic_progression::models::FINALIZED_STATUS;
use academic_progression::{
    calculate_comprehensive_gpa_with, get_academic_standing, input, report, ComprehensiveGpa,
    CourseResult, ProgressionPolicy,
};

mod db;

#[derive(Parser)]
#[command(name = "academic-progression")]
#[command(about = "GPA, standing and progression reports from approved course results", long_about = None)]
struct Cli {
    #[command(flatten)]
    policy: PolicyArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct PolicyArgs {
    /// Result status that counts toward GPA
    #[arg(long, global = true, env = "GPA_FINALIZED_STATUS", default_value = FINALIZED_STATUS)]
    finalized_status: String,
    /// Credits a level needs before it becomes the current level
    #[arg(long, global = true, env = "GPA_MIN_LEVEL_CREDITS", default_value_t = DEFAULT_MIN_LEVEL_CREDITS)]
    min_level_credits: u32,
    /// Credits required per level before moving up
    #[arg(long, global = true, env = "GPA_CREDITS_PER_LEVEL", default_value_t = DEFAULT_CREDITS_PER_LEVEL)]
    credits_per_level: u32,
    /// Total credits required to graduate
    #[arg(long, global = true, env = "GPA_GRADUATION_CREDITS", default_value_t = DEFAULT_GRADUATION_CREDITS)]
    graduation_credits: u32,
    /// Minimum CGPA required to graduate
    #[arg(long, global = true, env = "GPA_MIN_GRADUATION_CGPA", default_value_t = DEFAULT_MIN_GRADUATION_CGPA)]
    min_graduation_cgpa: f64,
}

impl PolicyArgs {
    fn into_policy(self) -> ProgressionPolicy {
        ProgressionPolicy {
            finalized_status: self.finalized_status,
            min_level_credits: self.min_level_credits,
            credits_per_level: self.credits_per_level,
            graduation_credits: self.graduation_credits,
            min_graduation_cgpa: self.min_graduation_cgpa,
            ..ProgressionPolicy::default()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load a realistic sample transcript
    Seed,
    /// Import course results from a CSV result sheet
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Print the full GPA report for a student as JSON
    Gpa {
        #[arg(long)]
        matric: String,
    },
    /// Generate a markdown transcript summary
    Report {
        #[arg(long)]
        matric: String,
        #[arg(long, default_value = "transcript.md")]
        out: PathBuf,
    },
    /// Export per-session SCT/SGP/GPA rows as CSV
    Export {
        #[arg(long)]
        matric: String,
        #[arg(long, default_value = "sessions.csv")]
        out: PathBuf,
    },
    /// Compute the GPA report from a CSV result sheet without a database
    Compute {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        matric: Option<String>,
    },
    /// Show the degree class for a CGPA value
    Standing { cgpa: f64 },
}

async fn connect() -> anyhow::Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL")
        .context("DATABASE_URL must be set to a production Postgres instance")?;

    PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("failed to connect to Postgres")
}

async fn student_report(
    matric: &str,
    policy: &ProgressionPolicy,
) -> anyhow::Result<ComprehensiveGpa> {
    let pool = connect().await?;
    let results: Vec<CourseResult> = db::fetch_results(&pool, matric).await?;
    if results.is_empty() {
        info!(matric, "no results recorded for student");
    }
    Ok(calculate_comprehensive_gpa_with(&results, policy))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let policy = cli.policy.into_policy();

    match cli.command {
        Commands::InitDb => {
            let pool = connect().await?;
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            let pool = connect().await?;
            db::seed(&pool).await?;
            println!("Seed data inserted.");
        }
        Commands::Import { csv } => {
            let pool = connect().await?;
            let inserted = db::import_csv(&pool, &csv).await?;
            println!("Inserted {inserted} results from {}.", csv.display());
        }
        Commands::Gpa { matric } => {
            let gpa = student_report(&matric, &policy).await?;
            println!("{}", serde_json::to_string_pretty(&gpa)?);
        }
        Commands::Report { matric, out } => {
            let gpa = student_report(&matric, &policy).await?;
            let transcript =
                report::build_transcript(&matric, chrono::Utc::now().date_naive(), &gpa);
            std::fs::write(&out, transcript)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Transcript written to {}.", out.display());
        }
        Commands::Export { matric, out } => {
            let gpa = student_report(&matric, &policy).await?;
            let csv = report::sessions_csv(&gpa)?;
            std::fs::write(&out, csv)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Session export written to {}.", out.display());
        }
        Commands::Compute { csv, matric } => {
            let rows = input::read_rows_csv(&csv)?;
            let results = input::results_for(&rows, matric.as_deref());
            let gpa = calculate_comprehensive_gpa_with(&results, &policy);
            println!("{}", serde_json::to_string_pretty(&gpa)?);
        }
        Commands::Standing { cgpa } => {
            let band = get_academic_standing(cgpa);
            println!(
                "{:.2}: {} ({:.2} to {:.2})",
                cgpa, band.label, band.min, band.max
            );
        }
    }

    Ok(())
}
