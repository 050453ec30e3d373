use clap::{Parser, Subcommand};
use importer::{ImportSummary, Roster};
use std::path::{Path, PathBuf};
use storage::{Database, repository::AthleteRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "athlete-import")]
#[command(about = "Registers athletes from JSON roster files", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a single roster file
    Roster {
        file: PathBuf,

        #[arg(long)]
        validate_only: bool,
    },
    /// Import every roster file found in a directory
    BulkImport {
        #[arg(long, default_value = "./imports")]
        directory: PathBuf,

        #[arg(long)]
        validate_only: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "athlete_import={},importer={},storage={}",
                    log_level, log_level, log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let (files, validate_only) = match cli.command {
        Commands::Roster {
            file,
            validate_only,
        } => (vec![file], validate_only),
        Commands::BulkImport {
            directory,
            validate_only,
        } => (collect_json_files(&directory).await?, validate_only),
    };

    if files.is_empty() {
        tracing::warn!("No roster files to process");
        return Ok(());
    }

    let repository = if validate_only {
        None
    } else {
        let database_url = cli
            .database_url
            .ok_or("DATABASE_URL is required unless --validate-only is set")?;
        Some(connect(&database_url).await?)
    };

    let mut total = ImportSummary::default();
    let mut error_count = 0;

    for (idx, file_path) in files.iter().enumerate() {
        tracing::info!("[{}/{}] Processing: {}", idx + 1, files.len(), file_path.display());

        match process_roster_file(file_path, repository.as_ref()).await {
            Ok(summary) => {
                tracing::info!(
                    "  ✓ {} inserted, {} duplicate(s)",
                    summary.inserted,
                    summary.duplicates.len()
                );
                total.inserted += summary.inserted;
                total.duplicates.extend(summary.duplicates);
            }
            Err(e) => {
                error_count += 1;
                tracing::error!("  ✗ Error: {}", e);
            }
        }
    }

    tracing::info!(
        "Summary: {} inserted, {} duplicate(s), {} file(s) failed",
        total.inserted,
        total.duplicates.len(),
        error_count
    );

    if error_count > 0 {
        return Err(format!("{} file(s) failed to import", error_count).into());
    }

    Ok(())
}

async fn connect(database_url: &str) -> Result<AthleteRepository, Box<dyn std::error::Error>> {
    tracing::info!("Connecting to database...");
    let db = Database::new(database_url).await?;
    db.run_migrations().await?;

    Ok(AthleteRepository::new(db.pool().clone()))
}

async fn collect_json_files(directory: &Path) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    tracing::info!("Scanning directory for roster files: {}", directory.display());

    let mut json_files = Vec::new();
    let mut entries = tokio::fs::read_dir(directory).await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            json_files.push(path);
        }
    }

    json_files.sort();
    tracing::info!("Found {} roster file(s)", json_files.len());

    Ok(json_files)
}

async fn process_roster_file(
    file_path: &Path,
    repository: Option<&AthleteRepository>,
) -> Result<ImportSummary, Box<dyn std::error::Error>> {
    let roster = Roster::load(file_path).await?;
    tracing::info!("Loaded {} athlete(s)", roster.athletes.len());

    let report = roster.validate().into_result()?;
    report.log_warnings();

    match repository {
        Some(repository) => Ok(roster.import(repository).await?),
        None => Ok(ImportSummary::default()),
    }
}
