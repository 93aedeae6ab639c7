//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `civic_status` library that handles:
//! - Command-line argument parsing (serve and export subcommands)
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;
use std::process;

use civic_status::export::{export_csv, export_jsonl};
use civic_status::initialization::init_logger_with;
use civic_status::storage::{IssueCategory, IssueStatus};
use civic_status::{run_server, Config, LogFormat, LogLevel};

#[derive(Debug, Parser)]
#[command(name = "civic_status", version, about = "Civic issue reporting service")]
enum Cli {
    /// Run the API server
    Serve(ServeArgs),
    /// Export issues from the database
    Export(ExportArgs),
}

#[derive(Debug, Args)]
struct ServeArgs {
    /// SQLite database path
    #[arg(long, default_value = "./civic_status.db")]
    db_path: PathBuf,

    /// HTTP listen port
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Directory for uploaded photos
    #[arg(long, default_value = "./uploads")]
    upload_dir: PathBuf,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    log_format: LogFormat,

    /// Create a super_admin account at startup (format: email:password)
    #[arg(long)]
    bootstrap_admin: Option<String>,
}

#[derive(Debug, Args)]
struct ExportArgs {
    /// SQLite database path
    #[arg(long, default_value = "./civic_status.db")]
    db_path: PathBuf,

    /// Export format
    #[arg(long, value_enum, default_value = "csv")]
    format: ExportFormatArg,

    /// Output file (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Filter by issue status (reported, in_progress, resolved, rejected)
    #[arg(long)]
    status: Option<String>,

    /// Filter by category (pothole, streetlight, sidewalk, traffic_sign, drainage, other)
    #[arg(long)]
    category: Option<String>,

    /// Only issues created at or after this timestamp (milliseconds since epoch)
    #[arg(long)]
    since: Option<i64>,

    /// Filter by reporter email
    #[arg(long)]
    reporter: Option<String>,
}

#[derive(Debug, Clone, ValueEnum)]
enum ExportFormatArg {
    Csv,
    Jsonl,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists).
    // Try the current directory first, then next to the executable.
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    match Cli::parse() {
        Cli::Serve(args) => {
            init_logger_with(args.log_level.clone().into(), args.log_format.clone())
                .context("Failed to initialize logger")?;

            let config = Config {
                db_path: args.db_path,
                port: args.port,
                upload_dir: args.upload_dir,
                log_level: args.log_level,
                log_format: args.log_format,
                bootstrap_admin: args.bootstrap_admin,
            };

            if let Err(e) = run_server(config).await {
                eprintln!("civic_status error: {:#}", e);
                process::exit(1);
            }
            Ok(())
        }
        Cli::Export(args) => {
            init_logger_with(log::LevelFilter::Warn, LogFormat::Plain)
                .context("Failed to initialize logger")?;

            let status = match args.status.as_deref() {
                Some(s) => Some(IssueStatus::parse(s).with_context(|| {
                    format!("Unknown status '{}' (expected reported, in_progress, resolved, rejected)", s)
                })?),
                None => None,
            };
            let category = match args.category.as_deref() {
                Some(c) => Some(IssueCategory::parse(c).with_context(|| {
                    format!("Unknown category '{}'", c)
                })?),
                None => None,
            };

            let result = match args.format {
                ExportFormatArg::Csv => {
                    export_csv(
                        &args.db_path,
                        args.output.as_ref(),
                        status,
                        category,
                        args.since,
                        args.reporter.as_deref(),
                    )
                    .await
                }
                ExportFormatArg::Jsonl => {
                    export_jsonl(
                        &args.db_path,
                        args.output.as_ref(),
                        status,
                        category,
                        args.since,
                        args.reporter.as_deref(),
                    )
                    .await
                }
            };

            match result {
                Ok(count) => {
                    eprintln!(
                        "✅ Exported {} issue{}{}",
                        count,
                        if count == 1 { "" } else { "s" },
                        args.output
                            .map(|p| format!(" to {}", p.display()))
                            .unwrap_or_default()
                    );
                    Ok(())
                }
                Err(e) => {
                    eprintln!("civic_status error: {:#}", e);
                    process::exit(1);
                }
            }
        }
    }
}
