//! Command-line entry point for the olga-queue desk client
//!
//! Local commands (ranking, wait estimates, scoring, classification) run
//! offline. Queue and routing commands call the desk API configured through
//! `API_BASE`, a config file or `--api-base`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use olga_queue::claims::fraud_score;
use olga_queue::client::{ApiClient, CustomerRouter, QueueApi, QueueManager, RouterApi};
use olga_queue::config::{validate_config, AppConfig};
use olga_queue::queue::rank_with_estimates;
use olga_queue::routing::classify_intent;
use olga_queue::types::{QueueId, QueueItem};
use olga_queue::wait_time::WaitEstimator;
use olga_queue::IntakeDesk;
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Olga Queue - customer-service desk client
#[derive(Parser)]
#[command(
    name = "olga-queue",
    version,
    about = "Queue ranking, wait estimates and desk API client for the Olga customer-service desk",
    long_about = "olga-queue ranks queue entries by urgency, estimates customer wait times, \
                 classifies and routes customer messages, and talks to the desk API to enqueue, \
                 claim, complete and fail queue entries."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Desk API URL override
    #[arg(long, value_name = "URL", help = "Override desk API base URL")]
    api_base: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank queue entries read as a JSON array
    Rank {
        /// JSON file with queue entries; stdin when omitted or "-"
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
    },
    /// Estimate the wait for a queue position
    Estimate {
        #[arg(short, long, allow_negative_numbers = true)]
        position: i64,
        /// Average seconds per entry; configured value when omitted
        #[arg(short, long, allow_negative_numbers = true)]
        avg_seconds: Option<f64>,
    },
    /// Score a claim message for fraud risk
    FraudScore {
        #[arg(short, long)]
        message: String,
    },
    /// Classify the intent of a message
    Classify {
        #[arg(short, long)]
        message: String,
    },
    /// Add a message to the queue
    Enqueue {
        #[arg(long)]
        phone: String,
        #[arg(short, long)]
        message: String,
        #[arg(long, allow_negative_numbers = true)]
        priority: Option<i32>,
    },
    /// Claim the next entries from the queue
    Next {
        #[arg(short, long)]
        batch_size: Option<u32>,
    },
    /// Mark an entry as completed
    Complete {
        queue_id: QueueId,
        /// Result document as JSON
        #[arg(short, long)]
        result: Option<String>,
    },
    /// Report a failed attempt on an entry
    Fail {
        queue_id: QueueId,
        #[arg(short, long)]
        error: Option<String>,
    },
    /// Ask the desk API where a message should go
    Route {
        #[arg(long)]
        phone: String,
        #[arg(short, long)]
        message: String,
    },
    /// Route, enqueue and estimate the wait for a message
    Intake {
        #[arg(long)]
        phone: String,
        #[arg(short, long)]
        message: String,
        #[arg(long, allow_negative_numbers = true)]
        priority: Option<i32>,
    },
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from environment, file and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(api_base) = &args.api_base {
        config.api.base_url = api_base.clone();
    }

    validate_config(&config)?;
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_items(input: Option<&PathBuf>) -> Result<Vec<QueueItem>> {
    let raw = match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };
    serde_json::from_str(&raw).context("Expected a JSON array of queue entries")
}

fn api_client(config: &AppConfig) -> Result<ApiClient> {
    ApiClient::new(config.api.base_url.clone(), config.request_timeout())
}

async fn run(command: Command, config: &AppConfig) -> Result<()> {
    match command {
        Command::Rank { input } => {
            let items = read_items(input.as_ref())?;
            debug!("Ranking {} entries", items.len());
            let ranked = rank_with_estimates(&items, &config.wait_estimator()?)?;
            print_json(&ranked)
        }
        Command::Estimate {
            position,
            avg_seconds,
        } => {
            let estimator = match avg_seconds {
                Some(avg) => WaitEstimator::from_secs_f64(avg)?,
                None => config.wait_estimator()?,
            };
            println!("{}", estimator.estimate(position)?);
            Ok(())
        }
        Command::FraudScore { message } => {
            println!("{}", fraud_score(&message));
            Ok(())
        }
        Command::Classify { message } => {
            println!("{}", classify_intent(&message));
            Ok(())
        }
        Command::Enqueue {
            phone,
            message,
            priority,
        } => {
            let queue = QueueManager::new(api_client(config)?);
            let priority = priority.unwrap_or(config.queue.default_priority);
            print_json(&queue.add_to_queue(&phone, &message, priority).await?)
        }
        Command::Next { batch_size } => {
            let queue = QueueManager::new(api_client(config)?);
            let batch_size = batch_size.unwrap_or(config.queue.default_batch_size);
            print_json(&queue.get_next(batch_size).await?)
        }
        Command::Complete { queue_id, result } => {
            let result: Option<serde_json::Value> = result
                .map(|raw| serde_json::from_str(&raw))
                .transpose()
                .context("--result must be valid JSON")?;
            let queue = QueueManager::new(api_client(config)?);
            print_json(&queue.mark_completed(queue_id, result).await?)
        }
        Command::Fail { queue_id, error } => {
            let queue = QueueManager::new(api_client(config)?);
            print_json(&queue.mark_error(queue_id, error).await?)
        }
        Command::Route { phone, message } => {
            let router = CustomerRouter::new(api_client(config)?);
            print_json(&router.route_customer(&phone, &message).await?)
        }
        Command::Intake {
            phone,
            message,
            priority,
        } => {
            let api = api_client(config)?;
            let desk = IntakeDesk::new(
                Arc::new(CustomerRouter::new(api.clone())),
                Arc::new(QueueManager::new(api)),
                config.wait_estimator()?,
            );
            let priority = priority.unwrap_or(config.queue.default_priority);
            print_json(&desk.intake(&phone, &message, priority).await?)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration (CLI args can override environment/config file)
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    // Initialize logging early (before any other operations)
    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!(
        "{} v{} (desk API: {})",
        config.service.name,
        olga_queue::VERSION,
        config.api.base_url
    );

    run(args.command, &config).await
}
