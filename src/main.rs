use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use korfstats::api::state::AppState;
use korfstats::calculate;
use korfstats::config::AppConfig;
use korfstats::models::Match;
use korfstats::storage::{self, StorageConfig};

#[derive(Parser)]
#[command(name = "korfstats")]
#[command(about = "Korfball match tracker with season and career statistics")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Compute derived statistics for a team and write them to disk
    Derive {
        /// Team id to derive statistics for
        #[arg(long)]
        team: String,

        /// Matches in the recent-form window
        #[arg(long)]
        form_window: Option<usize>,
    },

    /// Import match records from a JSONL file
    Import {
        /// Team id the matches belong to
        #[arg(long)]
        team: String,

        /// Path to the JSONL file
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting korfstats v{}", env!("CARGO_PKG_VERSION"));

    let config_path = PathBuf::from(&cli.config);
    let mut config = if config_path.exists() {
        AppConfig::from_file(&config_path)
            .with_context(|| format!("Failed to load config from {}", cli.config))?
    } else {
        tracing::debug!("No config file at {}, using defaults", cli.config);
        AppConfig::default()
    };
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = PathBuf::from(data_dir);
    }

    let storage = StorageConfig::new(config.data_dir.clone());

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let state = AppState::new(storage, config.stats.clone());
            let app = korfstats::api::build_router(state);

            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }

        Commands::Derive { team, form_window } => {
            let matches: Vec<Match> = storage::match_reader(&storage, &team)
                .read_all()
                .context("Failed to read matches")?;
            tracing::info!("Loaded {} matches for team {}", matches.len(), team);

            let form_window = form_window.unwrap_or(config.stats.form_window);

            let snapshot = serde_json::json!({
                "team_id": team,
                "computed_at": Utc::now().to_rfc3339(),
                "season": calculate::season_summary(&matches),
                "form": calculate::form_last_n(&matches, form_window),
                "monthly": calculate::monthly_trends(&matches),
                "top_players": calculate::top_players(&matches, config.stats.top_players_limit),
                "opponents": calculate::opponent_stats(&matches),
                "career": calculate::player_career_stats(&matches),
                "player_of_month": calculate::player_of_month(&matches, Utc::now()),
                "shot_types": calculate::shot_type_trend(&matches, config.stats.trend_window),
            });

            let derived_dir = storage.derived_dir();
            std::fs::create_dir_all(&derived_dir)?;
            let out_path = derived_dir.join(format!("{}.json", team));
            std::fs::write(&out_path, serde_json::to_string_pretty(&snapshot)?)?;

            println!("Derived statistics written to {:?}", out_path);
        }

        Commands::Import { team, path } => {
            let reader = storage::JsonlReader::<Match>::new(PathBuf::from(&path));
            let matches = reader
                .read_all()
                .with_context(|| format!("Failed to read matches from {}", path))?;

            if matches.is_empty() {
                println!("No matches found in {}", path);
                return Ok(());
            }

            let count = storage::match_writer(&storage, &team)
                .append_batch(&matches)
                .context("Failed to write matches")?;

            println!("Imported {} matches for team {}", count, team);
        }
    }

    Ok(())
}
