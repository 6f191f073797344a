use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rift_rewind::agents::backend::{AiBackend, AnthropicBackend};
use rift_rewind::api::routes::players::{ingest_player, IngestRequest};
use rift_rewind::api::routes::query::{answer_question, QueryRequest};
use rift_rewind::api::routes::stats::{process_stats, ProcessRequest};
use rift_rewind::api::state::AppState;
use rift_rewind::config::AppConfig;
use rift_rewind::riot::{RiotApi, RiotClient};
use rift_rewind::secrets::{EnvSecretStore, SecretStore};
use rift_rewind::storage::{FsObjectStore, ObjectStore};

#[derive(Parser)]
#[command(name = "rift-rewind")]
#[command(about = "League of Legends match-history tracker with AI-powered analysis")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

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

    /// Fetch a player's profile and recent matches into storage
    Ingest {
        /// Riot ID in GameName#TAG form
        summoner: String,

        /// Platform region (e.g. na1, euw1, oc1)
        #[arg(long)]
        region: Option<String>,

        /// How many recent matches to fetch
        #[arg(long)]
        count: Option<u32>,
    },

    /// Aggregate stored matches into the per-player stats table
    Process {
        /// Player PUUID
        puuid: String,
    },

    /// Ask a question about a player's processed match data
    Ask {
        /// Player PUUID
        puuid: String,

        /// Free-text question
        question: String,
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

    tracing::info!("Starting rift-rewind v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load(&PathBuf::from(&cli.config))?;
    let state = build_state(config)?;

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| state.config.server.host.clone());
            let port = port.unwrap_or(state.config.server.port);
            let addr = format!("{}:{}", host, port);

            let app = rift_rewind::api::build_router(state);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Ingest {
            summoner,
            region,
            count,
        } => {
            let response = ingest_player(
                &state,
                IngestRequest {
                    summoner_name: summoner,
                    region: region.unwrap_or_default(),
                    count,
                },
            )
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;

            println!("\n=== Ingestion Results ===");
            println!("Summoner:          {}", response.summoner.name);
            println!("Level:             {}", response.summoner.level);
            println!("PUUID:             {}", response.summoner.puuid);
            println!("Matches processed: {}", response.matches_processed);
            for mastery in &response.top_champions {
                println!(
                    "Mastery:           champion {} (level {}, {} pts)",
                    mastery.champion_id, mastery.champion_level, mastery.champion_points
                );
            }
        }
        Commands::Process { puuid } => {
            let response = process_stats(&state, ProcessRequest { puuid })
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;

            println!("\n=== Aggregation Results ===");
            println!("Matches processed: {}", response.matches_processed);
            println!("Written to:        {}", response.location);
        }
        Commands::Ask { puuid, question } => {
            let response = answer_question(&state, QueryRequest { puuid, question })
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;

            println!("\nQ: {}", response.question);
            println!("\n{}", response.answer);
        }
    }

    Ok(())
}

/// Construct the collaborator handles every handler invocation shares.
fn build_state(config: AppConfig) -> Result<AppState> {
    let store: Arc<dyn ObjectStore> = Arc::new(FsObjectStore::new(PathBuf::from(&config.bucket)));
    let secrets: Arc<dyn SecretStore> = Arc::new(EnvSecretStore);
    let riot: Arc<dyn RiotApi> = Arc::new(RiotClient::new(Duration::from_secs(
        config.riot.timeout_seconds,
    ))?);

    // The model key is read at startup; an empty key surfaces as an
    // authorization failure on the first query, matching the upstream.
    let model_api_key = std::env::var(&config.ai.api_key_env).unwrap_or_default();
    let ai: Arc<dyn AiBackend> = Arc::new(AnthropicBackend::new(
        model_api_key,
        config.ai.model.clone(),
        config.ai.timeout_seconds,
    )?);

    Ok(AppState {
        config: Arc::new(config),
        store,
        secrets,
        riot,
        ai,
    })
}
