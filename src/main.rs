use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pitch_dashboard::api::{build_router, state::AppState};
use pitch_dashboard::client::format::{headline_cards, render_table};
use pitch_dashboard::client::{Dashboard, HttpPitchApi, SortDirection, SortState};
use pitch_dashboard::config::AppConfig;
use pitch_dashboard::models::{ListingId, PitcherListing, SummaryField};
use pitch_dashboard::storage::SqliteStore;

#[derive(Parser)]
#[command(name = "pitch-dashboard")]
#[command(about = "Per-pitcher pitch-type analytics over a SQLite pitch store")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

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

        /// Path to the SQLite pitch database
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Print the pitcher list from a running server
    Pitchers {
        /// Server base URL
        #[arg(long, default_value = "http://127.0.0.1:5001")]
        server: String,
    },

    /// Show the pitch summary for one pitcher
    Show {
        /// Pitcher id or display name
        pitcher: String,

        /// Server base URL
        #[arg(long, default_value = "http://127.0.0.1:5001")]
        server: String,

        /// Column to sort by (e.g. pitch_count, avg_spin_rate)
        #[arg(long, default_value = "pitch_count")]
        sort: SummaryField,

        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,
    },
}

fn load_config(path: &PathBuf) -> Result<AppConfig> {
    if path.exists() {
        AppConfig::from_file(path).with_context(|| format!("loading {}", path.display()))
    } else {
        Ok(AppConfig::default())
    }
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Received shutdown signal, closing database connection...");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(&cli.config)?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    init_tracing(&config.log_level, cli.json_logs);
    tracing::info!("Starting pitch-dashboard v{}", env!("CARGO_PKG_VERSION"));
    if !cli.config.exists() {
        tracing::warn!("Config file {} not found, using defaults", cli.config.display());
    }

    match cli.command {
        Commands::Serve { host, port, db } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(db) = db {
                config.database.path = db;
            }
            config.validate()?;

            tracing::info!("Using DB at: {}", config.database.path.display());
            let store = Arc::new(SqliteStore::open(&config.database.path)?);
            let state = AppState::new(store, config.roster.clone());
            let app = build_router(state, &config.server.cors_origin);

            let addr = format!("{}:{}", config.server.host, config.server.port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Pitch dashboard API: http://{}/api", addr);
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
            // The router and its store handle are dropped here, closing the connection
            tracing::info!("Server shut down gracefully");
        }
        Commands::Pitchers { server } => {
            let api = HttpPitchApi::new(&server)?;
            let dash = Dashboard::new(api, StdRng::from_entropy(), config.roster.clone());
            let list = dash.load_pitchers().await;
            if let Some(advisory) = &list.advisory {
                eprintln!("! {}", advisory);
            }
            for p in &list.pitchers {
                println!("{:>12}  {}", p.id, p.name);
            }
        }
        Commands::Show {
            pitcher,
            server,
            sort,
            asc,
        } => {
            let api = HttpPitchApi::new(&server)?;
            let mut dash = Dashboard::new(api, StdRng::from_entropy(), config.roster.clone());
            let list = dash.load_pitchers().await;

            let listing = list
                .pitchers
                .iter()
                .find(|p| p.name == pitcher || p.id.to_string() == pitcher)
                .cloned()
                .unwrap_or_else(|| PitcherListing {
                    id: ListingId::Placeholder(pitcher.clone()),
                    name: pitcher.clone(),
                });

            dash.set_sort_state(SortState {
                field: sort,
                direction: if asc {
                    SortDirection::Ascending
                } else {
                    SortDirection::Descending
                },
            });

            dash.show(listing).await;
            let Some(view) = dash.view() else {
                anyhow::bail!("no summary view for {}", pitcher);
            };
            if let Some(advisory) = &view.advisory {
                eprintln!("! {}", advisory);
            }
            println!("Pitch Summary - {}", view.pitcher.name);
            if let Some(headline) = &view.headline {
                println!(
                    "Total Pitches: {}  Pitch Types: {}",
                    headline.total_pitches, headline.pitch_types
                );
                for (title, value, caption) in headline_cards(headline) {
                    println!("{:<18} {:<20} {}", title, value, caption);
                }
            }
            println!();
            print!("{}", render_table(&dash.sorted_rows()));
        }
    }

    Ok(())
}
