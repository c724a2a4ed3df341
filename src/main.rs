//! Fyyur - a booking listing site for venues, artists and shows

mod api;
mod config;
mod core;
mod db;
mod models;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::prelude::*;

use crate::api::AppState;
use crate::config::{AppConfig, Paths};
use crate::db::{run_migrations, DbEngine};

/// Fyyur - venue and artist booking listings
#[derive(Parser, Debug)]
#[command(name = "fyyur")]
#[command(version)]
#[command(about = "List venues and artists and book shows between them")]
struct Args {
    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 5000)]
    port: u16,

    /// Enable debug mode
    #[arg(long)]
    debug: bool,

    /// Path to config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Database file, overriding settings.json and FYYUR_DATABASE
    #[arg(long)]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize paths
    let paths = Paths::init(args.config.clone())?;
    init_logging(args.debug, &paths)?;

    info!("Fyyur v{} starting...", env!("CARGO_PKG_VERSION"));
    info!("Config directory: {:?}", paths.config_dir());

    let mut settings = AppConfig::load()?;
    settings.apply_env();
    if let Some(database) = args.database {
        settings.database_path = Some(database);
    }

    let db_path = settings.database_path(&paths);
    info!("Database: {:?}", db_path);
    let db = DbEngine::open(&db_path, settings.max_connections, settings.busy_timeout())
        .await
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;
    run_migrations(&db).await?;

    let state = AppState::new(db, &settings.secret_key, settings.display_format());
    serve(args.host, args.port, state).await
}

/// Compact stderr logging; outside debug mode also append to error.log
fn init_logging(debug: bool, paths: &Paths) -> Result<()> {
    let log_level = if debug { "debug" } else { "info" };

    // sqlx logs every statement at info
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("{},sqlx=warn", log_level)));

    let stderr = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact();

    let file = if debug {
        None
    } else {
        let path = paths.error_log_path();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        Some(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .with(file)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}

async fn serve(host: String, port: u16, state: AppState) -> Result<()> {
    use actix_web::{middleware, web, App, HttpServer};

    let addr = format!("{}:{}", host, port);
    info!("Server listening on http://{}", addr);

    let state = web::Data::new(state);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(api::errors::error_handlers())
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(api::configure)
    })
    .bind(addr)?
    .run()
    .await?;

    Ok(())
}
