mod config;
mod http;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use platform_db::{DatabaseSettings, DbPool, SeaOrmStore, connect};
use platform_obs::{ObsConfig, init_tracing};
use tracing::{info, warn};

use crate::{config::AppConfig, http::AppState};

#[derive(Parser, Debug)]
#[command(name = "employees", version, about = "Employee directory")]
struct Cli {
    /// Database connection string.
    #[arg(long, global = true, env = "EMPLOYEES_DSN", hide_env_values = true)]
    dsn: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server.
    Serve(ServeCommand),
    /// Create the directory tables if they are missing.
    Migrate,
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, env = "EMPLOYEES_HOST", default_value = "localhost:8080")]
    host: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(ObsConfig::for_service("employees"))?;
    let cli = Cli::parse();
    let app_config = Arc::new(AppConfig::load()?);
    let pool = setup_pool(cli.dsn, &app_config).await?;
    let result = match cli.command {
        Command::Serve(cmd) => run_server(cmd, pool.clone(), app_config).await,
        Command::Migrate => migrate(&pool).await,
    };
    if let Err(err) = pool.close().await {
        warn!(error = %err, "failed to properly close the database pool");
    }
    result
}

async fn setup_pool(dsn: Option<String>, config: &AppConfig) -> Result<DbPool> {
    let settings = DatabaseSettings::new(dsn.unwrap_or_default())
        .with_max_connections(config.db_max_connections);
    connect(&settings)
        .await
        .context("failed to connect to the directory database (set --dsn or EMPLOYEES_DSN)")
}

async fn run_server(cmd: ServeCommand, pool: DbPool, config: Arc<AppConfig>) -> Result<()> {
    let state = AppState::new(SeaOrmStore::new(pool), config);
    http::serve(&cmd.host, state).await
}

async fn migrate(pool: &DbPool) -> Result<()> {
    migration::ensure_schema(pool).await?;
    info!("database schema ensured");
    Ok(())
}
