use anyhow::{Context, Result, bail};
use clap::Parser;
use datagen::config::{DEFAULT_BATCH_SIZE, DEFAULT_EMPLOYEE_COUNT};
use datagen::{GeneratorConfig, generate};
use platform_obs::{ObsConfig, init_tracing};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "datagen", version, about = "Fill the employee directory with synthetic data")]
struct Cli {
    /// Database connection string
    #[arg(long, env = "DATABASE_URL", default_value = "", hide_env_values = true)]
    dsn: String,
    /// Number of employees entries to generate
    #[arg(long = "emp-count", default_value_t = DEFAULT_EMPLOYEE_COUNT, allow_negative_numbers = true)]
    emp_count: i64,
    /// Rows per INSERT statement
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: u64,
    /// Seed for reproducible data
    #[arg(long)]
    seed: Option<u64>,
    /// Log every SQL statement
    #[arg(long)]
    log_statements: bool,
}

impl From<Cli> for GeneratorConfig {
    fn from(cli: Cli) -> Self {
        GeneratorConfig {
            dsn: cli.dsn,
            employee_count: cli.emp_count,
            batch_size: cli.batch_size,
            seed: cli.seed,
            log_statements: cli.log_statements,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(ObsConfig::for_service("datagen"))?;
    let config = GeneratorConfig::from(Cli::parse());

    tokio::select! {
        result = generate(&config) => {
            let report = result.context("failed to generate the DB data")?;
            info!(
                rows = report.rows_inserted,
                batches = report.batches,
                "done"
            );
        }
        _ = tokio::signal::ctrl_c() => {
            bail!("interrupted, the in-flight transaction was rolled back");
        }
    }
    Ok(())
}
