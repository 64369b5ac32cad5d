//! Offline generator that fills the directory database with synthetic data.
//!
//! Stages run strictly in order, each in its own transaction: schema creation,
//! position seeding, then every employee batch.

pub mod config;
pub mod employees;
pub mod error;
pub mod faker;
pub mod positions;

use std::time::{Duration, Instant};

use platform_db::{DatabaseSettings, DbPool, connect};
use tracing::{info, warn};

pub use config::{ConfigError, GeneratorConfig};
pub use employees::{insert_employees, partition};
pub use error::GenerateError;
pub use faker::EmployeeFaker;
pub use positions::{PositionIds, seed_positions};

#[derive(Clone, Debug)]
pub struct GenerationReport {
    pub positions: PositionIds,
    pub rows_inserted: u64,
    pub batches: u64,
    pub elapsed: Duration,
}

impl GenerationReport {
    pub fn rows_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.rows_inserted as f64 / secs
        } else {
            0.0
        }
    }
}

/// Validate `config`, connect, and run every stage.
pub async fn generate(config: &GeneratorConfig) -> Result<GenerationReport, GenerateError> {
    config.validate()?;

    let settings = DatabaseSettings::new(&config.dsn)
        .with_max_connections(1)
        .with_statement_logging(config.log_statements);
    let db = connect(&settings).await.map_err(GenerateError::Connect)?;

    let result = run(&db, config).await;
    if let Err(err) = db.close().await {
        warn!(error = %err, "failed to properly close the database pool");
    }
    result
}

/// Run every stage against an open pool.
pub async fn run(db: &DbPool, config: &GeneratorConfig) -> Result<GenerationReport, GenerateError> {
    let count = config.count()?;
    let started = Instant::now();

    migration::ensure_schema(db)
        .await
        .map_err(GenerateError::Schema)?;

    let positions = seed_positions(db).await?;
    info!(positions = ?positions.as_slice(), "positions ready");

    let mut faker = EmployeeFaker::new(config.seed);
    let batches = insert_employees(db, count, config.batch_size, &positions, &mut faker).await?;

    let report = GenerationReport {
        positions,
        rows_inserted: count,
        batches,
        elapsed: started.elapsed(),
    };
    info!(
        rows = report.rows_inserted,
        batches = report.batches,
        elapsed = ?report.elapsed,
        rows_per_second = format_args!("{:.2}", report.rows_per_second()),
        "employee generation finished"
    );
    Ok(report)
}
