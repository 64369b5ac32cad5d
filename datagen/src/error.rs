use platform_db::DbError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("invalid generator configuration")]
    Config(#[from] ConfigError),
    #[error("failed to connect to the database")]
    Connect(#[source] DbError),
    #[error("failed to create the database schema")]
    Schema(#[source] DbError),
    #[error("failed to seed positions")]
    SeedPositions(#[source] DbError),
    #[error("failed to fetch position ids")]
    FetchPositions(#[source] DbError),
    #[error("no positions available to assign employees to")]
    NoPositions,
    #[error("failed to insert batch {index} ({size} employees)")]
    Batch {
        /// Zero-based.
        index: usize,
        size: u64,
        #[source]
        source: DbError,
    },
    #[error(transparent)]
    Db(#[from] DbError),
}
