//! Database primitives shared by the directory server and the data generator.

pub mod store;

use std::time::Duration;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DatabaseTransaction, DbErr,
    SqlErr, TransactionTrait,
};
use thiserror::Error;
use tracing::{info, warn};

pub use store::{EmployeeStore, MAX_QUERY_LIMIT, SeaOrmStore};

/// Shared connection pool alias.
pub type DbPool = DatabaseConnection;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database url missing")]
    MissingUrl,
    #[error("failed to open the database pool")]
    Connect(#[source] DbErr),
    #[error("failed to ping the database")]
    Ping(#[source] DbErr),
    #[error("failed to start the `{op}` transaction")]
    Begin {
        op: &'static str,
        #[source]
        source: DbErr,
    },
    #[error("failed to commit the `{op}` transaction")]
    Commit {
        op: &'static str,
        #[source]
        source: DbErr,
    },
    #[error("`{op}` statement failed")]
    Statement {
        op: &'static str,
        #[source]
        source: DbErr,
    },
    #[error("failed to decode a `{op}` row")]
    Decode {
        op: &'static str,
        #[source]
        source: DbErr,
    },
    #[error("query limit {limit} exceeds {max}")]
    LimitOutOfRange { limit: u64, max: u64 },
}

pub type DbResult<T> = Result<T, DbError>;

impl DbError {
    pub fn statement(op: &'static str) -> impl FnOnce(DbErr) -> Self {
        move |source| Self::Statement { op, source }
    }

    pub fn decode(op: &'static str) -> impl FnOnce(DbErr) -> Self {
        move |source| Self::Decode { op, source }
    }

    /// The driver error underneath, if any.
    pub fn db_err(&self) -> Option<&DbErr> {
        match self {
            DbError::MissingUrl | DbError::LimitOutOfRange { .. } => None,
            DbError::Connect(source) | DbError::Ping(source) => Some(source),
            DbError::Begin { source, .. }
            | DbError::Commit { source, .. }
            | DbError::Statement { source, .. }
            | DbError::Decode { source, .. } => Some(source),
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        self.db_err().is_some_and(is_unique_violation)
    }
}

/// Whether the database rejected a write because of a unique constraint.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Pool settings; read once at startup.
#[derive(Clone, Debug)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout: Duration,
    pub acquire_timeout: Duration,
    pub log_statements: bool,
}

impl DatabaseSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            connect_timeout: Duration::from_secs(10),
            acquire_timeout: Duration::from_secs(30),
            log_statements: false,
        }
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections.max(1);
        self
    }

    pub fn with_statement_logging(mut self, enabled: bool) -> Self {
        self.log_statements = enabled;
        self
    }
}

/// Open a pool and make sure the database answers.
pub async fn connect(settings: &DatabaseSettings) -> DbResult<DbPool> {
    if settings.url.trim().is_empty() {
        return Err(DbError::MissingUrl);
    }

    let mut options = ConnectOptions::new(settings.url.clone());
    options
        .max_connections(settings.max_connections)
        .connect_timeout(settings.connect_timeout)
        .acquire_timeout(settings.acquire_timeout)
        .sqlx_logging(settings.log_statements);

    let pool = Database::connect(options).await.map_err(DbError::Connect)?;
    pool.ping().await.map_err(DbError::Ping)?;
    info!(
        backend = ?pool.get_database_backend(),
        max_connections = settings.max_connections,
        "database pool ready"
    );
    Ok(pool)
}

pub async fn begin<C>(db: &C, op: &'static str) -> DbResult<DatabaseTransaction>
where
    C: TransactionTrait,
{
    db.begin()
        .await
        .map_err(|source| DbError::Begin { op, source })
}

/// Commit `txn` when `result` is `Ok`, roll it back otherwise.
///
/// A failed rollback is logged and the original error is returned. Dropping a
/// transaction without calling this also rolls it back.
pub async fn finish_transaction<T, E>(
    txn: DatabaseTransaction,
    op: &'static str,
    result: Result<T, E>,
) -> Result<T, E>
where
    E: From<DbError>,
{
    match result {
        Ok(value) => {
            txn.commit()
                .await
                .map_err(|source| DbError::Commit { op, source })?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = txn.rollback().await {
                warn!(op, error = %rollback_err, "failed to roll back the transaction");
            }
            Err(err)
        }
    }
}
