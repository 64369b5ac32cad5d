//! Directory schema. Every statement is idempotent, so running
//! [`ensure_schema`] against an initialized database changes nothing.

mod tables;

use platform_db::{DbError, DbPool, DbResult, begin, finish_transaction};
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseTransaction, Statement};
use tracing::{debug, info};

pub use tables::{employees_table, positions_table};

const OP: &str = "ensure_schema";

const LAST_NAME_INDEX_SQL: &str = "CREATE INDEX IF NOT EXISTS employees_last_name_lower_idx \
     ON employees (lower(last_name) text_pattern_ops, id)";

/// Labelled schema statements for `backend`, in execution order.
pub fn schema_statements(backend: DatabaseBackend) -> Vec<(&'static str, Statement)> {
    let mut stmts = vec![
        ("create positions", backend.build(&positions_table())),
        ("create employees", backend.build(&employees_table())),
    ];
    if backend == DatabaseBackend::Postgres {
        stmts.push((
            "create last name index",
            Statement::from_string(backend, LAST_NAME_INDEX_SQL),
        ));
    }
    stmts
}

/// Create the directory tables if they are missing, all or nothing.
pub async fn ensure_schema(db: &DbPool) -> DbResult<()> {
    let txn = begin(db, OP).await?;
    let result = create_tables(&txn).await;
    finish_transaction(txn, OP, result).await?;
    info!("directory schema ready");
    Ok(())
}

async fn create_tables(txn: &DatabaseTransaction) -> DbResult<()> {
    for (label, stmt) in schema_statements(txn.get_database_backend()) {
        debug!(statement = label, "applying schema statement");
        txn.execute(stmt).await.map_err(DbError::statement(label))?;
    }
    Ok(())
}
