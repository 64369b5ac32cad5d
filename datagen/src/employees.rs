//! Batched employee inserts.

use entity::{Employees, NewEmployee};
use platform_db::{DbError, DbPool, begin, finish_transaction};
use sea_orm::sea_query::{InsertStatement, Query};
use sea_orm::{ConnectionTrait, DatabaseTransaction};
use tracing::{debug, info};

use crate::error::GenerateError;
use crate::faker::EmployeeFaker;
use crate::positions::PositionIds;

const OP: &str = "insert_employees";

/// Split `count` rows into batches of at most `batch_size`.
///
/// Every batch is full except possibly the last one, which carries the
/// remainder. Returns no batches when either argument is zero.
pub fn partition(count: u64, batch_size: u64) -> Vec<u64> {
    if count == 0 || batch_size == 0 {
        return Vec::new();
    }
    let mut sizes = vec![batch_size; (count / batch_size) as usize];
    let rest = count % batch_size;
    if rest > 0 {
        sizes.push(rest);
    }
    sizes
}

/// One multi-row INSERT with a parameter group per row.
pub fn insert_statement(rows: Vec<NewEmployee>) -> InsertStatement {
    let mut insert = Query::insert();
    insert.into_table(Employees::Table).columns([
        Employees::FirstName,
        Employees::LastName,
        Employees::Salary,
        Employees::Position,
        Employees::Email,
    ]);
    for row in rows {
        insert.values_panic([
            row.first_name.into(),
            row.last_name.into(),
            row.salary.into(),
            row.position_id.into(),
            row.email.into(),
        ]);
    }
    insert
}

/// Insert `count` generated employees in one transaction.
///
/// Returns the number of INSERT statements executed. Any failing batch rolls
/// back every row inserted by this call.
pub async fn insert_employees(
    db: &DbPool,
    count: u64,
    batch_size: u64,
    positions: &PositionIds,
    faker: &mut EmployeeFaker,
) -> Result<u64, GenerateError> {
    let txn = begin(db, OP).await?;
    let result = insert_batches(&txn, count, batch_size, positions, faker).await;
    finish_transaction(txn, OP, result).await
}

async fn insert_batches(
    txn: &DatabaseTransaction,
    count: u64,
    batch_size: u64,
    positions: &PositionIds,
    faker: &mut EmployeeFaker,
) -> Result<u64, GenerateError> {
    let backend = txn.get_database_backend();
    let batches = partition(count, batch_size);
    let total = batches.len();
    info!(count, batch_size, batches = total, "inserting employees");

    let mut remaining = count;
    for (index, size) in batches.into_iter().enumerate() {
        let rows = faker.employees(size as usize, positions);
        let stmt = backend.build(&insert_statement(rows));
        txn.execute(stmt)
            .await
            .map_err(|source| GenerateError::Batch {
                index,
                size,
                source: DbError::Statement { op: OP, source },
            })?;
        remaining -= size;
        debug!(batch = index, batches = total, rows = size, remaining, "batch inserted");
    }
    Ok(total as u64)
}
