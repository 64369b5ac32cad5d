//! Position seeding with a read-back fallback for already seeded databases.

use entity::{Position, Positions, SEED_TITLES};
use platform_db::{DbError, DbPool, DbResult, begin, finish_transaction};
use rand::Rng;
use sea_orm::sea_query::{Expr, InsertStatement, Order, Query, SelectStatement};
use sea_orm::{ConnectionTrait, DatabaseTransaction, FromQueryResult};
use tracing::info;

use crate::error::GenerateError;

const OP_SEED: &str = "seed_positions";
const OP_FETCH: &str = "fetch_positions";

/// Non-empty set of position ids employees can be assigned to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionIds(Vec<i32>);

impl PositionIds {
    pub fn new(mut ids: Vec<i32>) -> Option<Self> {
        if ids.is_empty() {
            return None;
        }
        ids.sort_unstable();
        ids.dedup();
        Some(Self(ids))
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }

    /// Uniformly random id from the set.
    pub fn choose<R: Rng>(&self, rng: &mut R) -> i32 {
        self.0[rng.gen_range(0..self.0.len())]
    }
}

/// Seed the fixed titles, or read their ids back when a previous run already
/// inserted them.
pub async fn seed_positions(db: &DbPool) -> Result<PositionIds, GenerateError> {
    let ids = match insert_seed_positions(db).await {
        Ok(ids) => ids,
        Err(err) if err.is_unique_violation() => {
            info!("positions already seeded, reading existing ids");
            fetch_position_ids(db)
                .await
                .map_err(GenerateError::FetchPositions)?
        }
        Err(err) => return Err(GenerateError::SeedPositions(err)),
    };
    PositionIds::new(ids).ok_or(GenerateError::NoPositions)
}

pub async fn insert_seed_positions(db: &DbPool) -> DbResult<Vec<i32>> {
    let txn = begin(db, OP_SEED).await?;
    let result = insert_titles(&txn).await;
    finish_transaction(txn, OP_SEED, result).await
}

pub async fn fetch_position_ids(db: &DbPool) -> DbResult<Vec<i32>> {
    let txn = begin(db, OP_FETCH).await?;
    let result = select_seeded(&txn).await;
    finish_transaction(txn, OP_FETCH, result).await
}

async fn insert_titles(txn: &DatabaseTransaction) -> DbResult<Vec<i32>> {
    let stmt = txn.get_database_backend().build(&seed_statement());
    let rows = txn
        .query_all(stmt)
        .await
        .map_err(DbError::statement(OP_SEED))?;
    rows.iter()
        .map(|row| row.try_get::<i32>("", "id"))
        .collect::<Result<Vec<_>, _>>()
        .map_err(DbError::decode(OP_SEED))
}

async fn select_seeded(txn: &DatabaseTransaction) -> DbResult<Vec<i32>> {
    let stmt = txn.get_database_backend().build(&seeded_query());
    let rows = txn
        .query_all(stmt)
        .await
        .map_err(DbError::statement(OP_FETCH))?;
    rows.iter()
        .map(|row| Position::from_query_result(row, "").map(|position| position.id))
        .collect::<Result<Vec<_>, _>>()
        .map_err(DbError::decode(OP_FETCH))
}

pub fn seed_statement() -> InsertStatement {
    let mut insert = Query::insert();
    insert
        .into_table(Positions::Table)
        .columns([Positions::Title])
        .returning_col(Positions::Id);
    for title in SEED_TITLES {
        insert.values_panic([title.into()]);
    }
    insert
}

fn seeded_query() -> SelectStatement {
    Query::select()
        .columns([Positions::Id, Positions::Title])
        .from(Positions::Table)
        .and_where(Expr::col(Positions::Title).is_in(SEED_TITLES))
        .order_by(Positions::Id, Order::Asc)
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DatabaseBackend;

    #[test]
    fn position_ids_reject_empty_sets() {
        assert_eq!(PositionIds::new(Vec::new()), None);
    }

    #[test]
    fn position_ids_are_sorted_and_unique() {
        let ids = PositionIds::new(vec![4, 2, 4, 1]).unwrap();
        assert_eq!(ids.as_slice(), &[1, 2, 4]);
    }

    #[test]
    fn seed_statement_inserts_every_title_and_returns_ids() {
        let stmt = DatabaseBackend::Postgres.build(&seed_statement());
        assert!(stmt.sql.contains(r#"RETURNING "id""#), "{}", stmt.sql);
        assert_eq!(stmt.values.unwrap().0.len(), SEED_TITLES.len());
    }
}
