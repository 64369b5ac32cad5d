//! Directory store client: owns the lookup query text.

use std::time::Instant;

use async_trait::async_trait;
use entity::{Employee, Employees, OffsetRequest};
use sea_orm::sea_query::{Alias, Expr, Func, LikeExpr, Order, Query, SelectStatement};
use sea_orm::{ConnectionTrait, FromQueryResult};
use tracing::{debug, instrument};

use crate::{DbError, DbPool, DbResult};

/// Escape character used in LIKE patterns built from user input.
pub const LIKE_ESCAPE: char = '!';

/// Largest `LIMIT` the drivers can bind (a signed 64-bit parameter).
pub const MAX_QUERY_LIMIT: u64 = i64::MAX as u64;

/// Read capability the directory service depends on.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Employees whose lower-cased last name starts with `name`, with
    /// `id > page.last_id`, ascending by id, at most `page.limit` rows.
    async fn get_employees_by_name(
        &self,
        name: &str,
        page: OffsetRequest,
    ) -> DbResult<Vec<Employee>>;
}

/// [`EmployeeStore`] backed by a sea-orm pool.
#[derive(Clone, Debug)]
pub struct SeaOrmStore {
    db: DbPool,
}

impl SeaOrmStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn ping(&self) -> DbResult<()> {
        self.db.ping().await.map_err(DbError::Ping)
    }
}

#[async_trait]
impl EmployeeStore for SeaOrmStore {
    #[instrument(name = "store.employees_by_last_name", skip(self), fields(limit = page.limit, last_id = page.last_id))]
    async fn get_employees_by_name(
        &self,
        name: &str,
        page: OffsetRequest,
    ) -> DbResult<Vec<Employee>> {
        const OP: &str = "employees_by_last_name";

        let started = Instant::now();
        let stmt = self
            .db
            .get_database_backend()
            .build(&employees_by_last_name_query(name, page)?);
        let rows = self
            .db
            .query_all(stmt)
            .await
            .map_err(DbError::statement(OP))?;

        let employees = rows
            .iter()
            .map(|row| Employee::from_query_result(row, ""))
            .collect::<Result<Vec<_>, _>>()
            .map_err(DbError::decode(OP))?;

        debug!(
            rows = employees.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "directory query finished"
        );
        Ok(employees)
    }
}

/// Keyset query for a last-name prefix search.
///
/// The caller is expected to pass an already lower-cased `name`. Fails when
/// `page.limit` exceeds [`MAX_QUERY_LIMIT`].
pub fn employees_by_last_name_query(name: &str, page: OffsetRequest) -> DbResult<SelectStatement> {
    if page.limit > MAX_QUERY_LIMIT {
        return Err(DbError::LimitOutOfRange {
            limit: page.limit,
            max: MAX_QUERY_LIMIT,
        });
    }
    let query = Query::select()
        .columns([Employees::Id, Employees::FirstName, Employees::LastName])
        .expr_as(
            Func::cast_as(Expr::col(Employees::Salary), Alias::new("BIGINT")),
            Alias::new("salary"),
        )
        .expr_as(Expr::col(Employees::Position), Alias::new("position_id"))
        .column(Employees::Email)
        .from(Employees::Table)
        .and_where(
            Expr::expr(Func::lower(Expr::col(Employees::LastName)))
                .like(LikeExpr::new(prefix_pattern(name)).escape(LIKE_ESCAPE)),
        )
        .and_where(Expr::col(Employees::Id).gt(page.last_id))
        .order_by(Employees::Id, Order::Asc)
        .limit(page.limit)
        .to_owned();
    Ok(query)
}

/// `name%` with LIKE wildcards in `name` escaped.
pub fn prefix_pattern(name: &str) -> String {
    let mut pattern = String::with_capacity(name.len() + 1);
    for ch in name.chars() {
        if matches!(ch, '%' | '_') || ch == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
