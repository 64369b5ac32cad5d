//! Fixtures shared by the integration tests.

use anyhow::{Context, Result};
use platform_db::{DatabaseSettings, DbPool, connect};
use sea_orm::{ConnectionTrait, Statement};

/// Private, empty in-memory SQLite database.
///
/// The pool holds a single connection so every query sees the same database.
pub async fn sqlite_pool() -> Result<DbPool> {
    Ok(connect(&DatabaseSettings::new("sqlite::memory:").with_max_connections(1)).await?)
}

/// [`sqlite_pool`] with the directory schema applied.
pub async fn sqlite_directory() -> Result<DbPool> {
    let db = sqlite_pool().await?;
    migration::ensure_schema(&db).await?;
    Ok(db)
}

pub async fn sqlite_table_exists(db: &DbPool, table: &str) -> Result<bool> {
    let row = db
        .query_one(Statement::from_sql_and_values(
            db.get_database_backend(),
            "SELECT COUNT(*) AS n FROM sqlite_master WHERE type = 'table' AND name = $1",
            vec![table.into()],
        ))
        .await?
        .context("COUNT(*) returned no row")?;
    Ok(row.try_get::<i64>("", "n")? > 0)
}

pub async fn insert_position(db: &DbPool, id: i32, title: &str) -> Result<()> {
    db.execute(Statement::from_sql_and_values(
        db.get_database_backend(),
        "INSERT INTO positions (id, title) VALUES ($1, $2)",
        vec![id.into(), title.into()],
    ))
    .await
    .with_context(|| format!("insert position {title}"))?;
    Ok(())
}

pub async fn insert_employee(
    db: &DbPool,
    id: i32,
    first_name: &str,
    last_name: &str,
    position_id: i32,
) -> Result<()> {
    let email = format!(
        "{}.{}@example.com",
        first_name.to_lowercase(),
        last_name.to_lowercase()
    );
    db.execute(Statement::from_sql_and_values(
        db.get_database_backend(),
        "INSERT INTO employees (id, first_name, last_name, salary, position, email) \
         VALUES ($1, $2, $3, $4, $5, $6)",
        vec![
            id.into(),
            first_name.into(),
            last_name.into(),
            42_000i64.into(),
            position_id.into(),
            email.into(),
        ],
    ))
    .await
    .with_context(|| format!("insert employee {last_name}"))?;
    Ok(())
}

/// Position 1 ("Dev") plus Smith(1), Smyth(2), Jones(3).
pub async fn seed_smiths(db: &DbPool) -> Result<()> {
    insert_position(db, 1, "Dev").await?;
    insert_employee(db, 1, "John", "Smith", 1).await?;
    insert_employee(db, 2, "Jane", "Smyth", 1).await?;
    insert_employee(db, 3, "Jim", "Jones", 1).await?;
    Ok(())
}

pub async fn count_rows(db: &DbPool, table: &str) -> Result<i64> {
    let row = db
        .query_one(Statement::from_string(
            db.get_database_backend(),
            format!("SELECT COUNT(*) AS n FROM {table}"),
        ))
        .await?
        .context("COUNT(*) returned no row")?;
    Ok(row.try_get::<i64>("", "n")?)
}
