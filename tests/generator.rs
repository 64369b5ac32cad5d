use std::collections::HashSet;

use anyhow::Result;
use datagen::config::MAX_BATCH_SIZE;
use datagen::faker::{MAX_SALARY, MIN_SALARY};
use datagen::{
    ConfigError, EmployeeFaker, GenerateError, GeneratorConfig, insert_employees, seed_positions,
};
use entity::OffsetRequest;
use platform_db::{EmployeeStore, SeaOrmStore};
use sea_orm::ConnectionTrait;
use directory_tests::{count_rows, sqlite_directory, sqlite_pool, sqlite_table_exists};

const DSN: &str = "sqlite::memory:";

#[tokio::test]
async fn schema_creation_is_idempotent() -> Result<()> {
    let db = sqlite_directory().await?;
    migration::ensure_schema(&db).await?;
    migration::ensure_schema(&db).await?;
    assert_eq!(count_rows(&db, "employees").await?, 0);
    Ok(())
}

#[tokio::test]
async fn failed_schema_statement_rolls_back_earlier_ones() -> Result<()> {
    let db = sqlite_pool().await?;
    // An index named `employees` makes CREATE TABLE employees fail even with IF NOT EXISTS.
    db.execute_unprepared("CREATE TABLE blocker (x INTEGER)").await?;
    db.execute_unprepared("CREATE INDEX employees ON blocker (x)").await?;

    let err = migration::ensure_schema(&db).await.unwrap_err();
    assert!(
        matches!(err, platform_db::DbError::Statement { op: "create employees", .. }),
        "{err:?}"
    );
    assert!(!sqlite_table_exists(&db, "positions").await?);
    assert!(!sqlite_table_exists(&db, "employees").await?);
    Ok(())
}

#[tokio::test]
async fn seeding_errors_other_than_duplicates_are_fatal() -> Result<()> {
    // No schema: the insert fails for a reason other than a unique violation.
    let db = sqlite_pool().await?;

    let err = seed_positions(&db).await.unwrap_err();
    assert!(matches!(err, GenerateError::SeedPositions(_)), "{err:?}");
    Ok(())
}

#[tokio::test]
async fn reseeding_returns_the_same_positions() -> Result<()> {
    let db = sqlite_directory().await?;

    let first = seed_positions(&db).await?;
    let second = seed_positions(&db).await?;
    assert_eq!(first.as_slice().len(), 4);
    assert_eq!(first, second);
    assert_eq!(count_rows(&db, "positions").await?, 4);
    Ok(())
}

#[tokio::test]
async fn run_inserts_every_row_in_partitioned_batches() -> Result<()> {
    let db = sqlite_directory().await?;
    let config = GeneratorConfig::new(DSN)
        .with_employee_count(25)
        .with_batch_size(10)
        .with_seed(7);

    let report = datagen::run(&db, &config).await?;
    assert_eq!(report.batches, 3);
    assert_eq!(report.rows_inserted, 25);
    assert_eq!(count_rows(&db, "employees").await?, 25);

    let positions: HashSet<i32> = report.positions.as_slice().iter().copied().collect();
    let store = SeaOrmStore::new(db);
    let everyone = store.get_employees_by_name("", OffsetRequest::new(100, 0)).await?;
    assert_eq!(everyone.len(), 25);
    for employee in &everyone {
        assert!((MIN_SALARY..=MAX_SALARY).contains(&employee.salary));
        assert!(positions.contains(&employee.position_id));
    }
    Ok(())
}

#[tokio::test]
async fn rerunning_appends_and_keeps_positions() -> Result<()> {
    let db = sqlite_directory().await?;
    let config = GeneratorConfig::new(DSN).with_employee_count(5).with_batch_size(2);

    let first = datagen::run(&db, &config).await?;
    let second = datagen::run(&db, &config).await?;
    assert_eq!(first.positions, second.positions);
    assert_eq!(count_rows(&db, "employees").await?, 10);
    assert_eq!(count_rows(&db, "positions").await?, 4);
    Ok(())
}

#[tokio::test]
async fn batch_failure_rolls_back_every_batch() -> Result<()> {
    let db = sqlite_directory().await?;
    seed_positions(&db).await?;
    // No row in `positions` has this id, so the FK check rejects the batch.
    db.execute_unprepared("PRAGMA foreign_keys = ON").await?;
    let bogus = datagen::PositionIds::new(vec![9_999]).expect("non-empty");

    let mut faker = EmployeeFaker::new(Some(1));
    let err = insert_employees(&db, 5, 2, &bogus, &mut faker)
        .await
        .unwrap_err();
    assert!(
        matches!(err, GenerateError::Batch { index: 0, size: 2, .. }),
        "{err:?}"
    );
    assert_eq!(count_rows(&db, "employees").await?, 0);
    Ok(())
}

#[tokio::test]
async fn invalid_configs_never_connect() {
    let err = datagen::generate(&GeneratorConfig::new("")).await.unwrap_err();
    assert!(matches!(err, GenerateError::Config(ConfigError::EmptyDsn)));

    let config = GeneratorConfig::new(DSN).with_batch_size(MAX_BATCH_SIZE + 1);
    let err = datagen::generate(&config).await.unwrap_err();
    assert!(matches!(
        err,
        GenerateError::Config(ConfigError::BatchSizeOutOfRange { .. })
    ));
}
