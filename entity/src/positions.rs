use sea_orm::{DeriveIden, FromQueryResult};
use serde::{Deserialize, Serialize};

/// Titles the generator seeds into `positions`.
pub const SEED_TITLES: [&str; 4] = ["QA", "Dev", "PM", "Architect"];

/// Column identifiers of the `positions` table.
#[derive(DeriveIden, Clone, Copy, Debug)]
pub enum Positions {
    Table,
    Id,
    Title,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromQueryResult)]
pub struct Position {
    pub id: i32,
    pub title: String,
}
