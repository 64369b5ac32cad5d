use sea_orm::{DeriveIden, FromQueryResult};
use serde::{Deserialize, Serialize};

/// Column identifiers of the `employees` table.
#[derive(DeriveIden, Clone, Copy, Debug)]
pub enum Employees {
    Table,
    Id,
    FirstName,
    LastName,
    Salary,
    Position,
    Email,
}

/// An employee row as returned by directory lookups.
///
/// The `position` column is exposed as `position_id`, which is also the name
/// used on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromQueryResult)]
pub struct Employee {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub salary: i64,
    pub position_id: i32,
    pub email: String,
}

/// An employee that has not been stored yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub salary: i64,
    pub position_id: i32,
    pub email: String,
}
