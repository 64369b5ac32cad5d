//! Records shared by the directory service, the store client and the data
//! generator.

pub mod employees;
pub mod paging;
pub mod positions;

pub use employees::{Employee, Employees, NewEmployee};
pub use paging::{GetEmployeesRequest, OffsetRequest};
pub use positions::{Position, Positions, SEED_TITLES};
