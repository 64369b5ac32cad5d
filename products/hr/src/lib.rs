//! HR directory slice: last-name lookups over an [`EmployeeStore`].

mod application;
mod service;

use platform_db::DbError;
use thiserror::Error;

pub use application::Application;
pub use platform_db::EmployeeStore;
pub use service::DirectoryService;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("directory lookup failed")]
    Lookup(#[source] DbError),
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;
