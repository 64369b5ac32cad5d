use entity::{Employee, GetEmployeesRequest};
use platform_db::EmployeeStore;
use tracing::instrument;

use crate::{DirectoryError, DirectoryResult};

/// Normalizes lookups and delegates them to the store.
#[derive(Debug)]
pub struct DirectoryService<S> {
    store: S,
}

impl<S: EmployeeStore> DirectoryService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Case-insensitive last-name prefix search, ascending by id.
    #[instrument(name = "directory.get_employees_by_name", skip_all, fields(limit = req.page.limit, last_id = req.page.last_id))]
    pub async fn get_employees_by_name(
        &self,
        req: &GetEmployeesRequest,
    ) -> DirectoryResult<Vec<Employee>> {
        let name = req.name.to_lowercase();
        self.store
            .get_employees_by_name(&name, req.page)
            .await
            .map_err(DirectoryError::Lookup)
    }
}
