use entity::{Employee, GetEmployeesRequest};
use platform_db::EmployeeStore;

use crate::{DirectoryResult, DirectoryService};

/// Entry point the HTTP layer talks to.
#[derive(Debug)]
pub struct Application<S> {
    directory: DirectoryService<S>,
}

impl<S: EmployeeStore> Application<S> {
    pub fn new(store: S) -> Self {
        Self {
            directory: DirectoryService::new(store),
        }
    }

    pub fn store(&self) -> &S {
        self.directory.store()
    }

    pub async fn get_employees_by_name(
        &self,
        req: &GetEmployeesRequest,
    ) -> DirectoryResult<Vec<Employee>> {
        self.directory.get_employees_by_name(req).await
    }
}
