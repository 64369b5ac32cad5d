use serde::{Deserialize, Serialize};

/// Keyset pagination cursor.
///
/// Only rows with `id > last_id` are returned, at most `limit` of them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetRequest {
    pub limit: u64,
    pub last_id: i32,
}

impl OffsetRequest {
    pub fn new(limit: u64, last_id: i32) -> Self {
        Self { limit, last_id }
    }

    /// Cursor for the page that follows `last_seen`.
    pub fn after(self, last_seen: i32) -> Self {
        Self {
            last_id: last_seen,
            ..self
        }
    }
}

/// Last-name search with a pagination cursor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetEmployeesRequest {
    pub name: String,
    #[serde(flatten)]
    pub page: OffsetRequest,
}

impl GetEmployeesRequest {
    pub fn new(name: impl Into<String>, page: OffsetRequest) -> Self {
        Self {
            name: name.into(),
            page,
        }
    }
}
