use thiserror::Error;

pub const DEFAULT_EMPLOYEE_COUNT: i64 = 10_000;
pub const MAX_EMPLOYEE_COUNT: i64 = 100_000_000;
pub const DEFAULT_BATCH_SIZE: u64 = 10_000;

/// Bound parameters per inserted employee row.
pub const PARAMS_PER_ROW: u64 = 5;

/// Largest batch whose INSERT stays within Postgres' bind parameter limit.
pub const MAX_BATCH_SIZE: u64 = u16::MAX as u64 / PARAMS_PER_ROW;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("passed DSN is empty")]
    EmptyDsn,
    #[error("expected employees count to be within (0, {max}], got {got}")]
    CountOutOfRange { got: i64, max: i64 },
    #[error("expected batch size to be within [1, {max}], got {got}")]
    BatchSizeOutOfRange { got: u64, max: u64 },
}

/// Generator settings, built once from the command line.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    pub dsn: String,
    pub employee_count: i64,
    pub batch_size: u64,
    /// Seed for reproducible data; entropy when absent.
    pub seed: Option<u64>,
    pub log_statements: bool,
}

impl GeneratorConfig {
    pub fn new(dsn: impl Into<String>) -> Self {
        Self {
            dsn: dsn.into(),
            employee_count: DEFAULT_EMPLOYEE_COUNT,
            batch_size: DEFAULT_BATCH_SIZE,
            seed: None,
            log_statements: false,
        }
    }

    pub fn with_employee_count(mut self, count: i64) -> Self {
        self.employee_count = count;
        self
    }

    pub fn with_batch_size(mut self, batch_size: u64) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that must pass before the database is touched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dsn.trim().is_empty() {
            return Err(ConfigError::EmptyDsn);
        }
        if self.employee_count <= 0 || self.employee_count > MAX_EMPLOYEE_COUNT {
            return Err(ConfigError::CountOutOfRange {
                got: self.employee_count,
                max: MAX_EMPLOYEE_COUNT,
            });
        }
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_SIZE {
            return Err(ConfigError::BatchSizeOutOfRange {
                got: self.batch_size,
                max: MAX_BATCH_SIZE,
            });
        }
        Ok(())
    }

    /// Validated employee count.
    pub fn count(&self) -> Result<u64, ConfigError> {
        self.validate()?;
        Ok(self.employee_count as u64)
    }
}
