use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use platform_db::MAX_QUERY_LIMIT;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;
const DEFAULT_MAX_PAGE_SIZE: u64 = 1000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Process settings read once at startup.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub request_timeout: Duration,
    pub max_page_size: u64,
    pub db_max_connections: u32,
    pub cors_allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let request_timeout_secs = parse_or(
            &lookup,
            "EMPLOYEES_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;
        if request_timeout_secs == 0 {
            return Err(anyhow!("EMPLOYEES_REQUEST_TIMEOUT_SECS must be positive"));
        }

        let max_page_size = parse_or(&lookup, "EMPLOYEES_MAX_PAGE_SIZE", DEFAULT_MAX_PAGE_SIZE)?;
        if max_page_size == 0 || max_page_size > MAX_QUERY_LIMIT {
            return Err(anyhow!(
                "EMPLOYEES_MAX_PAGE_SIZE must be within [1, {MAX_QUERY_LIMIT}]"
            ));
        }

        let db_max_connections = parse_or(
            &lookup,
            "EMPLOYEES_DB_MAX_CONNECTIONS",
            DEFAULT_DB_MAX_CONNECTIONS,
        )?;

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect::<Vec<_>>();

        Ok(Self {
            request_timeout: Duration::from_secs(request_timeout_secs),
            max_page_size,
            db_max_connections,
            cors_allowed_origins,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid {key}: {raw:?}")),
        _ => Ok(default),
    }
}
