//! Application configuration, read from the environment.
//!
//! | Variable                 | Default                 | Description              |
//! |--------------------------|-------------------------|--------------------------|
//! | `TODO_API_BASE_URL`      | `https://dummyjson.com` | API base URL             |
//! | `TODO_PAGE_SIZE`         | `10`                    | Todos per list page      |
//! | `TODO_STALE_SECS`        | `300`                   | Query stale time         |
//! | `TODO_QUERY_RETRY`       | `1`                     | Retries per failed query, at most 10 |
//! | `TODO_HTTP_TIMEOUT_SECS` | `10`                    | Per-request timeout      |

use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context};
use todo_core::{pagination::DEFAULT_PAGE_SIZE, QueryConfig, DEFAULT_BASE_URL};

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const MAX_QUERY_RETRY: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub base_url: String,
    pub page_size: u64,
    pub query: QueryConfig,
    pub http_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            query: QueryConfig::default(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let base_url = lookup("TODO_API_BASE_URL").unwrap_or(defaults.base_url);
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            bail!("TODO_API_BASE_URL must start with http:// or https://, got {base_url:?}");
        }

        let page_size: u64 = parse_or(&lookup, "TODO_PAGE_SIZE", defaults.page_size)?;
        if page_size == 0 {
            bail!("TODO_PAGE_SIZE must be at least 1");
        }

        let stale_secs = parse_or(&lookup, "TODO_STALE_SECS", defaults.query.stale_time.as_secs())?;
        let retry = parse_or(&lookup, "TODO_QUERY_RETRY", defaults.query.retry)?;
        if retry > MAX_QUERY_RETRY {
            bail!("TODO_QUERY_RETRY must be at most {MAX_QUERY_RETRY}, got {retry}");
        }
        let timeout_secs = parse_or(
            &lookup,
            "TODO_HTTP_TIMEOUT_SECS",
            defaults.http_timeout.as_secs(),
        )?;

        Ok(Self {
            base_url,
            page_size,
            query: QueryConfig {
                stale_time: Duration::from_secs(stale_secs),
                retry,
            },
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a non-negative integer, got {raw:?}")),
    }
}
