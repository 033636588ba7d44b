use std::{env, str::FromStr, time::Duration};

use products_core::stack::{products_table, HANDLER_TIMEOUT, PRODUCT_TABLE_ENV};

/// Default number of products returned by `GET /`.
pub const DEFAULT_SCAN_LIMIT: usize = 20;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backing table name (default: the declared products table)
    pub table_name: String,
    /// Maximum number of products listed per request (default: 20)
    pub scan_limit: usize,
    /// Request timeout in seconds (default: the declared handler timeout)
    pub request_timeout_seconds: u64,
    /// Custom DynamoDB endpoint, e.g. DynamoDB Local.
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[allow(dead_code)]
    pub endpoint_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PRODUCT_TABLE` - Table name (default: "Products")
    /// - `SCAN_LIMIT` - Products listed per request (default: 20)
    /// - `REQUEST_TIMEOUT_SECONDS` - Request timeout (default: 20)
    /// - `AWS_ENDPOINT_URL` - Custom DynamoDB endpoint (default: unset)
    pub fn from_env() -> Self {
        Self {
            table_name: env::var(PRODUCT_TABLE_ENV)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| products_table().table_name),
            scan_limit: positive(env::var("SCAN_LIMIT").ok()).unwrap_or(DEFAULT_SCAN_LIMIT),
            request_timeout_seconds: positive(env::var("REQUEST_TIMEOUT_SECONDS").ok())
                .unwrap_or(HANDLER_TIMEOUT.as_secs()),
            endpoint_url: env::var("AWS_ENDPOINT_URL").ok(),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

/// Parses a strictly positive number, ignoring zero and garbage.
fn positive<T>(raw: Option<String>) -> Option<T>
where
    T: FromStr + PartialOrd + Default,
{
    raw.and_then(|v| v.trim().parse().ok())
        .filter(|value| *value > T::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_timeout_conversion() {
        let config = Config {
            table_name: "Products".to_string(),
            scan_limit: 20,
            request_timeout_seconds: 5,
            endpoint_url: None,
        };

        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_positive_rejects_zero_and_garbage() {
        assert_eq!(positive::<u64>(Some("0".to_string())), None);
        assert_eq!(positive::<u64>(Some("soon".to_string())), None);
        assert_eq!(positive::<u64>(Some("-5".to_string())), None);
        assert_eq!(positive::<u64>(None), None);
        assert_eq!(positive::<u64>(Some(" 30 ".to_string())), Some(30));
        assert_eq!(positive::<usize>(Some("5".to_string())), Some(5));
    }

    #[test]
    fn test_default_values() {
        // Clear environment variables to test defaults
        env::remove_var("PRODUCT_TABLE");
        env::remove_var("SCAN_LIMIT");
        env::remove_var("REQUEST_TIMEOUT_SECONDS");
        env::remove_var("AWS_ENDPOINT_URL");

        let config = Config::from_env();

        assert_eq!(config.table_name, "Products");
        assert_eq!(config.scan_limit, 20);
        assert_eq!(config.request_timeout_seconds, 20);
        assert_eq!(config.endpoint_url, None);
    }
}
