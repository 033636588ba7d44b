//! Handler declarations.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use super::grants::Access;

/// Environment variable naming the backing table.
pub const PRODUCT_TABLE_ENV: &str = "PRODUCT_TABLE";

pub const HANDLER_MEMORY_MB: u32 = 2048;
pub const HANDLER_TIMEOUT: Duration = Duration::from_secs(20);
pub const HANDLER_LOG_RETENTION_DAYS: u32 = 7;

/// The four product handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HandlerName {
    PutProduct,
    GetProduct,
    GetAllProducts,
    DeleteProduct,
}

impl HandlerName {
    pub const ALL: [HandlerName; 4] = [
        HandlerName::PutProduct,
        HandlerName::GetProduct,
        HandlerName::GetAllProducts,
        HandlerName::DeleteProduct,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HandlerName::PutProduct => "PutProduct",
            HandlerName::GetProduct => "GetProduct",
            HandlerName::GetAllProducts => "GetAllProducts",
            HandlerName::DeleteProduct => "DeleteProduct",
        }
    }

    /// The table access this handler needs to do its job.
    pub fn required_access(&self) -> Access {
        match self {
            HandlerName::GetProduct | HandlerName::GetAllProducts => Access::Read,
            HandlerName::PutProduct | HandlerName::DeleteProduct => Access::Write,
        }
    }
}

impl fmt::Display for HandlerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown handler: {0} (expected one of PutProduct, GetProduct, GetAllProducts, DeleteProduct)")]
pub struct UnknownHandler(pub String);

impl FromStr for HandlerName {
    type Err = UnknownHandler;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HandlerName::ALL
            .into_iter()
            .find(|h| h.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownHandler(s.to_string()))
    }
}

/// CPU architecture a handler runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Architecture {
    Arm64,
    X86_64,
}

impl Architecture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::Arm64 => "arm64",
            Architecture::X86_64 => "x86_64",
        }
    }
}

/// Properties of one deployed handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSpec {
    pub name: HandlerName,
    pub memory_mb: u32,
    pub timeout: Duration,
    pub architecture: Architecture,
    pub log_retention_days: u32,
    pub environment: BTreeMap<String, String>,
}

impl FunctionSpec {
    /// Builds a handler with the shared fixed settings.
    pub fn new(name: HandlerName, environment: BTreeMap<String, String>) -> Self {
        Self {
            name,
            memory_mb: HANDLER_MEMORY_MB,
            timeout: HANDLER_TIMEOUT,
            architecture: Architecture::Arm64,
            log_retention_days: HANDLER_LOG_RETENTION_DAYS,
            environment,
        }
    }

    /// Table name this handler is configured against, if any.
    pub fn table_name(&self) -> Option<&str> {
        self.environment.get(PRODUCT_TABLE_ENV).map(String::as_str)
    }
}

/// The environment shared by every handler.
pub fn shared_environment(table_name: &str) -> BTreeMap<String, String> {
    BTreeMap::from([(PRODUCT_TABLE_ENV.to_string(), table_name.to_string())])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_name_round_trips_through_str() {
        for handler in HandlerName::ALL {
            assert_eq!(handler.as_str().parse::<HandlerName>(), Ok(handler));
        }
    }

    #[test]
    fn test_handler_name_parse_is_case_insensitive() {
        assert_eq!(
            "getallproducts".parse::<HandlerName>(),
            Ok(HandlerName::GetAllProducts)
        );
    }

    #[test]
    fn test_unknown_handler() {
        let err = "ListProducts".parse::<HandlerName>().unwrap_err();
        assert_eq!(err, UnknownHandler("ListProducts".to_string()));
    }

    #[test]
    fn test_required_access() {
        assert_eq!(HandlerName::GetProduct.required_access(), Access::Read);
        assert_eq!(HandlerName::GetAllProducts.required_access(), Access::Read);
        assert_eq!(HandlerName::PutProduct.required_access(), Access::Write);
        assert_eq!(HandlerName::DeleteProduct.required_access(), Access::Write);
    }

    #[test]
    fn test_function_spec_defaults() {
        let spec = FunctionSpec::new(HandlerName::PutProduct, shared_environment("Products"));

        assert_eq!(spec.memory_mb, 2048);
        assert_eq!(spec.timeout, Duration::from_secs(20));
        assert_eq!(spec.architecture, Architecture::Arm64);
        assert_eq!(spec.log_retention_days, 7);
        assert_eq!(spec.table_name(), Some("Products"));
    }
}
