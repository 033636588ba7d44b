use serde::Serialize;

use super::function::HandlerName;

/// Values a stack output can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputValue {
    /// Base URL of the HTTP API.
    ApiEndpoint,
}

/// A named stack export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSpec {
    pub export_name: String,
    pub value: OutputValue,
}

/// Everything the product stack hands to the dashboard stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackExports {
    pub api_endpoint: String,
    pub functions: Vec<String>,
}

impl StackExports {
    pub fn new(api_endpoint: impl Into<String>, functions: &[HandlerName]) -> Self {
        Self {
            api_endpoint: api_endpoint.into(),
            functions: functions.iter().map(|f| f.as_str().to_string()).collect(),
        }
    }
}
