//! Error types for stack commands.

use products_core::stack::StackViolation;
use thiserror::Error;

/// Result type alias for stack module.
pub type Result<T> = std::result::Result<T, StackError>;

/// Errors that can occur while inspecting the stack declaration.
#[derive(Error, Debug)]
pub enum StackError {
    #[error("Stack declaration is invalid ({} violation(s))", .0.len())]
    Invalid(Vec<StackViolation>),

    #[error("Failed to render dashboard body: {0}")]
    Render(#[from] serde_json::Error),
}
