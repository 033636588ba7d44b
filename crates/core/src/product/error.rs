use thiserror::Error;

/// Errors produced while turning a request into a [`Product`](super::Product).
///
/// The `Display` text is what clients see in the `message` field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProductError {
    #[error("Empty request body")]
    EmptyBody,
    #[error("Failed to parse product from request body")]
    Malformed(String),
    #[error("Product ID in path does not match product ID in body")]
    IdMismatch { path: String, body: String },
    #[error("Invalid product: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_hides_parser_detail() {
        let error = ProductError::Malformed("expected value at line 1".to_string());
        assert_eq!(
            error.to_string(),
            "Failed to parse product from request body"
        );
    }

    #[test]
    fn test_invalid_display() {
        let error = ProductError::Invalid("name must not be empty".to_string());
        assert_eq!(error.to_string(), "Invalid product: name must not be empty");
    }
}
