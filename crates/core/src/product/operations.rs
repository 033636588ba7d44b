//! Pure product operations (Functional Core).

use super::{Product, ProductError};

/// Parses and validates the body of a `PUT /{id}` request.
///
/// The id in the path is authoritative: a body carrying a different id is
/// rejected rather than silently rewritten.
pub fn parse_put_request(path_id: &str, body: &[u8]) -> Result<Product, ProductError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ProductError::EmptyBody);
    }

    let product: Product =
        serde_json::from_slice(body).map_err(|e| ProductError::Malformed(e.to_string()))?;

    if product.id != path_id {
        return Err(ProductError::IdMismatch {
            path: path_id.to_string(),
            body: product.id,
        });
    }

    validate_product(&product)?;

    Ok(product)
}

/// Validates product fields.
pub fn validate_product(product: &Product) -> Result<(), ProductError> {
    if product.id.trim().is_empty() {
        return Err(ProductError::Invalid("id must not be empty".to_string()));
    }

    if product.name.trim().is_empty() {
        return Err(ProductError::Invalid("name must not be empty".to_string()));
    }

    if !product.price.is_finite() || product.price < 0.0 {
        return Err(ProductError::Invalid(
            "price must be a non-negative number".to_string(),
        ));
    }

    Ok(())
}

/// Sorts products by id so listings are stable across calls.
pub fn sort_products(products: &mut [Product]) {
    products.sort_by(|a, b| a.id.cmp(&b.id));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_request() {
        let body = br#"{"id":"p-1","name":"Coffee","price":4.5}"#;
        let product = parse_put_request("p-1", body).unwrap();

        assert_eq!(product, Product::new("p-1", "Coffee", 4.5));
    }

    #[test]
    fn test_parse_empty_body() {
        assert_eq!(parse_put_request("p-1", b""), Err(ProductError::EmptyBody));
        assert_eq!(
            parse_put_request("p-1", b"  \n"),
            Err(ProductError::EmptyBody)
        );
    }

    #[test]
    fn test_parse_malformed_body() {
        let result = parse_put_request("p-1", b"{not json");
        assert!(matches!(result, Err(ProductError::Malformed(_))));
    }

    #[test]
    fn test_parse_missing_field() {
        let result = parse_put_request("p-1", br#"{"id":"p-1","name":"Coffee"}"#);
        assert!(matches!(result, Err(ProductError::Malformed(_))));
    }

    #[test]
    fn test_parse_unknown_field_is_malformed() {
        let body = br#"{"id":"p-1","name":"Coffee","price":4.5,"color":"black"}"#;
        let result = parse_put_request("p-1", body);

        assert!(matches!(result, Err(ProductError::Malformed(_))));
    }

    #[test]
    fn test_parse_id_mismatch() {
        let body = br#"{"id":"p-2","name":"Coffee","price":4.5}"#;
        let result = parse_put_request("p-1", body);

        assert_eq!(
            result,
            Err(ProductError::IdMismatch {
                path: "p-1".to_string(),
                body: "p-2".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_rejects_negative_price() {
        let body = br#"{"id":"p-1","name":"Coffee","price":-1.0}"#;
        let result = parse_put_request("p-1", body);

        assert!(matches!(result, Err(ProductError::Invalid(_))));
    }

    #[test]
    fn test_validate_blank_name() {
        let product = Product::new("p-1", "   ", 1.0);
        assert!(matches!(
            validate_product(&product),
            Err(ProductError::Invalid(_))
        ));
    }

    #[test]
    fn test_validate_non_finite_price() {
        let product = Product::new("p-1", "Coffee", f32::NAN);
        assert!(validate_product(&product).is_err());

        let product = Product::new("p-1", "Coffee", f32::INFINITY);
        assert!(validate_product(&product).is_err());
    }

    #[test]
    fn test_validate_free_product() {
        let product = Product::new("p-1", "Sample", 0.0);
        assert!(validate_product(&product).is_ok());
    }

    #[test]
    fn test_sort_products_by_id() {
        let mut products = vec![
            Product::new("c", "C", 1.0),
            Product::new("a", "A", 1.0),
            Product::new("b", "B", 1.0),
        ];

        sort_products(&mut products);

        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
