mod error;
mod operations;
mod types;

pub use error::ProductError;
pub use operations::{parse_put_request, sort_products, validate_product};
pub use types::{Product, ProductList};
