//! DynamoDB storage backend implementation.
//!
//! Items are keyed by the product id under the `PK` attribute; `name` is
//! stored as a string and `price` as a number.

mod conversions;
mod error;
mod repository;

pub use repository::DynamoDbRepository;
