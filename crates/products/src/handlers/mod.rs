pub mod error;
pub mod products;
