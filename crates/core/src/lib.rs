//! Functional core for the products service.
//!
//! Everything in this crate is pure: data types, validation, and the
//! declarative description of the stack the service runs on. I/O lives in
//! the `products` binary and in `xtask`.

pub mod product;
pub mod stack;
pub mod storage;
