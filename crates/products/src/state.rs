//! Application state with repository-based storage.
//!
//! Handlers never see the whole state. Each one extracts only the access it
//! was granted on the table: [`ReadAccess`] or [`WriteAccess`].

use std::sync::Arc;

use axum::extract::FromRef;

use products_core::storage::{ProductReader, ProductWriter};

use crate::config::Config;

// Storage features: exactly one must be enabled, they are mutually exclusive
#[cfg(all(feature = "inmemory", feature = "dynamodb"))]
compile_error!("Cannot enable both 'inmemory' and 'dynamodb' storage features");

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!("Must enable exactly one storage feature: 'inmemory' or 'dynamodb'");

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    reader: Arc<dyn ProductReader>,
    writer: Arc<dyn ProductWriter>,
    config: Config,
}

/// Read-only access to the products table.
#[derive(Clone)]
pub struct ReadAccess(pub Arc<dyn ProductReader>);

/// Write access to the products table.
#[derive(Clone)]
pub struct WriteAccess(pub Arc<dyn ProductWriter>);

impl FromRef<AppState> for ReadAccess {
    fn from_ref(state: &AppState) -> Self {
        ReadAccess(state.reader.clone())
    }
}

impl FromRef<AppState> for WriteAccess {
    fn from_ref(state: &AppState) -> Self {
        WriteAccess(state.writer.clone())
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl AppState {
    /// Creates an AppState from a reader, a writer and the configuration.
    pub fn build(
        reader: Arc<dyn ProductReader>,
        writer: Arc<dyn ProductWriter>,
        config: Config,
    ) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }
}

// ============================================================================
// Factory functions for the storage backends
// ============================================================================

#[cfg(feature = "inmemory")]
mod inmemory {
    use super::*;
    use crate::storage::inmemory::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            tracing::info!(table = %config.table_name, "Using in-memory storage");
            let repo = Arc::new(InMemoryRepository::new());
            Ok(Self::build(repo.clone(), repo, config.clone()))
        }
    }
}

#[cfg(feature = "dynamodb")]
mod dynamodb {
    use super::*;
    use crate::storage::dynamodb::DynamoDbRepository;

    impl AppState {
        /// Creates AppState with DynamoDB storage.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repo = Arc::new(DynamoDbRepository::from_config(config).await);
            Ok(Self::build(repo.clone(), repo, config.clone()))
        }
    }
}
