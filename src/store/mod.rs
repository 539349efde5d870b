//! Table store abstraction.
//!
//! Everything the service knows about the managed key-value store goes through
//! [`TableStore`]: table metadata (describe/create/delete), single item upserts
//! and the one key-condition query the service issues.

mod convert;
mod dynamo;
mod memory;
mod schema;

use std::sync::Arc;

use async_trait::async_trait;
use log::info;

use crate::conf::{StoreBackend, StoreConfig};
use crate::core::{Movie, ReelError};

pub use dynamo::DynamoStore;
pub use memory::{MemoryStore, StoreCalls};
pub use schema::{ATTR_INFO, ATTR_TITLE, ATTR_YEAR, TableDefinition, TableStatus, TitleQuery};

/// One page of query results in store order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryPage {
    pub items: Vec<Movie>,
    /// The store holds more matches than it returned in this page.
    pub truncated: bool,
}

#[async_trait]
pub trait TableStore: Send + Sync {
    /// `Ok(None)` when the table does not exist. Any other failure is an `Err`.
    async fn describe(&self, table: &str) -> Result<Option<TableStatus>, ReelError>;

    async fn create(&self, definition: &TableDefinition) -> Result<(), ReelError>;

    async fn delete(&self, table: &str) -> Result<(), ReelError>;

    /// Upsert by `(year, title)`; a later put with the same key replaces the item.
    async fn put(&self, table: &str, movie: &Movie) -> Result<(), ReelError>;

    async fn query(&self, table: &str, query: &TitleQuery) -> Result<QueryPage, ReelError>;
}

/// Builds the store handle shared by every component for the life of the process.
pub async fn create_store(config: &StoreConfig) -> Result<Arc<dyn TableStore>, ReelError> {
    match config.backend {
        StoreBackend::Dynamodb => {
            info!(
                "Using DynamoDB store (region: {:?}, endpoint: {:?})",
                config.region, config.endpoint
            );
            Ok(Arc::new(DynamoStore::new(config).await))
        }
        StoreBackend::Memory => {
            info!("Using in-memory store");
            Ok(Arc::new(
                MemoryStore::new().with_activation_polls(config.memory_activation_polls),
            ))
        }
    }
}
