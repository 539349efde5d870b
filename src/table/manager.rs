use std::sync::Arc;

use log::{info, warn};

use crate::conf::StoreConfig;
use crate::core::ReelError;
use crate::store::{TableDefinition, TableStatus, TableStore};

use super::outcome::{CreateOutcome, DropOutcome, TableProbe};

/// Owns the movies table lifecycle: ABSENT -> CREATING -> ACTIVE -> DELETING -> ABSENT.
pub struct TableManager {
    store: Arc<dyn TableStore>,
    definition: TableDefinition,
}

impl TableManager {
    pub fn new(store: Arc<dyn TableStore>, definition: TableDefinition) -> Self {
        Self { store, definition }
    }

    pub fn from_config(store: Arc<dyn TableStore>, config: &StoreConfig) -> Self {
        Self::new(
            store,
            TableDefinition {
                name: config.table.clone(),
                billing: config.billing.clone(),
            },
        )
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn definition(&self) -> &TableDefinition {
        &self.definition
    }

    pub async fn probe(&self) -> TableProbe {
        match self.store.describe(&self.definition.name).await {
            Ok(Some(status)) => TableProbe::Found(status),
            Ok(None) => TableProbe::NotFound,
            Err(e) => TableProbe::ProbeError(e.to_string()),
        }
    }

    /// Folds a failed probe into "does not exist". Use [`TableManager::probe`] to tell them apart.
    pub async fn exists(&self) -> bool {
        matches!(self.probe().await, TableProbe::Found(_))
    }

    pub async fn is_active(&self) -> bool {
        matches!(self.probe().await, TableProbe::Found(TableStatus::Active))
    }

    /// Creates the table unless it already exists. Store failures are reported, not retried.
    pub async fn create(&self) -> Result<CreateOutcome, ReelError> {
        match self.probe().await {
            TableProbe::Found(status) => {
                info!(
                    "Table '{}' already exists ({})",
                    self.definition.name, status
                );
                return Ok(CreateOutcome::AlreadyExisted);
            }
            TableProbe::ProbeError(e) => {
                return Err(ReelError::StoreError(format!(
                    "cannot tell whether table '{}' exists: {}",
                    self.definition.name, e
                )));
            }
            TableProbe::NotFound => {}
        }

        match self.store.create(&self.definition).await {
            Ok(()) => {
                info!(
                    "Table '{}' created ({:?})",
                    self.definition.name, self.definition.billing
                );
                Ok(CreateOutcome::Created)
            }
            Err(e) => {
                warn!("Creating table '{}' failed: {}", self.definition.name, e);
                Ok(CreateOutcome::Failed {
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Deletes the table if it exists. Store failures are reported, not retried.
    pub async fn drop_table(&self) -> Result<DropOutcome, ReelError> {
        match self.probe().await {
            TableProbe::NotFound => {
                info!("Table '{}' already absent", self.definition.name);
                return Ok(DropOutcome::AlreadyAbsent);
            }
            TableProbe::ProbeError(e) => {
                return Err(ReelError::StoreError(format!(
                    "cannot tell whether table '{}' exists: {}",
                    self.definition.name, e
                )));
            }
            TableProbe::Found(_) => {}
        }

        match self.store.delete(&self.definition.name).await {
            Ok(()) => {
                info!("Table '{}' deleted", self.definition.name);
                Ok(DropOutcome::Deleted)
            }
            Err(e) => {
                warn!("Deleting table '{}' failed: {}", self.definition.name, e);
                Ok(DropOutcome::Failed {
                    reason: e.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conf::BillingMode;
    use crate::store::MemoryStore;

    fn manager(store: &Arc<MemoryStore>) -> TableManager {
        TableManager::new(
            store.clone(),
            TableDefinition {
                name: String::from("Movies"),
                billing: BillingMode::PayPerRequest,
            },
        )
    }

    #[tokio::test]
    async fn test_create_is_idempotent() {
        let store = Arc::new(MemoryStore::new());
        let tables = manager(&store);

        assert_eq!(tables.create().await.unwrap(), CreateOutcome::Created);
        assert_eq!(tables.create().await.unwrap(), CreateOutcome::AlreadyExisted);

        assert_eq!(store.calls().creates, 1);
        assert!(tables.is_active().await);
        assert_eq!(
            store.definition("Movies").await,
            Some(tables.definition().clone())
        );
    }

    #[tokio::test]
    async fn test_drop_absent_table_mutates_nothing() {
        let store = Arc::new(MemoryStore::new());
        let tables = manager(&store);

        assert_eq!(tables.drop_table().await.unwrap(), DropOutcome::AlreadyAbsent);
        assert_eq!(store.calls().mutations(), 0);
    }

    #[tokio::test]
    async fn test_create_then_drop() {
        let store = Arc::new(MemoryStore::new());
        let tables = manager(&store);

        tables.create().await.unwrap();
        assert!(tables.exists().await);
        assert_eq!(tables.drop_table().await.unwrap(), DropOutcome::Deleted);
        assert!(!tables.exists().await);
        assert_eq!(tables.probe().await, TableProbe::NotFound);
    }

    #[tokio::test]
    async fn test_creating_table_exists_but_is_not_active() {
        let store = Arc::new(MemoryStore::new().with_activation_polls(3));
        let tables = manager(&store);

        tables.create().await.unwrap();
        assert!(tables.exists().await);
        assert!(!tables.is_active().await);
    }

    #[tokio::test]
    async fn test_probe_error_is_distinct_from_absence() {
        let store = Arc::new(MemoryStore::new());
        let tables = manager(&store);
        store.set_describe_failing(true);

        assert!(matches!(tables.probe().await, TableProbe::ProbeError(_)));
        assert!(!tables.exists().await);
        assert!(matches!(
            tables.create().await,
            Err(ReelError::StoreError(_))
        ));
        assert!(matches!(tables.drop_table().await, Err(ReelError::StoreError(_))));
        assert_eq!(store.calls().mutations(), 0);
    }

    #[tokio::test]
    async fn test_store_failures_are_reported() {
        let store = Arc::new(MemoryStore::new());
        let tables = manager(&store);

        store.set_create_failing(true);
        assert!(matches!(
            tables.create().await.unwrap(),
            CreateOutcome::Failed { .. }
        ));
        assert_eq!(store.calls().creates, 1);

        store.set_create_failing(false);
        tables.create().await.unwrap();
        store.set_delete_failing(true);
        assert!(matches!(
            tables.drop_table().await.unwrap(),
            DropOutcome::Failed { .. }
        ));
        assert!(tables.exists().await);
    }
}
