//! In-process [`TableStore`] with the same observable contract as the managed store:
//! tables pass through CREATING before ACTIVE, items are only readable and writable
//! on an ACTIVE table, and query results come back in sort-key order.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::core::{Movie, MovieKey, ReelError};

use super::schema::{TableDefinition, TableStatus, TitleQuery};
use super::{QueryPage, TableStore};

/// Number of calls the store received, per operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCalls {
    pub describes: usize,
    pub creates: usize,
    pub deletes: usize,
    pub puts: usize,
    pub queries: usize,
}

impl StoreCalls {
    pub fn total(&self) -> usize {
        self.describes + self.creates + self.deletes + self.puts + self.queries
    }

    pub fn mutations(&self) -> usize {
        self.creates + self.deletes + self.puts
    }
}

#[derive(Default)]
struct Counters {
    describes: AtomicUsize,
    creates: AtomicUsize,
    deletes: AtomicUsize,
    puts: AtomicUsize,
    queries: AtomicUsize,
}

struct MemoryTable {
    definition: TableDefinition,
    status: TableStatus,
    pending_polls: u32,
    items: BTreeMap<MovieKey, Movie>,
}

impl MemoryTable {
    fn observe(&mut self) -> TableStatus {
        if self.status == TableStatus::Creating {
            if self.pending_polls == 0 {
                self.status = TableStatus::Active;
            } else {
                self.pending_polls -= 1;
            }
        }
        self.status.clone()
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, MemoryTable>>,
    activation_polls: u32,
    page_limit: Option<usize>,
    failing_titles: HashSet<String>,
    fail_describe: AtomicBool,
    fail_create: AtomicBool,
    fail_delete: AtomicBool,
    counters: Counters,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of describes a new table answers with CREATING before it turns ACTIVE.
    pub fn with_activation_polls(mut self, polls: u32) -> Self {
        self.activation_polls = polls;
        self
    }

    /// Maximum items per query page; matches beyond it are dropped and flagged as truncated.
    pub fn with_page_limit(mut self, limit: usize) -> Self {
        self.page_limit = Some(limit);
        self
    }

    /// Every put of a movie with this title fails.
    pub fn with_failing_title(mut self, title: impl Into<String>) -> Self {
        self.failing_titles.insert(title.into());
        self
    }

    pub fn set_describe_failing(&self, failing: bool) {
        self.fail_describe.store(failing, Ordering::SeqCst);
    }

    pub fn set_create_failing(&self, failing: bool) {
        self.fail_create.store(failing, Ordering::SeqCst);
    }

    pub fn set_delete_failing(&self, failing: bool) {
        self.fail_delete.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> StoreCalls {
        StoreCalls {
            describes: self.counters.describes.load(Ordering::SeqCst),
            creates: self.counters.creates.load(Ordering::SeqCst),
            deletes: self.counters.deletes.load(Ordering::SeqCst),
            puts: self.counters.puts.load(Ordering::SeqCst),
            queries: self.counters.queries.load(Ordering::SeqCst),
        }
    }

    /// All items of a table in key order, regardless of its status.
    pub async fn items(&self, table: &str) -> Vec<Movie> {
        let tables = self.tables.lock().await;
        tables
            .get(table)
            .map(|t| t.items.values().cloned().collect())
            .unwrap_or_default()
    }

    pub async fn definition(&self, table: &str) -> Option<TableDefinition> {
        let tables = self.tables.lock().await;
        tables.get(table).map(|t| t.definition.clone())
    }

    fn not_active(table: &str, status: Option<&TableStatus>) -> ReelError {
        match status {
            Some(status) => ReelError::StoreError(format!(
                "ResourceNotFoundException: table '{table}' is {status}"
            )),
            None => ReelError::StoreError(format!(
                "ResourceNotFoundException: table '{table}' not found"
            )),
        }
    }
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn describe(&self, table: &str) -> Result<Option<TableStatus>, ReelError> {
        self.counters.describes.fetch_add(1, Ordering::SeqCst);
        if self.fail_describe.load(Ordering::SeqCst) {
            return Err(ReelError::StoreError(format!(
                "AccessDeniedException: not authorized to describe '{table}'"
            )));
        }
        let mut tables = self.tables.lock().await;
        Ok(tables.get_mut(table).map(MemoryTable::observe))
    }

    async fn create(&self, definition: &TableDefinition) -> Result<(), ReelError> {
        self.counters.creates.fetch_add(1, Ordering::SeqCst);
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(ReelError::StoreError(format!(
                "LimitExceededException: cannot create '{}'",
                definition.name
            )));
        }
        let mut tables = self.tables.lock().await;
        if tables.contains_key(&definition.name) {
            return Err(ReelError::StoreError(format!(
                "ResourceInUseException: table '{}' already exists",
                definition.name
            )));
        }
        let status = if self.activation_polls == 0 {
            TableStatus::Active
        } else {
            TableStatus::Creating
        };
        tables.insert(
            definition.name.clone(),
            MemoryTable {
                definition: definition.clone(),
                status,
                pending_polls: self.activation_polls,
                items: BTreeMap::new(),
            },
        );
        Ok(())
    }

    async fn delete(&self, table: &str) -> Result<(), ReelError> {
        self.counters.deletes.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(ReelError::StoreError(format!(
                "ResourceInUseException: table '{table}' is busy"
            )));
        }
        let mut tables = self.tables.lock().await;
        tables
            .remove(table)
            .map(|_| ())
            .ok_or_else(|| Self::not_active(table, None))
    }

    async fn put(&self, table: &str, movie: &Movie) -> Result<(), ReelError> {
        self.counters.puts.fetch_add(1, Ordering::SeqCst);
        if self.failing_titles.contains(&movie.title) {
            return Err(ReelError::StoreError(format!(
                "ProvisionedThroughputExceededException: put {} rejected",
                movie.key()
            )));
        }
        let mut tables = self.tables.lock().await;
        match tables.get_mut(table) {
            Some(t) if t.status.is_active() => {
                t.items.insert(movie.key(), movie.clone());
                Ok(())
            }
            Some(t) => Err(Self::not_active(table, Some(&t.status))),
            None => Err(Self::not_active(table, None)),
        }
    }

    async fn query(&self, table: &str, query: &TitleQuery) -> Result<QueryPage, ReelError> {
        self.counters.queries.fetch_add(1, Ordering::SeqCst);
        let tables = self.tables.lock().await;
        let t = match tables.get(table) {
            Some(t) if t.status.is_active() => t,
            Some(t) => return Err(Self::not_active(table, Some(&t.status))),
            None => return Err(Self::not_active(table, None)),
        };

        let mut items: Vec<Movie> = t
            .items
            .values()
            .filter(|m| query.matches(m.year, &m.title))
            .cloned()
            .collect();
        let truncated = match self.page_limit {
            Some(limit) if items.len() > limit => {
                items.truncate(limit);
                true
            }
            _ => false,
        };
        Ok(QueryPage { items, truncated })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conf::BillingMode;
    use serde_json::json;

    fn definition() -> TableDefinition {
        TableDefinition {
            name: String::from("Movies"),
            billing: BillingMode::PayPerRequest,
        }
    }

    #[tokio::test]
    async fn test_table_activates_after_polls() {
        let store = MemoryStore::new().with_activation_polls(2);
        assert_eq!(store.describe("Movies").await.unwrap(), None);

        store.create(&definition()).await.unwrap();
        assert_eq!(
            store.describe("Movies").await.unwrap(),
            Some(TableStatus::Creating)
        );
        assert_eq!(
            store.describe("Movies").await.unwrap(),
            Some(TableStatus::Creating)
        );
        assert_eq!(
            store.describe("Movies").await.unwrap(),
            Some(TableStatus::Active)
        );
    }

    #[tokio::test]
    async fn test_put_rejected_while_creating() {
        let store = MemoryStore::new().with_activation_polls(1);
        store.create(&definition()).await.unwrap();
        let movie = Movie::new(2000, "Gladiator", json!({}));
        assert!(store.put("Movies", &movie).await.is_err());

        store.describe("Movies").await.unwrap();
        store.describe("Movies").await.unwrap();
        store.put("Movies", &movie).await.unwrap();
        assert_eq!(store.items("Movies").await, vec![movie]);
    }

    #[tokio::test]
    async fn test_query_order_and_truncation() {
        let store = MemoryStore::new().with_page_limit(2);
        store.create(&definition()).await.unwrap();
        for title in ["Go", "Gone in 60 Seconds", "Gladiator", "Godzilla"] {
            store
                .put("Movies", &Movie::new(2000, title, json!(null)))
                .await
                .unwrap();
        }

        let page = store
            .query("Movies", &TitleQuery::new(2000, "Go"))
            .await
            .unwrap();
        let titles: Vec<&str> = page.items.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Go", "Godzilla"]);
        assert!(page.truncated);
    }

    #[tokio::test]
    async fn test_calls_are_counted() {
        let store = MemoryStore::new();
        store.create(&definition()).await.unwrap();
        store.describe("Movies").await.unwrap();
        store.delete("Movies").await.unwrap();
        assert!(store.delete("Movies").await.is_err());

        let calls = store.calls();
        assert_eq!(calls.creates, 1);
        assert_eq!(calls.describes, 1);
        assert_eq!(calls.deletes, 2);
        assert_eq!(calls.mutations(), 3);
        assert_eq!(calls.total(), 4);
    }
}
