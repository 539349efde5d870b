use std::sync::Arc;

use log::{error, info};
use serde::Serialize;

use crate::blob::BlobSource;
use crate::conf::{Config, PopulateMode};
use crate::core::{Movie, ReelError};
use crate::loader::{BulkLoader, LoadReport};
use crate::progress::{Progress, create_progress};
use crate::query::QueryService;
use crate::store::{TableStore, create_store};
use crate::table::{CreateOutcome, DropOutcome, TableManager};

/// What `/createDB` reports back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateResponse {
    pub created: bool,
    #[serde(flatten)]
    pub outcome: CreateOutcome,
    /// Only present when the load ran inside the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load: Option<LoadReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropResponse {
    pub deleted: bool,
    #[serde(flatten)]
    pub outcome: DropOutcome,
}

pub struct ReelService {
    tables: Arc<TableManager>,
    loader: Arc<BulkLoader>,
    queries: QueryService,
    mode: PopulateMode,
}

impl ReelService {
    pub async fn new(config: &Config) -> Result<Self, ReelError> {
        let store = create_store(&config.store).await?;
        let source = BlobSource::from_config(&config.source)?;
        let progress = create_progress(config.loader.progress);
        Ok(Self::with_parts(config, store, source, progress))
    }

    /// Wires the components around one shared store handle.
    pub fn with_parts(
        config: &Config,
        store: Arc<dyn TableStore>,
        source: BlobSource,
        progress: Arc<dyn Progress>,
    ) -> Self {
        let tables = Arc::new(TableManager::from_config(store.clone(), &config.store));
        let loader = Arc::new(BulkLoader::new(
            tables.clone(),
            store.clone(),
            source,
            progress,
            config.loader.clone(),
        ));
        let queries = QueryService::new(tables.clone(), store);
        Self {
            tables,
            loader,
            queries,
            mode: config.loader.mode,
        }
    }

    pub fn tables(&self) -> &TableManager {
        &self.tables
    }

    /// Creates the table and, if this call created it, populates it from the blob.
    pub async fn create(&self) -> Result<CreateResponse, ReelError> {
        let outcome = self.tables.create().await?;
        let mut load = None;

        if outcome.is_created() {
            match self.mode {
                PopulateMode::Await => {
                    load = Some(self.loader.load().await?);
                }
                PopulateMode::Background => {
                    let loader = Arc::clone(&self.loader);
                    tokio::spawn(async move {
                        match loader.load().await {
                            Ok(report) => info!(
                                "Background load finished: {} written, {} failed",
                                report.written,
                                report.failed.len()
                            ),
                            Err(e) => error!("Background load aborted: {}", e),
                        }
                    });
                }
            }
        }

        Ok(CreateResponse {
            created: outcome.is_created(),
            outcome,
            load,
        })
    }

    pub async fn drop_table(&self) -> Result<DropResponse, ReelError> {
        let outcome = self.tables.drop_table().await?;
        Ok(DropResponse {
            deleted: outcome.is_deleted(),
            outcome,
        })
    }

    pub async fn query(&self, year: i64, title_prefix: &str) -> Result<Vec<Movie>, ReelError> {
        self.queries.query(year, title_prefix).await
    }
}
