//! Bulk load of the movie blob into the table.

mod report;

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use log::{debug, info, warn};
use tokio::time::Instant;

use crate::blob::BlobSource;
use crate::conf::LoaderConfig;
use crate::core::{Movie, ReelError};
use crate::progress::Progress;
use crate::store::{TableStatus, TableStore};
use crate::table::{TableManager, TableProbe};

pub use report::{FailedWrite, LoadReport};

pub struct BulkLoader {
    tables: Arc<TableManager>,
    store: Arc<dyn TableStore>,
    source: BlobSource,
    progress: Arc<dyn Progress>,
    config: LoaderConfig,
}

impl BulkLoader {
    pub fn new(
        tables: Arc<TableManager>,
        store: Arc<dyn TableStore>,
        source: BlobSource,
        progress: Arc<dyn Progress>,
        config: LoaderConfig,
    ) -> Self {
        Self {
            tables,
            store,
            source,
            progress,
            config,
        }
    }

    /// Fetches the blob, waits for the table to turn ACTIVE, then writes every movie.
    ///
    /// A failed fetch or a table that never turns ACTIVE aborts the load. Failed
    /// individual writes do not: they are collected into the report.
    pub async fn load(&self) -> Result<LoadReport, ReelError> {
        let movies = self.source.fetch_movies().await?;
        let total = movies.len();
        self.progress.start(total);

        if let Err(e) = self.wait_until_active().await {
            self.progress.stop();
            return Err(e);
        }

        info!(
            "Writing {} movies into '{}' ({} in flight)",
            total,
            self.tables.name(),
            self.concurrency()
        );
        let report = self.write_all(movies).await;
        if report.failed.is_empty() {
            info!("Loaded {} movies into '{}'", report.written, self.tables.name());
        } else {
            warn!(
                "Loaded {} of {} movies into '{}', {} writes failed",
                report.written,
                report.total,
                self.tables.name(),
                report.failed.len()
            );
        }
        Ok(report)
    }

    /// Polls the table status every `poll_interval` until ACTIVE or `max_wait` elapses.
    async fn wait_until_active(&self) -> Result<(), ReelError> {
        let started = Instant::now();
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            match self.tables.probe().await {
                TableProbe::Found(TableStatus::Active) => {
                    debug!(
                        "Table '{}' active after {} probes",
                        self.tables.name(),
                        attempts
                    );
                    return Ok(());
                }
                TableProbe::Found(status) => {
                    debug!("Table '{}' is {}, waiting", self.tables.name(), status);
                }
                TableProbe::NotFound => {
                    debug!("Table '{}' not visible yet, waiting", self.tables.name());
                }
                TableProbe::ProbeError(e) => {
                    warn!("Probing table '{}' failed: {}", self.tables.name(), e);
                }
            }

            if started.elapsed() >= self.config.max_wait {
                return Err(ReelError::TimeoutError(format!(
                    "table '{}' not active after {:?} ({} probes)",
                    self.tables.name(),
                    self.config.max_wait,
                    attempts
                )));
            }
            let remaining = self.config.max_wait.saturating_sub(started.elapsed());
            tokio::time::sleep(self.config.poll_interval.min(remaining)).await;
        }
    }

    async fn write_all(&self, movies: Vec<Movie>) -> LoadReport {
        let mut report = LoadReport::new(movies.len());
        if movies.is_empty() {
            self.progress.stop();
            return report;
        }

        let table = self.tables.name();
        let mut writes = stream::iter(movies)
            .map(|movie| {
                let store = Arc::clone(&self.store);
                async move {
                    let result = store.put(table, &movie).await;
                    (movie.key(), result)
                }
            })
            .buffer_unordered(self.concurrency());

        while let Some((key, result)) = writes.next().await {
            match result {
                Ok(()) => report.written += 1,
                Err(e) => {
                    warn!("Writing {} failed: {}", key, e);
                    report.failed.push(FailedWrite::new(key, e.to_string()));
                }
            }
            let completed = report.completed();
            self.progress.update(completed);
            if completed == report.total {
                self.progress.stop();
            }
        }
        report
    }

    fn concurrency(&self) -> usize {
        self.config.concurrency.max(1)
    }
}
