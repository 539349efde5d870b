//! Range queries over the composite key: exact `year`, `title` prefix.

use std::sync::Arc;

use log::{debug, warn};

use crate::core::{Movie, ReelError};
use crate::store::{TableStore, TitleQuery};
use crate::table::{TableManager, TableProbe};

pub struct QueryService {
    tables: Arc<TableManager>,
    store: Arc<dyn TableStore>,
}

impl QueryService {
    pub fn new(tables: Arc<TableManager>, store: Arc<dyn TableStore>) -> Self {
        Self { tables, store }
    }

    /// Movies of `year` whose title starts with `title_prefix`, in store order.
    ///
    /// This is the only place that checks for the table before querying: a missing
    /// table, or one that is not ACTIVE yet, has no movies. Only the first result
    /// page is returned.
    pub async fn query(&self, year: i64, title_prefix: &str) -> Result<Vec<Movie>, ReelError> {
        match self.tables.probe().await {
            TableProbe::Found(status) if status.is_active() => {}
            TableProbe::Found(status) => {
                debug!(
                    "Table '{}' is {}, no movies to return",
                    self.tables.name(),
                    status
                );
                return Ok(Vec::new());
            }
            TableProbe::NotFound => {
                debug!("Table '{}' does not exist", self.tables.name());
                return Ok(Vec::new());
            }
            TableProbe::ProbeError(e) => {
                return Err(ReelError::StoreError(format!(
                    "cannot tell whether table '{}' exists: {}",
                    self.tables.name(),
                    e
                )));
            }
        }

        let query = TitleQuery::new(year, title_prefix);
        let page = self.store.query(self.tables.name(), &query).await?;
        if page.truncated {
            warn!(
                "Query year={} prefix={:?} returned {} movies, more matches were not fetched",
                year,
                title_prefix,
                page.items.len()
            );
        }
        Ok(page.items)
    }
}
