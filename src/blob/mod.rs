mod store;

use std::sync::Arc;

use log::info;
use object_store::ObjectStore;
use object_store::path::Path;

use crate::conf::SourceConfig;
use crate::core::{Movie, ReelError};

pub use store::{create_local_store, create_s3_store};

/// The externally owned JSON array of movies. Fetched fresh on every load.
#[derive(Debug, Clone)]
pub struct BlobSource {
    store: Arc<dyn ObjectStore>,
    path: Path,
}

impl BlobSource {
    pub fn new(store: Arc<dyn ObjectStore>, key: &str) -> Self {
        Self {
            store,
            path: Path::from(key),
        }
    }

    pub fn from_config(config: &SourceConfig) -> Result<Self, ReelError> {
        let store = match config {
            SourceConfig::S3(s3) => create_s3_store(s3)?,
            SourceConfig::Local(local) => create_local_store(local)?,
        };
        Ok(Self::new(store, config.key()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn fetch_movies(&self) -> Result<Vec<Movie>, ReelError> {
        let bytes = self
            .store
            .get(&self.path)
            .await
            .map_err(|e| ReelError::BlobError(format!("fetching '{}': {}", self.path, e)))?
            .bytes()
            .await
            .map_err(|e| ReelError::BlobError(format!("reading '{}': {}", self.path, e)))?;

        let movies: Vec<Movie> = serde_json::from_slice(&bytes)
            .map_err(|e| ReelError::BlobError(format!("parsing '{}': {}", self.path, e)))?;
        info!(
            "Fetched {} movies ({} bytes) from '{}'",
            movies.len(),
            bytes.len(),
            self.path
        );
        Ok(movies)
    }
}
