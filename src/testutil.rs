//! Test utilities.
//!
//! This module is only available when the `testutil` feature is enabled.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use object_store::{ObjectStore, PutPayload};
use object_store::memory::InMemory;
use object_store::path::Path;
use serde_json::json;

use crate::blob::BlobSource;
use crate::conf::{Config, LoaderConfig, PopulateMode, ProgressKind, StoreBackend, StoreConfig};
use crate::core::Movie;
use crate::progress::Progress;
use crate::service::ReelService;
use crate::store::MemoryStore;

pub const BLOB_KEY: &str = "moviedata.json";

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Start(usize),
    Update(usize),
    Stop,
}

/// Progress sink that remembers every call in order.
#[derive(Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl Progress for RecordingProgress {
    fn start(&self, total: usize) {
        self.push(ProgressEvent::Start(total));
    }

    fn update(&self, completed: usize) {
        self.push(ProgressEvent::Update(completed));
    }

    fn stop(&self) {
        self.push(ProgressEvent::Stop);
    }
}

/// Three movies, two of them in the same year.
pub fn sample_movies() -> Vec<Movie> {
    vec![
        Movie::new(
            2000,
            "Gladiator",
            json!({
                "directors": ["Ridley Scott"],
                "rating": 8.5,
                "genres": ["Action", "Drama"]
            }),
        ),
        Movie::new(
            2000,
            "Gone in 60 Seconds",
            json!({
                "directors": ["Dominic Sena"],
                "rating": 6.5,
                "running_time_secs": 7080
            }),
        ),
        Movie::new(
            2001,
            "Training Day",
            json!({
                "directors": ["Antoine Fuqua"],
                "rating": 7.7,
                "actors": ["Denzel Washington", "Ethan Hawke"]
            }),
        ),
    ]
}

pub async fn blob_with_body(body: &str) -> BlobSource {
    let store = Arc::new(InMemory::new());
    store
        .put(&Path::from(BLOB_KEY), PutPayload::from(body.to_string()))
        .await
        .unwrap();
    BlobSource::new(store, BLOB_KEY)
}

pub async fn blob_with(movies: &[Movie]) -> BlobSource {
    blob_with_body(&serde_json::to_string(movies).unwrap()).await
}

/// Config for an in-memory store with fast polling and no console output.
pub fn test_config(mode: PopulateMode) -> Config {
    Config {
        store: StoreConfig {
            backend: StoreBackend::Memory,
            ..StoreConfig::default()
        },
        loader: LoaderConfig {
            mode,
            poll_interval: Duration::from_millis(5),
            max_wait: Duration::from_secs(5),
            concurrency: 4,
            progress: ProgressKind::None,
        },
        ..Config::default()
    }
}

/// A service over `store` that loads `movies` from an in-memory blob.
pub async fn memory_service(
    store: Arc<MemoryStore>,
    movies: &[Movie],
    mode: PopulateMode,
) -> ReelService {
    ReelService::with_parts(
        &test_config(mode),
        store,
        blob_with(movies).await,
        Arc::new(RecordingProgress::default()),
    )
}
