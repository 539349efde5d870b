use std::sync::Arc;

use object_store::ObjectStore;
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;

use crate::conf::{LocalSourceConfig, S3SourceConfig};
use crate::core::ReelError;

/// Creates a LocalFileSystem ObjectStore rooted at the configured directory.
pub fn create_local_store(config: &LocalSourceConfig) -> Result<Arc<dyn ObjectStore>, ReelError> {
    let store = LocalFileSystem::new_with_prefix(&config.path).map_err(|e| {
        ReelError::BlobError(format!(
            "Failed to open local source directory '{}': {}",
            config.path, e
        ))
    })?;
    Ok(Arc::new(store))
}

/// Creates an S3 ObjectStore from S3SourceConfig.
pub fn create_s3_store(config: &S3SourceConfig) -> Result<Arc<dyn ObjectStore>, ReelError> {
    let mut builder = AmazonS3Builder::from_env()
        .with_bucket_name(&config.bucket)
        .with_region(&config.region);

    // MinIO, LocalStack and friends
    if let Some(endpoint) = &config.endpoint {
        builder = builder.with_endpoint(endpoint);
        if endpoint.starts_with("http://") {
            builder = builder.with_allow_http(true);
        }
    }

    let store = builder.build().map_err(|e| {
        ReelError::BlobError(format!(
            "Failed to create S3 store for bucket '{}': {}",
            config.bucket, e
        ))
    })?;

    Ok(Arc::new(store))
}
