use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ReelError {
    #[error("Cannot parse config: {0}")]
    ConfigParsingError(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Store error: {0}")]
    StoreError(String),
    #[error("Blob error: {0}")]
    BlobError(String),
    #[error("Timed out: {0}")]
    TimeoutError(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<std::io::Error> for ReelError {
    fn from(err: std::io::Error) -> Self {
        ReelError::IoError(err.to_string())
    }
}

impl From<object_store::Error> for ReelError {
    fn from(err: object_store::Error) -> Self {
        ReelError::BlobError(err.to_string())
    }
}
