mod config;
mod loader;
mod server;
mod source;
mod store;

pub use config::Config;
pub use loader::{LoaderConfig, PopulateMode, ProgressKind};
pub use server::ServerConfig;
pub use source::{LocalSourceConfig, S3SourceConfig, SourceConfig};
pub use store::{BillingMode, DEFAULT_TABLE_NAME, StoreBackend, StoreConfig};
