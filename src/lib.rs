pub mod api;
pub mod blob;
pub mod conf;
pub mod core;
pub mod loader;
pub mod progress;
pub mod query;
pub mod service;
pub mod store;
pub mod table;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;
