mod args;
mod error;
mod logger;
mod movie;

pub use args::CliArgs;
pub use error::ReelError;
pub use logger::setup_logging;
pub use movie::{Movie, MovieKey};
