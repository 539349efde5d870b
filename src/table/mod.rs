mod manager;
mod outcome;

pub use manager::TableManager;
pub use outcome::{CreateOutcome, DropOutcome, TableProbe};
