use serde::Serialize;

use crate::core::MovieKey;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedWrite {
    pub year: i64,
    pub title: String,
    pub error: String,
}

impl FailedWrite {
    pub fn new(key: MovieKey, error: String) -> Self {
        Self {
            year: key.year,
            title: key.title,
            error,
        }
    }
}

/// Aggregate outcome of one bulk load. `written + failed.len() == total` once it settles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadReport {
    pub total: usize,
    pub written: usize,
    pub failed: Vec<FailedWrite>,
}

impl LoadReport {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            written: 0,
            failed: Vec::new(),
        }
    }

    pub fn completed(&self) -> usize {
        self.written + self.failed.len()
    }

    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty() && self.written == self.total
    }
}
