use serde::Serialize;

use crate::store::TableStatus;

/// Result of probing the store for the table. Absence and a failed probe stay distinct.
#[derive(Debug, Clone, PartialEq)]
pub enum TableProbe {
    NotFound,
    Found(TableStatus),
    ProbeError(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CreateOutcome {
    Created,
    AlreadyExisted,
    Failed { reason: String },
}

impl CreateOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, CreateOutcome::Created)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DropOutcome {
    Deleted,
    AlreadyAbsent,
    Failed { reason: String },
}

impl DropOutcome {
    pub fn is_deleted(&self) -> bool {
        matches!(self, DropOutcome::Deleted)
    }
}
