//! Movies table layout.
//!
//! ```text
//! Table: Movies (configurable)
//!
//! Primary Key:
//!   - year  (Number, Partition Key)
//!   - title (String, Sort Key)
//!
//! Attributes:
//!   - info: Map - opaque movie details, stored as given
//! ```

use std::fmt;

use crate::conf::BillingMode;

/// Partition key attribute. Reserved word in DynamoDB expressions, always aliased.
pub const ATTR_YEAR: &str = "year";

/// Sort key attribute.
pub const ATTR_TITLE: &str = "title";

pub const ATTR_INFO: &str = "info";

/// Lifecycle state reported by the store for an existing table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableStatus {
    Creating,
    Active,
    Updating,
    Deleting,
    Other(String),
}

impl TableStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, TableStatus::Active)
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableStatus::Creating => f.write_str("CREATING"),
            TableStatus::Active => f.write_str("ACTIVE"),
            TableStatus::Updating => f.write_str("UPDATING"),
            TableStatus::Deleting => f.write_str("DELETING"),
            TableStatus::Other(status) => f.write_str(status),
        }
    }
}

/// Everything needed to issue a create: the key schema itself is fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDefinition {
    pub name: String,
    pub billing: BillingMode,
}

/// `year = :year AND begins_with(title, :prefix)`
#[derive(Debug, Clone, PartialEq)]
pub struct TitleQuery {
    pub year: i64,
    pub title_prefix: String,
}

impl TitleQuery {
    pub fn new(year: i64, title_prefix: impl Into<String>) -> Self {
        Self {
            year,
            title_prefix: title_prefix.into(),
        }
    }

    pub fn matches(&self, year: i64, title: &str) -> bool {
        self.year == year && title.starts_with(&self.title_prefix)
    }
}
