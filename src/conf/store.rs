use serde::{Deserialize, Serialize};

pub const DEFAULT_TABLE_NAME: &str = "Movies";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Dynamodb,
    Memory,
}

/// Capacity mode the table is created with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BillingMode {
    PayPerRequest,
    Provisioned {
        read_capacity: i64,
        write_capacity: i64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    #[serde(default = "StoreConfig::default_backend")]
    pub backend: StoreBackend,
    #[serde(default = "StoreConfig::default_table")]
    pub table: String,
    #[serde(default = "StoreConfig::default_region")]
    pub region: Option<String>,
    /// Endpoint override, e.g. LocalStack or DynamoDB Local.
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default = "StoreConfig::default_billing")]
    pub billing: BillingMode,
    /// Memory backend only: describes that report CREATING after a create.
    #[serde(default)]
    pub memory_activation_polls: u32,
}

impl StoreConfig {
    fn default_backend() -> StoreBackend {
        StoreBackend::Dynamodb
    }

    fn default_table() -> String {
        String::from(DEFAULT_TABLE_NAME)
    }

    fn default_region() -> Option<String> {
        Some(String::from("eu-west-1"))
    }

    fn default_billing() -> BillingMode {
        BillingMode::PayPerRequest
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: Self::default_backend(),
            table: Self::default_table(),
            region: Self::default_region(),
            endpoint: None,
            billing: Self::default_billing(),
            memory_activation_polls: 0,
        }
    }
}
