use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct S3SourceConfig {
    pub bucket: String,
    pub key: String,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default = "S3SourceConfig::default_region")]
    pub region: String,
}

impl S3SourceConfig {
    pub fn default_region() -> String {
        String::from("eu-west-1")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LocalSourceConfig {
    pub path: String,
    pub key: String,
}

/// Where the movie blob is fetched from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub enum SourceConfig {
    #[serde(rename = "s3")]
    S3(S3SourceConfig),
    #[serde(rename = "local")]
    Local(LocalSourceConfig),
}

impl SourceConfig {
    pub fn key(&self) -> &str {
        match self {
            SourceConfig::S3(s3) => &s3.key,
            SourceConfig::Local(local) => &local.key,
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::S3(S3SourceConfig {
            bucket: String::from("csu44000assignment2"),
            key: String::from("moviedata.json"),
            endpoint: None,
            region: S3SourceConfig::default_region(),
        })
    }
}
