use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Whether `/createDB` waits for the bulk load to finish.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum PopulateMode {
    Await,
    Background,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ProgressKind {
    Bar,
    Log,
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LoaderConfig {
    #[serde(default = "LoaderConfig::default_mode")]
    pub mode: PopulateMode,
    #[serde(
        with = "humantime_serde",
        default = "LoaderConfig::default_poll_interval"
    )]
    pub poll_interval: Duration,
    #[serde(with = "humantime_serde", default = "LoaderConfig::default_max_wait")]
    pub max_wait: Duration,
    #[serde(default = "LoaderConfig::default_concurrency")]
    pub concurrency: usize,
    #[serde(default = "LoaderConfig::default_progress")]
    pub progress: ProgressKind,
}

impl LoaderConfig {
    fn default_mode() -> PopulateMode {
        PopulateMode::Background
    }

    fn default_poll_interval() -> Duration {
        Duration::from_secs(2)
    }

    fn default_max_wait() -> Duration {
        Duration::from_secs(5 * 60)
    }

    fn default_concurrency() -> usize {
        16
    }

    fn default_progress() -> ProgressKind {
        ProgressKind::Bar
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            mode: Self::default_mode(),
            poll_interval: Self::default_poll_interval(),
            max_wait: Self::default_max_wait(),
            concurrency: Self::default_concurrency(),
            progress: Self::default_progress(),
        }
    }
}
