use crate::{
    conf::{LoaderConfig, ServerConfig, SourceConfig, StoreConfig},
    core::ReelError::{self, ConfigParsingError},
};
use config::{Config as CConfig, ConfigBuilder, builder::DefaultState};
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "REEL";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub loader: LoaderConfig,
}

impl Config {
    pub fn from_str(toml_str: &str) -> Result<Config, ReelError> {
        let builder = CConfig::builder()
            .add_source(config::File::from_str(toml_str, config::FileFormat::Toml));
        Self::build(builder)
    }

    /// Loads the optional TOML file, then applies `REEL_SECTION__FIELD` environment overrides.
    pub fn load(path: Option<&str>) -> Result<Config, ReelError> {
        let mut builder = CConfig::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::new(path, config::FileFormat::Toml));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );
        Self::build(builder)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Config, ReelError> {
        let config = builder
            .build()
            .map_err(|e| ConfigParsingError(e.to_string()))?
            .try_deserialize::<Config>()
            .map_err(|e| ConfigParsingError(e.to_string()))?;
        Ok(config)
    }
}
