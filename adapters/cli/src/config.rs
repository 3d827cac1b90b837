use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use maze_search_core::{SearchAlgorithm, DEFAULT_SIDE_LENGTH};
use serde::Deserialize;

const SUPPORTED_CONFIG_VERSION: u32 = 1;
const DEFAULT_LOG_FILTER: &str = "warn";

/// Defaults applied when the command line leaves a setting unspecified.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    version: u32,
    #[serde(default = "default_size")]
    pub(crate) default_size: u32,
    #[serde(default)]
    pub(crate) algorithm: SearchAlgorithm,
    #[serde(default = "default_log_filter")]
    pub(crate) log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: SUPPORTED_CONFIG_VERSION,
            default_size: default_size(),
            algorithm: SearchAlgorithm::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Loads the configuration at `path`, or the defaults when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).context("failed to parse configuration toml contents")?;
        if config.version != SUPPORTED_CONFIG_VERSION {
            bail!(
                "unsupported configuration version {}; expected {}",
                config.version,
                SUPPORTED_CONFIG_VERSION
            );
        }
        if config.default_size == 0 {
            bail!("default_size must be at least 1");
        }
        Ok(config)
    }
}

fn default_size() -> u32 {
    DEFAULT_SIDE_LENGTH
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}
