use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use merkleroot::TreeConfig;
use serde::Deserialize;

pub const DEFAULT_STEPS_FILE: &str = "merkle_steps.txt";

/// Contents of the optional `--config` TOML file.
#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub tree: TreeConfig,
    pub output: OutputConfig,
}

#[derive(Deserialize, Debug, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct OutputConfig {
    /// Where the step-by-step document goes.
    pub steps_file: PathBuf,
    pub write_steps: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            steps_file: PathBuf::from(DEFAULT_STEPS_FILE),
            write_steps: true,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
