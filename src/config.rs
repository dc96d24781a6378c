//! Classifier configuration file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::batch::{BatchOptions, LineTerminator, MalformedRowPolicy};
use crate::pip::CrossingMode;

/// Catalog looked up in the working directory when none is configured
pub const DEFAULT_CATALOG: &str = "longhurst.xml";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    pub catalog: PathBuf,
    pub mode: CrossingMode,
    pub on_malformed_row: MalformedRowPolicy,
    pub parallel: bool,
    pub line_terminator: LineTerminator,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            catalog: PathBuf::from(DEFAULT_CATALOG),
            mode: CrossingMode::default(),
            on_malformed_row: MalformedRowPolicy::default(),
            parallel: false,
            line_terminator: LineTerminator::default(),
        }
    }
}

impl ClassifierConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: ClassifierConfig = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            on_malformed_row: self.on_malformed_row,
            parallel: self.parallel,
            line_terminator: self.line_terminator,
        }
    }
}
