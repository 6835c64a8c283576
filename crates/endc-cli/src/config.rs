use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::backend::INTERPRETER;
use crate::Args;

pub const DEFAULT_VERBOSITY: u8 = 1;

/// Contents of the optional `.endcc.json` file
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    pub default_file: Option<PathBuf>,
    pub default_backend: Option<String>,
    pub verbose_level: Option<u8>,
}

impl ConfigFile {
    /// Read and decode `path`. A missing file is not an error.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("Reading config file {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("Parsing config file {}", path.display()))?;
        Ok(Some(config))
    }
}

/// Effective driver settings: command line over config file over defaults
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub file: Option<PathBuf>,
    pub backend: String,
    pub verbosity: u8,
    pub interactive: bool,
    pub exit_on_error: bool,
    pub print_ast: bool,
    /// Config file the settings were merged from, if one was found
    pub config_path: Option<PathBuf>,
}

impl Settings {
    pub fn load(args: &Args) -> Result<Self> {
        let config = ConfigFile::load(&args.config)?;
        let config_path = config.as_ref().map(|_| args.config.clone());
        let mut settings = Self::resolve(args, config.unwrap_or_default());
        settings.config_path = config_path;
        Ok(settings)
    }

    pub fn resolve(args: &Args, config: ConfigFile) -> Self {
        Self {
            file: args.input.clone().or_else(|| args.file.clone()).or(config.default_file),
            backend: args
                .backend
                .clone()
                .or(config.default_backend)
                .unwrap_or_else(|| INTERPRETER.to_string()),
            verbosity: args.verbosity.or(config.verbose_level).unwrap_or(DEFAULT_VERBOSITY),
            interactive: args.interactive,
            exit_on_error: args.exit_on_error,
            print_ast: args.print_ast,
            config_path: None,
        }
    }
}
