use crate::state::MenuPresentationMode;
use anyhow::Context;
use log::{info, warn};
use serde::Deserialize;
use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Menu mode to restore before the menu has ever been explicitly entered
    pub default_menu_mode: MenuPresentationMode,
}

/// Where the active config came from
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    Default,
}

impl Config {
    pub const PATH: &'static str = "./config.json";

    /// Load config from a JSON file. Return `None` if the file doesn't exist,
    /// but a file that exists and can't be read or parsed is an error.
    pub fn load(path: &Path) -> anyhow::Result<Option<Self>> {
        info!("Loading config from `{}`", path.display());
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(None)
            }
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("Error opening config file {}", path.display())
                })
            }
        };
        let config = serde_json::from_reader(BufReader::new(file))
            .with_context(|| {
                format!("Error parsing config file {}", path.display())
            })?;
        Ok(Some(config))
    }

    /// Load config from a file, falling back to defaults if it's missing
    pub fn load_or_default(
        path: &Path,
    ) -> anyhow::Result<(Self, ConfigSource)> {
        match Self::load(path)? {
            Some(config) => Ok((config, ConfigSource::File(path.to_owned()))),
            None => {
                warn!(
                    "Config file {} not found, using defaults",
                    path.display()
                );
                Ok((Self::default(), ConfigSource::Default))
            }
        }
    }
}
