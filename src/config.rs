//! Settings layering: built-in defaults, then `fitgif.toml`, then command-line
//! flags.

use std::{
    io,
    path::{Path, PathBuf},
};

use fs_err as fs;
use log::debug;
use resolve_path::PathResolveExt;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    fetch::DEFAULT_USER_AGENT,
    options::Global,
    resize::TargetSize,
};

pub const CONFIG_FILE_NAME: &str = "fitgif.toml";

const DEFAULT_OUTPUT_DIR: &str = "~/Downloads";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file")]
    Read(#[from] io::Error),

    #[error("error deserializing TOML from path {}", .path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("config file {} sets a zero width or height", .path.display())]
    ZeroSize { path: PathBuf },

    #[error("could not resolve output directory {}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Contents of a `fitgif.toml` file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub output_dir: Option<PathBuf>,
    pub user_agent: Option<String>,
    pub preserve_delays: Option<bool>,
}

impl ConfigFile {
    pub fn read_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Toml {
            path: path.to_owned(),
            source,
        })?;

        if config.width == Some(0) || config.height == Some(0) {
            return Err(ConfigError::ZeroSize {
                path: path.to_owned(),
            });
        }

        Ok(config)
    }

    /// Reads the file named by `--config`, or `fitgif.toml` in the current
    /// directory when it exists.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::read_from_path(path);
        }

        let implicit = Path::new(CONFIG_FILE_NAME);
        if implicit.is_file() {
            debug!("using config file {}", implicit.display());
            Self::read_from_path(implicit)
        } else {
            Ok(Self::default())
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub size: TargetSize,
    pub output_dir: PathBuf,
    pub user_agent: String,
    pub preserve_delays: bool,
}

impl Settings {
    pub fn load(global: &Global) -> Result<Self, ConfigError> {
        let file = ConfigFile::discover(global.config.as_deref())?;
        Self::merge(file, global)
    }

    /// Applies command-line flags on top of `file`.
    pub fn merge(file: ConfigFile, global: &Global) -> Result<Self, ConfigError> {
        let default_size = TargetSize::default();
        let size = global.size.unwrap_or(TargetSize {
            width: file.width.unwrap_or(default_size.width),
            height: file.height.unwrap_or(default_size.height),
        });

        let output_dir = global
            .output_dir
            .clone()
            .or(file.output_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        let output_dir = output_dir
            .try_resolve()
            .map_err(|source| ConfigError::OutputDir {
                path: output_dir.clone(),
                source,
            })?
            .into_owned();

        let user_agent = global
            .user_agent
            .clone()
            .or(file.user_agent)
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned());

        let preserve_delays = global.preserve_delays || file.preserve_delays.unwrap_or(false);

        Ok(Self {
            size,
            output_dir,
            user_agent,
            preserve_delays,
        })
    }
}
