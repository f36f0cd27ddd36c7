//! Configuration file parsing.
//!
//! Parses individual `.sift.toml` files into `RawConfig` structures whose
//! fields are all optional, ready for merging.

use std::{fs, path::Path};

use serde::Deserialize;
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::{BoostPolicy, ConfigError};

/// Raw configuration as parsed directly from a TOML file.
///
/// Mirrors the TOML schema exactly; absent keys stay `None`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Compile settings section.
    pub compile: Option<RawCompileSettings>,
    /// Output settings section.
    pub output: Option<RawOutputSettings>,
}

/// Raw `[compile]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCompileSettings {
    /// Field matched when no `on` option is given.
    pub catch_all_field: Option<String>,
    /// Modifier for `boost_by`.
    pub boost_modifier: Option<String>,
    /// Factor for `boost_where`.
    pub boost_factor: Option<u32>,
    /// Policy for simultaneous boosting options.
    pub boost_precedence: Option<BoostPolicy>,
}

/// Raw `[output]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawOutputSettings {
    /// Pretty-print documents.
    pub pretty: Option<bool>,
    /// Highlight documents on terminals.
    pub color: Option<bool>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context (tests only).
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
