//! Configuration system for sift.
//!
//! sift reads TOML files named `.sift.toml`. Configuration is resolved by walking up the
//! directory tree from the current working directory, collecting any `.sift.toml` files
//! found, then loading `~/.sift.toml` as the global config with lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{RawCompileSettings, RawConfig, RawOutputSettings, parse_config_file, parse_config_str};
use serde::{Deserialize, Serialize};
use sift_query::{
    BoostPrecedence, CATCH_ALL_FIELD, CompileSettings, DEFAULT_BOOST_FACTOR, DEFAULT_BOOST_MODIFIER,
};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration for sift.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Settings that shape compiled documents.
    pub compile: CompileSection,
    /// Settings for printing documents.
    pub output: OutputSection,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
    /// Config files that contributed, highest precedence first.
    pub sources: Vec<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.sift.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Returns the settings the compiler should run with.
    pub fn compile_settings(&self) -> CompileSettings {
        self.compile.to_settings()
    }

    /// Serializes the effective settings to TOML format.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableSettings {
            compile: &self.compile,
            output: &self.output,
        };
        toml::to_string_pretty(&serializable).expect("settings serialization should not fail")
    }
}

/// Policy for simultaneous boosting options, as written in TOML.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoostPolicy {
    /// Apply the first of `boost_by`, `boost_function`, `boost_where`.
    #[default]
    FirstMatch,
    /// Refuse to compile.
    Reject,
}

impl From<BoostPolicy> for BoostPrecedence {
    fn from(policy: BoostPolicy) -> Self {
        match policy {
            BoostPolicy::FirstMatch => Self::FirstMatch,
            BoostPolicy::Reject => Self::Reject,
        }
    }
}

/// The `[compile]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CompileSection {
    /// Field matched when no `on` option is given.
    pub catch_all_field: String,
    /// Modifier for `boost_by`.
    pub boost_modifier: String,
    /// Factor for `boost_where`.
    pub boost_factor: u32,
    /// Policy for simultaneous boosting options.
    pub boost_precedence: BoostPolicy,
}

impl Default for CompileSection {
    fn default() -> Self {
        Self {
            catch_all_field: CATCH_ALL_FIELD.to_string(),
            boost_modifier: DEFAULT_BOOST_MODIFIER.to_string(),
            boost_factor: DEFAULT_BOOST_FACTOR,
            boost_precedence: BoostPolicy::FirstMatch,
        }
    }
}

impl CompileSection {
    /// Converts the section into compiler settings.
    pub fn to_settings(&self) -> CompileSettings {
        CompileSettings {
            catch_all_field: self.catch_all_field.clone(),
            boost_modifier: self.boost_modifier.clone(),
            boost_factor: self.boost_factor,
            boost_precedence: self.boost_precedence.into(),
        }
    }
}

/// The `[output]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSection {
    /// Pretty-print documents.
    pub pretty: bool,
    /// Highlight documents when writing to a terminal.
    pub color: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            pretty: true,
            color: true,
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Compile settings.
    compile: &'a CompileSection,
    /// Output settings.
    output: &'a OutputSection,
}
