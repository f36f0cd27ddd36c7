//! Configuration merging.
//!
//! Folds several `RawConfig` files into one `Config`. Each setting takes the
//! value from the highest-precedence file that defines it.

use std::path::PathBuf;

use crate::{
    CompileSection, Config, OutputSection,
    parse::{RawCompileSettings, RawConfig, RawOutputSettings},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges configuration files into a single `Config`.
///
/// Configs should be provided in precedence order: highest precedence first
/// (closest to the working directory), global config last.
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    let mut compile = CompileSection::default();
    let mut output = OutputSection::default();

    // Lowest precedence first, so closer files overwrite.
    for parsed in configs.iter().rev() {
        if let Some(raw) = &parsed.config.compile {
            apply_compile(&mut compile, raw);
        }
        if let Some(raw) = &parsed.config.output {
            apply_output(&mut output, raw);
        }
    }

    let config_root = configs
        .first()
        .and_then(|c| c.path.parent())
        .map(|p| p.to_path_buf());

    Config {
        compile,
        output,
        config_root,
        sources: configs.iter().map(|c| c.path.clone()).collect(),
    }
}

/// Applies a raw `[compile]` section, overwriting any present values.
fn apply_compile(result: &mut CompileSection, raw: &RawCompileSettings) {
    if let Some(v) = &raw.catch_all_field {
        result.catch_all_field.clone_from(v);
    }
    if let Some(v) = &raw.boost_modifier {
        result.boost_modifier.clone_from(v);
    }
    if let Some(v) = raw.boost_factor {
        result.boost_factor = v;
    }
    if let Some(v) = raw.boost_precedence {
        result.boost_precedence = v;
    }
}

/// Applies a raw `[output]` section, overwriting any present values.
fn apply_output(result: &mut OutputSection, raw: &RawOutputSettings) {
    if let Some(v) = raw.pretty {
        result.pretty = v;
    }
    if let Some(v) = raw.color {
        result.color = v;
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::{BoostPolicy, parse::parse_config_str};

    /// Parses TOML into a `ParsedConfig` at the given path.
    fn parsed(path: &str, toml: &str) -> ParsedConfig {
        ParsedConfig {
            path: PathBuf::from(path),
            config: parse_config_str(toml, Path::new(path)).unwrap(),
        }
    }

    #[test]
    fn no_configs_gives_defaults() {
        let config = merge_configs(&[]);
        assert_eq!(config.compile, CompileSection::default());
        assert!(config.config_root.is_none());
        assert!(config.sources.is_empty());
    }

    #[test]
    fn closest_value_wins() {
        let local = parsed("/p/sub/.sift.toml", "[compile]\nboost_factor = 5\n");
        let global = parsed(
            "/home/u/.sift.toml",
            "[compile]\nboost_factor = 9\ncatch_all_field = \"text\"\n",
        );
        let config = merge_configs(&[local, global]);
        assert_eq!(config.compile.boost_factor, 5);
        assert_eq!(config.compile.catch_all_field, "text");
        assert_eq!(config.config_root, Some(PathBuf::from("/p/sub")));
    }

    #[test]
    fn sections_merge_independently() {
        let local = parsed("/p/.sift.toml", "[output]\ncolor = false\n");
        let global = parsed(
            "/home/u/.sift.toml",
            "[compile]\nboost_precedence = \"reject\"\n[output]\npretty = false\n",
        );
        let config = merge_configs(&[local, global]);
        assert_eq!(config.compile.boost_precedence, BoostPolicy::Reject);
        assert!(!config.output.color);
        assert!(!config.output.pretty);
        assert_eq!(config.sources.len(), 2);
    }
}
