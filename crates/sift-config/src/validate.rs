//! Configuration validation.
//!
//! Reports settings that parse but would produce documents a search engine rejects.

use std::fmt;

use sift_query::BOOST_MODIFIERS;

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The catch-all field is empty or whitespace.
    EmptyCatchAllField,
    /// The `boost_by` modifier is not a known field value factor modifier.
    UnknownBoostModifier {
        /// The configured modifier.
        modifier: String,
    },
    /// `boost_where` documents would have their score zeroed.
    ZeroBoostFactor,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCatchAllField => write!(f, "catch_all_field is empty"),
            Self::UnknownBoostModifier { modifier } => write!(
                f,
                "boost_modifier '{modifier}' is not one of: {}",
                BOOST_MODIFIERS.join(", ")
            ),
            Self::ZeroBoostFactor => {
                write!(f, "boost_factor is 0; boost_where would hide matches instead")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let compile = &config.compile;
    let mut warnings = Vec::new();

    if compile.catch_all_field.trim().is_empty() {
        warnings.push(ConfigWarning::EmptyCatchAllField);
    }

    if !BOOST_MODIFIERS.contains(&compile.boost_modifier.as_str()) {
        warnings.push(ConfigWarning::UnknownBoostModifier {
            modifier: compile.boost_modifier.clone(),
        });
    }

    if compile.boost_factor == 0 {
        warnings.push(ConfigWarning::ZeroBoostFactor);
    }

    warnings
}
