//! Error types for option decoding and query compilation.

use thiserror::Error;

/// Errors raised while turning search options into a query document.
///
/// Compilation is a pure function of its inputs, so every error describes a
/// malformed option. No partial document is ever produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// An option value has a shape the compiler cannot classify.
    #[error("invalid `{option}` option: {message}")]
    InvalidOptionShape {
        /// Name of the offending option (or dotted path within it).
        option: String,
        /// What was wrong with it.
        message: String,
    },

    /// More than one boosting option was given while precedence is `reject`.
    #[error("conflicting boost options: {}", options.join(", "))]
    AmbiguousBoost {
        /// The boosting options that were present, in precedence order.
        options: Vec<&'static str>,
    },

    /// An aggregation description could not be parsed.
    #[error("invalid aggregation '{input}': {message}")]
    InvalidAggregation {
        /// The aggregation text as given.
        input: String,
        /// What was wrong with it.
        message: String,
    },
}

impl CompileError {
    /// Creates an `InvalidOptionShape` error.
    pub fn shape(option: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOptionShape {
            option: option.into(),
            message: message.into(),
        }
    }

    /// Returns a suggestion for common errors.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidOptionShape { option, .. } if option == "on" => {
                Some("`on` takes a field name or a list of field names, e.g. [\"name\", \"description\"]")
            }
            Self::InvalidOptionShape { option, .. } if option == "boost_function" => {
                Some("`boost_function` takes a script, or [script, {\"params\": {...}}]")
            }
            Self::InvalidOptionShape { option, .. } if option == "includes" => {
                Some("`includes` takes a text, or [text, {options}]")
            }
            Self::AmbiguousBoost { .. } => {
                Some("Pass a single boost option, or set boost_precedence = \"first-match\"")
            }
            Self::InvalidAggregation { .. } => {
                Some("Aggregations are written kind:name:field, e.g. max:top_price:price")
            }
            _ => None,
        }
    }
}
