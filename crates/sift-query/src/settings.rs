//! Compile-time constants and their configurable overrides.

/// The field matched when no `on` option is given.
pub const CATCH_ALL_FIELD: &str = "_all";

/// Modifier applied to `boost_by` field values.
pub const DEFAULT_BOOST_MODIFIER: &str = "ln2p";

/// Multiplier applied to documents matched by `boost_where`.
pub const DEFAULT_BOOST_FACTOR: u32 = 1000;

/// Modifiers accepted by a `field_value_factor` function.
pub const BOOST_MODIFIERS: &[&str] = &[
    "none",
    "log",
    "log1p",
    "log2p",
    "ln",
    "ln1p",
    "ln2p",
    "square",
    "sqrt",
    "reciprocal",
];

/// What to do when several boosting options are given at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoostPrecedence {
    /// Apply the first present option in the order `boost_by`,
    /// `boost_function`, `boost_where`; ignore the rest.
    #[default]
    FirstMatch,
    /// Fail with [`CompileError::AmbiguousBoost`](crate::CompileError::AmbiguousBoost).
    Reject,
}

/// Settings that shape compiled documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileSettings {
    /// Field used for unscoped matches.
    pub catch_all_field: String,
    /// Modifier for `boost_by`.
    pub boost_modifier: String,
    /// Factor for `boost_where`.
    pub boost_factor: u32,
    /// Policy for simultaneous boosting options.
    pub boost_precedence: BoostPrecedence,
}

impl Default for CompileSettings {
    fn default() -> Self {
        Self {
            catch_all_field: CATCH_ALL_FIELD.to_string(),
            boost_modifier: DEFAULT_BOOST_MODIFIER.to_string(),
            boost_factor: DEFAULT_BOOST_FACTOR,
            boost_precedence: BoostPrecedence::FirstMatch,
        }
    }
}
