//! Query document syntax tree.
//!
//! Represents a compiled search request before it is serialized to JSON.

use std::fmt;

use serde_json::{Map, Value};

use crate::options::Scalar;

/// A predicate restricting which documents match, independent of scoring.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterNode {
    /// Exact match of a single value.
    Term {
        /// Dotted field path.
        field: String,
        /// Value to match.
        value: Scalar,
    },

    /// Membership match against several values.
    Terms {
        /// Dotted field path.
        field: String,
        /// Accepted values, in the order given.
        values: Vec<Scalar>,
    },

    /// Conjunction: all children must match. Always holds two or more children.
    And(Vec<Self>),

    /// Negation: the child must not match.
    Not(Box<Self>),

    /// A scored query used as a filter.
    Query(Box<QueryNode>),

    /// Matches every document.
    MatchAll,
}

impl FilterNode {
    /// Joins candidate filters.
    ///
    /// Returns `None` for no candidates, the bare candidate for one, and an
    /// `And` of all candidates (in order) otherwise.
    pub fn join(mut filters: Vec<Self>) -> Option<Self> {
        match filters.len() {
            0 => None,
            1 => filters.pop(),
            _ => Some(Self::And(filters)),
        }
    }

    /// Wraps a filter in a negation.
    pub fn not(filter: Self) -> Self {
        Self::Not(Box::new(filter))
    }

    /// Formats the filter as a tree with the given indentation level.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        match self {
            Self::Term { field, value } => {
                writeln!(f, "{prefix}Term({field:?} = {})", value.to_value())
            }
            Self::Terms { field, values } => {
                let values: Vec<Value> = values.iter().map(Scalar::to_value).collect();
                writeln!(f, "{prefix}Terms({field:?} in {})", Value::Array(values))
            }
            Self::And(children) => {
                writeln!(f, "{prefix}And")?;
                for child in children {
                    child.fmt_tree(f, indent + 1)?;
                }
                Ok(())
            }
            Self::Not(inner) => {
                writeln!(f, "{prefix}Not")?;
                inner.fmt_tree(f, indent + 1)
            }
            Self::Query(query) => {
                writeln!(f, "{prefix}Query")?;
                query.fmt_tree(f, indent + 1)
            }
            Self::MatchAll => writeln!(f, "{prefix}MatchAll"),
        }
    }
}

impl fmt::Display for FilterNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}

/// A relevance-adjusting function inside a function score envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreFunction {
    /// Scales the score by a numeric field's value.
    FieldValueFactor {
        /// Numeric field.
        field: String,
        /// Modifier applied to the field value (e.g. `ln2p`).
        modifier: String,
    },

    /// Computes the score with a script.
    ScriptScore {
        /// Script source.
        script: String,
        /// Script parameters, omitted when absent.
        params: Option<Map<String, Value>>,
    },

    /// Multiplies the score of documents matching a filter.
    BoostFactor {
        /// Documents to boost.
        filter: FilterNode,
        /// Multiplier.
        factor: u32,
    },
}

/// A relevance-scored query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryNode {
    /// Matches every document.
    MatchAll,

    /// Full-text match on one field.
    Match {
        /// Field name or dotted path.
        field: String,
        /// Query text.
        text: String,
        /// Extra match options, serialized alongside `query`.
        options: Map<String, Value>,
    },

    /// Full-text match across several fields.
    MultiMatch {
        /// Fields, in the order given.
        fields: Vec<String>,
        /// Query text.
        text: String,
    },

    /// A query restricted by a filter.
    Filtered {
        /// The scored query.
        query: Box<Self>,
        /// The restricting filter.
        filter: FilterNode,
    },

    /// A query whose score is adjusted by a function.
    FunctionScore {
        /// The scored query.
        query: Box<Self>,
        /// The adjusting function.
        function: ScoreFunction,
    },
}

impl QueryNode {
    /// Wraps a query in a filter envelope.
    pub fn filtered(query: Self, filter: FilterNode) -> Self {
        Self::Filtered {
            query: Box::new(query),
            filter,
        }
    }

    /// Wraps a query in a function score envelope.
    pub fn function_score(query: Self, function: ScoreFunction) -> Self {
        Self::FunctionScore {
            query: Box::new(query),
            function,
        }
    }

    /// Formats the query as a tree with the given indentation level.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        match self {
            Self::MatchAll => writeln!(f, "{prefix}MatchAll"),
            Self::Match {
                field,
                text,
                options,
            } => {
                if options.is_empty() {
                    writeln!(f, "{prefix}Match({field:?}: {text:?})")
                } else {
                    writeln!(
                        f,
                        "{prefix}Match({field:?}: {text:?}, {})",
                        Value::Object(options.clone())
                    )
                }
            }
            Self::MultiMatch { fields, text } => {
                writeln!(f, "{prefix}MultiMatch({fields:?}: {text:?})")
            }
            Self::Filtered { query, filter } => {
                writeln!(f, "{prefix}Filtered")?;
                query.fmt_tree(f, indent + 1)?;
                filter.fmt_tree(f, indent + 1)
            }
            Self::FunctionScore { query, function } => {
                match function {
                    ScoreFunction::FieldValueFactor { field, modifier } => {
                        writeln!(f, "{prefix}FunctionScore(field {field:?}, {modifier})")?;
                    }
                    ScoreFunction::ScriptScore { script, .. } => {
                        writeln!(f, "{prefix}FunctionScore(script {script:?})")?;
                    }
                    ScoreFunction::BoostFactor { filter, factor } => {
                        writeln!(f, "{prefix}FunctionScore(boost x{factor} where)")?;
                        filter.fmt_tree(f, indent + 2)?;
                    }
                }
                query.fmt_tree(f, indent + 1)
            }
        }
    }
}

impl fmt::Display for QueryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}
