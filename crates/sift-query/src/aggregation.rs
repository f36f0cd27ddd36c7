//! Aggregation documents.
//!
//! Aggregations are independent of query compilation: each one formats a
//! fixed shape, `{ <name>: { <kind>: { field, ...options } } }`, and callers
//! place them beside the compiled query (see [`search_body`]).

use std::{fmt, str::FromStr};

use serde_json::{Map, Value};

use crate::CompileError;

/// Supported single-field aggregation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationKind {
    /// Maximum value.
    Max,
    /// Minimum value.
    Min,
    /// Average value.
    Avg,
    /// Sum of values.
    Sum,
    /// Number of values.
    ValueCount,
    /// Approximate distinct count.
    Cardinality,
    /// Buckets per distinct value.
    Terms,
}

impl AggregationKind {
    /// All kinds, in display order.
    pub const ALL: [Self; 7] = [
        Self::Max,
        Self::Min,
        Self::Avg,
        Self::Sum,
        Self::ValueCount,
        Self::Cardinality,
        Self::Terms,
    ];

    /// Returns the DSL name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Max => "max",
            Self::Min => "min",
            Self::Avg => "avg",
            Self::Sum => "sum",
            Self::ValueCount => "value_count",
            Self::Cardinality => "cardinality",
            Self::Terms => "terms",
        }
    }
}

impl fmt::Display for AggregationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|k| k.as_str()).collect();
                format!("unknown kind '{s}' (expected one of: {})", names.join(", "))
            })
    }
}

/// A named aggregation over one field.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    /// Name under which results are reported.
    pub name: String,
    /// Aggregation kind.
    pub kind: AggregationKind,
    /// Aggregated field; omitted from the document when absent.
    pub field: Option<String>,
    /// Extra options merged into the body after `field`.
    pub options: Map<String, Value>,
}

impl Aggregation {
    /// Creates an aggregation over `field`.
    pub fn new(kind: AggregationKind, name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            field: Some(field.into()),
            options: Map::new(),
        }
    }

    /// Creates an aggregation with no field, for bodies driven by options
    /// such as `script`.
    pub fn without_field(kind: AggregationKind, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            field: None,
            options: Map::new(),
        }
    }

    /// Shorthand for a `max` aggregation.
    pub fn max(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::new(AggregationKind::Max, name, field)
    }

    /// Adds an option to the aggregation body.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Returns the aggregation body without its name.
    pub fn body(&self) -> Value {
        let mut body = Map::with_capacity(self.options.len() + 1);
        if let Some(field) = &self.field {
            body.insert("field".to_string(), Value::String(field.clone()));
        }
        for (key, value) in &self.options {
            if !value.is_null() {
                body.insert(key.clone(), value.clone());
            }
        }
        let mut kind = Map::with_capacity(1);
        kind.insert(self.kind.as_str().to_string(), Value::Object(body));
        Value::Object(kind)
    }

    /// Returns `{ <name>: <body> }`.
    pub fn to_document(&self) -> Value {
        let mut doc = Map::with_capacity(1);
        doc.insert(self.name.clone(), self.body());
        Value::Object(doc)
    }
}

impl FromStr for Aggregation {
    type Err = CompileError;

    /// Parses `kind:name:field`, e.g. `max:top_price:price`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |message: String| CompileError::InvalidAggregation {
            input: s.to_string(),
            message,
        };

        let parts: Vec<&str> = s.splitn(3, ':').collect();
        let [kind, name, field] = parts.as_slice() else {
            return Err(invalid("expected kind:name:field".to_string()));
        };
        if name.is_empty() || field.is_empty() {
            return Err(invalid("name and field must not be empty".to_string()));
        }
        let kind = kind.parse::<AggregationKind>().map_err(invalid)?;
        Ok(Self::new(kind, *name, *field))
    }
}

/// Merges aggregations into one object, keyed by name, in order.
///
/// A later aggregation with the same name replaces an earlier one.
pub fn aggregations_document(aggregations: &[Aggregation]) -> Value {
    let mut doc = Map::with_capacity(aggregations.len());
    for aggregation in aggregations {
        doc.insert(aggregation.name.clone(), aggregation.body());
    }
    Value::Object(doc)
}

/// Places a compiled query and its aggregations into one request body.
///
/// `aggs` is left out when there are no aggregations.
pub fn search_body(query: Value, aggregations: &[Aggregation]) -> Value {
    let mut body = Map::with_capacity(2);
    body.insert("query".to_string(), query);
    if !aggregations.is_empty() {
        body.insert("aggs".to_string(), aggregations_document(aggregations));
    }
    Value::Object(body)
}
