//! The search option vocabulary.
//!
//! Options arrive either as JSON (from the CLI or a caller's request body) or
//! are built programmatically. Either way they end up as an explicit, typed
//! record: every value is classified once, here, so the compilers never have to
//! inspect raw JSON shapes.
//!
//! ```
//! use serde_json::json;
//! use sift_query::SearchOptions;
//!
//! let options = SearchOptions::from_json(&json!({
//!     "on": ["name", "description"],
//!     "only": { "status": ["published", "rejected"] },
//!     "boost_by": "contents_count",
//! }))
//! .unwrap();
//! assert!(options.only.is_some());
//! ```

use serde_json::{Map, Number, Value};

use crate::{CompileError, flatten::flatten};

/// Option keys with a meaning of their own. Any other key is a match option.
const RESERVED_KEYS: &[&str] = &[
    "on",
    "only",
    "except",
    "includes",
    "boost_by",
    "boost_function",
    "boost_where",
];

/// A single filter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// A string (or symbol-like keyword).
    String(String),
    /// A JSON number, kept as given.
    Number(Number),
    /// A boolean.
    Bool(bool),
}

impl Scalar {
    /// Converts the scalar into its JSON form.
    pub fn to_value(&self) -> Value {
        match self {
            Self::String(s) => Value::String(s.clone()),
            Self::Number(n) => Value::Number(n.clone()),
            Self::Bool(b) => Value::Bool(*b),
        }
    }

    /// Classifies a JSON value as a scalar, rejecting containers and null.
    fn from_json(path: &str, value: &Value) -> Result<Self, CompileError> {
        match value {
            Value::String(s) => Ok(Self::String(s.clone())),
            Value::Number(n) => Ok(Self::Number(n.clone())),
            Value::Bool(b) => Ok(Self::Bool(*b)),
            other => Err(CompileError::shape(
                path,
                format!("expected a string, number or boolean, found {}", kind_of(other)),
            )),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<u64> for Scalar {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// A value in an [`OptionTree`].
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    /// A single value; compiles to an exact-match filter.
    Scalar(Scalar),
    /// Several values; compiles to a membership filter.
    List(Vec<Scalar>),
    /// A nested object whose keys extend the dotted field path.
    Tree(OptionTree),
}

impl From<Scalar> for OptionValue {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<OptionTree> for OptionValue {
    fn from(tree: OptionTree) -> Self {
        Self::Tree(tree)
    }
}

impl OptionValue {
    /// Builds a list value from anything convertible to scalars.
    pub fn list<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Scalar>,
    {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    /// Classifies a JSON value found at `path`.
    fn from_json(path: &str, value: &Value) -> Result<Self, CompileError> {
        match value {
            Value::Object(map) => Ok(Self::Tree(OptionTree::from_json(path, map)?)),
            Value::Array(items) => items
                .iter()
                .map(|item| Scalar::from_json(path, item))
                .collect::<Result<Vec<_>, _>>()
                .map(Self::List),
            other => Scalar::from_json(path, other).map(Self::Scalar),
        }
    }
}

/// An ordered mapping from field name to condition.
///
/// Insertion order is kept: it decides the order of the compiled filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionTree {
    /// Entries in insertion order.
    entries: Vec<(String, OptionValue)>,
}

impl OptionTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry and returns the tree.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    /// Returns true if the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Decodes a JSON object; `path` names the option for error messages.
    fn from_json(path: &str, map: &Map<String, Value>) -> Result<Self, CompileError> {
        let mut entries = Vec::with_capacity(map.len());
        for (key, value) in map {
            let child_path = format!("{path}.{key}");
            entries.push((key.clone(), OptionValue::from_json(&child_path, value)?));
        }
        Ok(Self { entries })
    }
}

/// The fields a match query is scoped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSpec {
    /// One field, possibly a dotted path such as `company.name`.
    Single(String),
    /// Several fields, searched together.
    Multi(Vec<String>),
}

impl FieldSpec {
    /// Decodes `on`: a string or a non-empty array of strings.
    fn from_json(value: &Value) -> Result<Self, CompileError> {
        match value {
            Value::String(s) => Ok(Self::Single(s.clone())),
            Value::Array(items) => {
                let fields = items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => Ok(s.clone()),
                        other => Err(CompileError::shape(
                            "on",
                            format!("field names must be strings, found {}", kind_of(other)),
                        )),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Self::from_fields(fields)
            }
            other => Err(CompileError::shape(
                "on",
                format!("expected a string or an array of strings, found {}", kind_of(other)),
            )),
        }
    }

    /// Builds a field spec from a list, collapsing a single field.
    pub fn from_fields(mut fields: Vec<String>) -> Result<Self, CompileError> {
        match fields.len() {
            0 => Err(CompileError::shape("on", "at least one field is required")),
            1 => Ok(Self::Single(fields.remove(0))),
            _ => Ok(Self::Multi(fields)),
        }
    }
}

impl From<&str> for FieldSpec {
    fn from(field: &str) -> Self {
        Self::Single(field.to_string())
    }
}

impl From<String> for FieldSpec {
    fn from(field: String) -> Self {
        Self::Single(field)
    }
}

/// A nested match used as a filter (`includes`).
#[derive(Debug, Clone, PartialEq)]
pub struct Includes {
    /// The text to match.
    pub text: String,
    /// Options for the nested query; compiled with the full vocabulary.
    pub options: Box<SearchOptions>,
}

impl Includes {
    /// Decodes `"text"`, `["text"]` or `["text", {options}]`.
    fn from_json(value: &Value) -> Result<Self, CompileError> {
        let (text, options) = match value {
            Value::String(text) => (text, None),
            Value::Array(items) => match items.as_slice() {
                [Value::String(text)] => (text, None),
                [Value::String(text), options] => (text, Some(options)),
                _ => {
                    return Err(CompileError::shape(
                        "includes",
                        "expected [text] or [text, options]",
                    ));
                }
            },
            other => {
                return Err(CompileError::shape(
                    "includes",
                    format!("expected a string or an array, found {}", kind_of(other)),
                ));
            }
        };

        let options = match options {
            Some(options) => SearchOptions::from_json(options)?,
            None => SearchOptions::default(),
        };

        Ok(Self {
            text: text.clone(),
            options: Box::new(options),
        })
    }
}

/// A scripted relevance function.
#[derive(Debug, Clone, PartialEq)]
pub struct BoostFunction {
    /// The script source.
    pub script: String,
    /// Script parameters, emitted only when present.
    pub params: Option<Map<String, Value>>,
}

impl BoostFunction {
    /// Creates a script function without parameters.
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            params: None,
        }
    }

    /// Attaches script parameters.
    pub fn with_params(mut self, params: Map<String, Value>) -> Self {
        self.params = Some(params);
        self
    }

    /// Decodes `"script"`, `[script, {"params": {...}}]` or `{"script", "params"}`.
    fn from_json(value: &Value) -> Result<Self, CompileError> {
        match value {
            Value::String(script) => Ok(Self::new(script.clone())),
            Value::Array(items) => match items.as_slice() {
                [Value::String(script)] => Ok(Self::new(script.clone())),
                [Value::String(script), Value::Object(extra)] => {
                    Self::new(script.clone()).with_params_from(extra)
                }
                _ => Err(CompileError::shape(
                    "boost_function",
                    "expected [script] or [script, {\"params\": {...}}]",
                )),
            },
            Value::Object(map) => match map.get("script") {
                Some(Value::String(script)) => {
                    let mut rest = map.clone();
                    rest.remove("script");
                    Self::new(script.clone()).with_params_from(&rest)
                }
                _ => Err(CompileError::shape(
                    "boost_function",
                    "object form needs a string `script`",
                )),
            },
            other => Err(CompileError::shape(
                "boost_function",
                format!("expected a script string, found {}", kind_of(other)),
            )),
        }
    }

    /// Reads the `params` entry of a trailing options object.
    fn with_params_from(self, extra: &Map<String, Value>) -> Result<Self, CompileError> {
        if let Some(key) = extra.keys().find(|k| k.as_str() != "params") {
            return Err(CompileError::shape(
                "boost_function",
                format!("unexpected key `{key}`"),
            ));
        }
        match extra.get("params") {
            None | Some(Value::Null) => Ok(self),
            Some(Value::Object(params)) => Ok(self.with_params(params.clone())),
            Some(other) => Err(CompileError::shape(
                "boost_function",
                format!("`params` must be an object, found {}", kind_of(other)),
            )),
        }
    }
}

/// Options for a single compile call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    /// Field scoping for the match query.
    pub on: Option<FieldSpec>,
    /// Conditions results must satisfy.
    pub only: Option<OptionTree>,
    /// Conditions results must not satisfy.
    pub except: Option<OptionTree>,
    /// A nested text query results must match.
    pub includes: Option<Includes>,
    /// Numeric field whose value scales relevance.
    pub boost_by: Option<String>,
    /// Script computing relevance.
    pub boost_function: Option<BoostFunction>,
    /// Conditions whose matches get a fixed relevance boost.
    pub boost_where: Option<OptionTree>,
    /// Extra options merged verbatim into a single-field match (e.g. `operator`).
    pub match_options: Map<String, Value>,
}

impl SearchOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes options from a JSON object.
    ///
    /// `null` values and empty objects count as absent. Unknown keys are kept as
    /// match options.
    pub fn from_json(value: &Value) -> Result<Self, CompileError> {
        let map = match value {
            Value::Object(map) => map,
            Value::Null => return Ok(Self::default()),
            other => {
                return Err(CompileError::shape(
                    "options",
                    format!("expected an object, found {}", kind_of(other)),
                ));
            }
        };

        let mut options = Self::default();
        for (key, value) in map {
            if value.is_null() && RESERVED_KEYS.contains(&key.as_str()) {
                continue;
            }
            match key.as_str() {
                "on" => options.on = Some(FieldSpec::from_json(value)?),
                "only" => options.only = tree_option("only", value)?,
                "except" => options.except = tree_option("except", value)?,
                "boost_where" => options.boost_where = tree_option("boost_where", value)?,
                "includes" => options.includes = includes_option(value)?,
                "boost_by" => match value {
                    Value::String(field) => options.boost_by = Some(field.clone()),
                    other => {
                        return Err(CompileError::shape(
                            "boost_by",
                            format!("expected a field name, found {}", kind_of(other)),
                        ));
                    }
                },
                "boost_function" => {
                    options.boost_function = Some(BoostFunction::from_json(value)?);
                }
                _ => {
                    options.match_options.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(options)
    }

    /// Scopes the match to one or more fields.
    pub fn on(mut self, fields: impl Into<FieldSpec>) -> Self {
        self.on = Some(fields.into());
        self
    }

    /// Sets the inclusion filter.
    pub fn only(mut self, tree: OptionTree) -> Self {
        self.only = Some(tree);
        self
    }

    /// Sets the exclusion filter.
    pub fn except(mut self, tree: OptionTree) -> Self {
        self.except = Some(tree);
        self
    }

    /// Sets the nested text filter.
    pub fn includes(mut self, text: impl Into<String>, options: Self) -> Self {
        self.includes = Some(Includes {
            text: text.into(),
            options: Box::new(options),
        });
        self
    }

    /// Boosts by a numeric field.
    pub fn boost_by(mut self, field: impl Into<String>) -> Self {
        self.boost_by = Some(field.into());
        self
    }

    /// Boosts by a script.
    pub fn boost_function(mut self, function: BoostFunction) -> Self {
        self.boost_function = Some(function);
        self
    }

    /// Boosts documents matching the given conditions.
    pub fn boost_where(mut self, tree: OptionTree) -> Self {
        self.boost_where = Some(tree);
        self
    }

    /// Adds an option merged into a single-field match.
    pub fn match_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.match_options.insert(key.into(), value.into());
        self
    }

    /// Returns the names of the boosting options present, in precedence order.
    pub fn boost_options_present(&self) -> Vec<&'static str> {
        let mut present = Vec::new();
        if self.boost_by.is_some() {
            present.push("boost_by");
        }
        if self.boost_function.is_some() {
            present.push("boost_function");
        }
        if self
            .boost_where
            .as_ref()
            .is_some_and(|t| !flatten(t).is_empty())
        {
            present.push("boost_where");
        }
        present
    }
}

/// Decodes an object-valued option, treating an empty object as absent.
fn tree_option(option: &str, value: &Value) -> Result<Option<OptionTree>, CompileError> {
    match value {
        Value::Object(map) if map.is_empty() => Ok(None),
        Value::Object(map) => OptionTree::from_json(option, map).map(Some),
        other => Err(CompileError::shape(
            option,
            format!("expected an object of field conditions, found {}", kind_of(other)),
        )),
    }
}

/// Decodes `includes`, treating blank text and an empty array as absent.
fn includes_option(value: &Value) -> Result<Option<Includes>, CompileError> {
    match value {
        Value::String(text) if text.trim().is_empty() => Ok(None),
        Value::Array(items) if items.is_empty() => Ok(None),
        other => Includes::from_json(other).map(Some),
    }
}

/// Names a JSON value's type for error messages.
fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
