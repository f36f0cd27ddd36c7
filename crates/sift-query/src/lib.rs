//! Search option compiler.
//!
//! Turns a small option vocabulary describing a full-text search into the
//! nested document of an Elasticsearch-style query DSL:
//!
//! - **Text**: free text matched against the catch-all field, one field, or
//!   several fields (`on`)
//! - **Filters**: `only` and `except` conditions on (dotted) fields, and a nested
//!   text query with `includes`
//! - **Boosting**: `boost_by` a numeric field, `boost_function` a script, or
//!   `boost_where` conditions hold
//!
//! Compilation is pure: nothing is executed, validated against a schema, or
//! sent anywhere.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use sift_query::{OptionTree, SearchOptions, compile};
//!
//! let options = SearchOptions::new().only(OptionTree::new().with("status", "published"));
//! let doc = compile("foo", &options).unwrap();
//! assert_eq!(
//!     doc,
//!     json!({
//!         "filtered": {
//!             "query": { "match": { "_all": "foo" } },
//!             "filter": { "term": { "status": "published" } }
//!         }
//!     })
//! );
//! ```

#![warn(missing_docs)]

mod aggregation;
mod ast;
mod compile;
mod error;
mod filter;
mod flatten;
mod matching;
mod options;
mod relevance;
mod serialize;
mod settings;

pub use aggregation::{Aggregation, AggregationKind, aggregations_document, search_body};
pub use ast::{FilterNode, QueryNode, ScoreFunction};
pub use compile::{Compiler, compile};
pub use error::CompileError;
pub use filter::{classify, compile_filters, conditions};
pub use flatten::{Leaf, flatten};
pub use matching::compile_match;
pub use options::{BoostFunction, FieldSpec, Includes, OptionTree, OptionValue, Scalar, SearchOptions};
pub use relevance::compile_relevance;
pub use serialize::{filter_to_value, query_to_value};
pub use settings::{
    BOOST_MODIFIERS, BoostPrecedence, CATCH_ALL_FIELD, CompileSettings, DEFAULT_BOOST_FACTOR,
    DEFAULT_BOOST_MODIFIER,
};
