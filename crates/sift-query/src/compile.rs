//! Top-level query compilation.
//!
//! Sequences the stages: base match, filters (wrapped in `filtered` when
//! present), then relevance boosting.

use log::debug;
use serde_json::Value;

use crate::{
    CompileError,
    ast::QueryNode,
    filter::compile_filters,
    matching::compile_match,
    options::SearchOptions,
    relevance::compile_relevance,
    serialize::query_to_value,
    settings::CompileSettings,
};

/// Compiles search options into query documents.
///
/// Holds only settings; every call is independent and side-effect free, so a
/// compiler can be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    /// Settings applied to every compile.
    settings: CompileSettings,
}

impl Compiler {
    /// Creates a compiler with the given settings.
    pub fn new(settings: CompileSettings) -> Self {
        Self { settings }
    }

    /// Returns the compiler's settings.
    pub fn settings(&self) -> &CompileSettings {
        &self.settings
    }

    /// Compiles text and options into a query tree.
    pub fn compile(&self, text: &str, options: &SearchOptions) -> Result<QueryNode, CompileError> {
        let base = compile_match(
            text,
            options.on.as_ref(),
            &options.match_options,
            &self.settings,
        )?;
        debug!("base query for {text:?}: {base:?}");

        let query = match compile_filters(self, options)? {
            Some(filter) => {
                debug!("filtering with {filter:?}");
                QueryNode::filtered(base, filter)
            }
            None => base,
        };

        compile_relevance(query, options, &self.settings)
    }

    /// Compiles text and options into a query document.
    pub fn compile_document(
        &self,
        text: &str,
        options: &SearchOptions,
    ) -> Result<Value, CompileError> {
        self.compile(text, options).map(|node| query_to_value(&node))
    }
}

/// Compiles text and options into a query document with default settings.
pub fn compile(text: &str, options: &SearchOptions) -> Result<Value, CompileError> {
    Compiler::default().compile_document(text, options)
}
