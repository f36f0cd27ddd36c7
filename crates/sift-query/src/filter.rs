//! Filter compilation for `only`, `except` and `includes`.
//!
//! Each flattened condition becomes one leaf filter: a collection compiles to a
//! `terms` membership filter, anything else to an exact `term` filter. Leaves
//! are combined in option order (`only`, then negated `except`, then the nested
//! `includes` query) and joined with `and` when there is more than one.
//!
//! Fields shared by `only` and `except` are not reconciled; each produces its
//! own filter.

use log::trace;

use crate::{
    CompileError, Compiler,
    ast::FilterNode,
    flatten::{Leaf, flatten},
    options::{OptionTree, SearchOptions},
};

/// Builds the leaf filter for one flattened condition.
pub fn classify(field: String, leaf: Leaf<'_>) -> FilterNode {
    match leaf {
        Leaf::Scalar(value) => FilterNode::Term {
            field,
            value: value.clone(),
        },
        Leaf::List(values) => FilterNode::Terms {
            field,
            values: values.to_vec(),
        },
    }
}

/// Flattens and classifies a condition tree, in traversal order.
pub fn conditions(tree: Option<&OptionTree>) -> Vec<FilterNode> {
    let Some(tree) = tree else {
        return Vec::new();
    };

    flatten(tree)
        .into_iter()
        .map(|(field, leaf)| {
            trace!("condition on {field}: {leaf:?}");
            classify(field, leaf)
        })
        .collect()
}

/// Compiles the filtering options into a single filter.
///
/// Returns `None` when no filtering option contributes a condition. The
/// `includes` query is compiled with the same compiler, so it accepts the full
/// option vocabulary.
pub fn compile_filters(
    compiler: &Compiler,
    options: &SearchOptions,
) -> Result<Option<FilterNode>, CompileError> {
    let mut filters = conditions(options.only.as_ref());
    filters.extend(
        conditions(options.except.as_ref())
            .into_iter()
            .map(FilterNode::not),
    );

    if let Some(includes) = &options.includes {
        let nested = compiler.compile(&includes.text, &includes.options)?;
        filters.push(FilterNode::Query(Box::new(nested)));
    }

    Ok(FilterNode::join(filters))
}
