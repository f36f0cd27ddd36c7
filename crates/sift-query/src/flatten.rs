//! Dotted-path flattening of nested option trees.
//!
//! `{ company: { id: 1 } }` becomes `[("company.id", 1)]`.

use crate::options::{OptionTree, OptionValue, Scalar};

/// A terminal value reached while flattening.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Leaf<'a> {
    /// A single value.
    Scalar(&'a Scalar),
    /// A collection of values.
    List(&'a [Scalar]),
}

/// Flattens a tree into `(dotted field, leaf)` pairs in traversal order.
///
/// Nested trees contribute their key as a path segment; an empty tree
/// contributes nothing.
pub fn flatten(tree: &OptionTree) -> Vec<(String, Leaf<'_>)> {
    let mut pairs = Vec::new();
    flatten_into(tree, "", &mut pairs);
    pairs
}

/// Recursive step of [`flatten`], accumulating into `pairs`.
fn flatten_into<'a>(tree: &'a OptionTree, prefix: &str, pairs: &mut Vec<(String, Leaf<'a>)>) {
    for (key, value) in tree.iter() {
        let path = format!("{prefix}{key}");
        match value {
            OptionValue::Tree(nested) => flatten_into(nested, &format!("{path}."), pairs),
            OptionValue::List(values) => pairs.push((path, Leaf::List(values))),
            OptionValue::Scalar(value) => pairs.push((path, Leaf::Scalar(value))),
        }
    }
}
