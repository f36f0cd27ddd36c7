//! Base match query compilation.

use serde_json::{Map, Value};

use crate::{CompileError, ast::QueryNode, options::FieldSpec, settings::CompileSettings};

/// Compiles query text and field scoping into the base query.
///
/// Rules, in order:
/// - blank text matches everything
/// - no `on` matches the catch-all field, without match options
/// - one field matches that field, with `match_options` merged in
/// - several fields become a multi-field match in the given order
pub fn compile_match(
    text: &str,
    on: Option<&FieldSpec>,
    match_options: &Map<String, Value>,
    settings: &CompileSettings,
) -> Result<QueryNode, CompileError> {
    if text.trim().is_empty() {
        return Ok(QueryNode::MatchAll);
    }

    let node = match on {
        None => QueryNode::Match {
            field: settings.catch_all_field.clone(),
            text: text.to_string(),
            options: Map::new(),
        },
        Some(FieldSpec::Single(field)) => single(field, text, match_options),
        Some(FieldSpec::Multi(fields)) => match fields.as_slice() {
            [] => return Err(CompileError::shape("on", "at least one field is required")),
            [field] => single(field, text, match_options),
            _ => QueryNode::MultiMatch {
                fields: fields.clone(),
                text: text.to_string(),
            },
        },
    };
    Ok(node)
}

/// Builds a single-field match.
fn single(field: &str, text: &str, match_options: &Map<String, Value>) -> QueryNode {
    QueryNode::Match {
        field: field.to_string(),
        text: text.to_string(),
        options: match_options.clone(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    /// Compiles with default settings and no match options.
    fn compile(text: &str, on: Option<&FieldSpec>) -> QueryNode {
        compile_match(text, on, &Map::new(), &CompileSettings::default()).unwrap()
    }

    #[test]
    fn blank_text_matches_all() {
        assert_eq!(compile("", None), QueryNode::MatchAll);
        assert_eq!(compile("   \t", Some(&"name".into())), QueryNode::MatchAll);
    }

    #[test]
    fn unscoped_text_uses_catch_all() {
        assert_eq!(
            compile("foo", None),
            QueryNode::Match {
                field: "_all".into(),
                text: "foo".into(),
                options: Map::new(),
            }
        );
    }

    #[test]
    fn catch_all_field_is_configurable() {
        let settings = CompileSettings {
            catch_all_field: "content".into(),
            ..CompileSettings::default()
        };
        let node = compile_match("foo", None, &Map::new(), &settings).unwrap();
        assert!(matches!(node, QueryNode::Match { field, .. } if field == "content"));
    }

    #[test]
    fn single_field_takes_match_options() {
        let mut options = Map::new();
        options.insert("operator".into(), json!("and"));
        let node = compile_match(
            "foo",
            Some(&"company.name".into()),
            &options,
            &CompileSettings::default(),
        )
        .unwrap();
        assert_eq!(
            node,
            QueryNode::Match {
                field: "company.name".into(),
                text: "foo".into(),
                options,
            }
        );
    }

    #[test]
    fn many_fields_multi_match() {
        let on = FieldSpec::Multi(vec!["name".into(), "description".into()]);
        assert_eq!(
            compile("foo", Some(&on)),
            QueryNode::MultiMatch {
                fields: vec!["name".into(), "description".into()],
                text: "foo".into(),
            }
        );
    }

    #[test]
    fn one_element_multi_is_single() {
        let on = FieldSpec::Multi(vec!["name".into()]);
        assert!(matches!(compile("foo", Some(&on)), QueryNode::Match { .. }));
    }

    #[test]
    fn empty_multi_is_an_error() {
        let on = FieldSpec::Multi(vec![]);
        let result = compile_match("foo", Some(&on), &Map::new(), &CompileSettings::default());
        assert!(result.is_err());
    }
}
