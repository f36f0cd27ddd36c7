//! Serialization of the syntax tree into query DSL documents.
//!
//! One exhaustive function per variant set. Optional parts (match options,
//! script params) are omitted when absent, never written as null.

use serde_json::{Map, Value, json};

use crate::{
    ast::{FilterNode, QueryNode, ScoreFunction},
    options::Scalar,
};

/// Builds a single-key object.
fn object(key: &str, value: Value) -> Value {
    let mut map = Map::with_capacity(1);
    map.insert(key.to_string(), value);
    Value::Object(map)
}

/// Serializes a query.
pub fn query_to_value(node: &QueryNode) -> Value {
    match node {
        QueryNode::MatchAll => json!({ "match_all": {} }),
        QueryNode::Match {
            field,
            text,
            options,
        } => {
            let body = if options.is_empty() {
                Value::String(text.clone())
            } else {
                let mut body = Map::with_capacity(options.len() + 1);
                body.insert("query".to_string(), Value::String(text.clone()));
                for (key, value) in options {
                    body.insert(key.clone(), value.clone());
                }
                Value::Object(body)
            };
            object("match", object(field, body))
        }
        QueryNode::MultiMatch { fields, text } => json!({
            "multi_match": { "query": text, "fields": fields }
        }),
        QueryNode::Filtered { query, filter } => json!({
            "filtered": {
                "query": query_to_value(query),
                "filter": filter_to_value(filter),
            }
        }),
        QueryNode::FunctionScore { query, function } => {
            let mut body = Map::with_capacity(2);
            body.insert("query".to_string(), query_to_value(query));
            let (key, value) = function_to_entry(function);
            body.insert(key.to_string(), value);
            object("function_score", Value::Object(body))
        }
    }
}

/// Serializes a scoring function into its key and body within `function_score`.
fn function_to_entry(function: &ScoreFunction) -> (&'static str, Value) {
    match function {
        ScoreFunction::FieldValueFactor { field, modifier } => (
            "field_value_factor",
            json!({ "field": field, "modifier": modifier }),
        ),
        ScoreFunction::ScriptScore { script, params } => {
            let mut body = Map::with_capacity(2);
            body.insert("script".to_string(), Value::String(script.clone()));
            if let Some(params) = params {
                body.insert("params".to_string(), Value::Object(params.clone()));
            }
            ("script_score", Value::Object(body))
        }
        ScoreFunction::BoostFactor { filter, factor } => (
            "functions",
            json!([{ "filter": filter_to_value(filter), "boost_factor": factor }]),
        ),
    }
}

/// Serializes a filter.
pub fn filter_to_value(node: &FilterNode) -> Value {
    match node {
        FilterNode::Term { field, value } => object("term", object(field, value.to_value())),
        FilterNode::Terms { field, values } => {
            let values = values.iter().map(Scalar::to_value).collect();
            object("terms", object(field, Value::Array(values)))
        }
        FilterNode::And(children) => {
            object("and", children.iter().map(filter_to_value).collect())
        }
        FilterNode::Not(inner) => object("not", filter_to_value(inner)),
        FilterNode::Query(query) => object("query", query_to_value(query)),
        FilterNode::MatchAll => json!({ "match_all": {} }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_without_options_collapses_to_text() {
        let node = QueryNode::Match {
            field: "field_name".into(),
            text: "q".into(),
            options: Map::new(),
        };
        assert_eq!(query_to_value(&node), json!({ "match": { "field_name": "q" } }));
    }

    #[test]
    fn match_with_options_nests_query() {
        let mut options = Map::new();
        options.insert("operator".into(), json!("and"));
        let node = QueryNode::Match {
            field: "field_name".into(),
            text: "q".into(),
            options,
        };
        assert_eq!(
            query_to_value(&node),
            json!({ "match": { "field_name": { "query": "q", "operator": "and" } } })
        );
    }

    #[test]
    fn match_options_follow_query_key() {
        let mut options = Map::new();
        options.insert("operator".into(), json!("and"));
        options.insert("fuzziness".into(), json!(2));
        let node = QueryNode::Match {
            field: "name".into(),
            text: "q".into(),
            options,
        };
        let text = serde_json::to_string(&query_to_value(&node)).unwrap();
        assert_eq!(
            text,
            r#"{"match":{"name":{"query":"q","operator":"and","fuzziness":2}}}"#
        );
    }

    #[test]
    fn and_is_a_uniform_array() {
        let node = FilterNode::And(vec![
            FilterNode::Term {
                field: "status".into(),
                value: "published".into(),
            },
            FilterNode::not(FilterNode::Term {
                field: "company_id".into(),
                value: 1_i64.into(),
            }),
        ]);
        assert_eq!(
            filter_to_value(&node),
            json!({
                "and": [
                    { "term": { "status": "published" } },
                    { "not": { "term": { "company_id": 1 } } }
                ]
            })
        );
    }

    #[test]
    fn match_all_filter() {
        assert_eq!(
            filter_to_value(&FilterNode::MatchAll),
            json!({ "match_all": {} })
        );
    }

    #[test]
    fn script_score_omits_absent_params() {
        let node = QueryNode::function_score(
            QueryNode::MatchAll,
            ScoreFunction::ScriptScore {
                script: "_score".into(),
                params: None,
            },
        );
        assert_eq!(
            query_to_value(&node),
            json!({
                "function_score": {
                    "query": { "match_all": {} },
                    "script_score": { "script": "_score" }
                }
            })
        );
    }
}
