//! Relevance boosting envelopes.
//!
//! Three options adjust scoring, each with one function shape:
//!
//! - `boost_by`: a `field_value_factor` on a numeric field
//! - `boost_function`: a `script_score`
//! - `boost_where`: a `boost_factor` for documents matching the conditions
//!
//! Only one envelope is ever produced. When several options are present the
//! configured [`BoostPrecedence`] decides between applying the first one (in
//! the order above) and failing.

use log::debug;

use crate::{
    CompileError,
    ast::{FilterNode, QueryNode, ScoreFunction},
    filter::conditions,
    options::SearchOptions,
    settings::{BoostPrecedence, CompileSettings},
};

/// Wraps `base` in a function score envelope if a boosting option is present.
pub fn compile_relevance(
    base: QueryNode,
    options: &SearchOptions,
    settings: &CompileSettings,
) -> Result<QueryNode, CompileError> {
    let present = options.boost_options_present();
    if present.len() > 1 {
        match settings.boost_precedence {
            BoostPrecedence::Reject => {
                return Err(CompileError::AmbiguousBoost { options: present });
            }
            BoostPrecedence::FirstMatch => {
                debug!("applying {} and ignoring {:?}", present[0], &present[1..]);
            }
        }
    }

    let Some(function) = score_function(options, settings) else {
        return Ok(base);
    };
    Ok(QueryNode::function_score(base, function))
}

/// Picks the scoring function for the highest-precedence boosting option.
fn score_function(options: &SearchOptions, settings: &CompileSettings) -> Option<ScoreFunction> {
    if let Some(field) = &options.boost_by {
        return Some(ScoreFunction::FieldValueFactor {
            field: field.clone(),
            modifier: settings.boost_modifier.clone(),
        });
    }

    if let Some(function) = &options.boost_function {
        return Some(ScoreFunction::ScriptScore {
            script: function.script.clone(),
            params: function.params.clone(),
        });
    }

    let filter = FilterNode::join(conditions(options.boost_where.as_ref()))?;
    Some(ScoreFunction::BoostFactor {
        filter,
        factor: settings.boost_factor,
    })
}
