//! Local evaluation of approved research queries.
//!
//! Recipes name a spending category and a threshold; the answer is computed
//! from the owner's decrypted ledger and only the boolean leaves the
//! client, via the aggregator's anonymous-result endpoint.

use crate::aggregator::AggregatorClient;
use crate::error::ClientResult;
use crate::types::{AnalysisRecipe, Query};
use aegis_datasets::{average_spending_exceeds, parse_ledger_csv, DatasetError};
use tracing::debug;

/// Extracts the `category` and `threshold` parameters from a recipe.
///
/// A recipe without both, or with a non-numeric threshold, is an error —
/// guessing an answer would corrupt the aggregate.
pub fn recipe_parameters(recipe: &AnalysisRecipe) -> Result<(String, f64), DatasetError> {
    let lookup = |key: &str| {
        recipe
            .parameters
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.clone())
            .ok_or_else(|| DatasetError::Recipe(format!("missing parameter '{key}'")))
    };

    let category = lookup("category")?;
    let threshold_text = lookup("threshold")?;
    let threshold: f64 = threshold_text
        .parse()
        .map_err(|_| DatasetError::Recipe(format!("threshold '{threshold_text}' is not numeric")))?;

    Ok((category, threshold))
}

/// Evaluates a recipe against a decrypted ledger, without submitting.
pub fn evaluate_recipe(recipe: &AnalysisRecipe, csv_plaintext: &str) -> Result<bool, DatasetError> {
    let (category, threshold) = recipe_parameters(recipe)?;
    let records = parse_ledger_csv(csv_plaintext)?;
    Ok(average_spending_exceeds(&records, &category, threshold))
}

/// Answers an approved query: evaluate locally, submit the boolean, return
/// what was submitted.
pub async fn answer_pending_query(
    aggregator: &AggregatorClient,
    query: &Query,
    recipe: &AnalysisRecipe,
    csv_plaintext: &str,
) -> ClientResult<bool> {
    let outcome = evaluate_recipe(recipe, csv_plaintext)?;

    debug!(
        "answering query {} (recipe {}) with {}",
        query.id, recipe.id, outcome
    );
    aggregator
        .submit_anonymous_result(query.id, outcome)
        .await?;

    Ok(outcome)
}
