//! Exhaustive search for the lowest-impurity split

use crate::core::Result;
use crate::data::{Column, Dataset, UniqueValues};
use crate::tree::impurity::gini_combined;
use crate::tree::SplitRule;
use crate::utils::midpoints;
use log::debug;

/// Best split found for a node, with the rows it sends each way
#[derive(Debug, Clone)]
pub struct SplitCandidate {
    pub column: String,
    pub rule: SplitRule,
    pub impurity: f64,
    pub left: Dataset,
    pub right: Dataset,
}

/// Every rule worth trying on a column, in ascending value order
fn candidate_rules(column: &Column) -> Vec<SplitRule> {
    match column.unique_sorted() {
        UniqueValues::Numeric(values) => midpoints(&values)
            .into_iter()
            .map(SplitRule::Threshold)
            .collect(),
        UniqueValues::Text(values) if values.len() > 1 => {
            values.into_iter().map(SplitRule::Category).collect()
        }
        UniqueValues::Text(_) => Vec::new(),
    }
}

/// Weighted impurity of splitting `labels` by `rule` on `column`.
/// `None` when one side would be empty.
fn score(column: &Column, labels: &[String], rule: &SplitRule) -> Option<f64> {
    let mut left: Vec<&str> = Vec::new();
    let mut right: Vec<&str> = Vec::new();
    for (row, label) in labels.iter().enumerate() {
        if rule.goes_left(column.value(row))? {
            left.push(label);
        } else {
            right.push(label);
        }
    }
    gini_combined(&left, &right)
}

/// Find the split of `dataset` with the lowest weighted Gini impurity of
/// `target`, over every other column and every candidate value.
///
/// Numeric columns are tried at the midpoints between consecutive distinct
/// values (`value < midpoint` goes left); text columns are tried on each
/// distinct category (`value == category` goes left). Splits leaving one
/// side empty are rejected. Only a strictly lower impurity replaces the
/// current best, so ties keep the first candidate in column order, then
/// value order.
///
/// Returns `Ok(None)` when no column offers a valid split.
pub fn find_best_split(
    dataset: &Dataset,
    target: &str,
    depth: usize,
) -> Result<Option<SplitCandidate>> {
    let labels = dataset.labels(target)?;
    let mut best: Option<(&Column, SplitRule, f64)> = None;

    for column in dataset.columns() {
        if column.name() == target {
            continue;
        }

        let rules = candidate_rules(column);
        if rules.is_empty() {
            debug!(
                "{depth}: skipping {} column {} with a single distinct value",
                column.kind(),
                column.name()
            );
            continue;
        }

        for rule in rules {
            let Some(impurity) = score(column, labels, &rule) else {
                continue;
            };
            if best.as_ref().map_or(true, |(_, _, g)| impurity < *g) {
                best = Some((column, rule, impurity));
            }
        }
    }

    Ok(best.map(|(column, rule, impurity)| {
        let (left, right) =
            dataset.partition(|row| rule.goes_left(column.value(row)) == Some(true));
        SplitCandidate {
            column: column.name().to_string(),
            rule,
            impurity,
            left,
            right,
        }
    }))
}
