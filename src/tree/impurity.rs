//! Gini impurity of label sets

use std::collections::BTreeMap;

/// Gini impurity `1 - Σ p_c²` of a label sequence.
///
/// A pure sequence scores exactly `0.0`. The empty sequence has no class
/// distribution and is defined to score `0.0` as well; split search never
/// scores empty partitions.
pub fn gini_index<S: AsRef<str>>(labels: &[S]) -> f64 {
    if labels.is_empty() {
        return 0.0;
    }

    // Ordered map keeps the summation order, and so the result, reproducible
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for label in labels {
        *counts.entry(label.as_ref()).or_insert(0) += 1;
    }

    let n = labels.len() as f64;
    counts
        .values()
        .map(|&count| {
            let p = count as f64 / n;
            p * (1.0 - p)
        })
        .sum()
}

/// Size-weighted Gini impurity of a two-way split.
///
/// Returns `None` when either side is empty: such a split separates nothing
/// and must not be scored.
pub fn gini_combined<S: AsRef<str>>(left: &[S], right: &[S]) -> Option<f64> {
    if left.is_empty() || right.is_empty() {
        return None;
    }
    let nl = left.len() as f64;
    let nr = right.len() as f64;
    Some(gini_index(left) * nl / (nl + nr) + gini_index(right) * nr / (nl + nr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_gini_pure_is_zero() {
        assert_eq!(gini_index(&["a"]), 0.0);
        assert_eq!(gini_index(&["blue", "blue", "blue", "blue"]), 0.0);
    }

    #[test]
    fn test_gini_known_values() {
        let left = ["red", "red", "red", "red", "red", "blue"];
        let right = ["blue", "blue", "blue", "blue"];

        assert_abs_diff_eq!(gini_index(&left), 0.27778, epsilon = 1e-4);
        assert_abs_diff_eq!(
            gini_combined(&left, &right).unwrap(),
            0.16667,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_gini_balanced_two_classes() {
        assert_abs_diff_eq!(gini_index(&["x", "y", "x", "y"]), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_gini_empty_input() {
        let empty: [&str; 0] = [];
        assert_eq!(gini_index(&empty), 0.0);
        assert_eq!(gini_combined(&empty, &["a"]), None);
        assert_eq!(gini_combined(&["a"], &empty), None);
    }

    #[test]
    fn test_gini_accepts_owned_labels() {
        let labels: Vec<String> = vec!["Yes".into(), "No".into()];
        assert_abs_diff_eq!(gini_index(&labels), 0.5, epsilon = 1e-12);
    }
}
