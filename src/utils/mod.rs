//! Small helpers shared by tree induction and forest voting

use std::collections::HashMap;
use std::hash::Hash;

/// Most frequent item of a sequence.
///
/// Ties go to the item that first reached the winning count during a single
/// left-to-right scan, which keeps the result deterministic for a given
/// input order. Returns `None` for an empty sequence.
pub fn most_common<I, T>(items: I) -> Option<T>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash + Clone,
{
    let mut counts: HashMap<T, usize> = HashMap::new();
    let mut best: Option<(T, usize)> = None;

    for item in items {
        let count = counts.entry(item.clone()).or_insert(0);
        *count += 1;
        let count = *count;
        if best.as_ref().map_or(true, |(_, highest)| count > *highest) {
            best = Some((item, count));
        }
    }

    best.map(|(item, _)| item)
}

/// Midpoints between consecutive values of an ascending, de-duplicated slice
pub fn midpoints(sorted_unique: &[f64]) -> Vec<f64> {
    sorted_unique
        .windows(2)
        .map(|pair| pair[0] + (pair[1] - pair[0]) / 2.0)
        .collect()
}
