//! High-level API for training and evaluating tree classifiers
//!
//! This module ties CSV loading, training and evaluation together for the
//! common case of a labelled CSV file.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rforest::api::{evaluate, load_labeled_csv};
//! use rforest::{CsvOptions, ForestConfig, RandomForest, TreeConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = load_labeled_csv("titanic.csv", "Survived", &CsvOptions::default())?;
//! let config = ForestConfig::default()
//!     .with_n_trees(200)
//!     .with_seed(42)
//!     .with_parallel(true)
//!     .with_tree(TreeConfig::default().with_max_depth(5).with_min_leaf(1));
//!
//! let forest = RandomForest::fit(&data, "Survived", &config)?;
//! let report = evaluate(&forest, &data, "Survived")?;
//! println!("Accuracy: {:.2}%", report.accuracy() * 100.0);
//! # Ok(())
//! # }
//! ```

use crate::core::{Classifier, Result};
use crate::data::{CsvOptions, Dataset};
use log::warn;
use std::collections::BTreeMap;
use std::path::Path;

/// Load a CSV file whose `target` column holds class labels.
///
/// A numeric target column (e.g. 0/1 flags) is converted to text labels.
pub fn load_labeled_csv<P: AsRef<Path>>(
    path: P,
    target: &str,
    options: &CsvOptions,
) -> Result<Dataset> {
    let mut dataset = Dataset::from_csv_file(path, options)?;
    let kind = dataset.require_column(target)?.kind();
    if kind.is_numeric() {
        warn!("Target column {target} is {kind}, treating its values as labels");
        dataset.to_text_column(target)?;
    }
    Ok(dataset)
}

/// Per-class counts from an evaluation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassMetrics {
    /// Rows whose actual label is this class
    pub support: usize,
    /// Rows predicted as this class
    pub predicted: usize,
    /// Rows both predicted and labelled as this class
    pub true_positives: usize,
}

impl ClassMetrics {
    /// TP / predicted
    pub fn precision(&self) -> f64 {
        if self.predicted == 0 {
            0.0
        } else {
            self.true_positives as f64 / self.predicted as f64
        }
    }

    /// TP / support
    pub fn recall(&self) -> f64 {
        if self.support == 0 {
            0.0
        } else {
            self.true_positives as f64 / self.support as f64
        }
    }
}

/// Outcome of scoring a classifier against labelled data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationReport {
    pub correct: usize,
    pub total: usize,
    /// Metrics for every label that was either seen or predicted
    pub classes: BTreeMap<String, ClassMetrics>,
}

impl EvaluationReport {
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

/// Predict every row of `dataset` and compare with its `target` labels
pub fn evaluate<C: Classifier + ?Sized>(
    model: &C,
    dataset: &Dataset,
    target: &str,
) -> Result<EvaluationReport> {
    let labels = dataset.labels(target)?;
    let mut report = EvaluationReport::default();

    for (row, actual) in dataset.rows().zip(labels) {
        let predicted = model.predict(&row)?;
        report.total += 1;
        report.classes.entry(actual.clone()).or_default().support += 1;
        let entry = report.classes.entry(predicted.clone()).or_default();
        entry.predicted += 1;
        if &predicted == actual {
            report.correct += 1;
            entry.true_positives += 1;
        }
    }

    Ok(report)
}

/// Convenience functions for quick operations
pub mod quick {
    use super::*;
    use crate::core::{ForestConfig, TreeConfig};
    use crate::forest::RandomForest;
    use crate::tree::DecisionTree;

    /// Train a single tree on a labelled CSV file
    pub fn train_tree_csv<P: AsRef<Path>>(
        path: P,
        target: &str,
        config: &TreeConfig,
    ) -> Result<DecisionTree> {
        let dataset = load_labeled_csv(path, target, &CsvOptions::default())?;
        DecisionTree::fit(&dataset, target, config)
    }

    /// Train a random forest on a labelled CSV file
    pub fn train_forest_csv<P: AsRef<Path>>(
        path: P,
        target: &str,
        config: &ForestConfig,
    ) -> Result<RandomForest> {
        let dataset = load_labeled_csv(path, target, &CsvOptions::default())?;
        RandomForest::fit(&dataset, target, config)
    }

    /// Accuracy of `model` on a labelled CSV file
    pub fn accuracy_csv<C, P>(model: &C, path: P, target: &str) -> Result<f64>
    where
        C: Classifier + ?Sized,
        P: AsRef<Path>,
    {
        let dataset = load_labeled_csv(path, target, &CsvOptions::default())?;
        Ok(evaluate(model, &dataset, target)?.accuracy())
    }
}
