//! Core traits for tree-based classifiers

use crate::core::Result;
use crate::data::RowView;

/// A trained model that maps one row to a class label
pub trait Classifier: Send + Sync {
    /// Predict the label of a single row
    ///
    /// Columns are looked up by name, so the row may carry extra columns
    /// (including the target) that the model never references.
    fn predict(&self, row: &RowView<'_>) -> Result<String>;

    /// Predict several rows, stopping at the first failure
    fn predict_batch(&self, rows: &[RowView<'_>]) -> Result<Vec<String>> {
        rows.iter().map(|row| self.predict(row)).collect()
    }
}
