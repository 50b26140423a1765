//! Decision tree and random forest classifiers in Rust
//!
//! Trees are induced greedily by Gini-impurity minimisation over numeric
//! (threshold) and categorical (equality) splits; forests bag trees trained
//! on bootstrap samples and predict by majority vote.

pub mod api;
pub mod core;
pub mod data;
pub mod forest;
pub mod tree;
pub mod utils;

// Re-export main types for convenience
pub use crate::api::{evaluate, ClassMetrics, EvaluationReport};
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::core::{ForestError, Result};
pub use crate::data::{Column, ColumnData, ColumnKind, CsvOptions, Dataset, RowView, Value};
pub use crate::forest::RandomForest;
pub use crate::tree::{DecisionTree, Node, SplitRule};

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
