//! Tabular data: typed columns, row views and CSV loading
//!
//! This module provides the dataset abstraction consumed by tree induction
//! and the CSV reader used by the command-line driver.

pub mod csv;
pub mod dataset;

pub use self::csv::*;
pub use self::dataset::*;
