//! CSV loading with per-column type inference
//!
//! The first record is the header. A column becomes:
//! - `Int` if every non-empty cell parses as `i64`
//! - `Float` if every non-empty cell parses as `f64`
//! - `Text` otherwise
//!
//! Empty cells in numeric columns are replaced by the missing-value
//! sentinels from [`CsvOptions`]. A column with only empty cells is `Int`.

use crate::core::{ForestError, Result};
use crate::data::{Column, ColumnData, Dataset};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Options for reading CSV data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CsvOptions {
    /// Stored for empty cells of integer columns
    pub missing_int: i64,
    /// Stored for empty or NaN cells of float columns
    pub missing_float: f64,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            missing_int: i64::MAX,
            missing_float: f64::MAX,
        }
    }
}

impl CsvOptions {
    pub fn with_missing_int(mut self, missing_int: i64) -> Self {
        self.missing_int = missing_int;
        self
    }

    pub fn with_missing_float(mut self, missing_float: f64) -> Self {
        self.missing_float = missing_float;
        self
    }
}

/// Running type inference for one column
#[derive(Debug, Clone, Copy)]
struct InferStats {
    all_ints: bool,
    all_floats: bool,
}

impl InferStats {
    fn new() -> Self {
        Self {
            all_ints: true,
            all_floats: true,
        }
    }

    fn update(&mut self, value: &str) {
        if value.is_empty() {
            return;
        }
        if self.all_ints && value.parse::<i64>().is_err() {
            self.all_ints = false;
        }
        if self.all_floats && value.parse::<f64>().is_err() {
            self.all_floats = false;
        }
    }
}

impl Dataset {
    /// Load a dataset from a CSV file with a header row
    pub fn from_csv_file<P: AsRef<Path>>(path: P, options: &CsvOptions) -> Result<Self> {
        let file = File::open(path).map_err(ForestError::IoError)?;
        Self::from_csv_reader(file, options)
    }

    /// Load a dataset from any reader producing CSV with a header row
    pub fn from_csv_reader<R: Read>(reader: R, options: &CsvOptions) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let names: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();
        if names.is_empty() {
            return Err(ForestError::EmptyDataset);
        }

        let mut cells: Vec<Vec<String>> = vec![Vec::new(); names.len()];
        let mut stats = vec![InferStats::new(); names.len()];

        for record in reader.records() {
            let record = record?;
            for (index, value) in record.iter().enumerate() {
                stats[index].update(value);
                cells[index].push(value.to_owned());
            }
        }

        if cells[0].is_empty() {
            return Err(ForestError::EmptyDataset);
        }

        let columns = names
            .into_iter()
            .zip(cells)
            .zip(stats)
            .map(|((name, values), stats)| {
                Column::new(name, Self::finalize_column(values, stats, options))
            })
            .collect();

        Dataset::new(columns)
    }

    fn finalize_column(values: Vec<String>, stats: InferStats, options: &CsvOptions) -> ColumnData {
        if stats.all_ints {
            ColumnData::Int(
                values
                    .iter()
                    .map(|v| v.parse::<i64>().unwrap_or(options.missing_int))
                    .collect(),
            )
        } else if stats.all_floats {
            ColumnData::Float(
                values
                    .iter()
                    .map(|v| match v.parse::<f64>() {
                        Ok(x) if !x.is_nan() => x,
                        _ => options.missing_float,
                    })
                    .collect(),
            )
        } else {
            ColumnData::Text(values)
        }
    }
}
