//! In-memory tabular dataset with typed columns
//!
//! A [`Dataset`] is an ordered list of named columns that all hold the same
//! number of rows. Each column is integer, floating point or text. Tree
//! induction only ever reads a dataset or derives new ones from it through
//! [`Dataset::select_rows`] and [`Dataset::partition`].

use crate::core::{ForestError, Result};
use std::collections::HashSet;
use std::fmt;

/// Kind of values stored in a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Int,
    Float,
    Text,
}

impl ColumnKind {
    /// Integer and float columns are split on thresholds
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Int | ColumnKind::Float)
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnKind::Int => "int",
            ColumnKind::Float => "float",
            ColumnKind::Text => "text",
        };
        f.write_str(name)
    }
}

/// Column storage
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Int(Vec<i64>),
    Float(Vec<f64>),
    Text(Vec<String>),
}

/// A single value borrowed from a column
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Int(i64),
    Float(f64),
    Text(&'a str),
}

impl Value<'_> {
    pub fn kind(&self) -> ColumnKind {
        match self {
            Value::Int(_) => ColumnKind::Int,
            Value::Float(_) => ColumnKind::Float,
            Value::Text(_) => ColumnKind::Text,
        }
    }

    /// Numeric value promoted to f64, `None` for text
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Int(v) => Some(v as f64),
            Value::Float(v) => Some(v),
            Value::Text(_) => None,
        }
    }
}

/// Distinct values of a column in ascending order
#[derive(Debug, Clone, PartialEq)]
pub enum UniqueValues {
    Numeric(Vec<f64>),
    Text(Vec<String>),
}

/// Named, typed column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn int(name: impl Into<String>, values: Vec<i64>) -> Self {
        Self::new(name, ColumnData::Int(values))
    }

    pub fn float(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self::new(name, ColumnData::Float(values))
    }

    pub fn text<S: Into<String>>(name: impl Into<String>, values: Vec<S>) -> Self {
        Self::new(
            name,
            ColumnData::Text(values.into_iter().map(Into::into).collect()),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn kind(&self) -> ColumnKind {
        match self.data {
            ColumnData::Int(_) => ColumnKind::Int,
            ColumnData::Float(_) => ColumnKind::Float,
            ColumnData::Text(_) => ColumnKind::Text,
        }
    }

    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Int(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at `row`
    ///
    /// # Panics
    /// Panics if `row >= len()`
    pub fn value(&self, row: usize) -> Value<'_> {
        match &self.data {
            ColumnData::Int(v) => Value::Int(v[row]),
            ColumnData::Float(v) => Value::Float(v[row]),
            ColumnData::Text(v) => Value::Text(&v[row]),
        }
    }

    /// Distinct values, ascending for numeric columns and lexicographic for text.
    /// Integers are promoted to f64.
    pub fn unique_sorted(&self) -> UniqueValues {
        match &self.data {
            ColumnData::Int(v) => {
                let mut values = v.clone();
                values.sort_unstable();
                values.dedup();
                UniqueValues::Numeric(values.into_iter().map(|x| x as f64).collect())
            }
            ColumnData::Float(v) => {
                let mut values = v.clone();
                values.sort_by(|a, b| a.total_cmp(b));
                values.dedup();
                UniqueValues::Numeric(values)
            }
            ColumnData::Text(v) => {
                let mut values = v.clone();
                values.sort();
                values.dedup();
                UniqueValues::Text(values)
            }
        }
    }

    fn select(&self, indices: &[usize]) -> Column {
        let data = match &self.data {
            ColumnData::Int(v) => ColumnData::Int(indices.iter().map(|&i| v[i]).collect()),
            ColumnData::Float(v) => ColumnData::Float(indices.iter().map(|&i| v[i]).collect()),
            ColumnData::Text(v) => {
                ColumnData::Text(indices.iter().map(|&i| v[i].clone()).collect())
            }
        };
        Column::new(self.name.clone(), data)
    }
}

/// Ordered collection of equally long columns
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Dataset {
    /// Build a dataset, checking that names are unique and lengths agree
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let n_rows = columns.first().map(Column::len).unwrap_or(0);
        let mut seen = HashSet::new();

        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(ForestError::DuplicateColumn(column.name.clone()));
            }
            if column.len() != n_rows {
                return Err(ForestError::LengthMismatch {
                    column: column.name.clone(),
                    expected: n_rows,
                    actual: column.len(),
                });
            }
        }

        Ok(Self { columns, n_rows })
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Look up a column, failing with `ColumnNotFound`
    pub fn require_column(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| ForestError::ColumnNotFound(name.to_string()))
    }

    /// Text values of a label column
    pub fn labels(&self, target: &str) -> Result<&[String]> {
        let column = self.require_column(target)?;
        match &column.data {
            ColumnData::Text(values) => Ok(values),
            _ => Err(ForestError::TypeMismatch {
                column: target.to_string(),
                expected: ColumnKind::Text.to_string(),
                actual: column.kind().to_string(),
            }),
        }
    }

    /// New dataset made of the given rows, in order; repeats are allowed.
    ///
    /// # Panics
    /// Panics if an index is out of bounds
    pub fn select_rows(&self, indices: &[usize]) -> Dataset {
        Dataset {
            columns: self.columns.iter().map(|c| c.select(indices)).collect(),
            n_rows: indices.len(),
        }
    }

    /// Split rows into those matching `predicate` (left) and the rest (right)
    pub fn partition<F>(&self, predicate: F) -> (Dataset, Dataset)
    where
        F: Fn(usize) -> bool,
    {
        let (left, right): (Vec<usize>, Vec<usize>) =
            (0..self.n_rows).partition(|&i| predicate(i));
        (self.select_rows(&left), self.select_rows(&right))
    }

    /// Borrow one row
    pub fn row(&self, index: usize) -> Result<RowView<'_>> {
        if index >= self.n_rows {
            return Err(ForestError::RowOutOfBounds {
                index,
                len: self.n_rows,
            });
        }
        Ok(RowView {
            dataset: self,
            index,
        })
    }

    /// Iterate over all rows
    pub fn rows(&self) -> impl Iterator<Item = RowView<'_>> {
        (0..self.n_rows).map(move |index| RowView {
            dataset: self,
            index,
        })
    }

    /// Copy of the dataset without the named columns; unknown names are ignored
    pub fn drop_columns<S: AsRef<str>>(&self, names: &[S]) -> Dataset {
        let columns = self
            .columns
            .iter()
            .filter(|c| !names.iter().any(|n| n.as_ref() == c.name))
            .cloned()
            .collect();
        Dataset {
            columns,
            n_rows: self.n_rows,
        }
    }

    /// Turn a numeric column into text labels
    pub fn to_text_column(&mut self, name: &str) -> Result<()> {
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| ForestError::ColumnNotFound(name.to_string()))?;

        let text = match &column.data {
            ColumnData::Int(v) => v.iter().map(|x| x.to_string()).collect(),
            ColumnData::Float(v) => v.iter().map(|x| x.to_string()).collect(),
            ColumnData::Text(_) => return Ok(()),
        };
        column.data = ColumnData::Text(text);
        Ok(())
    }

    /// Rewrite every value of a text column
    pub fn map_text<F>(&mut self, name: &str, f: F) -> Result<()>
    where
        F: Fn(&str) -> String,
    {
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| ForestError::ColumnNotFound(name.to_string()))?;

        let kind = column.kind();
        match &mut column.data {
            ColumnData::Text(values) => {
                for value in values.iter_mut() {
                    *value = f(value);
                }
                Ok(())
            }
            _ => Err(ForestError::TypeMismatch {
                column: name.to_string(),
                expected: ColumnKind::Text.to_string(),
                actual: kind.to_string(),
            }),
        }
    }

    /// Human readable description of shape and column kinds
    pub fn summary(&self) -> String {
        let mut out = format!(
            "Dataset with {} rows, {} cols:\n",
            self.n_rows,
            self.columns.len()
        );
        for column in &self.columns {
            out.push_str(&format!("  {} {}\n", column.name, column.kind()));
        }
        out
    }
}

/// Read-only view of a single dataset row
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    dataset: &'a Dataset,
    index: usize,
}

impl<'a> RowView<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Value of the named column in this row
    pub fn value(&self, name: &str) -> Option<Value<'a>> {
        self.dataset.column(name).map(|c| c.value(self.index))
    }
}
