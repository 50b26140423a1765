//! Decision tree model and prediction

use crate::core::{Classifier, ForestError, Result};
use crate::data::{RowView, Value};
use log::error;
use std::fmt;

/// Rule applied at a split node
#[derive(Debug, Clone, PartialEq)]
pub enum SplitRule {
    /// Numeric column: `value < threshold` goes left
    Threshold(f64),
    /// Text column: `value == category` goes left
    Category(String),
}

impl SplitRule {
    /// Whether `value` is routed to the left child, `None` on a kind mismatch
    pub fn goes_left(&self, value: Value<'_>) -> Option<bool> {
        match (self, value) {
            (SplitRule::Threshold(t), Value::Int(v)) => Some((v as f64) < *t),
            (SplitRule::Threshold(t), Value::Float(v)) => Some(v < *t),
            (SplitRule::Category(c), Value::Text(v)) => Some(v == c.as_str()),
            (SplitRule::Threshold(_), Value::Text(_))
            | (SplitRule::Category(_), Value::Int(_))
            | (SplitRule::Category(_), Value::Float(_)) => None,
        }
    }

    fn expected(&self) -> &'static str {
        match self {
            SplitRule::Threshold(_) => "numeric",
            SplitRule::Category(_) => "text",
        }
    }
}

impl fmt::Display for SplitRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitRule::Threshold(t) => write!(f, "{t}"),
            SplitRule::Category(c) => write!(f, "\"{c}\""),
        }
    }
}

/// Node of a binary decision tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Terminal node holding the predicted label
    Leaf { label: String },
    /// Decision node owning both children
    Split {
        column: String,
        rule: SplitRule,
        /// Weighted Gini impurity achieved by this split
        impurity: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn leaf(label: impl Into<String>) -> Self {
        Node::Leaf {
            label: label.into(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Number of edges on the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    pub fn n_leaves(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Split { left, right, .. } => left.n_leaves() + right.n_leaves(),
        }
    }

    /// Walk from this node to a leaf for the given row
    pub fn predict<'a>(&'a self, row: &RowView<'_>) -> Result<&'a str> {
        let mut node = self;
        loop {
            match node {
                Node::Leaf { label } => return Ok(label),
                Node::Split {
                    column,
                    rule,
                    left,
                    right,
                    ..
                } => {
                    let value = row
                        .value(column)
                        .ok_or_else(|| ForestError::ColumnNotFound(column.clone()))?;
                    node = match rule.goes_left(value) {
                        Some(true) => left.as_ref(),
                        Some(false) => right.as_ref(),
                        None => {
                            error!(
                                "Cannot evaluate split on {column}: row holds a {} value",
                                value.kind()
                            );
                            return Err(ForestError::TypeMismatch {
                                column: column.clone(),
                                expected: rule.expected().to_string(),
                                actual: value.kind().to_string(),
                            });
                        }
                    };
                }
            }
        }
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, level: usize) -> fmt::Result {
        let indent = "  ".repeat(level);
        match self {
            Node::Leaf { label } => writeln!(f, "{indent}--> {label}"),
            Node::Split {
                column,
                rule,
                left,
                right,
                ..
            } => {
                match rule {
                    SplitRule::Threshold(t) => writeln!(f, "{indent}{column} < {t:.2}")?,
                    SplitRule::Category(c) => writeln!(f, "{indent}{column} == \"{c}\"")?,
                }
                left.write_indented(f, level + 1)?;
                right.write_indented(f, level + 1)
            }
        }
    }
}

/// A trained classification tree
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    root: Node,
    target: String,
}

impl DecisionTree {
    pub fn new(root: Node, target: impl Into<String>) -> Self {
        Self {
            root,
            target: target.into(),
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Name of the label column the tree was trained on
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn n_leaves(&self) -> usize {
        self.root.n_leaves()
    }
}

impl Classifier for DecisionTree {
    fn predict(&self, row: &RowView<'_>) -> Result<String> {
        self.root.predict(row).map(str::to_owned)
    }
}

impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.write_indented(f, 0)
    }
}
