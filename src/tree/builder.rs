//! Recursive top-down tree induction

use crate::core::{ForestError, Result, TreeConfig};
use crate::data::Dataset;
use crate::tree::impurity::gini_index;
use crate::tree::split::find_best_split;
use crate::tree::{DecisionTree, Node};
use crate::utils::most_common;
use log::{log, Level};

/// Grows a tree greedily, one node at a time
pub struct TreeBuilder<'a> {
    config: &'a TreeConfig,
    target: &'a str,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(config: &'a TreeConfig, target: &'a str) -> Self {
        Self { config, target }
    }

    /// Train a tree on `dataset`.
    ///
    /// Fails when the dataset has no rows or the target column is missing or
    /// not a text column. A node that cannot be split further is never an
    /// error: it becomes a leaf.
    pub fn build(&self, dataset: &Dataset) -> Result<DecisionTree> {
        if dataset.is_empty() {
            return Err(ForestError::EmptyDataset);
        }
        dataset.labels(self.target)?;

        let root = self.grow(dataset, 0)?;
        Ok(DecisionTree::new(root, self.target))
    }

    fn grow(&self, dataset: &Dataset, depth: usize) -> Result<Node> {
        let labels = dataset.labels(self.target)?;

        if dataset.n_rows() < self.config.min_leaf
            || depth >= self.config.max_depth
            || gini_index(labels) == 0.0
        {
            return self.leaf(labels);
        }

        let Some(split) = find_best_split(dataset, self.target, depth)? else {
            return self.leaf(labels);
        };

        let level = if self.config.verbose {
            Level::Info
        } else {
            Level::Trace
        };
        log!(
            level,
            "{depth}: n = {}, best split on {} at {} => Gini {}",
            dataset.n_rows(),
            split.column,
            split.rule,
            split.impurity
        );

        let left = self.grow(&split.left, depth + 1)?;
        let right = self.grow(&split.right, depth + 1)?;

        Ok(Node::Split {
            column: split.column,
            rule: split.rule,
            impurity: split.impurity,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn leaf(&self, labels: &[String]) -> Result<Node> {
        most_common(labels)
            .map(|label| Node::leaf(label.as_str()))
            .ok_or(ForestError::EmptyDataset)
    }
}

impl DecisionTree {
    /// Train a tree predicting the text column `target` from all other columns
    pub fn fit(dataset: &Dataset, target: &str, config: &TreeConfig) -> Result<Self> {
        TreeBuilder::new(config, target).build(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Classifier;
    use crate::data::Column;
    use crate::tree::SplitRule;

    fn two_cluster_dataset() -> Dataset {
        let mut x = vec![1.0; 5];
        x.extend(vec![10.0; 5]);
        let mut y = vec!["a"; 5];
        y.extend(vec!["b"; 5]);
        Dataset::new(vec![Column::float("x", x), Column::text("y", y)]).unwrap()
    }

    fn loose_config() -> TreeConfig {
        TreeConfig::default().with_max_depth(5).with_min_leaf(1)
    }

    #[test]
    fn test_two_cluster_scenario() {
        let ds = two_cluster_dataset();
        let tree = DecisionTree::fit(&ds, "y", &loose_config()).unwrap();

        let expected = Node::Split {
            column: "x".to_string(),
            rule: SplitRule::Threshold(5.5),
            impurity: 0.0,
            left: Box::new(Node::leaf("a")),
            right: Box::new(Node::leaf("b")),
        };
        assert_eq!(tree.root(), &expected);

        let probe = Dataset::new(vec![Column::float("x", vec![2.0, 9.0])]).unwrap();
        assert_eq!(tree.predict(&probe.row(0).unwrap()).unwrap(), "a");
        assert_eq!(tree.predict(&probe.row(1).unwrap()).unwrap(), "b");
    }

    #[test]
    fn test_min_leaf_above_row_count_gives_single_leaf() {
        let ds = two_cluster_dataset();
        let config = loose_config().with_min_leaf(ds.n_rows() + 1);
        let tree = DecisionTree::fit(&ds, "y", &config).unwrap();

        assert!(tree.root().is_leaf());
        // 5/5 tie: "a" reaches the winning count first
        assert_eq!(tree.root(), &Node::leaf("a"));
    }

    #[test]
    fn test_zero_depth_gives_single_leaf() {
        let ds = two_cluster_dataset();
        let config = loose_config().with_max_depth(0);
        let tree = DecisionTree::fit(&ds, "y", &config).unwrap();
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn test_pure_target_gives_single_leaf() {
        let ds = Dataset::new(vec![
            Column::float("x", vec![1.0, 2.0, 3.0]),
            Column::text("y", vec!["same", "same", "same"]),
        ])
        .unwrap();
        let config = TreeConfig::default().with_max_depth(100).with_min_leaf(0);
        let tree = DecisionTree::fit(&ds, "y", &config).unwrap();
        assert_eq!(tree.root(), &Node::leaf("same"));
    }

    #[test]
    fn test_unsplittable_node_uses_majority() {
        let ds = Dataset::new(vec![
            Column::float("x", vec![1.0, 1.0, 1.0]),
            Column::text("y", vec!["n", "m", "m"]),
        ])
        .unwrap();
        let tree = DecisionTree::fit(&ds, "y", &loose_config()).unwrap();
        assert_eq!(tree.root(), &Node::leaf("m"));
    }

    #[test]
    fn test_depth_is_bounded() {
        let ds = Dataset::new(vec![
            Column::int("x", (0..16).collect()),
            Column::text("y", (0..16).map(|i| if i % 2 == 0 { "e" } else { "o" }).collect()),
        ])
        .unwrap();
        let config = TreeConfig::default().with_max_depth(2).with_min_leaf(1);
        let tree = DecisionTree::fit(&ds, "y", &config).unwrap();
        assert!(tree.depth() <= 2);
    }

    #[test]
    fn test_training_rows_predict_their_leaf() {
        let ds = Dataset::new(vec![
            Column::float("x", vec![0.5, 1.5, 2.5, 7.0, 8.0, 9.5]),
            Column::text("colour", vec!["r", "g", "r", "g", "r", "g"]),
            Column::text("y", vec!["lo", "lo", "lo", "hi", "hi", "hi"]),
        ])
        .unwrap();
        let tree = DecisionTree::fit(&ds, "y", &loose_config()).unwrap();

        for row in ds.rows() {
            let actual = match row.value("y") {
                Some(crate::data::Value::Text(label)) => label.to_string(),
                other => panic!("unexpected label {other:?}"),
            };
            assert_eq!(tree.predict(&row).unwrap(), actual);
        }
    }

    #[test]
    fn test_malformed_input() {
        let empty = Dataset::new(vec![Column::text("y", Vec::<String>::new())]).unwrap();
        assert!(matches!(
            DecisionTree::fit(&empty, "y", &loose_config()),
            Err(ForestError::EmptyDataset)
        ));

        let ds = two_cluster_dataset();
        assert!(matches!(
            DecisionTree::fit(&ds, "missing", &loose_config()),
            Err(ForestError::ColumnNotFound(_))
        ));
        assert!(matches!(
            DecisionTree::fit(&ds, "x", &loose_config()),
            Err(ForestError::TypeMismatch { .. })
        ));
    }
}
