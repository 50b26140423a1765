//! Random forests: bagged decision trees with majority voting
//!
//! Every tree is trained on its own bootstrap sample (rows drawn uniformly
//! with replacement, as many as the original dataset holds). Tree `i` draws
//! its sample from an RNG seeded with `seed + i`, so a forest trained with a
//! fixed seed is identical whether its trees are built one after another or
//! concurrently.

use crate::core::{Classifier, ForestConfig, ForestError, Result};
use crate::data::{Dataset, RowView};
use crate::tree::DecisionTree;
use crate::utils::most_common;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::panic::{self, AssertUnwindSafe};

/// Resample `dataset` to the same number of rows, with replacement
pub fn bootstrap_sample<R: Rng>(dataset: &Dataset, rng: &mut R) -> Dataset {
    let n = dataset.n_rows();
    let indices: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
    dataset.select_rows(&indices)
}

/// Ensemble of independently trained decision trees
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    target: String,
    seed: Option<u64>,
}

impl RandomForest {
    /// Wrap already trained trees
    pub fn from_trees(target: impl Into<String>, trees: Vec<DecisionTree>) -> Result<Self> {
        if trees.is_empty() {
            return Err(ForestError::InvalidParameter(
                "a forest needs at least one tree".to_string(),
            ));
        }
        Ok(Self {
            trees,
            target: target.into(),
            seed: None,
        })
    }

    /// Train `config.n_trees` trees on bootstrap samples of `dataset`.
    ///
    /// Any failing tree aborts training; a forest never holds fewer trees
    /// than requested.
    pub fn fit(dataset: &Dataset, target: &str, config: &ForestConfig) -> Result<Self> {
        config.validate()?;
        if dataset.is_empty() {
            return Err(ForestError::EmptyDataset);
        }
        dataset.labels(target)?;

        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        info!(
            "Training {} trees ({}) on {} rows, seed {seed}",
            config.n_trees,
            if config.parallel { "parallel" } else { "sequential" },
            dataset.n_rows()
        );

        let build = |i: usize| -> Result<DecisionTree> {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
            let sample = bootstrap_sample(dataset, &mut rng);
            let tree = DecisionTree::fit(&sample, target, &config.tree)?;
            debug!(
                "Tree {i}: depth {}, {} leaves",
                tree.depth(),
                tree.n_leaves()
            );
            Ok(tree)
        };

        let trees = if config.parallel {
            (0..config.n_trees)
                .into_par_iter()
                .map(|i| {
                    panic::catch_unwind(AssertUnwindSafe(|| build(i))).unwrap_or_else(|cause| {
                        let message = cause
                            .downcast_ref::<&str>()
                            .map(|s| s.to_string())
                            .or_else(|| cause.downcast_ref::<String>().cloned())
                            .unwrap_or_else(|| "unknown panic".to_string());
                        Err(ForestError::TaskFailed(format!("tree {i}: {message}")))
                    })
                })
                .collect::<Result<Vec<_>>>()?
        } else {
            (0..config.n_trees).map(build).collect::<Result<Vec<_>>>()?
        };

        Ok(Self {
            trees,
            target: target.to_string(),
            seed: Some(seed),
        })
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Base seed used for bootstrap sampling, if the forest was trained here
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Labels predicted by each tree, in tree order
    pub fn votes(&self, row: &RowView<'_>) -> Result<Vec<String>> {
        self.trees.iter().map(|tree| tree.predict(row)).collect()
    }
}

impl Classifier for RandomForest {
    /// Majority vote over all trees
    fn predict(&self, row: &RowView<'_>) -> Result<String> {
        let votes = self.votes(row)?;
        most_common(votes).ok_or_else(|| {
            ForestError::InvalidParameter("cannot vote with an empty forest".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TreeConfig;
    use crate::data::Column;
    use crate::tree::Node;

    fn noisy_dataset() -> Dataset {
        let x: Vec<f64> = (0..40).map(|i| i as f64 * 0.5).collect();
        let port: Vec<&str> = (0..40).map(|i| ["S", "C", "Q"][i % 3]).collect();
        let y: Vec<&str> = (0..40)
            .map(|i| if (i < 20) ^ (i % 7 == 0) { "No" } else { "Yes" })
            .collect();
        Dataset::new(vec![
            Column::float("x", x),
            Column::text("port", port),
            Column::text("y", y),
        ])
        .unwrap()
    }

    fn config() -> ForestConfig {
        ForestConfig::default()
            .with_n_trees(12)
            .with_seed(7)
            .with_tree(TreeConfig::default().with_max_depth(4).with_min_leaf(1))
    }

    #[test]
    fn test_bootstrap_sample_shape() {
        let ds = noisy_dataset();
        let mut rng = StdRng::seed_from_u64(1);
        let sample = bootstrap_sample(&ds, &mut rng);

        assert_eq!(sample.n_rows(), ds.n_rows());
        assert_eq!(sample.column_names(), ds.column_names());
    }

    #[test]
    fn test_bootstrap_sample_is_seeded() {
        let ds = noisy_dataset();
        let a = bootstrap_sample(&ds, &mut StdRng::seed_from_u64(3));
        let b = bootstrap_sample(&ds, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_forest_has_requested_tree_count() {
        let ds = noisy_dataset();
        let forest = RandomForest::fit(&ds, "y", &config()).unwrap();
        assert_eq!(forest.len(), 12);
        assert_eq!(forest.seed(), Some(7));
        assert_eq!(forest.target(), "y");
    }

    #[test]
    fn test_sequential_and_parallel_match() {
        let ds = noisy_dataset();
        let sequential = RandomForest::fit(&ds, "y", &config()).unwrap();
        let parallel = RandomForest::fit(&ds, "y", &config().with_parallel(true)).unwrap();

        assert_eq!(sequential.trees(), parallel.trees());
        for row in ds.rows() {
            assert_eq!(
                sequential.predict(&row).unwrap(),
                parallel.predict(&row).unwrap()
            );
        }
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let ds = noisy_dataset();
        let a = RandomForest::fit(&ds, "y", &config()).unwrap();
        let b = RandomForest::fit(&ds, "y", &config()).unwrap();
        assert_eq!(a.trees(), b.trees());
    }

    #[test]
    fn test_identical_trees_vote_like_one_tree() {
        let ds = noisy_dataset();
        let tree_config = TreeConfig::default().with_max_depth(3).with_min_leaf(1);
        let tree = DecisionTree::fit(&ds, "y", &tree_config).unwrap();
        let forest = RandomForest::from_trees("y", vec![tree.clone(); 5]).unwrap();

        for row in ds.rows() {
            assert_eq!(forest.predict(&row).unwrap(), tree.predict(&row).unwrap());
        }
    }

    #[test]
    fn test_vote_tie_break() {
        let trees = ["x", "y", "y", "x"]
            .iter()
            .map(|label| DecisionTree::new(Node::leaf(*label), "y"))
            .collect();
        let forest = RandomForest::from_trees("y", trees).unwrap();
        let ds = noisy_dataset();
        let row = ds.row(0).unwrap();

        assert_eq!(forest.votes(&row).unwrap(), vec!["x", "y", "y", "x"]);
        assert_eq!(forest.predict(&row).unwrap(), "y");
    }

    #[test]
    fn test_invalid_forest_parameters() {
        let ds = noisy_dataset();
        assert!(matches!(
            RandomForest::fit(&ds, "y", &config().with_n_trees(0)),
            Err(ForestError::InvalidParameter(_))
        ));
        assert!(matches!(
            RandomForest::fit(&ds, "nope", &config()),
            Err(ForestError::ColumnNotFound(_))
        ));
        assert!(RandomForest::from_trees("y", Vec::new()).is_err());
    }

    #[test]
    fn test_prediction_error_propagates() {
        let ds = noisy_dataset();
        let forest = RandomForest::fit(&ds, "y", &config()).unwrap();
        let probe = Dataset::new(vec![Column::text("unrelated", vec!["?"])]).unwrap();
        assert!(forest.predict(&probe.row(0).unwrap()).is_err());
    }
}
