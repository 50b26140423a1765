//! Core type definitions for tree and forest training

use crate::core::{ForestError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Configuration for growing a single decision tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Maximum depth of the tree (the root is depth 0)
    pub max_depth: usize,
    /// Nodes holding fewer rows than this become leaves
    pub min_leaf: usize,
    /// Log every split decision at info level
    pub verbose: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            min_leaf: 20,
            verbose: false,
        }
    }
}

impl TreeConfig {
    /// Set the maximum depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the minimum leaf size
    pub fn with_min_leaf(mut self, min_leaf: usize) -> Self {
        self.min_leaf = min_leaf;
        self
    }

    /// Enable or disable split tracing
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Configuration for a bagged ensemble of trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    /// Settings applied to every tree in the forest
    pub tree: TreeConfig,
    /// Number of trees to train
    pub n_trees: usize,
    /// Base seed for bootstrap sampling; drawn at random when absent
    pub seed: Option<u64>,
    /// Build trees concurrently
    pub parallel: bool,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            tree: TreeConfig::default(),
            n_trees: 100,
            seed: None,
            parallel: false,
        }
    }
}

impl ForestConfig {
    /// Set the number of trees
    pub fn with_n_trees(mut self, n_trees: usize) -> Self {
        self.n_trees = n_trees;
        self
    }

    /// Fix the bootstrap seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Switch between sequential and concurrent training
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Replace the per-tree settings
    pub fn with_tree(mut self, tree: TreeConfig) -> Self {
        self.tree = tree;
        self
    }

    /// Check the parameters before training
    pub fn validate(&self) -> Result<()> {
        if self.n_trees == 0 {
            return Err(ForestError::InvalidParameter(
                "n_trees must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Load a (possibly partial) configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(ForestError::IoError)?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| ForestError::ConfigError(e.to_string()))
    }

    /// Parse a (possibly partial) configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ForestError::ConfigError(e.to_string()))
    }
}
