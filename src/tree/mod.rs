//! Classification decision trees
//!
//! Trees are grown greedily from the root: at every node the split with
//! the lowest weighted Gini impurity over all columns and candidate values
//! is chosen, until a depth, size or purity limit turns the node into a
//! leaf labelled with the majority class.

pub mod builder;
pub mod impurity;
pub mod node;
pub mod split;

pub use self::builder::*;
pub use self::impurity::*;
pub use self::node::*;
pub use self::split::*;
