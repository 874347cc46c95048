//! Score → label classification.
//!
//! The classifier is a small, pure value so that the dataset and the aggregator
//! share one instance and therefore one set of cut points.

pub mod classifier;

pub use classifier::*;
