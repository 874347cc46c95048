//! Row storage and synthetic row generation.

pub mod dataset;
pub mod sample;

pub use dataset::*;
pub use sample::*;
