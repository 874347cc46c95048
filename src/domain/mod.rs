//! Domain types used throughout the engine.
//!
//! This module defines:
//!
//! - the closed column set (`Attribute`, `Column`) and rating buckets (`Level`, `Rating`)
//! - numeric and rated rows (`Row`, `RatedRow`, `RatedTable`, `AverageRow`)
//! - run configuration (`RunConfig`, `Source`, `SampleConfig`)

pub mod types;

pub use types::*;
