//! Input/output helpers.
//!
//! - CSV ingest of raw scores (`ingest`)
//! - table exports (CSV) and summary export (JSON) (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
