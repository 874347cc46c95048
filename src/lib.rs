//! `path-ratings` library crate.
//!
//! Classifies bike-path attribute scores into qualitative ratings, keeps a
//! derived Total Score per row, and summarizes a dataset by its mean row.
//!
//! The binary (`ratings`) is a thin wrapper around this library so that:
//!
//! - the rating engine is testable without spawning processes
//! - the engine (`domain`, `rating`, `data`, `report`) has no CLI or I/O coupling

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod rating;
pub mod report;
