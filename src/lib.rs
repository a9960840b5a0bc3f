//! gesture-collector library crate.
//!
//! Exposes the collector's components for the binary and for integration tests.

pub mod ascii;
pub mod camera;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod gesture;
pub mod input;
pub mod preprocess;
pub mod session;
pub mod signal;
pub mod terminal;
