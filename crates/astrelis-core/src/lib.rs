//! Astrelis Core
//!
//! Shared logging and profiling setup for the Astrelis crates.

pub mod logging;
pub mod profiling;
