//! Command implementations for the nativegen CLI.
//!
//! Each module parses its options, runs the operation, and prints a summary
//! in the requested output format.

pub mod common;
pub mod completions;
pub mod config;
pub mod loader;
pub mod typedef;
