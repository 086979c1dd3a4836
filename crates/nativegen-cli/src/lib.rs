//! nativegen CLI library.
//!
//! Argument definitions, command handlers and output formatters behind the
//! `nativegen` binary, exposed so they can be tested.

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::needless_pass_by_value)]

pub mod actions;
pub mod cli;
pub mod commands;
pub mod formatters;
pub mod runner;

pub use actions::ConfigAction;
pub use cli::{Cli, Commands};
