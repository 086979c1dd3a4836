//! Core types, configuration, and errors for nativegen.
//!
//! This crate provides the foundational types used across the workspace.
//!
//! # Architecture
//!
//! The core consists of:
//! - Strong domain types (`PackageName`, `BinaryName`, `MemoryPages`)
//! - Error hierarchy with contextual information
//! - Configuration for the type-definition assembler and loader generator
//! - CLI value types (`OutputFormat`, `ExitCode`)

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;
mod types;

pub mod cli;

pub use config::{
    DEFAULT_ASYNC_WORK_POOL_SIZE, DEFAULT_TYPE_DEF_HEADER, EnvVarNames, LoaderConfig,
    NativegenConfig, TypegenConfig,
};
pub use error::{Error, Result};
pub use types::{BinaryName, MemoryPages, PackageName};
