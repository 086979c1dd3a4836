//! Types shared by the declaration assembler and the loader generator.

pub mod types;

pub use types::{GeneratedCode, GeneratedFile};
