//! Code generation for native Node.js addons.
//!
//! Two independent pipelines:
//!
//! - [`typedef`]: assembles the intermediate type-definition records written
//!   by the bindings generator into a TypeScript declaration file;
//! - [`loader`]: renders the platform-detecting loader scripts and their
//!   WebAssembly fallbacks from Handlebars templates.
//!
//! # Examples
//!
//! ```
//! use nativegen_codegen::typedef::TypeDefAssembler;
//! use nativegen_core::TypegenConfig;
//!
//! let assembler = TypeDefAssembler::new(TypegenConfig::default());
//! let out = assembler
//!     .assemble_str(r#"{"kind":"struct","name":"Counter","def":"constructor()"}"#)
//!     .unwrap();
//!
//! assert!(out.dts.contains("export declare class Counter {\n  constructor()\n}"));
//! assert_eq!(out.exports, ["Counter"]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod common;
pub mod loader;
pub mod template_engine;
pub mod typedef;

pub use common::{GeneratedCode, GeneratedFile};
pub use loader::{LoaderGenerator, LoaderTarget, LoaderTemplateParams};
pub use template_engine::TemplateEngine;
pub use typedef::{AssembledDts, TypeDefAssembler};
