//! TypeScript declaration assembly.
//!
//! Converts the line-oriented intermediate file written by the bindings
//! generator into a single `.d.ts` document plus the list of runtime
//! exports. The pipeline is:
//!
//! 1. [`read_records`] / [`parse_records`]: parse and globally sort;
//! 2. [`group_records`]: merge extensions into structs, group by namespace;
//! 3. [`render_declaration`]: render each record, re-indented by [`reindent`];
//! 4. [`TypeDefAssembler`]: stitch groups under the header.

mod assembler;
mod group;
mod indent;
mod reader;
mod record;
mod render;

pub use assembler::{AssembledDts, EXTERNAL_OBJECT_DECLARATION, TypeDefAssembler};
pub use group::{GroupedRecords, TOP_LEVEL_NAMESPACE, group_records, namespace_key};
pub use indent::reindent;
pub use reader::{parse_records, read_records, sort_records};
pub use record::{TypeDefKind, TypeDefRecord, parse_line};
pub use render::{export_keyword, render_declaration, string_enum_union};
