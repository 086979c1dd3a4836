//! Declaration document assembly.
//!
//! Ties the pipeline together: sort, merge and group, render each record,
//! then stitch the namespace groups into one `.d.ts` document.
//!
//! # Examples
//!
//! ```
//! use nativegen_codegen::typedef::TypeDefAssembler;
//! use nativegen_core::TypegenConfig;
//!
//! let assembler = TypeDefAssembler::new(TypegenConfig::default());
//! let out = assembler
//!     .assemble_str(r#"{"kind":"fn","name":"sum","def":"function sum(a: number, b: number): number"}"#)
//!     .unwrap();
//!
//! assert!(out.dts.ends_with("export declare function sum(a: number, b: number): number\n"));
//! assert_eq!(out.exports, ["sum"]);
//! ```

use crate::common::{GeneratedCode, GeneratedFile};
use crate::typedef::group::{TOP_LEVEL_NAMESPACE, group_records};
use crate::typedef::reader::{parse_records, read_records, sort_records};
use crate::typedef::record::TypeDefRecord;
use crate::typedef::render::render_declaration;
use nativegen_core::{Result, TypegenConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Marker whose presence pulls the external handle declaration into the header.
const EXTERNAL_OBJECT_MARKER: &str = "ExternalObject<";

/// Opaque handle declaration appended to the header on demand.
pub const EXTERNAL_OBJECT_DECLARATION: &str = "
export declare class ExternalObject<T> {
  readonly '': {
    readonly '': unique symbol
    [K: symbol]: T
  }
}
";

/// Indent applied to members of a namespace block.
const NAMESPACE_MEMBER_INDENT: usize = 2;

/// Assembled declaration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssembledDts {
    /// Complete document, header included
    pub dts: String,
    /// Top-level runtime exports in emission order
    pub exports: Vec<String>,
}

impl AssembledDts {
    /// Wraps the document as a single generated file named `file_name`.
    #[must_use]
    pub fn into_generated(self, file_name: &str) -> GeneratedCode {
        let mut code = GeneratedCode::new();
        code.add_file(GeneratedFile::new(file_name, self.dts));
        code
    }
}

/// Builds `.d.ts` documents from type-definition records.
#[derive(Debug, Clone, Default)]
pub struct TypeDefAssembler {
    config: TypegenConfig,
}

impl TypeDefAssembler {
    /// Creates an assembler with the given rendering options.
    #[must_use]
    pub const fn new(config: TypegenConfig) -> Self {
        Self { config }
    }

    /// Returns the rendering options.
    #[must_use]
    pub const fn config(&self) -> &TypegenConfig {
        &self.config
    }

    /// Assembles a document from records in any order.
    #[must_use]
    pub fn assemble(&self, mut records: Vec<TypeDefRecord>) -> AssembledDts {
        sort_records(&mut records);

        let record_count = records.len();
        let grouped = group_records(records);
        let const_enum = self.config.const_enum;

        let mut exports = Vec::new();
        let mut sections = Vec::with_capacity(grouped.len());

        for (namespace, records) in grouped.iter() {
            if namespace == TOP_LEVEL_NAMESPACE {
                let rendered: Vec<String> = records
                    .iter()
                    .map(|record| {
                        if record.kind.is_runtime_export() {
                            exports.push(record.name.clone());
                            if let Some(alias) = record.alias() {
                                exports.push(alias.to_string());
                            }
                        }
                        render_declaration(record, const_enum, 0, false)
                    })
                    .collect();
                sections.push(rendered.join("\n\n"));
            } else {
                exports.push(namespace.to_string());

                let mut block = format!("export declare namespace {namespace} {{\n");
                for record in records {
                    block.push_str(&render_declaration(
                        record,
                        const_enum,
                        NAMESPACE_MEMBER_INDENT,
                        true,
                    ));
                    block.push('\n');
                }
                block.push('}');
                sections.push(block);
            }
        }

        let body = sections.join("\n\n") + "\n";

        let mut dts = self.config.header_text().to_string();
        if body.contains(EXTERNAL_OBJECT_MARKER) {
            dts.push_str(EXTERNAL_OBJECT_DECLARATION);
        }
        dts.push_str(&body);

        tracing::info!(
            "Assembled declarations: {} records, {} namespaces, {} exports",
            record_count,
            grouped.len(),
            exports.len()
        );

        AssembledDts { dts, exports }
    }

    /// Parses intermediate content and assembles it.
    ///
    /// # Errors
    ///
    /// Returns [`nativegen_core::Error::ParseError`] for a malformed line.
    pub fn assemble_str(&self, content: &str) -> Result<AssembledDts> {
        Ok(self.assemble(parse_records(content)?))
    }

    /// Reads an intermediate file and assembles it.
    ///
    /// # Errors
    ///
    /// Returns [`nativegen_core::Error::Io`] if the file cannot be read, or
    /// [`nativegen_core::Error::ParseError`] for a malformed line.
    pub fn assemble_file(&self, path: &Path) -> Result<AssembledDts> {
        tracing::info!("Assembling declarations from {}", path.display());
        Ok(self.assemble(read_records(path)?))
    }
}
