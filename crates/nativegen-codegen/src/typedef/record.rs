//! Type-definition records.
//!
//! One record describes one generated declaration. Records arrive as JSON
//! objects, one per line, written by the native bindings generator:
//!
//! ```text
//! {"kind":"struct","name":"Counter","def":"constructor()"}
//! my_crate:{"kind":"impl","name":"Counter","def":"increment(): void"}
//! ```
//!
//! # Examples
//!
//! ```
//! use nativegen_codegen::typedef::{TypeDefKind, parse_line};
//!
//! let record = parse_line(r#"addon:{"kind":"fn","name":"sum","def":"function sum(a: number, b: number): number"}"#, 1).unwrap();
//! assert_eq!(record.kind, TypeDefKind::Function);
//! assert_eq!(record.name, "sum");
//! ```

use nativegen_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeDefKind {
    /// Constant or other verbatim declaration
    #[serde(rename = "const")]
    Const,
    /// Numeric enum
    #[serde(rename = "enum")]
    Enum,
    /// Enum whose variants are string literals
    #[serde(rename = "string_enum")]
    StringEnum,
    /// Object interface
    #[serde(rename = "interface")]
    Interface,
    /// Type alias
    #[serde(rename = "type")]
    TypeAlias,
    /// Exported function (body carries the full signature)
    #[serde(rename = "fn")]
    Function,
    /// Class declaration
    #[serde(rename = "struct")]
    Struct,
    /// Extra class members merged into the struct of the same name
    #[serde(rename = "impl")]
    Extension,
}

impl TypeDefKind {
    /// Returns the wire tag used in the intermediate file.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Const => "const",
            Self::Enum => "enum",
            Self::StringEnum => "string_enum",
            Self::Interface => "interface",
            Self::TypeAlias => "type",
            Self::Function => "fn",
            Self::Struct => "struct",
            Self::Extension => "impl",
        }
    }

    /// Returns `true` for kinds that produce a runtime value and therefore
    /// appear in the module's export list.
    ///
    /// # Examples
    ///
    /// ```
    /// use nativegen_codegen::typedef::TypeDefKind;
    ///
    /// assert!(TypeDefKind::Struct.is_runtime_export());
    /// assert!(!TypeDefKind::Interface.is_runtime_export());
    /// ```
    #[must_use]
    pub const fn is_runtime_export(&self) -> bool {
        matches!(
            self,
            Self::Const | Self::Enum | Self::StringEnum | Self::Function | Self::Struct
        )
    }
}

impl fmt::Display for TypeDefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single generated declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefRecord {
    /// Record kind
    pub kind: TypeDefKind,
    /// Declared identifier
    pub name: String,
    /// External name re-exported as an alias when it differs from `name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    /// Pre-rendered declaration body
    #[serde(rename = "def", default)]
    pub definition_body: String,
    /// Leading documentation comment, emitted verbatim
    #[serde(rename = "js_doc", default, skip_serializing_if = "Option::is_none")]
    pub doc_comment: Option<String>,
    /// Namespace qualifier; `None` means top level
    #[serde(rename = "js_mod", default, skip_serializing_if = "Option::is_none")]
    pub module_path: Option<String>,
}

impl TypeDefRecord {
    /// Creates a top-level record without documentation.
    ///
    /// # Examples
    ///
    /// ```
    /// use nativegen_codegen::typedef::{TypeDefKind, TypeDefRecord};
    ///
    /// let record = TypeDefRecord::new(TypeDefKind::Interface, "Point", "x: number\ny: number");
    /// assert!(record.module_path.is_none());
    /// ```
    #[must_use]
    pub fn new(kind: TypeDefKind, name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            original_name: None,
            definition_body: body.into(),
            doc_comment: None,
            module_path: None,
        }
    }

    /// Sets the namespace qualifier.
    #[must_use]
    pub fn in_module(mut self, module_path: impl Into<String>) -> Self {
        self.module_path = Some(module_path.into());
        self
    }

    /// Sets the external alias name.
    #[must_use]
    pub fn with_original_name(mut self, original_name: impl Into<String>) -> Self {
        self.original_name = Some(original_name.into());
        self
    }

    /// Sets the documentation comment.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc_comment = Some(doc.into());
        self
    }

    /// Returns the alias name if it differs from `name`.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.original_name
            .as_deref()
            .filter(|original| *original != self.name)
    }

    /// Appends an extension body, newline-separated from any existing body.
    pub fn append_body(&mut self, extension: &str) {
        if !self.definition_body.is_empty() {
            self.definition_body.push('\n');
        }
        self.definition_body.push_str(extension);
    }
}

/// Decodes literal `\n` sequences left by the upstream writer.
fn unescape_newlines(text: &mut String) {
    if text.contains("\\n") {
        *text = text.replace("\\n", "\n");
    }
}

/// Parses one line of the intermediate file.
///
/// The line is either a bare JSON object or `<prefix>:<JSON object>`; the
/// prefix is discarded. `line_no` is 1-based and only used for error
/// reporting.
///
/// # Errors
///
/// Returns [`Error::ParseError`] if the line is not exactly one well-formed
/// JSON record.
pub fn parse_line(line: &str, line_no: usize) -> Result<TypeDefRecord> {
    let line = line.trim();

    let json = if line.starts_with('{') {
        line
    } else {
        let (_, rest) = line.split_once(':').ok_or_else(|| Error::ParseError {
            line: line_no,
            message: "expected a JSON object or `<prefix>:<JSON object>`".to_string(),
            source: None,
        })?;
        rest.trim_start()
    };

    let mut record: TypeDefRecord =
        serde_json::from_str(json).map_err(|e| Error::ParseError {
            line: line_no,
            message: e.to_string(),
            source: Some(e),
        })?;

    unescape_newlines(&mut record.definition_body);
    if let Some(doc) = record.doc_comment.as_mut() {
        unescape_newlines(doc);
    }

    Ok(record)
}
