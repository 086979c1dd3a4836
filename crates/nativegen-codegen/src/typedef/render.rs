//! Per-kind declaration rendering.

use crate::typedef::indent::reindent;
use crate::typedef::record::{TypeDefKind, TypeDefRecord};
use regex::Regex;
use std::sync::LazyLock;

// Everything up to and including the last `=` on a line.
static ENUM_ASSIGNMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".*=").expect("valid regex"));

/// Export modifier for declarations that carry one.
///
/// Members nested in a namespace block are already ambient, so they drop
/// the `declare`.
#[must_use]
pub const fn export_keyword(ambient: bool) -> &'static str {
    if ambient { "export" } else { "export declare" }
}

/// Rewrites a string-enum body into a union of its literal values.
///
/// # Examples
///
/// ```
/// use nativegen_codegen::typedef::string_enum_union;
///
/// assert_eq!(string_enum_union("A = 'a',\nB = 'b'"), " 'a'|\n 'b'");
/// ```
#[must_use]
pub fn string_enum_union(body: &str) -> String {
    ENUM_ASSIGNMENT_REGEX.replace_all(body, "").replace(',', "|")
}

/// Renders one record and re-indents it at `indent`.
///
/// `const_enum` selects `const enum` output for enums and string enums.
/// `ambient` is `true` for records nested inside a namespace block.
///
/// # Examples
///
/// ```
/// use nativegen_codegen::typedef::{TypeDefKind, TypeDefRecord, render_declaration};
///
/// let record = TypeDefRecord::new(TypeDefKind::Interface, "Point", "x: number");
/// assert_eq!(
///     render_declaration(&record, true, 0, false),
///     "export interface Point {\n  x: number\n}"
/// );
/// ```
#[must_use]
pub fn render_declaration(
    record: &TypeDefRecord,
    const_enum: bool,
    indent: usize,
    ambient: bool,
) -> String {
    let export = export_keyword(ambient);
    let name = &record.name;
    let body = &record.definition_body;

    let mut out = record.doc_comment.clone().unwrap_or_default();

    match record.kind {
        TypeDefKind::Interface => {
            out.push_str(&format!("export interface {name} {{\n{body}\n}}"));
        }
        TypeDefKind::TypeAlias => {
            out.push_str(&format!("export type {name} = \n{body}"));
        }
        TypeDefKind::Enum => {
            let enum_keyword = if const_enum { "const enum" } else { "enum" };
            out.push_str(&format!("{export} {enum_keyword} {name} {{\n{body}\n}}"));
        }
        TypeDefKind::StringEnum if const_enum => {
            out.push_str(&format!("{export} const enum {name} {{\n{body}\n}}"));
        }
        TypeDefKind::StringEnum => {
            let union = string_enum_union(body);
            out.push_str(&format!("export type {name} = {union};"));
        }
        TypeDefKind::Struct => {
            out.push_str(&format!("{export} class {name} {{\n{body}\n}}"));
            if let Some(alias) = record.alias() {
                out.push_str(&format!("\nexport type {alias} = {name}"));
            }
        }
        TypeDefKind::Function => {
            out.push_str(&format!("{export} {body}"));
        }
        // extensions are merged away before rendering; fall back to verbatim
        TypeDefKind::Const | TypeDefKind::Extension => out.push_str(body),
    }

    reindent(&out, indent)
}
