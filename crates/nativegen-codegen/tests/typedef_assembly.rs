//! End-to-end tests for declaration assembly.
//!
//! Each test feeds intermediate-file lines through the full pipeline:
//! 1. parse and sort records
//! 2. merge extensions and group by namespace
//! 3. render and re-indent
//! 4. assemble the document and the export list

use nativegen_codegen::typedef::{
    EXTERNAL_OBJECT_DECLARATION, TypeDefAssembler, TypeDefKind, TypeDefRecord, parse_records,
};
use nativegen_core::{DEFAULT_TYPE_DEF_HEADER, TypegenConfig};
use std::io::Write;

fn assembler() -> TypeDefAssembler {
    TypeDefAssembler::new(TypegenConfig::default())
}

fn union_assembler() -> TypeDefAssembler {
    TypeDefAssembler::new(TypegenConfig {
        const_enum: false,
        ..TypegenConfig::default()
    })
}

/// Document without the default header.
fn body(dts: &str) -> &str {
    dts.strip_prefix(DEFAULT_TYPE_DEF_HEADER)
        .expect("default header present")
}

/// Names of rendered top-level declarations, in document order.
fn declared_names(dts: &str) -> Vec<String> {
    dts.lines()
        .filter_map(|line| {
            let rest = line
                .strip_prefix("export declare class ")
                .or_else(|| line.strip_prefix("export declare function "))
                .or_else(|| line.strip_prefix("export interface "))?;
            rest.split([' ', '(', '<']).next().map(str::to_string)
        })
        .collect()
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_structs_precede_other_kinds_regardless_of_input_order() {
    let input = [
        r#"{"kind":"fn","name":"alpha","def":"function alpha(): void"}"#,
        r#"{"kind":"interface","name":"Beta","def":"x: number"}"#,
        r#"{"kind":"struct","name":"Zebra","def":""}"#,
        r#"{"kind":"struct","name":"Apple","def":""}"#,
    ]
    .join("\n");

    let out = assembler().assemble_str(&input).unwrap();
    assert_eq!(
        declared_names(&out.dts),
        ["Apple", "Zebra", "Beta", "alpha"]
    );
}

#[test]
fn test_output_independent_of_input_order() {
    let lines = [
        r#"{"kind":"fn","name":"c","def":"function c(): void","js_mod":"ns"}"#,
        r#"{"kind":"struct","name":"B","def":"x: number"}"#,
        r#"{"kind":"impl","name":"B","def":"y(): void"}"#,
        r#"{"kind":"const","name":"A","def":"export const A: 1"}"#,
    ];
    let forward = assembler().assemble_str(&lines.join("\n")).unwrap();

    let mut reversed = lines;
    reversed.reverse();
    let backward = assembler().assemble_str(&reversed.join("\n")).unwrap();

    assert_eq!(forward, backward);
}

#[test]
fn test_namespaces_sorted_and_wrapped() {
    let input = [
        r#"{"kind":"fn","name":"z","def":"function z(): void","js_mod":"zeta"}"#,
        r#"{"kind":"fn","name":"a","def":"function a(): void","js_mod":"alpha"}"#,
        r#"{"kind":"fn","name":"top","def":"function top(): void"}"#,
    ]
    .join("\n");

    let out = assembler().assemble_str(&input).unwrap();
    assert_eq!(
        body(&out.dts),
        concat!(
            "export declare function top(): void\n",
            "\n",
            "export declare namespace alpha {\n",
            "  export function a(): void\n",
            "}\n",
            "\n",
            "export declare namespace zeta {\n",
            "  export function z(): void\n",
            "}\n",
        )
    );
    assert_eq!(out.exports, ["top", "alpha", "zeta"]);
}

// ============================================================================
// Extension merge
// ============================================================================

#[test]
fn test_extension_merged_into_struct() {
    let input = [
        r#"{"kind":"impl","name":"Counter","def":"increment(): void"}"#,
        r#"{"kind":"struct","name":"Counter","def":"constructor(start: number)"}"#,
    ]
    .join("\n");

    let out = assembler().assemble_str(&input).unwrap();
    assert_eq!(
        body(&out.dts),
        "export declare class Counter {\n  constructor(start: number)\n  increment(): void\n}\n"
    );
    assert_eq!(out.exports, ["Counter"]);
}

#[test]
fn test_unmatched_extension_emits_nothing() {
    let with_orphan = [
        r#"{"kind":"fn","name":"f","def":"function f(): void"}"#,
        r#"{"kind":"impl","name":"Missing","def":"ghost(): void"}"#,
    ]
    .join("\n");
    let without = r#"{"kind":"fn","name":"f","def":"function f(): void"}"#;

    let a = assembler().assemble_str(&with_orphan).unwrap();
    let b = assembler().assemble_str(without).unwrap();
    assert_eq!(a, b);
    assert!(!a.dts.contains("ghost"));
}

// ============================================================================
// Kind rendering
// ============================================================================

#[test]
fn test_string_enum_union_preserves_order() {
    let line = r#"{"kind":"string_enum","name":"Level","def":"High = 'high',\nLow = 'low',\nMid = 'mid'"}"#;

    let out = union_assembler().assemble_str(line).unwrap();
    let rendered = body(&out.dts);
    assert!(rendered.starts_with("export type Level ="));

    let literals: Vec<&str> = rendered
        .trim_end()
        .trim_start_matches("export type Level =")
        .trim_end_matches(';')
        .split('|')
        .map(str::trim)
        .collect();
    assert_eq!(literals, ["'high'", "'low'", "'mid'"]);
    assert!(!rendered.contains("High"));
}

#[test]
fn test_string_enum_const_mode() {
    let line = r#"{"kind":"string_enum","name":"Level","def":"High = 'high'"}"#;
    let out = assembler().assemble_str(line).unwrap();
    assert!(body(&out.dts).starts_with("export declare const enum Level {"));
    assert_eq!(out.exports, ["Level"]);
}

#[test]
fn test_struct_alias_declares_class_and_type() {
    let line = r#"{"kind":"struct","name":"JsImage","original_name":"Image","def":"width: number"}"#;

    let out = assembler().assemble_str(line).unwrap();
    let rendered = body(&out.dts);
    assert_eq!(rendered.matches("export declare class ").count(), 1);
    assert_eq!(rendered.matches("export type Image = JsImage").count(), 1);
    assert_eq!(out.exports, ["JsImage", "Image"]);
}

#[test]
fn test_nested_interface_indentation_inside_namespace() {
    let line = r#"{"kind":"interface","name":"Config","def":"server: {\nhost: string\nport: number\n}\nverbose: boolean","js_mod":"app"}"#;

    let out = assembler().assemble_str(line).unwrap();
    assert_eq!(
        body(&out.dts),
        concat!(
            "export declare namespace app {\n",
            "  export interface Config {\n",
            "    server: {\n",
            "      host: string\n",
            "      port: number\n",
            "    }\n",
            "    verbose: boolean\n",
            "  }\n",
            "}\n",
        )
    );
}

#[test]
fn test_doc_comment_kept_before_declaration() {
    let line = r#"{"kind":"fn","name":"sum","def":"function sum(a: number, b: number): number","js_doc":"/**\n * Adds two numbers.\n */\n"}"#;

    let out = assembler().assemble_str(line).unwrap();
    assert_eq!(
        body(&out.dts),
        "/**\n * Adds two numbers.\n */\nexport declare function sum(a: number, b: number): number\n"
    );
}

// ============================================================================
// Header
// ============================================================================

#[test]
fn test_external_object_declaration_added_once() {
    let input = [
        r#"{"kind":"fn","name":"open","def":"function open(): ExternalObject<Handle>"}"#,
        r#"{"kind":"fn","name":"close","def":"function close(h: ExternalObject<Handle>): void"}"#,
    ]
    .join("\n");

    let out = assembler().assemble_str(&input).unwrap();
    assert!(out.dts.starts_with(DEFAULT_TYPE_DEF_HEADER));
    assert_eq!(out.dts.matches(EXTERNAL_OBJECT_DECLARATION).count(), 1);
}

#[test]
fn test_custom_header() {
    let assembler = TypeDefAssembler::new(TypegenConfig {
        header: Some("/* my header */\n".to_string()),
        ..TypegenConfig::default()
    });
    let out = assembler
        .assemble(vec![TypeDefRecord::new(TypeDefKind::Const, "X", "export const X: 1")]);
    assert_eq!(out.dts, "/* my header */\nexport const X: 1\n");
}

// ============================================================================
// Input handling
// ============================================================================

#[test]
fn test_assemble_file_with_crate_prefixes() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, r#"core:{{"kind":"struct","name":"Engine","def":""}}"#).unwrap();
    writeln!(file).unwrap();
    writeln!(file, r#"plugin:{{"kind":"impl","name":"Engine","def":"start(): void"}}"#).unwrap();

    let out = assembler().assemble_file(file.path()).unwrap();
    assert!(out.dts.contains("export declare class Engine {\n  start(): void\n}"));
}

#[test]
fn test_malformed_line_fails_whole_document() {
    let input = [
        r#"{"kind":"fn","name":"ok","def":"function ok(): void"}"#,
        r#"{"kind":"fn","name":"broken""#,
    ]
    .join("\n");

    let err = assembler().assemble_str(&input).unwrap_err();
    assert!(err.is_parse_error());
    assert_eq!(err.line(), Some(2));
}

#[test]
fn test_parse_records_sorted_for_grouping() {
    let records = parse_records(concat!(
        r#"{"kind":"impl","name":"A","def":""}"#,
        "\n",
        r#"{"kind":"struct","name":"B","def":""}"#,
        "\n",
        r#"{"kind":"struct","name":"A","def":""}"#,
    ))
    .unwrap();

    let kinds: Vec<TypeDefKind> = records.iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        [TypeDefKind::Struct, TypeDefKind::Struct, TypeDefKind::Extension]
    );
    assert_eq!(records[0].name, "A");
}
