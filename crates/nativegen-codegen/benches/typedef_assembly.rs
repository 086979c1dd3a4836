//! Performance benchmarks for nativegen-codegen.
//!
//! Covers:
//! - Declaration assembly across record counts (10 to 5000)
//! - Re-indentation of deeply nested bodies
//! - Loader generation for all targets
//!
//! Run with: cargo bench --package nativegen-codegen

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use nativegen_codegen::loader::{LoaderGenerator, LoaderTemplateParams};
use nativegen_codegen::typedef::{TypeDefAssembler, reindent};
use nativegen_core::{BinaryName, PackageName, TypegenConfig};
use std::fmt::Write;
use std::hint::black_box;

// ============================================================================
// Test Data Generators
// ============================================================================

/// Builds an intermediate file with structs, extensions, functions and
/// namespaced interfaces in shuffled order.
fn create_intermediate_file(count: usize) -> String {
    let mut content = String::new();
    for index in (0..count).rev() {
        let line = match index % 4 {
            0 => format!(
                r#"addon:{{"kind":"struct","name":"Class{index}","def":"constructor(value: number)"}}"#
            ),
            1 => format!(
                r#"addon:{{"kind":"impl","name":"Class{}","def":"get value(): number"}}"#,
                index - 1
            ),
            2 => format!(
                r#"{{"kind":"fn","name":"call{index}","def":"function call{index}(a: string): Promise<void>","js_doc":"/**\n * Calls {index}.\n */\n"}}"#
            ),
            _ => format!(
                r#"{{"kind":"interface","name":"Options{index}","def":"nested: {{\na: number\nb: string\n}}\nflag?: boolean","js_mod":"ns{}"}}"#,
                index % 7
            ),
        };
        let _ = writeln!(content, "{line}");
    }
    content
}

fn create_nested_body(depth: usize) -> String {
    let mut body = String::from("export interface Root {\n");
    for level in 0..depth {
        let _ = writeln!(body, "level{level}: {{");
    }
    body.push_str("leaf: number\n");
    for _ in 0..depth {
        body.push_str("}\n");
    }
    body.push('}');
    body
}

// ============================================================================
// Assembly Benchmarks
// ============================================================================

/// Benchmarks the full assembly pipeline for different record counts.
fn bench_assembly_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("assembly_scaling");
    let assembler = TypeDefAssembler::new(TypegenConfig::default());

    for count in [10, 100, 1000, 5000] {
        let content = create_intermediate_file(count);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &content, |b, content| {
            b.iter(|| {
                let result = assembler.assemble_str(black_box(content));
                assert!(result.is_ok());
            });
        });
    }

    group.finish();
}

/// Benchmarks re-indentation of nested bodies.
fn bench_reindent(c: &mut Criterion) {
    let mut group = c.benchmark_group("reindent");

    for depth in [2, 16, 128] {
        let body = create_nested_body(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &body, |b, body| {
            b.iter(|| reindent(black_box(body), 2));
        });
    }

    group.finish();
}

// ============================================================================
// Loader Benchmarks
// ============================================================================

/// Benchmarks rendering every loader target.
fn bench_loader_generation(c: &mut Criterion) {
    let generator = LoaderGenerator::new().expect("Generator should initialize");
    let exports: Vec<String> = (0..200).map(|i| format!("export{i}")).collect();
    let params = LoaderTemplateParams::new(
        BinaryName::new("addon").expect("valid binary name"),
        PackageName::new("@bench/addon").expect("valid package name"),
    )
    .with_exports(exports);

    c.bench_function("loader_generate_all", |b| {
        b.iter(|| {
            let result = generator.generate_all(black_box(&params));
            assert!(result.is_ok());
        });
    });
}

// ============================================================================
// Benchmark Configuration
// ============================================================================

criterion_group!(
    name = benches;
    config = Criterion::default()
        .sample_size(100)
        .measurement_time(std::time::Duration::from_secs(5))
        .warm_up_time(std::time::Duration::from_secs(2));
    targets =
        bench_assembly_scaling,
        bench_reindent,
        bench_loader_generation,
);

criterion_main!(benches);
