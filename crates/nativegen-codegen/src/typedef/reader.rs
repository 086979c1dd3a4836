//! Intermediate file reader.
//!
//! Parsing is all-or-nothing: the file is machine-generated, so a single
//! malformed line fails the whole read.

use crate::typedef::record::{TypeDefKind, TypeDefRecord, parse_line};
use nativegen_core::{Error, Result};
use std::cmp::Ordering;
use std::path::Path;

/// Orders structs before everything else, then by name.
///
/// The sort is stable, so records with equal names keep their input order.
pub fn sort_records(records: &mut [TypeDefRecord]) {
    records.sort_by(|a, b| {
        match (a.kind == TypeDefKind::Struct, b.kind == TypeDefKind::Struct) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => a.name.cmp(&b.name),
        }
    });
}

/// Parses every non-empty line of `content` and sorts the result.
///
/// # Errors
///
/// Returns [`Error::ParseError`] for the first malformed line.
///
/// # Examples
///
/// ```
/// use nativegen_codegen::typedef::{TypeDefKind, parse_records};
///
/// let records = parse_records(concat!(
///     r#"{"kind":"fn","name":"alpha","def":"function alpha(): void"}"#, "\n",
///     "\n",
///     r#"{"kind":"struct","name":"Zed","def":""}"#, "\n",
/// )).unwrap();
///
/// assert_eq!(records[0].kind, TypeDefKind::Struct);
/// assert_eq!(records[1].name, "alpha");
/// ```
pub fn parse_records(content: &str) -> Result<Vec<TypeDefRecord>> {
    let mut records = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| parse_line(line, index + 1))
        .collect::<Result<Vec<_>>>()?;

    sort_records(&mut records);

    tracing::debug!("Parsed {} type definition records", records.len());

    Ok(records)
}

/// Reads and parses an intermediate type-definition file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, or
/// [`Error::ParseError`] for the first malformed line.
pub fn read_records(path: &Path) -> Result<Vec<TypeDefRecord>> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!("Read intermediate type file {}", path.display());

    parse_records(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn names(records: &[TypeDefRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_sort_structs_first_then_by_name() {
        let mut records = vec![
            TypeDefRecord::new(TypeDefKind::Function, "b", ""),
            TypeDefRecord::new(TypeDefKind::Struct, "Zeta", ""),
            TypeDefRecord::new(TypeDefKind::Interface, "a", ""),
            TypeDefRecord::new(TypeDefKind::Struct, "Alpha", ""),
            TypeDefRecord::new(TypeDefKind::Extension, "Alpha", ""),
        ];
        sort_records(&mut records);
        assert_eq!(names(&records), ["Alpha", "Zeta", "Alpha", "a", "b"]);
        assert_eq!(records[2].kind, TypeDefKind::Extension);
    }

    #[test]
    fn test_sort_is_stable_for_equal_names() {
        let mut records = vec![
            TypeDefRecord::new(TypeDefKind::Extension, "A", "first"),
            TypeDefRecord::new(TypeDefKind::Extension, "A", "second"),
        ];
        sort_records(&mut records);
        assert_eq!(records[0].definition_body, "first");
        assert_eq!(records[1].definition_body, "second");
    }

    #[test]
    fn test_parse_records_skips_blank_lines() {
        let content = "\n{\"kind\":\"const\",\"name\":\"A\",\"def\":\"export const A: 1\"}\n   \n";
        let records = parse_records(content).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_parse_records_reports_physical_line() {
        let content = concat!(
            "{\"kind\":\"const\",\"name\":\"A\",\"def\":\"\"}\n",
            "\n",
            "{\"kind\":\"const\",\"name\":\"B\",\"def\":\"\"\n",
        );
        let err = parse_records(content).unwrap_err();
        assert!(err.is_parse_error());
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_parse_records_empty_input() {
        assert!(parse_records("").unwrap().is_empty());
    }

    #[test]
    fn test_read_records_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"crate_a:{{"kind":"fn","name":"b","def":"function b(): void"}}"#).unwrap();
        writeln!(file, r#"crate_a:{{"kind":"struct","name":"A","def":""}}"#).unwrap();

        let records = read_records(file.path()).unwrap();
        assert_eq!(names(&records), ["A", "b"]);
    }

    #[test]
    fn test_read_records_missing_file() {
        let err = read_records(Path::new("/nonexistent/type_def.tmp")).unwrap_err();
        assert!(err.is_io_error());
    }
}
