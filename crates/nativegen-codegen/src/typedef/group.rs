//! Namespace grouping and extension merge.
//!
//! Runs as an explicit two-phase fold over the globally sorted records:
//!
//! 1. index every struct by name;
//! 2. fold each extension body into the indexed structs, then move the
//!    remaining records into their namespace group.
//!
//! Extensions are matched by name only, across namespaces. An extension
//! with no struct of the same name is dropped.

use crate::typedef::record::{TypeDefKind, TypeDefRecord};
use std::collections::{BTreeMap, HashMap};

/// Synthetic namespace key for records without a module path.
pub const TOP_LEVEL_NAMESPACE: &str = "__TOP_LEVEL_MODULE__";

/// Records grouped by namespace, iterated in lexicographic key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedRecords {
    groups: BTreeMap<String, Vec<TypeDefRecord>>,
}

impl GroupedRecords {
    /// Iterates `(namespace key, records)` pairs in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TypeDefRecord])> {
        self.groups
            .iter()
            .map(|(key, records)| (key.as_str(), records.as_slice()))
    }

    /// Returns the records of one namespace.
    #[must_use]
    pub fn get(&self, namespace: &str) -> Option<&[TypeDefRecord]> {
        self.groups.get(namespace).map(Vec::as_slice)
    }

    /// Returns the top-level records, if any.
    #[must_use]
    pub fn top_level(&self) -> Option<&[TypeDefRecord]> {
        self.get(TOP_LEVEL_NAMESPACE)
    }

    /// Number of namespace groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` when no records survived grouping.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Returns the namespace key for a record.
#[must_use]
pub fn namespace_key(record: &TypeDefRecord) -> &str {
    record.module_path.as_deref().unwrap_or(TOP_LEVEL_NAMESPACE)
}

/// Phase one: struct name to positions of every struct with that name.
fn index_structs(records: &[TypeDefRecord]) -> HashMap<String, Vec<usize>> {
    let mut index: HashMap<String, Vec<usize>> = HashMap::new();
    for (position, record) in records.iter().enumerate() {
        if record.kind == TypeDefKind::Struct {
            index.entry(record.name.clone()).or_default().push(position);
        }
    }
    index
}

/// Merges extensions into their structs and groups the result by namespace.
///
/// Expects records already ordered by [`sort_records`](crate::typedef::sort_records);
/// the order inside each group is the input order.
///
/// # Examples
///
/// ```
/// use nativegen_codegen::typedef::{TypeDefKind, TypeDefRecord, group_records};
///
/// let grouped = group_records(vec![
///     TypeDefRecord::new(TypeDefKind::Struct, "Counter", "constructor()"),
///     TypeDefRecord::new(TypeDefKind::Extension, "Counter", "increment(): void"),
/// ]);
///
/// let top = grouped.top_level().unwrap();
/// assert_eq!(top.len(), 1);
/// assert_eq!(top[0].definition_body, "constructor()\nincrement(): void");
/// ```
#[must_use]
pub fn group_records(mut records: Vec<TypeDefRecord>) -> GroupedRecords {
    let index = index_structs(&records);

    for position in 0..records.len() {
        if records[position].kind != TypeDefKind::Extension {
            continue;
        }

        match index.get(&records[position].name) {
            Some(targets) => {
                let body = records[position].definition_body.clone();
                for &target in targets {
                    records[target].append_body(&body);
                }
            }
            None => {
                tracing::debug!(
                    "Dropping extension '{}' with no matching struct",
                    records[position].name
                );
            }
        }
    }

    let mut groups: BTreeMap<String, Vec<TypeDefRecord>> = BTreeMap::new();
    for record in records {
        if record.kind == TypeDefKind::Extension {
            continue;
        }
        groups
            .entry(namespace_key(&record).to_string())
            .or_default()
            .push(record);
    }

    GroupedRecords { groups }
}
