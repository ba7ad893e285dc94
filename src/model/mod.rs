//! Aggregation model: group per-file counter records by benchmark name.

pub mod summary;

pub use summary::{FieldStats, SummaryTable, summarize};

use crate::Result;
use crate::log::{Extractor, Field, FieldRecord, Value};
use anyhow::{Context, anyhow, bail};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Values of each field for one group, in file-visitation order.
pub type FieldSeries = BTreeMap<Field, Vec<Value>>;

/// Group key -> field -> one value per contributing file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AggregateTable {
    groups: BTreeMap<String, FieldSeries>,
}

impl AggregateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every present field of `rec` to `group`'s lists.
    ///
    /// An empty record leaves the table untouched; groups only exist once
    /// some file has contributed a value to them.
    pub fn push_record(&mut self, group: &str, rec: &FieldRecord) {
        if rec.is_empty() {
            return;
        }
        let series = self.groups.entry(group.to_string()).or_default();
        for (field, value) in rec.fields() {
            series.entry(field).or_default().push(value);
        }
    }

    pub fn group(&self, group: &str) -> Option<&FieldSeries> {
        self.groups.get(group)
    }

    pub fn values(&self, group: &str, field: Field) -> Option<&[Value]> {
        self.groups
            .get(group)
            .and_then(|s| s.get(&field))
            .map(Vec::as_slice)
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &FieldSeries)> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Strip the trailing job-id segment: "gcc.config.1234" -> "gcc.config".
///
/// Returns None when nothing would be left ("gcc", ".1234").
pub fn group_key(file_name: &str) -> Option<&str> {
    file_name
        .rsplit_once('.')
        .map(|(key, _job)| key)
        .filter(|key| !key.is_empty())
}

/// Walk `root` recursively, extract every log file and group the results.
///
/// Files inside one directory are visited in file-name order. The first
/// unreadable or malformed file aborts the whole walk.
pub fn collect_dir(root: &Path) -> Result<AggregateTable> {
    let meta = fs::metadata(root).with_context(|| format!("read results dir {}", root.display()))?;
    if !meta.is_dir() {
        bail!("results path is not a directory: {}", root.display());
    }

    let extractor = Extractor::new()?;
    let mut table = AggregateTable::new();
    let mut files = 0usize;

    for ent in WalkDir::new(root).sort_by_file_name() {
        let ent = ent.with_context(|| format!("walk results dir {}", root.display()))?;
        if !is_log_candidate(&ent) {
            continue;
        }

        let path = ent.path();
        tracing::debug!(path = %path.display(), "parsing log file");
        let rec = extractor
            .parse_file(path)
            .with_context(|| format!("collect counters from {}", path.display()))?;
        files += 1;

        let name = ent
            .file_name()
            .to_str()
            .ok_or_else(|| anyhow!("{:?} is a non-Unicode file name", path))?;

        match group_key(name) {
            Some(group) => table.push_record(group, &rec),
            None => {
                tracing::warn!(
                    path = %path.display(),
                    "file name has no job-id suffix; dropping its counters"
                );
            }
        }
    }

    tracing::info!(
        root = %root.display(),
        files,
        groups = table.len(),
        "collected simulation logs"
    );
    Ok(table)
}

/// Regular files, plus symlinks that do not point at a directory.
fn is_log_candidate(ent: &DirEntry) -> bool {
    let ft = ent.file_type();
    if ft.is_file() {
        return true;
    }
    // A dangling link is kept so the read fails loudly.
    ft.is_symlink() && !ent.path().is_dir()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn group_key_drops_only_last_segment() {
        assert_eq!(group_key("gcc.1234"), Some("gcc"));
        assert_eq!(group_key("gcc.config.1234"), Some("gcc.config"));
        assert_eq!(group_key("appA.run1.999.log"), Some("appA.run1.999"));
    }

    #[test]
    fn group_key_needs_two_segments() {
        assert_eq!(group_key("gcc"), None);
        assert_eq!(group_key(".1234"), None);
        assert_eq!(group_key(""), None);
    }

    #[test]
    fn push_record_appends_in_order() {
        let mut table = AggregateTable::new();
        table.push_record(
            "mcf",
            &FieldRecord {
                llc_access: Some(10),
                ipc: Some(0.5),
                ..Default::default()
            },
        );
        table.push_record(
            "mcf",
            &FieldRecord {
                llc_access: Some(20),
                ..Default::default()
            },
        );

        assert_eq!(
            table.values("mcf", Field::LlcAccess),
            Some(&[Value::Int(10), Value::Int(20)][..])
        );
        assert_eq!(
            table.values("mcf", Field::Ipc),
            Some(&[Value::Float(0.5)][..])
        );
        assert_eq!(table.values("mcf", Field::Cycles), None);
    }

    #[test]
    fn empty_record_creates_no_group() {
        let mut table = AggregateTable::new();
        table.push_record("lbm", &FieldRecord::default());
        assert!(table.is_empty());
        assert!(table.group("lbm").is_none());
    }

    #[test]
    fn table_serializes_as_nested_maps() {
        let mut table = AggregateTable::new();
        table.push_record(
            "gcc",
            &FieldRecord {
                bmpki: Some(2.5),
                cycles: Some(7),
                ..Default::default()
            },
        );
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"gcc":{"cycles":[7],"bMPKI":[2.5]}}"#);
    }
}
