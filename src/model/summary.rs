//! Per-group statistics over an aggregate table.

use crate::log::{Field, Value};
use crate::model::AggregateTable;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldStats {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl FieldStats {
    /// None for an empty list.
    pub fn from_values(values: &[Value]) -> Option<Self> {
        let (first, rest) = values.split_first()?;
        let first = first.as_f64();

        let (mut sum, mut min, mut max) = (first, first, first);
        for v in rest {
            let v = v.as_f64();
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }

        Some(Self {
            count: values.len(),
            mean: sum / values.len() as f64,
            min,
            max,
        })
    }
}

pub type SummaryTable = BTreeMap<String, BTreeMap<Field, FieldStats>>;

pub fn summarize(table: &AggregateTable) -> SummaryTable {
    table
        .groups()
        .map(|(group, series)| {
            let stats = series
                .iter()
                .filter_map(|(field, values)| {
                    FieldStats::from_values(values).map(|s| (*field, s))
                })
                .collect();
            (group.to_string(), stats)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::FieldRecord;
    use pretty_assertions::assert_eq;

    #[test]
    fn stats_over_mixed_values() {
        let s = FieldStats::from_values(&[Value::Int(2), Value::Int(6), Value::Int(4)]).unwrap();
        assert_eq!(
            s,
            FieldStats {
                count: 3,
                mean: 4.0,
                min: 2.0,
                max: 6.0,
            }
        );
        assert_eq!(FieldStats::from_values(&[]), None);
    }

    #[test]
    fn summarize_covers_every_group_and_field() {
        let mut table = AggregateTable::new();
        for (group, ipc) in [("gcc", 1.0), ("gcc", 2.0), ("mcf", 0.25)] {
            table.push_record(
                group,
                &FieldRecord {
                    ipc: Some(ipc),
                    ..Default::default()
                },
            );
        }

        let summary = summarize(&table);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary["gcc"][&Field::Ipc].mean, 1.5);
        assert_eq!(summary["gcc"][&Field::Ipc].count, 2);
        assert_eq!(summary["mcf"][&Field::Ipc].max, 0.25);
        assert!(!summary["mcf"].contains_key(&Field::Cycles));
    }
}
