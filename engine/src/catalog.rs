//! Catalog record types and local degradation.
//!
//! The engine never talks to the catalog service itself — the host does —
//! but it owns the record shape, the per-table row cap, and the
//! placeholder dataset fabricated when the catalog is unreachable, so the
//! results surface can always render something.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::consts::{MAX_ROWS_PER_TABLE, PLACEHOLDER_ROWS_PER_TABLE};

/// One row fetched from (or fabricated for) a catalog table, tagged with
/// its source table name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRecord {
    /// Source table name.
    pub table: String,
    /// The row's fields as an open JSON object.
    pub fields: serde_json::Value,
}

/// The fetched dataset backing the results surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultsData {
    records: Vec<TableRecord>,
    /// Whether this dataset was fabricated locally after a total fetch
    /// failure.
    placeholder: bool,
}

impl ResultsData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dataset from fetched records, truncating each table's
    /// rows to the per-table cap while preserving arrival order.
    #[must_use]
    pub fn from_records(records: Vec<TableRecord>) -> Self {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut kept = Vec::with_capacity(records.len());
        for record in records {
            let count = counts.entry(record.table.clone()).or_insert(0);
            if *count < MAX_ROWS_PER_TABLE {
                *count += 1;
                kept.push(record);
            }
        }
        Self { records: kept, placeholder: false }
    }

    /// Fabricate a placeholder dataset for the requested table names.
    #[must_use]
    pub fn placeholder(tables: &[String]) -> Self {
        let records = tables
            .iter()
            .flat_map(|table| {
                (0..PLACEHOLDER_ROWS_PER_TABLE).map(move |i| TableRecord {
                    table: table.clone(),
                    fields: json!({
                        "row": i + 1,
                        "note": "sample data (catalog unavailable)",
                    }),
                })
            })
            .collect();
        Self { records, placeholder: true }
    }

    /// Records in arrival order.
    #[must_use]
    pub fn records(&self) -> &[TableRecord] {
        &self.records
    }

    /// Whether the dataset was fabricated locally.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
