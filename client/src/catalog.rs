//! Catalog HTTP access.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`. Everything
//! degrades instead of failing: a table that errors is skipped, a
//! catalog that is down entirely yields the engine's placeholder
//! dataset, and a missing table list falls back to a built-in one.
//! The pure pieces — endpoint formatting, row mapping, the fallback
//! list — compile and test natively.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use engine::catalog::ResultsData;
#[cfg(any(test, feature = "hydrate"))]
use engine::catalog::TableRecord;
#[cfg(any(test, feature = "hydrate"))]
use engine::consts::MAX_ROWS_PER_TABLE;

/// Tables assumed when the catalog cannot even list its contents.
pub const FALLBACK_TABLES: [&str; 3] = ["orders", "customers", "products"];

#[cfg(any(test, feature = "hydrate"))]
fn tables_endpoint(base: &str) -> String {
    format!("{}/api/tables", base.trim_end_matches('/'))
}

#[cfg(any(test, feature = "hydrate"))]
fn rows_endpoint(base: &str, table: &str) -> String {
    format!(
        "{}/api/tables/{table}/rows?limit={MAX_ROWS_PER_TABLE}",
        base.trim_end_matches('/')
    )
}

/// Tag a table's raw rows with their source table name.
#[cfg(any(test, feature = "hydrate"))]
fn rows_to_records(table: &str, rows: Vec<serde_json::Value>) -> Vec<TableRecord> {
    rows.into_iter()
        .map(|fields| TableRecord { table: table.to_owned(), fields })
        .collect()
}

/// The built-in table list as owned strings.
#[must_use]
pub fn fallback_tables() -> Vec<String> {
    FALLBACK_TABLES.iter().map(|s| (*s).to_owned()).collect()
}

/// Fetch the catalog's table list. `None` when the catalog is
/// unreachable or answers with anything unusable.
pub async fn fetch_table_names(base: &str) -> Option<Vec<String>> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(&tables_endpoint(base))
            .send()
            .await
            .ok()?;
        if !resp.ok() {
            return None;
        }
        let names = resp.json::<Vec<String>>().await.ok()?;
        if names.is_empty() { None } else { Some(names) }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _unused = base;
        None
    }
}

/// Fetch rows for the named tables, skipping tables that fail and
/// substituting the placeholder dataset when every table fails.
///
/// The returned flag is `true` when the data is fabricated, so the
/// caller can surface a passive notice.
pub async fn fetch_records(base: &str, tables: &[String]) -> (ResultsData, bool) {
    #[cfg(feature = "hydrate")]
    {
        let mut records = Vec::new();
        let mut any_ok = false;
        for table in tables {
            match fetch_table_rows(base, table).await {
                Some(rows) => {
                    any_ok = true;
                    records.extend(rows_to_records(table, rows));
                }
                None => {
                    log::warn!("catalog fetch failed for table {table}; skipping");
                }
            }
        }
        if any_ok {
            (ResultsData::from_records(records), false)
        } else {
            (ResultsData::placeholder(tables), true)
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _unused = base;
        (ResultsData::placeholder(tables), true)
    }
}

#[cfg(feature = "hydrate")]
async fn fetch_table_rows(base: &str, table: &str) -> Option<Vec<serde_json::Value>> {
    let resp = gloo_net::http::Request::get(&rows_endpoint(base, table))
        .send()
        .await
        .ok()?;
    if !resp.ok() {
        return None;
    }
    resp.json::<Vec<serde_json::Value>>().await.ok()
}
