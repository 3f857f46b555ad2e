//! Raw tabular input.
//!
//! A [`RawTable`] is the loosely-typed, string-keyed form that upload
//! adapters hand to the normalizer. Header names are trimmed and
//! lower-cased on construction so that lookups are case and whitespace
//! insensitive.

use std::collections::HashMap;

use serde_json::Value;

/// Normalizes a header for lookup: trimmed and lower-cased.
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// One row of an uploaded table, keyed by normalized header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: HashMap<String, String>,
}

impl RawRow {
    /// Returns the trimmed cell under `header`, or `""` when absent.
    pub fn get(&self, header: &str) -> &str {
        self.cells
            .get(&normalize_header(header))
            .map(|v| v.trim())
            .unwrap_or("")
    }

    /// Sets a cell, normalizing the header.
    pub fn insert(&mut self, header: &str, value: impl Into<String>) {
        self.cells.insert(normalize_header(header), value.into());
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::default();
        for (k, v) in iter {
            row.insert(k.as_ref(), v);
        }
        row
    }
}

/// An uploaded table: ordered headers plus rows in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<RawRow>,
}

impl RawTable {
    /// Builds a table from a header row and positional data rows.
    ///
    /// Short rows are padded with empty cells; extra cells are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use stonebridge_pairing::models::RawTable;
    ///
    /// let table = RawTable::from_rows(
    ///     vec![" Location ".to_string(), "Employee".to_string()],
    ///     vec![vec!["Austin".to_string(), "Ann Smith".to_string()]],
    /// );
    /// assert_eq!(table.headers(), &["location", "employee"]);
    /// assert_eq!(table.rows()[0].get("EMPLOYEE"), "Ann Smith");
    /// ```
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
        let rows = rows
            .into_iter()
            .map(|cells| {
                headers
                    .iter()
                    .enumerate()
                    .map(|(i, h)| (h.as_str(), cells.get(i).cloned().unwrap_or_default()))
                    .collect()
            })
            .collect();
        Self { headers, rows }
    }

    /// Builds a table from JSON objects, stringifying scalar values.
    ///
    /// Headers are collected in first-seen order. `null` becomes an empty
    /// cell; nested arrays and objects keep their JSON text.
    pub fn from_json_records(records: &[serde_json::Map<String, Value>]) -> Self {
        let mut headers: Vec<String> = Vec::new();
        let mut rows = Vec::with_capacity(records.len());

        for record in records {
            let mut row = RawRow::default();
            for (key, value) in record {
                let header = normalize_header(key);
                if !headers.contains(&header) {
                    headers.push(header);
                }
                row.insert(key, json_cell(value));
            }
            rows.push(row);
        }

        Self { headers, rows }
    }

    /// Returns the normalized headers in input order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Returns the rows in input order.
    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    /// Returns true when the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

fn json_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
