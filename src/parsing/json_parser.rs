use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::models::{CloseApproach, FieldMap};

/// Table columns mapped onto the model's field names: primary designation,
/// calendar date of closest approach, nominal distance, relative velocity.
const COLUMN_MAP: [(&str, &str); 4] = [
    ("des", "designation"),
    ("cd", "time"),
    ("dist", "distance"),
    ("v_rel", "velocity"),
];

/// JPL's close-approach table: a columnar layout where `fields` names the
/// columns and each entry of `data` is one approach.
#[derive(Debug, Deserialize)]
struct CadTable {
    fields: Vec<String>,
    #[serde(default)]
    data: Vec<Vec<Value>>,
}

/// Parse JPL's close-approach JSON into `CloseApproach`es.
///
/// Only the `des`, `cd`, `dist`, and `v_rel` columns are read. Rows are
/// returned in file order.
pub fn parse_approaches_json(path: &Path) -> Result<Vec<CloseApproach>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read close-approach data {}", path.display()))?;
    parse_approaches_str(&text)
        .with_context(|| format!("Failed to parse close-approach data {}", path.display()))
}

/// Parse close-approach JSON from a string.
pub fn parse_approaches_str(text: &str) -> Result<Vec<CloseApproach>> {
    let table: CadTable =
        serde_json::from_str(text).context("Close-approach data is not a fields/data table")?;

    let mapped: Vec<(usize, &str)> = COLUMN_MAP
        .iter()
        .map(|&(column, field)| {
            table
                .fields
                .iter()
                .position(|f| f == column)
                .map(|i| (i, field))
                .with_context(|| format!("Close-approach table is missing the `{}` column", column))
        })
        .collect::<Result<_>>()?;

    let mut approaches = Vec::with_capacity(table.data.len());
    for (row_number, row) in table.data.iter().enumerate() {
        let mut fields = FieldMap::new();
        for &(idx, field) in &mapped {
            if let Some(value) = row.get(idx) {
                fields.insert(field.to_string(), value.clone());
            }
        }

        let approach = CloseApproach::from_fields(&fields)
            .with_context(|| format!("Invalid close-approach record at row {}", row_number))?;
        approaches.push(approach);
    }

    Ok(approaches)
}
