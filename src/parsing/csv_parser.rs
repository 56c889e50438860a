use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;

use crate::models::{FieldMap, NearEarthObject};

/// Catalog column carrying the primary designation.
const COL_DESIGNATION: &str = "pdes";
/// Catalog columns mapped onto the model's field names.
const COLUMN_MAP: [(&str, &str); 3] = [
    ("name", "name"),
    ("diameter", "diameter"),
    ("pha", "hazardous"),
];

/// Parse NASA's NEO catalog CSV into `NearEarthObject`s.
///
/// Only the `pdes`, `name`, `diameter`, and `pha` columns are read; the
/// rest of the catalog is ignored. Rows are returned in file order.
pub fn parse_neos_csv(path: &Path) -> Result<Vec<NearEarthObject>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open NEO catalog {}", path.display()))?;
    parse_neos_reader(file).with_context(|| format!("Failed to parse NEO catalog {}", path.display()))
}

/// Parse NEO catalog CSV from any reader.
pub fn parse_neos_reader<R: Read>(reader: R) -> Result<Vec<NearEarthObject>> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader.headers().context("Failed to read CSV header")?.clone();
    let designation_idx = headers
        .iter()
        .position(|h| h == COL_DESIGNATION)
        .with_context(|| format!("NEO catalog is missing the `{}` column", COL_DESIGNATION))?;
    let mapped: Vec<(usize, &str)> = COLUMN_MAP
        .iter()
        .filter_map(|&(column, field)| {
            headers.iter().position(|h| h == column).map(|i| (i, field))
        })
        .collect();

    let mut neos = Vec::new();
    for (row_number, row) in csv_reader.records().enumerate() {
        let row = row.with_context(|| format!("Failed to read CSV row {}", row_number + 1))?;

        let mut fields = FieldMap::new();
        match row.get(designation_idx) {
            Some(designation) => {
                fields.insert(
                    "designation".to_string(),
                    Value::String(designation.to_string()),
                );
            }
            None => bail!("CSV row {} has no `{}` cell", row_number + 1, COL_DESIGNATION),
        }
        for &(idx, field) in &mapped {
            if let Some(cell) = row.get(idx) {
                fields.insert(field.to_string(), Value::String(cell.to_string()));
            }
        }

        let neo = NearEarthObject::from_fields(&fields)
            .with_context(|| format!("Invalid NEO record at CSV row {}", row_number + 1))?;
        neos.push(neo);
    }

    Ok(neos)
}
