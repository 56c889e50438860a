//! Writers emitting query results in the serialization contract's shape.
//!
//! CSV output flattens each approach record into one row; JSON output keeps
//! the nested `neo` object. Both consume `ApproachRecord`s produced by the
//! database, so an unlinked approach fails the write instead of emitting a
//! placeholder row.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::db::NeoDatabase;
use crate::models::{ApproachRecord, CloseApproach};

/// Column order of the flattened CSV form.
pub const CSV_HEADER: [&str; 7] = [
    "datetime_utc",
    "distance_au",
    "velocity_km_s",
    "designation",
    "name",
    "diameter_km",
    "potentially_hazardous",
];

/// Write approaches to a CSV file, one flattened row per approach.
pub fn write_csv<'a, I>(db: &NeoDatabase, approaches: I, path: &Path) -> Result<()>
where
    I: IntoIterator<Item = &'a CloseApproach>,
{
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_csv_to(db, approaches, file)
}

/// Write approaches as CSV to any writer.
pub fn write_csv_to<'a, I, W>(db: &NeoDatabase, approaches: I, writer: W) -> Result<()>
where
    I: IntoIterator<Item = &'a CloseApproach>,
    W: Write,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for approach in approaches {
        let record = db.serialize_approach(approach)?;
        csv_writer.write_record(flatten(&record))?;
    }

    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Write approaches to a JSON file as an array of nested records.
pub fn write_json<'a, I>(db: &NeoDatabase, approaches: I, path: &Path) -> Result<()>
where
    I: IntoIterator<Item = &'a CloseApproach>,
{
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_json_to(db, approaches, file)
}

/// Write approaches as JSON to any writer.
pub fn write_json_to<'a, I, W>(db: &NeoDatabase, approaches: I, writer: W) -> Result<()>
where
    I: IntoIterator<Item = &'a CloseApproach>,
    W: Write,
{
    let records: Vec<ApproachRecord> = approaches
        .into_iter()
        .map(|approach| db.serialize_approach(approach))
        .collect::<Result<_, _>>()?;

    serde_json::to_writer_pretty(writer, &records).context("Failed to write JSON output")?;
    Ok(())
}

/// One CSV row: absent name becomes an empty field, unknown diameter
/// becomes `nan`, booleans are lowercase.
fn flatten(record: &ApproachRecord) -> [String; 7] {
    [
        record.datetime_utc.clone(),
        record.distance_au.to_string(),
        record.velocity_km_s.to_string(),
        record.neo.designation.clone(),
        record.neo.name.clone().unwrap_or_default(),
        record
            .neo
            .diameter_km
            .map(|d| d.to_string())
            .unwrap_or_else(|| "nan".to_string()),
        record.neo.potentially_hazardous.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FieldMap, NearEarthObject};
    use serde_json::json;

    fn fields(pairs: &[(&str, serde_json::Value)]) -> FieldMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn sample_db() -> NeoDatabase {
        let eros = NearEarthObject::from_fields(&fields(&[
            ("designation", json!("433")),
            ("name", json!("Eros")),
            ("diameter", json!("16.84")),
            ("hazardous", json!("N")),
        ]))
        .unwrap();
        let unnamed = NearEarthObject::from_fields(&fields(&[
            ("designation", json!("2015 AB")),
            ("hazardous", json!("Y")),
        ]))
        .unwrap();
        let approaches = vec![
            CloseApproach::from_fields(&fields(&[
                ("designation", json!("433")),
                ("time", json!("1900-Jan-01 00:00")),
                ("distance", json!("0.092")),
                ("velocity", json!("13.27")),
            ]))
            .unwrap(),
            CloseApproach::from_fields(&fields(&[
                ("designation", json!("2015 AB")),
                ("time", json!("2020-Mar-02 12:00")),
                ("distance", json!("0.05")),
                ("velocity", json!("22.1")),
            ]))
            .unwrap(),
        ];
        NeoDatabase::new(vec![eros, unnamed], approaches)
    }

    #[test]
    fn csv_output_is_flattened_with_sentinel_renderings() {
        let db = sample_db();
        let mut buffer = Vec::new();
        write_csv_to(&db, db.approaches(), &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "datetime_utc,distance_au,velocity_km_s,designation,name,diameter_km,potentially_hazardous"
        );
        assert_eq!(
            lines.next().unwrap(),
            "1900-01-01 00:00,0.092,13.27,433,Eros,16.84,false"
        );
        assert_eq!(
            lines.next().unwrap(),
            "2020-03-02 12:00,0.05,22.1,2015 AB,,nan,true"
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn json_output_keeps_nested_neo_and_full_precision() {
        let db = sample_db();
        let mut buffer = Vec::new();
        write_json_to(&db, db.approaches(), &mut buffer).unwrap();

        let records: Vec<ApproachRecord> = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].distance_au, 0.092);
        assert_eq!(records[0].velocity_km_s, 13.27);
        assert_eq!(records[0].neo.designation, "433");
        assert_eq!(records[1].neo.name, None);
        assert_eq!(records[1].neo.diameter_km, None);
        assert!(records[1].neo.potentially_hazardous);
    }

    #[test]
    fn writing_an_unlinked_approach_fails() {
        let orphan = CloseApproach::from_fields(&fields(&[
            ("designation", json!("99999")),
            ("distance", json!("0.5")),
            ("velocity", json!("10.0")),
        ]))
        .unwrap();
        let db = NeoDatabase::new(Vec::new(), vec![orphan]);

        let mut buffer = Vec::new();
        assert!(write_csv_to(&db, db.approaches(), &mut buffer).is_err());
    }
}
