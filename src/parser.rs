//! Loading sighting records from the JSON source or a previous CSV export.

use std::fs::File;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{ReportError, Result};
use crate::record::Record;

/// Decodes a JSON array of records from raw bytes.
///
/// # Errors
///
/// Returns [`ReportError::MalformedInput`] if the bytes are not a JSON array
/// of objects carrying all 28 record fields.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<Record>> {
    decode_records(bytes, "<memory>")
}

fn decode_records(bytes: &[u8], source: &str) -> Result<Vec<Record>> {
    serde_json::from_slice(bytes).map_err(|e| ReportError::MalformedInput {
        path: source.to_string(),
        reason: e.to_string(),
    })
}

/// Reads and decodes the JSON record collection at `path`.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    let bytes = std::fs::read(path).map_err(|e| ReportError::MalformedInput {
        path: path_str.clone(),
        reason: e.to_string(),
    })?;
    debug!(path = %path_str, bytes = bytes.len(), "Source read, decoding");

    let records = decode_records(&bytes, &path_str)?;

    info!(path = %path_str, records = records.len(), "Records loaded");
    Ok(records)
}

/// Reads records back from a 28-column export written by
/// [`write_records_csv`](crate::output::write_records_csv).
///
/// Columns are matched by header name; every schema field must be present.
pub fn load_records_csv(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let path_str = path.display().to_string();
    let malformed = |reason: String| ReportError::MalformedInput {
        path: path_str.clone(),
        reason,
    };

    let file = File::open(path).map_err(|e| malformed(e.to_string()))?;
    let mut rdr = csv::Reader::from_reader(file);
    let headers = rdr.headers().map_err(|e| malformed(e.to_string()))?.clone();

    for name in crate::record::HEADER {
        if !headers.iter().any(|h| h == name) {
            return Err(malformed(format!("missing column '{name}'")));
        }
    }

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row.map_err(|e| malformed(e.to_string()))?;
        let mut record = Record::default();
        for (name, value) in headers.iter().zip(row.iter()) {
            record.set(name, value.to_string());
        }
        records.push(record);
    }

    info!(path = %path_str, records = records.len(), "Records loaded from CSV");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::HEADER;

    fn record_json(id: &str, year: &str) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        for name in HEADER {
            object.insert(name.to_string(), serde_json::Value::from(""));
        }
        object.insert("id".into(), id.into());
        object.insert("year".into(), year.into());
        serde_json::Value::Object(object)
    }

    #[test]
    fn test_parse_empty_array() {
        let records = parse_records(b"[]").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_records(b"{not json");
        assert!(matches!(result, Err(ReportError::MalformedInput { .. })));
    }

    #[test]
    fn test_parse_object_instead_of_array() {
        let body = serde_json::to_vec(&record_json("1", "1990")).unwrap();
        assert!(parse_records(&body).is_err());
    }

    #[test]
    fn test_parse_preserves_order() {
        let body = serde_json::to_vec(&serde_json::json!([
            record_json("b", "~1970"),
            record_json("a", ""),
        ]))
        .unwrap();

        let records = parse_records(&body).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "b");
        assert_eq!(records[0].year, "~1970");
        assert_eq!(records[1].id, "a");
    }

    #[test]
    fn test_load_records_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sightings.json");
        let body = serde_json::to_vec(&serde_json::json!([record_json("9", "1954")])).unwrap();
        std::fs::write(&path, body).unwrap();

        let records = load_records(&path).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "9");
    }

    #[test]
    fn test_load_records_malformed_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "[{").unwrap();

        match load_records(&path) {
            Err(ReportError::MalformedInput { path: reported, .. }) => {
                assert_eq!(reported, path.display().to_string());
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_load_records_csv_reads_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.csv");
        let record = Record {
            id: "3".to_string(),
            credibility: "12".to_string(),
            strangeness: "9".to_string(),
            ..Default::default()
        };
        crate::output::write_records_csv(&path, [&record]).unwrap();

        let records = load_records_csv(&path).unwrap();

        assert_eq!(records, vec![record]);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_records("/nonexistent/hatch_data.json");
        assert!(matches!(result, Err(ReportError::MalformedInput { .. })));
    }

    #[test]
    fn test_load_csv_requires_full_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.csv");
        std::fs::write(&path, "id,year\n1,1990\n").unwrap();

        let result = load_records_csv(&path);

        assert!(matches!(result, Err(ReportError::MalformedInput { .. })));
    }
}
