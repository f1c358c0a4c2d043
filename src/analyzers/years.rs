use std::collections::BTreeMap;
use std::num::ParseIntError;

use crate::error::{ReportError, Result};
use crate::record::Record;

/// Marker some sources put in front of an estimated year, e.g. `~1954`.
pub const APPROXIMATION_MARKER: char = '~';

/// Strips every approximation marker before parsing.
///
/// Returns `Ok(None)` for a year that is empty once normalized. A blank year
/// such as `" "` is not empty and fails to parse.
pub fn normalize_year(raw: &str) -> std::result::Result<Option<i64>, ParseIntError> {
    let stripped = raw.replace(APPROXIMATION_MARKER, "");
    if stripped.is_empty() {
        return Ok(None);
    }
    stripped.trim().parse().map(Some)
}

/// Counts records per numeric year, ascending by year.
///
/// Records with an empty year are skipped.
///
/// # Errors
///
/// Returns [`ReportError::FieldParse`] for a year that is non-empty after
/// normalization but not an integer.
pub fn frequency_by_year<'a, I>(records: I) -> Result<BTreeMap<i64, usize>>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut years = BTreeMap::new();

    for record in records {
        let year = normalize_year(&record.year).map_err(|source| ReportError::FieldParse {
            id: record.id.clone(),
            field: "year",
            value: record.year.clone(),
            source,
        })?;

        if let Some(year) = year {
            *years.entry(year).or_insert(0) += 1;
        }
    }

    Ok(years)
}
