//! CSV exports and markdown reports.
//!
//! All CSV files share one dialect: comma separated, every field quoted,
//! CRLF line endings. Rows are projected before the file is opened, so a
//! record that fails to project never leaves a half-written artifact behind.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::debug;

use crate::analyzers::tags::rank_tags;
use crate::error::{ReportError, Result};
use crate::record::{HEADER, Record, clean_description};

/// Columns of the top-K table, in display order.
const TOP_K_FIELDS: [&str; 9] = [
    "id",
    "location",
    "year",
    "month",
    "day",
    "credibility",
    "strangeness",
    "description",
    "ref",
];

const TOP_K_HEADER: &str =
    "| ID | LOCATION | YEAR | MONTH | DAY | CREDIBILITY | STRANGENESS | DESCRIPTION | REFERENCE |";
const TOP_K_RULE: &str =
    "|----| -------- | ---- | ----- | --- | ----------- | ----------- | ----------- | --------- |";

fn csv_writer(path: &Path) -> Result<csv::Writer<File>> {
    let file = File::create(path).map_err(|source| ReportError::Io {
        path: path.display().to_string(),
        source,
    })?;

    Ok(WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::CRLF)
        .from_writer(file))
}

fn write_rows<R>(path: &Path, header: &[&str], rows: R) -> Result<()>
where
    R: IntoIterator,
    R::Item: IntoIterator,
    <R::Item as IntoIterator>::Item: AsRef<[u8]>,
{
    let csv_err = |source| ReportError::Csv {
        path: path.display().to_string(),
        source,
    };

    let mut writer = csv_writer(path)?;
    writer.write_record(header).map_err(csv_err)?;
    for row in rows {
        writer.write_record(row).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| ReportError::Io {
        path: path.display().to_string(),
        source,
    })?;

    Ok(())
}

/// Writes records as a full 28-column export with a header row.
///
/// Returns the number of data rows written.
pub fn write_records_csv<'a, I>(path: impl AsRef<Path>, records: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a Record>,
{
    let path = path.as_ref();
    let rows = records
        .into_iter()
        .map(Record::export_row)
        .collect::<Result<Vec<_>>>()?;
    let count = rows.len();

    write_rows(path, &HEADER, rows)?;

    debug!(path = %path.display(), rows = count, "Record export written");
    Ok(count)
}

/// Writes a two-column `year,count` table in ascending year order.
pub fn write_year_frequency(path: impl AsRef<Path>, years: &BTreeMap<i64, usize>) -> Result<()> {
    let path = path.as_ref();
    let rows = years
        .iter()
        .map(|(year, count)| [year.to_string(), count.to_string()]);

    write_rows(path, &["year", "count"], rows)?;

    debug!(path = %path.display(), years = years.len(), "Year frequency written");
    Ok(())
}

/// Renders the `k` most credible records as a markdown table.
///
/// Ranking uses the integer credibility; ties keep input order.
///
/// # Errors
///
/// Fails if any record's credibility or strangeness is not an integer.
pub fn render_top_k<'a, I>(records: I, label: &str, k: usize) -> Result<String>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut ranked = records
        .into_iter()
        .map(|record| record.credibility().map(|credibility| (credibility, record)))
        .collect::<Result<Vec<(i64, &Record)>>>()?;
    ranked.sort_by_key(|(credibility, _)| Reverse(*credibility));

    let mut out = format!("LABEL: {label}\n{TOP_K_HEADER}\n{TOP_K_RULE}\n");

    for (credibility, record) in ranked.into_iter().take(k) {
        let strangeness = record.strangeness()?;
        let cells: Vec<String> = TOP_K_FIELDS
            .iter()
            .map(|&name| match name {
                "credibility" => credibility.to_string(),
                "strangeness" => strangeness.to_string(),
                "description" => clean_description(&record.description).into_owned(),
                _ => record.get(name).unwrap_or_default().to_string(),
            })
            .collect();
        out.push_str(&format!("|{}|\n", cells.join("|")));
    }

    Ok(out)
}

/// Renders tag counts as a markdown table, most frequent first.
pub fn render_tag_table(tags: &BTreeMap<String, usize>) -> String {
    let rows: String = rank_tags(tags)
        .into_iter()
        .map(|(tag, count)| format!("|{tag}|{count}|\n"))
        .collect();
    format!("| Tag | Count |\n|----|---|\n{rows}")
}
