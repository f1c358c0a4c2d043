//! The report run: quality export plus one export pair per target code.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::analyzers::{extract_tag_count, filter_by_code, filter_by_quality, frequency_by_year};
use crate::config::{PipelineConfig, code_stem};
use crate::error::{ReportError, Result};
use crate::output::{render_tag_table, render_top_k, write_records_csv, write_year_frequency};
use crate::record::Record;

/// Per-code outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSummary {
    pub code: String,
    /// Filtered rows, counting a record once per matching flag field.
    pub matches: usize,
    pub distinct_years: usize,
}

/// What a run produced.
#[derive(Debug, Default)]
pub struct PipelineReport {
    pub quality_matches: usize,
    pub codes: Vec<CodeSummary>,
    /// Every file written, in write order.
    pub artifacts: Vec<PathBuf>,
    /// Markdown tables for the console.
    pub markdown: String,
}

/// Runs the full report pipeline over `records`, writing into `output_dir`.
///
/// Any failure aborts the run; files written before the failure are left
/// in place but the error is returned to the caller.
#[tracing::instrument(
    skip(records, config, output_dir),
    fields(records = records.len(), output_dir = %output_dir.display())
)]
pub fn run_pipeline(
    records: &[Record],
    config: &PipelineConfig,
    output_dir: &Path,
) -> Result<PipelineReport> {
    std::fs::create_dir_all(output_dir).map_err(|source| ReportError::Io {
        path: output_dir.display().to_string(),
        source,
    })?;

    let mut report = PipelineReport::default();

    let quality = filter_by_quality(records, config.thresholds())?;
    let quality_path = output_dir.join(&config.quality_output);
    write_records_csv(&quality_path, quality.iter().copied())?;
    report.artifacts.push(quality_path);
    report.quality_matches = quality.len();
    report.markdown += &render_top_k(quality.iter().copied(), &config.top_k_label, config.top_k)?;

    info!(
        matches = quality.len(),
        strangeness = config.strangeness_threshold,
        credibility = config.credibility_threshold,
        "Quality export written"
    );

    for code in &config.target_codes {
        let summary = process_code(records, code, config, output_dir, &mut report)?;
        report.codes.push(summary);
    }

    if config.tag_report {
        report.markdown += &render_tag_table(&extract_tag_count(records));
    }

    info!(artifacts = report.artifacts.len(), "Pipeline complete");
    Ok(report)
}

#[tracing::instrument(skip(records, config, output_dir, report))]
fn process_code(
    records: &[Record],
    code: &str,
    config: &PipelineConfig,
    output_dir: &Path,
    report: &mut PipelineReport,
) -> Result<CodeSummary> {
    let stem = code_stem(code);
    let basic_path = output_dir.join(format!("{stem}.csv"));
    let year_path = output_dir.join(format!("{stem}_years.csv"));

    let matched = filter_by_code(records, code);
    if matched.is_empty() {
        warn!(code, "Target code matched no records");
    }
    let years = frequency_by_year(matched.iter().copied())?;

    write_records_csv(&basic_path, matched.iter().copied())?;
    report.artifacts.push(basic_path);
    write_year_frequency(&year_path, &years)?;
    report.artifacts.push(year_path);

    if let Some(k) = config.code_top_k {
        report.markdown += &render_top_k(matched.iter().copied(), code, k)?;
    }

    info!(code, matches = matched.len(), years = years.len(), "Code exports written");
    Ok(CodeSummary {
        code: code.to_string(),
        matches: matched.len(),
        distinct_years: years.len(),
    })
}
