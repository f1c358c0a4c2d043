use tracing::debug;

use crate::error::Result;
use crate::record::Record;

/// Minimum scores a record must reach to count as high quality.
///
/// The defaults sit at roughly the 90th percentile of the source corpus
/// (strangeness mean 6.6, credibility mean 7.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityThresholds {
    pub strangeness: i64,
    pub credibility: i64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            strangeness: 8,
            credibility: 10,
        }
    }
}

/// Returns the records whose strangeness and credibility both meet the
/// thresholds, in their original order.
///
/// # Errors
///
/// Fails on the first record whose strangeness or credibility is not an integer.
pub fn filter_by_quality<'a, I>(records: I, thresholds: QualityThresholds) -> Result<Vec<&'a Record>>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut out = Vec::new();
    let mut seen = 0usize;

    for record in records {
        seen += 1;
        let strangeness = record.strangeness()?;
        let credibility = record.credibility()?;

        if strangeness >= thresholds.strangeness && credibility >= thresholds.credibility {
            out.push(record);
        }
    }

    debug!(
        seen,
        kept = out.len(),
        strangeness = thresholds.strangeness,
        credibility = thresholds.credibility,
        "Quality filter applied"
    );
    Ok(out)
}
