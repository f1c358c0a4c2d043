//! Pipeline configuration.

use serde::Deserialize;

use crate::analyzers::QualityThresholds;
use crate::error::{ReportError, Result};

/// Settings for one pipeline run.
///
/// Stored as a JSON object on disk; any key left out takes its default:
/// ```json
/// {
///   "strangeness_threshold": 8,
///   "credibility_threshold": 10,
///   "target_codes": ["Nuclear", "Photos", "Radar", "Conversation", "Submersible"],
///   "top_k": 5,
///   "code_top_k": 10,
///   "tag_report": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub strangeness_threshold: i64,
    pub credibility_threshold: i64,
    /// Codes to filter on; each yields `<code>.csv` and `<code>_years.csv`.
    pub target_codes: Vec<String>,
    pub top_k: usize,
    pub top_k_label: String,
    /// File name of the quality-filtered export.
    pub quality_output: String,
    /// When set, also render a top-K table for every target code.
    pub code_top_k: Option<usize>,
    /// When set, also render the corpus-wide tag frequency table.
    pub tag_report: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let thresholds = QualityThresholds::default();
        Self {
            strangeness_threshold: thresholds.strangeness,
            credibility_threshold: thresholds.credibility,
            target_codes: ["Nuclear", "Photos", "Radar", "Conversation", "Submersible"]
                .into_iter()
                .map(String::from)
                .collect(),
            top_k: 5,
            top_k_label: "high strange + high credible".to_string(),
            quality_output: "high_credible_high_strange.csv".to_string(),
            code_top_k: None,
            tag_report: false,
        }
    }
}

impl PipelineConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ReportError::Io {
            path: path.to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|e| ReportError::MalformedInput {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn thresholds(&self) -> QualityThresholds {
        QualityThresholds {
            strangeness: self.strangeness_threshold,
            credibility: self.credibility_threshold,
        }
    }
}

/// Output file stem for a target code: `Nuclear` → `nuclear`.
pub fn code_stem(code: &str) -> String {
    code.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.thresholds(), QualityThresholds::default());
        assert_eq!(
            config.target_codes,
            vec!["Nuclear", "Photos", "Radar", "Conversation", "Submersible"]
        );
        assert_eq!(config.top_k, 5);
        assert_eq!(config.quality_output, "high_credible_high_strange.csv");
        assert!(!config.tag_report);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"target_codes": ["Radar"], "top_k": 3}"#).unwrap();

        assert_eq!(config.target_codes, vec!["Radar"]);
        assert_eq!(config.top_k, 3);
        assert_eq!(config.credibility_threshold, 10);
        assert_eq!(config.top_k_label, "high strange + high credible");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: serde_json::Result<PipelineConfig> =
            serde_json::from_str(r#"{"topk": 3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"strangeness_threshold": 6, "tag_report": true}"#).unwrap();

        let config = PipelineConfig::load(path.to_str().unwrap()).unwrap();

        assert_eq!(config.thresholds().strangeness, 6);
        assert!(config.tag_report);
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        let result = PipelineConfig::load(path.to_str().unwrap());

        assert!(matches!(result, Err(ReportError::MalformedInput { .. })));
    }

    #[test]
    fn test_code_stem() {
        assert_eq!(code_stem("Submersible"), "submersible");
    }
}
