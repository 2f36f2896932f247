//! Output reporters for threatgraph analysis results
//!
//! Supports two output formats:
//! - `text` - Terminal summary with colors
//! - `json` - Machine-readable JSON

mod json;
mod text;

use crate::query::RiskAnalysis;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render an analysis of the model titled `title` in the specified format
pub fn report(analysis: &RiskAnalysis, title: &str, format: &str) -> Result<String> {
    let fmt = OutputFormat::from_str(format)?;
    report_with_format(analysis, title, fmt)
}

/// Render an analysis using an OutputFormat enum
pub fn report_with_format(
    analysis: &RiskAnalysis,
    title: &str,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(analysis, title),
        OutputFormat::Json => json::render(analysis, title),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::loader::parse_model;
    use crate::rules::{RiskCategoryRegistry, RuleEngine};
    use std::sync::Arc;

    /// Analysis of a two-asset model with a plaintext link and one accepted risk
    pub(crate) fn test_analysis() -> RiskAnalysis {
        let model = parse_model(
            r#"{
                "title": "Shop",
                "data_assets": [{"id": "orders", "confidentiality": "confidential"}],
                "technical_assets": [
                    {"id": "web", "type": "process", "data_assets_processed": ["orders"],
                     "communication_links": [
                        {"id": "web-api", "target_id": "api", "protocol": "http",
                         "authentication": "token", "data_assets_sent": ["orders"]}
                     ]},
                    {"id": "api", "type": "process", "data_assets_processed": ["orders"]}
                ],
                "risk_tracking": {
                    "unencrypted-communication@web@web-api": {"status": "accepted"},
                    "missing-hardening@gone": {"status": "mitigated"}
                }
            }"#,
        )
        .unwrap();
        let engine = RuleEngine::builder(Arc::new(RiskCategoryRegistry::with_built_in_rules()))
            .workers(2)
            .build();
        engine.analyze(&model.graph, &model.risk_tracking).unwrap()
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_str("sarif").is_err());
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_report_dispatches_on_format() {
        let analysis = test_analysis();
        let json = report(&analysis, "Shop", "json").unwrap();
        assert!(json.trim_start().starts_with('{'));
        let text = report(&analysis, "Shop", "text").unwrap();
        assert!(text.contains("Shop"));
        assert!(report(&analysis, "Shop", "pdf").is_err());
    }
}
