//! JSON reporter
//!
//! Outputs risks grouped by category, overall statistics and orphaned
//! tracking entries as pretty-printed JSON. Risk field names are those of
//! [`Risk`]; empty fields are omitted.

use crate::models::{Risk, RiskStatistics};
use crate::query::RiskAnalysis;
use crate::scoring::AttractivenessScores;
use crate::types::{RiskFunction, RiskSeverity, Stride};
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    title: &'a str,
    total_risks: usize,
    statistics: RiskStatistics,
    categories: Vec<CategoryEntry<'a>>,
    orphaned_risk_tracking: &'a [String],
    attractiveness: &'a AttractivenessScores,
}

#[derive(Serialize)]
struct CategoryEntry<'a> {
    id: &'a str,
    title: &'a str,
    stride: Stride,
    function: RiskFunction,
    cwe: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    highest_open_severity: Option<RiskSeverity>,
    risks: Vec<Risk>,
}

/// Render analysis as JSON
pub fn render(analysis: &RiskAnalysis, title: &str) -> Result<String> {
    let categories = analysis
        .sorted_risk_categories()
        .into_iter()
        .map(|category| {
            let risks = analysis.sorted_risks_of_category(category);
            CategoryEntry {
                id: &category.id,
                title: &category.title,
                stride: category.stride,
                function: category.function,
                cwe: category.cwe,
                highest_open_severity: crate::query::highest_severity_still_at_risk(&risks),
                risks,
            }
        })
        .collect();

    let report = JsonReport {
        title,
        total_risks: analysis.total_risk_count(),
        statistics: analysis.overall_risk_statistics(),
        categories,
        orphaned_risk_tracking: analysis.orphaned_risk_tracking(),
        attractiveness: analysis.attractiveness(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
