//! Core data models for threatgraph
//!
//! These models are produced by the rule engine and consumed by the
//! tracking, query and reporting layers.

use crate::types::{
    DataBreachProbability, RiskExploitationImpact, RiskExploitationLikelihood, RiskFunction,
    RiskSeverity, RiskStatus, Stride, TypeEnum,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Build the stable identifier of a risk.
///
/// The identifier is the category id followed by every non-empty trigger
/// element, joined with `@`. Element order is fixed by the caller, so the
/// same model always yields the same id regardless of evaluation order.
pub fn synthetic_id<'a>(category: &str, elements: impl IntoIterator<Item = &'a str>) -> String {
    let mut id = category.to_string();
    for element in elements.into_iter().filter(|e| !e.is_empty()) {
        id.push('@');
        id.push_str(element);
    }
    id
}

fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

/// A single finding produced by a risk rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Risk {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub category: String,
    #[serde(skip_serializing_if = "is_default")]
    pub risk_status: RiskStatus,
    #[serde(skip_serializing_if = "is_default")]
    pub severity: RiskSeverity,
    #[serde(skip_serializing_if = "is_default")]
    pub exploitation_likelihood: RiskExploitationLikelihood,
    #[serde(skip_serializing_if = "is_default")]
    pub exploitation_impact: RiskExploitationImpact,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub synthetic_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub most_relevant_data_asset: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub most_relevant_technical_asset: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub most_relevant_trust_boundary: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub most_relevant_shared_runtime: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub most_relevant_communication_link: String,
    #[serde(skip_serializing_if = "is_default")]
    pub data_breach_probability: DataBreachProbability,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub data_breach_technical_assets: Vec<String>,
}

impl Risk {
    /// Create a risk with the rating the rule assigned to it
    pub fn new(
        title: impl Into<String>,
        likelihood: RiskExploitationLikelihood,
        impact: RiskExploitationImpact,
    ) -> Self {
        Self {
            title: title.into(),
            exploitation_likelihood: likelihood,
            exploitation_impact: impact,
            ..Default::default()
        }
    }

    pub fn with_technical_asset(mut self, id: impl Into<String>) -> Self {
        self.most_relevant_technical_asset = id.into();
        self
    }

    pub fn with_communication_link(mut self, id: impl Into<String>) -> Self {
        self.most_relevant_communication_link = id.into();
        self
    }

    pub fn with_data_asset(mut self, id: impl Into<String>) -> Self {
        self.most_relevant_data_asset = id.into();
        self
    }

    pub fn with_trust_boundary(mut self, id: impl Into<String>) -> Self {
        self.most_relevant_trust_boundary = id.into();
        self
    }

    pub fn with_shared_runtime(mut self, id: impl Into<String>) -> Self {
        self.most_relevant_shared_runtime = id.into();
        self
    }

    /// Set the breach probability and the assets whose data would leak
    pub fn with_data_breach(
        mut self,
        probability: DataBreachProbability,
        technical_assets: Vec<String>,
    ) -> Self {
        self.data_breach_probability = probability;
        self.data_breach_technical_assets = technical_assets;
        self
    }

    /// Most-relevant element ids in synthetic id order
    pub fn trigger_elements(&self) -> [&str; 5] {
        [
            self.most_relevant_technical_asset.as_str(),
            self.most_relevant_communication_link.as_str(),
            self.most_relevant_data_asset.as_str(),
            self.most_relevant_trust_boundary.as_str(),
            self.most_relevant_shared_runtime.as_str(),
        ]
    }

    /// Synthetic id of this risk under the given category
    pub fn compute_synthetic_id(&self, category: &str) -> String {
        synthetic_id(category, self.trigger_elements())
    }
}

/// A class of risk together with its guidance texts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RiskCategory {
    pub id: String,
    pub title: String,
    pub description: String,
    pub impact: String,
    pub asvs: String,
    pub cheat_sheet: String,
    pub action: String,
    pub mitigation: String,
    pub check: String,
    pub detection_logic: String,
    pub risk_assessment: String,
    pub false_positives: String,
    pub stride: Stride,
    pub function: RiskFunction,
    pub model_failure_possible_reason: bool,
    pub cwe: u32,
}

/// Finding counts keyed by severity name, then by status name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskStatistics {
    pub risks: BTreeMap<String, BTreeMap<String, usize>>,
}

impl RiskStatistics {
    /// Statistics with every severity × status cell present and zero
    pub fn seeded() -> Self {
        let risks = RiskSeverity::values()
            .iter()
            .map(|severity| {
                let by_status = RiskStatus::values()
                    .iter()
                    .map(|status| (status.name().to_string(), 0))
                    .collect();
                (severity.name().to_string(), by_status)
            })
            .collect();
        Self { risks }
    }

    pub fn increment(&mut self, severity: RiskSeverity, status: RiskStatus) {
        *self
            .risks
            .entry(severity.name().to_string())
            .or_default()
            .entry(status.name().to_string())
            .or_insert(0) += 1;
    }

    pub fn count(&self, severity: RiskSeverity, status: RiskStatus) -> usize {
        self.risks
            .get(severity.name())
            .and_then(|by_status| by_status.get(status.name()))
            .copied()
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.risks.values().flat_map(|m| m.values()).sum()
    }
}

impl Default for RiskStatistics {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_id_skips_empty_elements() {
        assert_eq!(
            synthetic_id("missing-hardening", ["web", "", "", "", ""]),
            "missing-hardening@web"
        );
        assert_eq!(synthetic_id("x", ["a", "l", "", "tb", ""]), "x@a@l@tb");
        assert_eq!(synthetic_id("x", std::iter::empty()), "x");
    }

    #[test]
    fn test_synthetic_id_uses_fixed_element_order() {
        let risk = Risk::new(
            "t",
            RiskExploitationLikelihood::Likely,
            RiskExploitationImpact::Medium,
        )
        .with_shared_runtime("rt")
        .with_data_asset("db-data")
        .with_technical_asset("app");
        assert_eq!(risk.compute_synthetic_id("cat"), "cat@app@db-data@rt");
    }

    #[test]
    fn test_zero_fields_are_omitted() {
        let risk = Risk {
            category: "unencrypted-asset".into(),
            title: "Unencrypted".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&risk).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert!(obj.contains_key("category"));
        assert!(obj.contains_key("title"));
        assert!(!obj.contains_key("risk_status"));
        assert!(!obj.contains_key("data_breach_technical_assets"));
    }

    #[test]
    fn test_non_zero_fields_use_short_names() {
        let risk = Risk {
            severity: RiskSeverity::High,
            risk_status: RiskStatus::Mitigated,
            ..Default::default()
        };
        let json = serde_json::to_value(&risk).unwrap();
        assert_eq!(json["severity"], "high");
        assert_eq!(json["risk_status"], "mitigated");

        let back: Risk = serde_json::from_value(json).unwrap();
        assert_eq!(back, risk);
    }

    #[test]
    fn test_seeded_statistics_have_all_cells() {
        let stats = RiskStatistics::seeded();
        assert_eq!(stats.risks.len(), 5);
        assert!(stats.risks.values().all(|m| m.len() == 6));
        assert_eq!(stats.total(), 0);
    }

    #[test]
    fn test_statistics_increment() {
        let mut stats = RiskStatistics::seeded();
        stats.increment(RiskSeverity::Critical, RiskStatus::Accepted);
        stats.increment(RiskSeverity::Critical, RiskStatus::Accepted);
        assert_eq!(stats.count(RiskSeverity::Critical, RiskStatus::Accepted), 2);
        assert_eq!(stats.total(), 2);
    }
}
