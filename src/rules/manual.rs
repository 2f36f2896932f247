//! Custom risk categories declared in the model file
//!
//! A model may carry its own categories together with the risks already
//! identified for them. Each one becomes a [`ManualRiskRule`] registered as
//! a custom rule, so it shadows a built-in category with the same id and
//! flows through severity stamping and tracking like any other rule.

use super::base::{RiskRule, RuleContext};
use crate::model::ModelGraph;
use crate::error::EngineResult;
use crate::models::{Risk, RiskCategory};
use crate::types::{parse_type_enum, TypeEnum};
use anyhow::Result;
use serde::{Deserialize, Deserializer};
use tracing::warn;

/// A category plus the risks identified for it by hand
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct IndividualRiskCategory {
    #[serde(flatten)]
    pub category: RiskCategory,
    #[serde(default, deserialize_with = "deserialize_identified_risks")]
    pub risks_identified: Vec<Risk>,
}

/// A hand-written risk as it appears in the model file.
///
/// Rating fields stay strings so that a missing or empty value goes through
/// [`parse_type_enum`] (an empty likelihood means `likely`).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct IdentifiedRisk {
    title: String,
    exploitation_likelihood: String,
    exploitation_impact: String,
    data_breach_probability: String,
    data_breach_technical_assets: Vec<String>,
    most_relevant_data_asset: String,
    most_relevant_technical_asset: String,
    most_relevant_trust_boundary: String,
    most_relevant_shared_runtime: String,
    most_relevant_communication_link: String,
}

/// Empty values take the scale's empty default, or its first value
fn parse_rating<T: TypeEnum + Default>(value: &str) -> EngineResult<T> {
    if value.trim().is_empty() {
        return Ok(T::empty_default().unwrap_or_default());
    }
    parse_type_enum(value)
}

impl IdentifiedRisk {
    fn into_risk(self) -> EngineResult<Risk> {
        Ok(Risk::new(
            self.title,
            parse_rating(&self.exploitation_likelihood)?,
            parse_rating(&self.exploitation_impact)?,
        )
        .with_technical_asset(self.most_relevant_technical_asset)
        .with_communication_link(self.most_relevant_communication_link)
        .with_data_asset(self.most_relevant_data_asset)
        .with_trust_boundary(self.most_relevant_trust_boundary)
        .with_shared_runtime(self.most_relevant_shared_runtime)
        .with_data_breach(
            parse_rating(&self.data_breach_probability)?,
            self.data_breach_technical_assets,
        ))
    }
}

fn deserialize_identified_risks<'de, D>(deserializer: D) -> Result<Vec<Risk>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<IdentifiedRisk>::deserialize(deserializer)?
        .into_iter()
        .map(|risk| risk.into_risk().map_err(serde::de::Error::custom))
        .collect()
}

pub struct ManualRiskRule {
    definition: IndividualRiskCategory,
}

impl ManualRiskRule {
    pub fn new(definition: IndividualRiskCategory) -> Self {
        Self { definition }
    }

    /// First element the risk names that the model does not contain
    fn dangling_reference(graph: &ModelGraph, risk: &Risk) -> Option<String> {
        let checks: [(&str, &str, bool); 5] = [
            (
                "technical asset",
                risk.most_relevant_technical_asset.as_str(),
                graph
                    .technical_asset(&risk.most_relevant_technical_asset)
                    .is_some(),
            ),
            (
                "communication link",
                risk.most_relevant_communication_link.as_str(),
                graph
                    .communication_link(&risk.most_relevant_communication_link)
                    .is_some(),
            ),
            (
                "data asset",
                risk.most_relevant_data_asset.as_str(),
                graph.data_asset(&risk.most_relevant_data_asset).is_some(),
            ),
            (
                "trust boundary",
                risk.most_relevant_trust_boundary.as_str(),
                graph
                    .trust_boundary(&risk.most_relevant_trust_boundary)
                    .is_some(),
            ),
            (
                "shared runtime",
                risk.most_relevant_shared_runtime.as_str(),
                graph
                    .shared_runtime(&risk.most_relevant_shared_runtime)
                    .is_some(),
            ),
        ];
        checks
            .into_iter()
            .find(|(_, id, found)| !id.is_empty() && !found)
            .map(|(kind, id, _)| format!("unknown {kind} {id}"))
    }
}

impl RiskRule for ManualRiskRule {
    fn category(&self) -> &RiskCategory {
        &self.definition.category
    }

    fn generate(&self, ctx: &RuleContext<'_>) -> Result<Vec<Risk>> {
        let mut risks = Vec::with_capacity(self.definition.risks_identified.len());
        for risk in &self.definition.risks_identified {
            if let Some(reason) = Self::dangling_reference(ctx.graph, risk) {
                warn!(
                    "Skipping risk {:?} of custom category {}: {}",
                    risk.title, self.definition.category.id, reason
                );
                continue;
            }
            risks.push(risk.clone());
        }
        Ok(risks)
    }
}
