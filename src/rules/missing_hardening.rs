//! Missing hardening rule
//!
//! Driven by attacker attractiveness rather than a single rating: the most
//! attractive assets of the model are expected to be hardened.

use super::base::{RiskRule, RuleContext};
use crate::models::{Risk, RiskCategory};
use crate::types::{
    DataBreachProbability, RiskExploitationImpact, RiskExploitationLikelihood, RiskFunction,
    Stride, TechnicalAssetType,
};
use anyhow::Result;

pub const ID: &str = "missing-hardening";

/// Relative attractiveness (percent of the most attractive asset) that calls for hardening
pub const RAA_LIMIT: u32 = 55;
/// Lower limit applied to datastores
pub const RAA_LIMIT_DATASTORE: u32 = 40;

pub struct MissingHardeningRule {
    category: RiskCategory,
}

impl MissingHardeningRule {
    pub fn new() -> Self {
        Self {
            category: RiskCategory {
                id: ID.to_string(),
                title: "Missing Hardening".to_string(),
                description: format!(
                    "Technical assets with a relative attractiveness of {RAA_LIMIT}% or higher \
                     ({RAA_LIMIT_DATASTORE}% for datastores) should be explicitly hardened taking \
                     best practices and vendor hardening guides into account."
                ),
                impact: "If this risk remains unmitigated, attackers might be able to easier attack \
                    high-value targets."
                    .to_string(),
                asvs: "V14 - Configuration Verification Requirements".to_string(),
                cheat_sheet: "https://cheatsheetseries.owasp.org/cheatsheets/Attack_Surface_Analysis_Cheat_Sheet.html"
                    .to_string(),
                action: "System Hardening".to_string(),
                mitigation: "Try to apply all hardening best practices (like CIS benchmarks, OWASP \
                    recommendations, vendor recommendations, DevSec Hardening Framework, DBSAT for \
                    Oracle databases, and others)."
                    .to_string(),
                check: "Are recommendations from the linked cheat sheet and referenced ASVS chapter applied?"
                    .to_string(),
                detection_logic: format!(
                    "In-scope technical assets with relative attractiveness of {RAA_LIMIT}% or \
                     higher, or {RAA_LIMIT_DATASTORE}% or higher for datastores."
                ),
                risk_assessment: "The risk rating depends on the sensitivity of the data processed \
                    or stored in the technical asset."
                    .to_string(),
                false_positives: "Usually no false positives.".to_string(),
                stride: Stride::Tampering,
                function: RiskFunction::Operations,
                model_failure_possible_reason: false,
                cwe: 16,
            },
        }
    }
}

impl Default for MissingHardeningRule {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskRule for MissingHardeningRule {
    fn category(&self) -> &RiskCategory {
        &self.category
    }

    fn generate(&self, ctx: &RuleContext<'_>) -> Result<Vec<Risk>> {
        let mut risks = Vec::new();
        for asset in ctx.graph.technical_assets() {
            if asset.out_of_scope || asset.asset_type == TechnicalAssetType::ExternalEntity {
                continue;
            }
            let relative = ctx.attractiveness.relative_asset(&asset.id);
            let limit = if asset.is_datastore() {
                RAA_LIMIT_DATASTORE
            } else {
                RAA_LIMIT
            };
            if relative < limit {
                continue;
            }
            let impact = if relative >= RAA_LIMIT && ctx.is_sensitive(asset) {
                RiskExploitationImpact::Medium
            } else {
                RiskExploitationImpact::Low
            };
            risks.push(
                Risk::new(
                    format!("Missing Hardening risk at {}", asset.title),
                    RiskExploitationLikelihood::Likely,
                    impact,
                )
                .with_technical_asset(&asset.id)
                .with_data_breach(DataBreachProbability::Improbable, vec![asset.id.clone()]),
            );
        }
        Ok(risks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelGraph;
    use crate::rules::test_support::{data, datastore, ids, process, run};
    use crate::types::{Confidentiality, Criticality};

    #[test]
    fn test_most_attractive_asset_needs_hardening() {
        let mut vault = datastore("vault");
        vault.data_assets_stored = vec!["keys".into()];
        let b = ModelGraph::builder("m")
            .data_asset(data(
                "keys",
                Confidentiality::StrictlyConfidential,
                Criticality::Critical,
            ))
            .technical_asset(vault)
            .technical_asset(process("idle"));
        let risks = run(&MissingHardeningRule::new(), b);
        assert_eq!(ids(&risks, ID), vec!["missing-hardening@vault"]);
        assert_eq!(risks[0].exploitation_impact, RiskExploitationImpact::Medium);
    }

    #[test]
    fn test_model_without_ratings_needs_nothing() {
        let b = ModelGraph::builder("m")
            .technical_asset(process("a"))
            .technical_asset(datastore("b"));
        assert!(run(&MissingHardeningRule::new(), b).is_empty());
    }
}
