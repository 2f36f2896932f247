//! Missing network segmentation rule

use super::base::{RiskRule, RuleContext};
use crate::models::{Risk, RiskCategory};
use crate::types::{
    DataBreachProbability, RiskExploitationImpact, RiskExploitationLikelihood, RiskFunction,
    Stride, TechnicalAssetType,
};
use anyhow::Result;

pub const ID: &str = "missing-network-segmentation";

pub struct MissingNetworkSegmentationRule {
    category: RiskCategory,
}

impl MissingNetworkSegmentationRule {
    pub fn new() -> Self {
        Self {
            category: RiskCategory {
                id: ID.to_string(),
                title: "Missing Network Segmentation".to_string(),
                description: "Highly sensitive assets and/or datastores residing in the same network \
                    segment as other lower sensitive assets should be separated by a network \
                    segmentation trust boundary."
                    .to_string(),
                impact: "If this risk is unmitigated, attackers successfully attacking other \
                    components of the system might have an easy path towards more valuable targets, \
                    as they are not separated by network segmentation."
                    .to_string(),
                asvs: "V1 - Architecture, Design and Threat Modeling Requirements".to_string(),
                cheat_sheet: "https://cheatsheetseries.owasp.org/cheatsheets/Attack_Surface_Analysis_Cheat_Sheet.html"
                    .to_string(),
                action: "Network Segmentation".to_string(),
                mitigation: "Apply a network segmentation trust boundary around the highly sensitive \
                    assets and/or datastores."
                    .to_string(),
                check: "Are recommendations from the linked cheat sheet and referenced ASVS chapter applied?"
                    .to_string(),
                detection_logic: "In-scope sensitive technical assets sharing their network trust \
                    boundary with other in-scope assets they do not communicate with."
                    .to_string(),
                risk_assessment: "Default is low risk. The risk is increased to medium when the asset \
                    is strictly confidential or mission-critical."
                    .to_string(),
                false_positives: "When all assets within the network segmentation trust boundary are \
                    hardened and protected to the same extend as if all were containing/processing \
                    highly sensitive data."
                    .to_string(),
                stride: Stride::ElevationOfPrivilege,
                function: RiskFunction::Operations,
                model_failure_possible_reason: false,
                cwe: 1008,
            },
        }
    }
}

impl Default for MissingNetworkSegmentationRule {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskRule for MissingNetworkSegmentationRule {
    fn category(&self) -> &RiskCategory {
        &self.category
    }

    fn generate(&self, ctx: &RuleContext<'_>) -> Result<Vec<Risk>> {
        let mut risks = Vec::new();
        for asset in ctx.graph.technical_assets() {
            if asset.out_of_scope
                || asset.asset_type == TechnicalAssetType::ExternalEntity
                || !ctx.is_sensitive(asset)
            {
                continue;
            }
            let Some(boundary) = ctx.graph.network_trust_boundary_of(&asset.id) else {
                continue;
            };
            let linked: Vec<&str> = ctx
                .graph
                .links_touching(&asset.id)
                .into_iter()
                .flat_map(|l| [l.source_id.as_str(), l.target_id.as_str()])
                .collect();
            let unrelated_neighbour = ctx
                .graph
                .assets_in_trust_boundary(&boundary.id)
                .into_iter()
                .any(|other| {
                    other.id != asset.id
                        && !other.out_of_scope
                        && other.asset_type != TechnicalAssetType::ExternalEntity
                        && !linked.contains(&other.id.as_str())
                });
            if !unrelated_neighbour {
                continue;
            }
            let impact = if ctx.is_highly_sensitive(asset) {
                RiskExploitationImpact::Medium
            } else {
                RiskExploitationImpact::Low
            };
            risks.push(
                Risk::new(
                    format!(
                        "Missing Network Segmentation to further encapsulate and protect {} against \
                         unrelated lower protected assets in the same network segment",
                        asset.title
                    ),
                    RiskExploitationLikelihood::Unlikely,
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
    use crate::model::{ModelGraph, ModelGraphBuilder, TrustBoundary};
    use crate::rules::test_support::{datastore, ids, link, process, run};
    use crate::types::{Confidentiality, Protocol, TrustBoundaryType};

    fn lan(boundary_type: TrustBoundaryType) -> ModelGraphBuilder {
        let mut db = datastore("db");
        db.confidentiality = Confidentiality::Confidential;
        ModelGraph::builder("m")
            .technical_asset(db)
            .technical_asset(process("web"))
            .trust_boundary(TrustBoundary {
                id: "lan".into(),
                boundary_type,
                technical_assets_inside: vec!["db".into(), "web".into()],
                ..Default::default()
            })
    }

    #[test]
    fn test_unrelated_neighbour_in_same_network() {
        let risks = run(
            &MissingNetworkSegmentationRule::new(),
            lan(TrustBoundaryType::NetworkOnPrem),
        );
        assert_eq!(ids(&risks, ID), vec!["missing-network-segmentation@db"]);
        assert_eq!(risks[0].exploitation_impact, RiskExploitationImpact::Low);
    }

    #[test]
    fn test_linked_neighbour_is_fine() {
        let b = lan(TrustBoundaryType::NetworkOnPrem)
            .communication_link(link("web-db", "web", "db", Protocol::Jdbc));
        assert!(run(&MissingNetworkSegmentationRule::new(), b).is_empty());
    }

    #[test]
    fn test_execution_environment_is_not_a_network() {
        let risks = run(
            &MissingNetworkSegmentationRule::new(),
            lan(TrustBoundaryType::ExecutionEnvironment),
        );
        assert!(risks.is_empty());
    }
}
