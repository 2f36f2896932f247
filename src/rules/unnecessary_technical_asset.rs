//! Unnecessary technical asset rule

use super::base::{RiskRule, RuleContext};
use crate::models::{Risk, RiskCategory};
use crate::types::{
    DataBreachProbability, RiskExploitationImpact, RiskExploitationLikelihood, RiskFunction,
    Stride,
};
use anyhow::Result;

pub const ID: &str = "unnecessary-technical-asset";

pub struct UnnecessaryTechnicalAssetRule {
    category: RiskCategory,
}

impl UnnecessaryTechnicalAssetRule {
    pub fn new() -> Self {
        Self {
            category: RiskCategory {
                id: ID.to_string(),
                title: "Unnecessary Technical Asset".to_string(),
                description: "When a technical asset does not process or store any data assets, this \
                    is an indicator for an unnecessary technical asset (or for an incomplete model). \
                    This is also the case if the asset has no communication links (either outgoing \
                    or incoming)."
                    .to_string(),
                impact: "If this risk is unmitigated, attackers might be able to target unnecessary \
                    technical assets."
                    .to_string(),
                asvs: "V1 - Architecture, Design and Threat Modeling Requirements".to_string(),
                cheat_sheet: "https://cheatsheetseries.owasp.org/cheatsheets/Attack_Surface_Analysis_Cheat_Sheet.html"
                    .to_string(),
                action: "Attack Surface Reduction".to_string(),
                mitigation: "Try to avoid using technical assets that do not process or store \
                    anything."
                    .to_string(),
                check: "Are recommendations from the linked cheat sheet and referenced ASVS chapter applied?"
                    .to_string(),
                detection_logic: "Technical assets not processing or storing any data assets, or \
                    without any communication links."
                    .to_string(),
                risk_assessment: "The risk rating is always low.".to_string(),
                false_positives: "Usually no false positives as this looks like an incomplete model."
                    .to_string(),
                stride: Stride::ElevationOfPrivilege,
                function: RiskFunction::Architecture,
                model_failure_possible_reason: true,
                cwe: 1008,
            },
        }
    }
}

impl Default for UnnecessaryTechnicalAssetRule {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskRule for UnnecessaryTechnicalAssetRule {
    fn category(&self) -> &RiskCategory {
        &self.category
    }

    fn generate(&self, ctx: &RuleContext<'_>) -> Result<Vec<Risk>> {
        let risks = ctx
            .graph
            .technical_assets()
            .filter(|asset| !asset.out_of_scope)
            .filter(|asset| {
                ctx.graph.data_assets_processed_or_stored(&asset.id).is_empty()
                    || ctx.graph.links_touching(&asset.id).is_empty()
            })
            .map(|asset| {
                Risk::new(
                    format!("Unnecessary Technical Asset named {}", asset.title),
                    RiskExploitationLikelihood::Unlikely,
                    RiskExploitationImpact::Low,
                )
                .with_technical_asset(&asset.id)
                .with_data_breach(DataBreachProbability::Improbable, vec![asset.id.clone()])
            })
            .collect();
        Ok(risks)
    }
}
