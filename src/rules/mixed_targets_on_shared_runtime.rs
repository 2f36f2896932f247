//! Mixed targets on shared runtime rule
//!
//! A shared runtime hosting assets from different trust boundaries, or
//! mixing internet-exposed assets with sensitive internal ones, lets a
//! compromise of one tenant spill into the others.

use super::base::{RiskRule, RuleContext};
use crate::models::{Risk, RiskCategory};
use crate::types::{
    DataBreachProbability, RiskExploitationImpact, RiskExploitationLikelihood, RiskFunction,
    Stride,
};
use anyhow::Result;
use std::collections::BTreeSet;

pub const ID: &str = "mixed-targets-on-shared-runtime";

pub struct MixedTargetsOnSharedRuntimeRule {
    category: RiskCategory,
}

impl MixedTargetsOnSharedRuntimeRule {
    pub fn new() -> Self {
        Self {
            category: RiskCategory {
                id: ID.to_string(),
                title: "Mixed Targets on Shared Runtime".to_string(),
                description: "Different attacker targets (like frontend and backend/datastore \
                    components) should not be running on the same shared (underlying) runtime."
                    .to_string(),
                impact: "If this risk is unmitigated, attackers successfully attacking other \
                    components of the system might have an easy path towards more valuable targets, \
                    as they are running on the same shared runtime."
                    .to_string(),
                asvs: "V1 - Architecture, Design and Threat Modeling Requirements".to_string(),
                cheat_sheet: "https://cheatsheetseries.owasp.org/cheatsheets/Attack_Surface_Analysis_Cheat_Sheet.html"
                    .to_string(),
                action: "Runtime Separation".to_string(),
                mitigation: "Use separate runtime environments for running different target \
                    components or apply similar separation styles to prevent load- or \
                    breach-related problems originating from one more attacker-facing asset \
                    impacting also the other more critical rated backend/datastore assets."
                    .to_string(),
                check: "Is the shared runtime hardened and are its tenants isolated?".to_string(),
                detection_logic: "Shared runtimes running technical assets of different trust \
                    boundaries, or mixing internet-exposed assets with sensitive non-exposed ones."
                    .to_string(),
                risk_assessment: "Default is low risk. The risk is increased to medium when any \
                    asset on the runtime is strictly confidential or mission-critical."
                    .to_string(),
                false_positives: "When all assets running on the shared runtime are hardened and \
                    protected to the same extend as if all were containing/processing highly \
                    sensitive data."
                    .to_string(),
                stride: Stride::ElevationOfPrivilege,
                function: RiskFunction::Operations,
                model_failure_possible_reason: false,
                cwe: 1008,
            },
        }
    }
}

impl Default for MixedTargetsOnSharedRuntimeRule {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskRule for MixedTargetsOnSharedRuntimeRule {
    fn category(&self) -> &RiskCategory {
        &self.category
    }

    fn generate(&self, ctx: &RuleContext<'_>) -> Result<Vec<Risk>> {
        let mut risks = Vec::new();
        for runtime in ctx.graph.shared_runtimes() {
            let assets: Vec<_> = ctx
                .graph
                .assets_on_shared_runtime(&runtime.id)
                .into_iter()
                .filter(|a| !a.out_of_scope)
                .collect();
            if assets.len() < 2 {
                continue;
            }

            let boundaries: BTreeSet<Option<&str>> = assets
                .iter()
                .map(|a| ctx.graph.trust_boundary_of(&a.id).map(|b| b.id.as_str()))
                .collect();
            let exposed = assets.iter().any(|a| ctx.is_internet_exposed(a));
            let sensitive_internal = assets
                .iter()
                .any(|a| !ctx.is_internet_exposed(a) && ctx.is_sensitive(a));
            if boundaries.len() < 2 && !(exposed && sensitive_internal) {
                continue;
            }

            let impact = if assets.iter().any(|a| ctx.is_highly_sensitive(a)) {
                RiskExploitationImpact::Medium
            } else {
                RiskExploitationImpact::Low
            };
            let breached: Vec<String> = assets.iter().map(|a| a.id.clone()).collect();
            risks.push(
                Risk::new(
                    format!(
                        "Mixed Targets on Shared Runtime named {} might enable attackers moving from \
                         one less valuable target to a more valuable one",
                        runtime.title
                    ),
                    RiskExploitationLikelihood::Unlikely,
                    impact,
                )
                .with_shared_runtime(&runtime.id)
                .with_data_breach(DataBreachProbability::Improbable, breached),
            );
        }
        Ok(risks)
    }
}
