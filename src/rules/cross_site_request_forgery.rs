//! Cross-site request forgery rule

use super::base::{RiskRule, RuleContext};
use crate::models::{Risk, RiskCategory};
use crate::types::{
    Criticality, DataBreachProbability, RiskExploitationImpact, RiskExploitationLikelihood,
    RiskFunction, Stride,
};
use anyhow::Result;

pub const ID: &str = "cross-site-request-forgery";

pub struct CrossSiteRequestForgeryRule {
    category: RiskCategory,
}

impl CrossSiteRequestForgeryRule {
    pub fn new() -> Self {
        Self {
            category: RiskCategory {
                id: ID.to_string(),
                title: "Cross-Site Request Forgery (CSRF)".to_string(),
                description: "When a web application is accessed via web protocols Cross-Site \
                    Request Forgery (CSRF) risks might arise."
                    .to_string(),
                impact: "If this risk remains unmitigated, attackers might be able to trick logged-in \
                    victim users into unwanted actions within the web application by visiting an \
                    attacker controlled web site."
                    .to_string(),
                asvs: "V4 - Access Control Verification Requirements".to_string(),
                cheat_sheet: "https://cheatsheetseries.owasp.org/cheatsheets/Cross-Site_Request_Forgery_Prevention_Cheat_Sheet.html"
                    .to_string(),
                action: "CSRF Prevention".to_string(),
                mitigation: "Try to use anti-CSRF tokens of the double-submit patterns (at least for \
                    logged-in requests). When your authentication scheme depends on cookies (like \
                    session or token cookies), consider marking them with the same-site flag."
                    .to_string(),
                check: "Are recommendations from the linked cheat sheet and referenced ASVS chapter applied?"
                    .to_string(),
                detection_logic: "In-scope web applications accessed via typical web access protocols \
                    by clients used by humans."
                    .to_string(),
                risk_assessment: "The risk rating depends on the integrity rating of the data sent \
                    across the communication link."
                    .to_string(),
                false_positives: "Web applications passing the authentication state via custom \
                    headers instead of cookies can eventually be false positives."
                    .to_string(),
                stride: Stride::Spoofing,
                function: RiskFunction::Development,
                model_failure_possible_reason: false,
                cwe: 352,
            },
        }
    }
}

impl Default for CrossSiteRequestForgeryRule {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskRule for CrossSiteRequestForgeryRule {
    fn category(&self) -> &RiskCategory {
        &self.category
    }

    fn generate(&self, ctx: &RuleContext<'_>) -> Result<Vec<Risk>> {
        let mut risks = Vec::new();
        for target in ctx.graph.technical_assets() {
            if target.out_of_scope || !target.web_application {
                continue;
            }
            for link in ctx.graph.incoming_links(&target.id) {
                if !link.protocol.is_potential_web_access_protocol() {
                    continue;
                }
                let Some(client) = ctx.graph.technical_asset(&link.source_id) else {
                    continue;
                };
                if !client.used_as_client_by_human {
                    continue;
                }
                let impact =
                    if !link.readonly && ctx.highest_integrity(target) >= Criticality::Critical {
                        RiskExploitationImpact::Medium
                    } else {
                        RiskExploitationImpact::Low
                    };
                risks.push(
                    Risk::new(
                        format!(
                            "Cross-Site Request Forgery (CSRF) risk at {} via {} from {}",
                            target.title, link.title, client.title
                        ),
                        RiskExploitationLikelihood::VeryLikely,
                        impact,
                    )
                    .with_technical_asset(&target.id)
                    .with_communication_link(&link.id)
                    .with_data_breach(DataBreachProbability::Improbable, vec![target.id.clone()]),
                );
            }
        }
        Ok(risks)
    }
}
