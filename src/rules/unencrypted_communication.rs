//! Unencrypted communication rule
//!
//! Flags links that move sensitive data, or credentials, over a protocol
//! without transport encryption. Process-local protocols and links inside a
//! VPN are exempt.

use super::base::{RiskRule, RuleContext};
use crate::model::CommunicationLink;
use crate::models::{Risk, RiskCategory};
use crate::types::{
    Authentication, Confidentiality, Criticality, DataBreachProbability, RiskExploitationImpact,
    RiskExploitationLikelihood, RiskFunction, Stride,
};
use anyhow::Result;

pub const ID: &str = "unencrypted-communication";

pub struct UnencryptedCommunicationRule {
    category: RiskCategory,
}

impl UnencryptedCommunicationRule {
    pub fn new() -> Self {
        Self {
            category: RiskCategory {
                id: ID.to_string(),
                title: "Unencrypted Communication".to_string(),
                description: "Due to the confidentiality and/or integrity rating of the data assets \
                    transferred over the communication link this connection must be encrypted."
                    .to_string(),
                impact: "If this risk is unmitigated, network attackers might be able to eavesdrop \
                    on unencrypted sensitive data sent between components."
                    .to_string(),
                asvs: "V9 - Communication Verification Requirements".to_string(),
                cheat_sheet: "https://cheatsheetseries.owasp.org/cheatsheets/Transport_Layer_Protection_Cheat_Sheet.html"
                    .to_string(),
                action: "Encryption of Communication Links".to_string(),
                mitigation: "Apply transport layer encryption to the communication link.".to_string(),
                check: "Are recommendations from the linked cheat sheet and referenced ASVS chapter applied?"
                    .to_string(),
                detection_logic: "Unencrypted technical communication links of in-scope technical \
                    assets transferring sensitive data or authentication credentials."
                    .to_string(),
                risk_assessment: "Depending on the confidentiality rating of the transferred data \
                    assets either medium or high risk."
                    .to_string(),
                false_positives: "When all sensitive data sent over the communication link is already \
                    fully encrypted on document or data level."
                    .to_string(),
                stride: Stride::InformationDisclosure,
                function: RiskFunction::Operations,
                model_failure_possible_reason: false,
                cwe: 319,
            },
        }
    }

    fn transfers_sensitive_data(ctx: &RuleContext<'_>, link: &CommunicationLink) -> bool {
        ctx.link_confidentiality(link) >= Confidentiality::Restricted
            || ctx.link_integrity(link) >= Criticality::Critical
    }

    fn is_highly_sensitive(ctx: &RuleContext<'_>, link: &CommunicationLink) -> bool {
        ctx.link_confidentiality(link) == Confidentiality::StrictlyConfidential
            || ctx.link_integrity(link) == Criticality::MissionCritical
    }
}

impl Default for UnencryptedCommunicationRule {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskRule for UnencryptedCommunicationRule {
    fn category(&self) -> &RiskCategory {
        &self.category
    }

    fn generate(&self, ctx: &RuleContext<'_>) -> Result<Vec<Risk>> {
        let mut risks = Vec::new();
        for link in ctx.graph.communication_links() {
            let Some((source, target)) = ctx.endpoints(link) else {
                continue;
            };
            if source.out_of_scope && target.out_of_scope {
                continue;
            }
            if link.protocol.is_encrypted() || link.protocol.is_process_local() || link.vpn {
                continue;
            }
            let sends_credentials = link.authentication != Authentication::None
                && link.authentication != Authentication::ClientCertificate;
            if !Self::transfers_sensitive_data(ctx, link) && !sends_credentials {
                continue;
            }

            let impact = if sends_credentials || Self::is_highly_sensitive(ctx, link) {
                RiskExploitationImpact::High
            } else {
                RiskExploitationImpact::Medium
            };
            let likelihood = if ctx.graph.is_across_network_trust_boundary(&link.id) {
                RiskExploitationLikelihood::Likely
            } else {
                RiskExploitationLikelihood::Unlikely
            };
            let title = if sends_credentials {
                format!(
                    "Unencrypted Communication named {} between {} and {} transferring authentication data",
                    link.title, source.title, target.title
                )
            } else {
                format!(
                    "Unencrypted Communication named {} between {} and {}",
                    link.title, source.title, target.title
                )
            };
            risks.push(
                Risk::new(title, likelihood, impact)
                    .with_technical_asset(&source.id)
                    .with_communication_link(&link.id)
                    .with_data_breach(DataBreachProbability::Possible, vec![target.id.clone()]),
            );
        }
        Ok(risks)
    }
}
