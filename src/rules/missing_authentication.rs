//! Missing authentication rule

use super::base::{RiskRule, RuleContext};
use crate::models::{Risk, RiskCategory};
use crate::types::{
    Authentication, DataBreachProbability, RiskExploitationImpact, RiskExploitationLikelihood,
    RiskFunction, Stride, TechnicalAssetType,
};
use anyhow::Result;

pub const ID: &str = "missing-authentication";

/// Sensitive assets called without any authentication
pub struct MissingAuthenticationRule {
    category: RiskCategory,
}

impl MissingAuthenticationRule {
    pub fn new() -> Self {
        Self {
            category: RiskCategory {
                id: ID.to_string(),
                title: "Missing Authentication".to_string(),
                description: "Technical assets (especially multi-tenant systems) should authenticate \
                    incoming requests when the asset processes or stores sensitive data."
                    .to_string(),
                impact: "If this risk is unmitigated, attackers might be able to access or modify \
                    sensitive data in an unauthenticated way."
                    .to_string(),
                asvs: "V2 - Authentication Verification Requirements".to_string(),
                cheat_sheet: "https://cheatsheetseries.owasp.org/cheatsheets/Authentication_Cheat_Sheet.html"
                    .to_string(),
                action: "Authentication of Incoming Requests".to_string(),
                mitigation: "Apply an authentication method to the technical asset. To protect highly \
                    sensitive data consider the use of two-factor authentication for human users."
                    .to_string(),
                check: "Are recommendations from the linked cheat sheet and referenced ASVS chapter applied?"
                    .to_string(),
                detection_logic: "In-scope technical assets (except external entities) with sensitive \
                    ratings called by other assets without authentication."
                    .to_string(),
                risk_assessment: "The risk rating depends on the sensitivity of the technical asset \
                    itself and of the data assets processed and stored."
                    .to_string(),
                false_positives: "Technical assets which do not process requests regarding \
                    functionality or data linked to end-users (customers) can be considered as false \
                    positives after individual review."
                    .to_string(),
                stride: Stride::ElevationOfPrivilege,
                function: RiskFunction::Architecture,
                model_failure_possible_reason: false,
                cwe: 306,
            },
        }
    }
}

impl Default for MissingAuthenticationRule {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskRule for MissingAuthenticationRule {
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
            let impact = if ctx.is_highly_sensitive(asset) {
                RiskExploitationImpact::High
            } else {
                RiskExploitationImpact::Medium
            };
            for link in ctx.graph.incoming_links(&asset.id) {
                if link.authentication != Authentication::None || link.protocol.is_process_local() {
                    continue;
                }
                let Some(caller) = ctx.graph.technical_asset(&link.source_id) else {
                    continue;
                };
                if caller.is_datastore() {
                    continue;
                }
                risks.push(
                    Risk::new(
                        format!(
                            "Missing Authentication covering communication link {} from {} to {}",
                            link.title, caller.title, asset.title
                        ),
                        RiskExploitationLikelihood::Likely,
                        impact,
                    )
                    .with_technical_asset(&asset.id)
                    .with_communication_link(&link.id)
                    .with_data_breach(DataBreachProbability::Possible, vec![asset.id.clone()]),
                );
            }
        }
        Ok(risks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelGraph;
    use crate::rules::test_support::{data, datastore, ids, link, process, run};
    use crate::types::{Confidentiality, Criticality, Protocol};

    fn builder(authentication: Authentication) -> crate::model::ModelGraphBuilder {
        let mut api = process("api");
        api.data_assets_processed = vec!["customers".into()];
        let mut call = link("web-api", "web", "api", Protocol::Https);
        call.authentication = authentication;
        ModelGraph::builder("m")
            .data_asset(data(
                "customers",
                Confidentiality::Confidential,
                Criticality::Important,
            ))
            .technical_asset(process("web"))
            .technical_asset(api)
            .communication_link(call)
    }

    #[test]
    fn test_unauthenticated_call_to_sensitive_asset() {
        let risks = run(&MissingAuthenticationRule::new(), builder(Authentication::None));
        assert_eq!(ids(&risks, ID), vec!["missing-authentication@api@web-api"]);
        assert_eq!(risks[0].exploitation_impact, RiskExploitationImpact::Medium);
    }

    #[test]
    fn test_authenticated_call_is_fine() {
        let risks = run(&MissingAuthenticationRule::new(), builder(Authentication::Token));
        assert!(risks.is_empty());
    }

    #[test]
    fn test_calls_from_datastores_are_ignored() {
        let mut api = process("api");
        api.confidentiality = Confidentiality::StrictlyConfidential;
        let b = ModelGraph::builder("m")
            .technical_asset(datastore("db"))
            .technical_asset(api)
            .communication_link(link("db-api", "db", "api", Protocol::Jdbc));
        assert!(run(&MissingAuthenticationRule::new(), b).is_empty());
    }

    #[test]
    fn test_out_of_scope_asset_is_skipped() {
        let mut api = process("api");
        api.confidentiality = Confidentiality::StrictlyConfidential;
        api.out_of_scope = true;
        let b = ModelGraph::builder("m")
            .technical_asset(process("web"))
            .technical_asset(api)
            .communication_link(link("web-api", "web", "api", Protocol::Https));
        assert!(run(&MissingAuthenticationRule::new(), b).is_empty());
    }
}
