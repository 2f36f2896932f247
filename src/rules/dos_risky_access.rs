//! Denial-of-service risky access across trust boundary rule

use super::base::{RiskRule, RuleContext};
use crate::models::{Risk, RiskCategory};
use crate::types::{
    Criticality, DataBreachProbability, RiskExploitationImpact, RiskExploitationLikelihood,
    RiskFunction, Stride,
};
use anyhow::Result;

pub const ID: &str = "dos-risky-access-across-trust-boundary";

pub struct DosRiskyAccessAcrossTrustBoundaryRule {
    category: RiskCategory,
}

impl DosRiskyAccessAcrossTrustBoundaryRule {
    pub fn new() -> Self {
        Self {
            category: RiskCategory {
                id: ID.to_string(),
                title: "DoS-risky Access Across Trust-Boundary".to_string(),
                description: "Assets accessed across trust boundaries with critical or \
                    mission-critical availability rating are more prone to Denial-of-Service (DoS) \
                    risks."
                    .to_string(),
                impact: "If this risk remains unmitigated, attackers might be able to disturb the \
                    availability of important parts of the system."
                    .to_string(),
                asvs: "V1 - Architecture, Design and Threat Modeling Requirements".to_string(),
                cheat_sheet: "https://cheatsheetseries.owasp.org/cheatsheets/Denial_of_Service_Cheat_Sheet.html"
                    .to_string(),
                action: "Anti-DoS Measures".to_string(),
                mitigation: "Apply anti-DoS techniques like throttling and/or per-client load \
                    blocking with quotas. Also for maintenance access routes consider applying a VPN \
                    instead of public reachable interfaces."
                    .to_string(),
                check: "Are recommendations from the linked cheat sheet and referenced ASVS chapter applied?"
                    .to_string(),
                detection_logic: "In-scope technical assets (excluding load-balancer) with \
                    availability rating of critical or higher which have incoming data-flows across \
                    a network trust-boundary (excluding devops usage)."
                    .to_string(),
                risk_assessment: "Matching technical assets with availability rating of critical or \
                    higher are at low risk. When the availability rating is mission-critical the \
                    risk is medium."
                    .to_string(),
                false_positives: "When the accessed target operations are not time- or \
                    resource-consuming."
                    .to_string(),
                stride: Stride::DenialOfService,
                function: RiskFunction::Operations,
                model_failure_possible_reason: false,
                cwe: 400,
            },
        }
    }
}

impl Default for DosRiskyAccessAcrossTrustBoundaryRule {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskRule for DosRiskyAccessAcrossTrustBoundaryRule {
    fn category(&self) -> &RiskCategory {
        &self.category
    }

    fn generate(&self, ctx: &RuleContext<'_>) -> Result<Vec<Risk>> {
        let mut risks = Vec::new();
        for target in ctx.graph.technical_assets() {
            if target.out_of_scope || target.technology.eq_ignore_ascii_case("load-balancer") {
                continue;
            }
            let availability = ctx.highest_availability(target);
            if availability < Criticality::Critical {
                continue;
            }
            let impact = if availability == Criticality::MissionCritical {
                RiskExploitationImpact::Medium
            } else {
                RiskExploitationImpact::Low
            };
            for link in ctx.graph.incoming_links(&target.id) {
                if link.vpn || link.ip_filtered || link.protocol.is_process_local() {
                    continue;
                }
                if !ctx.graph.is_across_network_trust_boundary(&link.id) {
                    continue;
                }
                let Some(source) = ctx.graph.technical_asset(&link.source_id) else {
                    continue;
                };
                if source.is_datastore() {
                    continue;
                }
                risks.push(
                    Risk::new(
                        format!(
                            "Denial-of-Service risky access of {} by {} via {}",
                            target.title, source.title, link.title
                        ),
                        RiskExploitationLikelihood::Unlikely,
                        impact,
                    )
                    .with_technical_asset(&target.id)
                    .with_communication_link(&link.id)
                    .with_data_breach(DataBreachProbability::Improbable, Vec::new()),
                );
            }
        }
        Ok(risks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ModelGraph, ModelGraphBuilder, TrustBoundary};
    use crate::rules::test_support::{ids, link, process, run};
    use crate::types::{Protocol, TrustBoundaryType};

    fn model(availability: Criticality, across: bool) -> ModelGraphBuilder {
        let mut api = process("api");
        api.availability = availability;
        let mut b = ModelGraph::builder("m")
            .technical_asset(process("client"))
            .technical_asset(api)
            .communication_link(link("call", "client", "api", Protocol::Https));
        if across {
            b = b.trust_boundary(TrustBoundary {
                id: "core".into(),
                boundary_type: TrustBoundaryType::NetworkCloudSecurityGroup,
                technical_assets_inside: vec!["api".into()],
                ..Default::default()
            });
        }
        b
    }

    #[test]
    fn test_critical_target_reached_across_network() {
        let risks = run(
            &DosRiskyAccessAcrossTrustBoundaryRule::new(),
            model(Criticality::MissionCritical, true),
        );
        assert_eq!(
            ids(&risks, ID),
            vec!["dos-risky-access-across-trust-boundary@api@call"]
        );
        assert_eq!(risks[0].exploitation_impact, RiskExploitationImpact::Medium);
    }

    #[test]
    fn test_same_network_is_fine() {
        let risks = run(
            &DosRiskyAccessAcrossTrustBoundaryRule::new(),
            model(Criticality::MissionCritical, false),
        );
        assert!(risks.is_empty());
    }

    #[test]
    fn test_low_availability_is_fine() {
        let risks = run(
            &DosRiskyAccessAcrossTrustBoundaryRule::new(),
            model(Criticality::Important, true),
        );
        assert!(risks.is_empty());
    }
}
