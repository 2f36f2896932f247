//! Unguarded access from internet rule
//!
//! Internet-facing callers should reach internal assets only through a
//! guard (reverse proxy, gateway, load balancer, WAF). Public web
//! applications served over an encrypted web protocol are expected to be
//! reachable and are not flagged.

use super::base::{RiskRule, RuleContext};
use crate::model::TechnicalAsset;
use crate::models::{Risk, RiskCategory};
use crate::types::{
    Confidentiality, Criticality, DataBreachProbability, Protocol, RiskExploitationImpact,
    RiskExploitationLikelihood, RiskFunction, Stride, TechnicalAssetType,
};
use anyhow::Result;

pub const ID: &str = "unguarded-access-from-internet";

/// Technologies that count as a guard in front of internal assets
const GUARD_TECHNOLOGIES: &[&str] = &[
    "reverse-proxy",
    "load-balancer",
    "gateway",
    "waf",
    "api-gateway",
    "vpn-gateway",
];

pub struct UnguardedAccessFromInternetRule {
    category: RiskCategory,
}

impl UnguardedAccessFromInternetRule {
    pub fn new() -> Self {
        Self {
            category: RiskCategory {
                id: ID.to_string(),
                title: "Unguarded Access From Internet".to_string(),
                description: "Internet-exposed assets must be guarded by a protecting service, \
                    application, or reverse-proxy."
                    .to_string(),
                impact: "If this risk is unmitigated, attackers might be able to directly attack \
                    sensitive systems without any hardening components in-between due to them being \
                    directly exposed on the internet."
                    .to_string(),
                asvs: "V1 - Architecture, Design and Threat Modeling Requirements".to_string(),
                cheat_sheet: "https://cheatsheetseries.owasp.org/cheatsheets/Attack_Surface_Analysis_Cheat_Sheet.html"
                    .to_string(),
                action: "Encapsulation of Technical Asset".to_string(),
                mitigation: "Encapsulate the asset behind a guarding service, application, or \
                    reverse-proxy."
                    .to_string(),
                check: "Are recommendations from the linked cheat sheet and referenced ASVS chapter applied?"
                    .to_string(),
                detection_logic: "In-scope technical assets (excluding guards themselves) called \
                    directly by an internet-located asset over a link that is neither IP-filtered \
                    nor inside a VPN."
                    .to_string(),
                risk_assessment: "The matching technical assets are at low risk. When either the \
                    confidentiality rating is confidential or higher or the integrity rating is \
                    critical or higher, the risk is elevated."
                    .to_string(),
                false_positives: "When other means of filtering client requests are applied \
                    equivalent of reverse-proxy, load-balancer or web application firewall components."
                    .to_string(),
                stride: Stride::ElevationOfPrivilege,
                function: RiskFunction::Architecture,
                model_failure_possible_reason: false,
                cwe: 501,
            },
        }
    }

    fn is_guard(asset: &TechnicalAsset) -> bool {
        GUARD_TECHNOLOGIES
            .iter()
            .any(|tech| asset.technology.eq_ignore_ascii_case(tech))
    }
}

impl Default for UnguardedAccessFromInternetRule {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskRule for UnguardedAccessFromInternetRule {
    fn category(&self) -> &RiskCategory {
        &self.category
    }

    fn generate(&self, ctx: &RuleContext<'_>) -> Result<Vec<Risk>> {
        let mut risks = Vec::new();
        for asset in ctx.graph.technical_assets() {
            if asset.out_of_scope
                || asset.internet
                || asset.asset_type == TechnicalAssetType::ExternalEntity
                || Self::is_guard(asset)
            {
                continue;
            }
            for link in ctx.graph.incoming_links(&asset.id) {
                let Some(caller) = ctx.graph.technical_asset(&link.source_id) else {
                    continue;
                };
                if !caller.internet || link.ip_filtered || link.vpn {
                    continue;
                }
                if asset.web_application
                    && matches!(link.protocol, Protocol::Https | Protocol::Wss)
                    && asset.confidentiality < Confidentiality::Confidential
                {
                    continue;
                }
                let impact = if ctx.highest_confidentiality(asset) >= Confidentiality::Confidential
                    || ctx.highest_integrity(asset) >= Criticality::Critical
                {
                    RiskExploitationImpact::Medium
                } else {
                    RiskExploitationImpact::Low
                };
                risks.push(
                    Risk::new(
                        format!(
                            "Unguarded Access from Internet of {} by {} via {}",
                            asset.title, caller.title, link.title
                        ),
                        RiskExploitationLikelihood::VeryLikely,
                        impact,
                    )
                    .with_technical_asset(&asset.id)
                    .with_communication_link(&link.id)
                    .with_data_breach(DataBreachProbability::Probable, vec![asset.id.clone()]),
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
    use crate::rules::test_support::{ids, link, process, run};

    fn internet_client() -> TechnicalAsset {
        TechnicalAsset {
            internet: true,
            asset_type: TechnicalAssetType::ExternalEntity,
            ..process("browser")
        }
    }

    #[test]
    fn test_direct_access_from_internet() {
        let mut api = process("api");
        api.integrity = Criticality::Critical;
        let b = ModelGraph::builder("m")
            .technical_asset(internet_client())
            .technical_asset(api)
            .communication_link(link("call", "browser", "api", Protocol::Http));
        let risks = run(&UnguardedAccessFromInternetRule::new(), b);
        assert_eq!(ids(&risks, ID), vec!["unguarded-access-from-internet@api@call"]);
        assert_eq!(risks[0].exploitation_impact, RiskExploitationImpact::Medium);
    }

    #[test]
    fn test_guard_is_not_flagged() {
        let mut proxy = process("proxy");
        proxy.technology = "Reverse-Proxy".into();
        let b = ModelGraph::builder("m")
            .technical_asset(internet_client())
            .technical_asset(proxy)
            .communication_link(link("call", "browser", "proxy", Protocol::Https));
        assert!(run(&UnguardedAccessFromInternetRule::new(), b).is_empty());
    }

    #[test]
    fn test_public_web_application_over_https_is_fine() {
        let mut web = process("web");
        web.web_application = true;
        let b = ModelGraph::builder("m")
            .technical_asset(internet_client())
            .technical_asset(web)
            .communication_link(link("call", "browser", "web", Protocol::Https));
        assert!(run(&UnguardedAccessFromInternetRule::new(), b).is_empty());
    }

    #[test]
    fn test_ip_filtered_link_is_fine() {
        let mut call = link("call", "browser", "api", Protocol::Http);
        call.ip_filtered = true;
        let b = ModelGraph::builder("m")
            .technical_asset(internet_client())
            .technical_asset(process("api"))
            .communication_link(call);
        assert!(run(&UnguardedAccessFromInternetRule::new(), b).is_empty());
    }
}
