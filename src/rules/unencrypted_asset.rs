//! Unencrypted technical asset rule

use super::base::{RiskRule, RuleContext};
use crate::models::{Risk, RiskCategory};
use crate::types::{
    Confidentiality, Criticality, DataBreachProbability, EncryptionStyle, RiskExploitationImpact,
    RiskExploitationLikelihood, RiskFunction, Stride, TechnicalAssetType,
};
use anyhow::Result;

pub const ID: &str = "unencrypted-asset";

pub struct UnencryptedAssetRule {
    category: RiskCategory,
}

impl UnencryptedAssetRule {
    pub fn new() -> Self {
        Self {
            category: RiskCategory {
                id: ID.to_string(),
                title: "Unencrypted Technical Assets".to_string(),
                description: "Due to the confidentiality rating of the technical asset itself and/or \
                    the stored data assets this technical asset must be encrypted."
                    .to_string(),
                impact: "If this risk is unmitigated, attackers might be able to access unencrypted \
                    data when successfully compromising sensitive components."
                    .to_string(),
                asvs: "V6 - Stored Cryptography Verification Requirements".to_string(),
                cheat_sheet: "https://cheatsheetseries.owasp.org/cheatsheets/Cryptographic_Storage_Cheat_Sheet.html"
                    .to_string(),
                action: "Encryption of Technical Asset".to_string(),
                mitigation: "Apply encryption to the technical asset.".to_string(),
                check: "Are recommendations from the linked cheat sheet and referenced ASVS chapter applied?"
                    .to_string(),
                detection_logic: "In-scope unencrypted technical assets (excluding external entities) \
                    storing data assets rated at least as confidential or critical. Transparent \
                    encryption is not enough for strictly confidential data."
                    .to_string(),
                risk_assessment: "Depending on the confidentiality rating of the stored data assets \
                    either medium or high risk."
                    .to_string(),
                false_positives: "When all sensitive data stored within the asset is already fully \
                    encrypted on document or data level."
                    .to_string(),
                stride: Stride::InformationDisclosure,
                function: RiskFunction::Operations,
                model_failure_possible_reason: false,
                cwe: 311,
            },
        }
    }
}

impl Default for UnencryptedAssetRule {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskRule for UnencryptedAssetRule {
    fn category(&self) -> &RiskCategory {
        &self.category
    }

    fn generate(&self, ctx: &RuleContext<'_>) -> Result<Vec<Risk>> {
        let mut risks = Vec::new();
        for asset in ctx.graph.technical_assets() {
            if asset.out_of_scope || asset.asset_type == TechnicalAssetType::ExternalEntity {
                continue;
            }
            let stored = ctx.graph.data_assets_stored(&asset.id);
            let confidentiality = stored
                .iter()
                .map(|d| d.confidentiality)
                .fold(asset.confidentiality, Ord::max);
            let integrity = stored
                .iter()
                .map(|d| d.integrity)
                .fold(asset.integrity, Ord::max);
            if confidentiality < Confidentiality::Confidential
                && integrity < Criticality::Critical
            {
                continue;
            }

            let highly_sensitive = confidentiality == Confidentiality::StrictlyConfidential
                || integrity == Criticality::MissionCritical;
            let (title, impact) = match asset.encryption {
                EncryptionStyle::None => {
                    let impact = if highly_sensitive {
                        RiskExploitationImpact::High
                    } else {
                        RiskExploitationImpact::Medium
                    };
                    (format!("Unencrypted Technical Asset named {}", asset.title), impact)
                }
                EncryptionStyle::Transparent
                    if confidentiality == Confidentiality::StrictlyConfidential =>
                {
                    (
                        format!(
                            "Unencrypted Technical Asset named {} missing end user individual encryption",
                            asset.title
                        ),
                        RiskExploitationImpact::Medium,
                    )
                }
                _ => continue,
            };
            risks.push(
                Risk::new(title, RiskExploitationLikelihood::Unlikely, impact)
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
    use crate::rules::test_support::{data, datastore, ids, run};

    fn builder(
        encryption: EncryptionStyle,
        confidentiality: Confidentiality,
    ) -> crate::model::ModelGraphBuilder {
        let mut db = datastore("db");
        db.encryption = encryption;
        db.data_assets_stored = vec!["records".into()];
        ModelGraph::builder("m")
            .data_asset(data("records", confidentiality, Criticality::Operational))
            .technical_asset(db)
    }

    #[test]
    fn test_unencrypted_store_of_confidential_data() {
        let risks = run(
            &UnencryptedAssetRule::new(),
            builder(EncryptionStyle::None, Confidentiality::Confidential),
        );
        assert_eq!(ids(&risks, ID), vec!["unencrypted-asset@db"]);
        assert_eq!(risks[0].exploitation_impact, RiskExploitationImpact::Medium);
    }

    #[test]
    fn test_strictly_confidential_raises_impact() {
        let risks = run(
            &UnencryptedAssetRule::new(),
            builder(EncryptionStyle::None, Confidentiality::StrictlyConfidential),
        );
        assert_eq!(risks[0].exploitation_impact, RiskExploitationImpact::High);
    }

    #[test]
    fn test_transparent_encryption_only_flags_strictly_confidential() {
        let ok = run(
            &UnencryptedAssetRule::new(),
            builder(EncryptionStyle::Transparent, Confidentiality::Confidential),
        );
        assert!(ok.is_empty());
        let flagged = run(
            &UnencryptedAssetRule::new(),
            builder(EncryptionStyle::Transparent, Confidentiality::StrictlyConfidential),
        );
        assert_eq!(flagged.len(), 1);
    }

    #[test]
    fn test_encrypted_store_is_fine() {
        let risks = run(
            &UnencryptedAssetRule::new(),
            builder(
                EncryptionStyle::DataWithSymmetricSharedKey,
                Confidentiality::StrictlyConfidential,
            ),
        );
        assert!(risks.is_empty());
    }
}
