use super::{TypeDescription, TypeEnum};
use serde::{Deserialize, Serialize};

/// How likely an attacker is to exploit a risk
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum RiskExploitationLikelihood {
    #[default]
    Unlikely,
    Likely,
    VeryLikely,
    Frequent,
}

impl RiskExploitationLikelihood {
    /// Weight used by the severity lookup (rank + 1)
    pub fn weight(&self) -> u8 {
        match self {
            RiskExploitationLikelihood::Unlikely => 1,
            RiskExploitationLikelihood::Likely => 2,
            RiskExploitationLikelihood::VeryLikely => 3,
            RiskExploitationLikelihood::Frequent => 4,
        }
    }
}

impl TypeEnum for RiskExploitationLikelihood {
    const TYPE_NAME: &'static str = "RiskExploitationLikelihood";

    fn values() -> &'static [Self] {
        &[
            RiskExploitationLikelihood::Unlikely,
            RiskExploitationLikelihood::Likely,
            RiskExploitationLikelihood::VeryLikely,
            RiskExploitationLikelihood::Frequent,
        ]
    }

    fn description(&self) -> TypeDescription {
        match self {
            RiskExploitationLikelihood::Unlikely => {
                TypeDescription::new("unlikely", "Unlikely", "Unlikely")
            }
            RiskExploitationLikelihood::Likely => {
                TypeDescription::new("likely", "Likely", "Likely")
            }
            RiskExploitationLikelihood::VeryLikely => {
                TypeDescription::new("very-likely", "Very Likely", "Very-Likely")
            }
            RiskExploitationLikelihood::Frequent => {
                TypeDescription::new("frequent", "Frequent", "Frequent")
            }
        }
    }

    fn empty_default() -> Option<Self> {
        Some(RiskExploitationLikelihood::Likely)
    }
}

/// How much damage a successful exploitation does
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum RiskExploitationImpact {
    #[default]
    Low,
    Medium,
    Elevated,
    High,
    Critical,
}

impl RiskExploitationImpact {
    /// Weight used by the severity lookup (rank + 1)
    pub fn weight(&self) -> u8 {
        match self {
            RiskExploitationImpact::Low => 1,
            RiskExploitationImpact::Medium => 2,
            RiskExploitationImpact::Elevated => 3,
            RiskExploitationImpact::High => 4,
            RiskExploitationImpact::Critical => 5,
        }
    }
}

impl TypeEnum for RiskExploitationImpact {
    const TYPE_NAME: &'static str = "RiskExploitationImpact";

    fn values() -> &'static [Self] {
        &[
            RiskExploitationImpact::Low,
            RiskExploitationImpact::Medium,
            RiskExploitationImpact::Elevated,
            RiskExploitationImpact::High,
            RiskExploitationImpact::Critical,
        ]
    }

    fn description(&self) -> TypeDescription {
        match self {
            RiskExploitationImpact::Low => TypeDescription::new("low", "Low", "Low"),
            RiskExploitationImpact::Medium => TypeDescription::new("medium", "Medium", "Medium"),
            RiskExploitationImpact::Elevated => {
                TypeDescription::new("elevated", "Elevated", "Elevated")
            }
            RiskExploitationImpact::High => TypeDescription::new("high", "High", "High"),
            RiskExploitationImpact::Critical => {
                TypeDescription::new("critical", "Critical", "Critical")
            }
        }
    }
}
