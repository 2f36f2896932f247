use super::{TypeDescription, TypeEnum};
use serde::{Deserialize, Serialize};

/// Organizational function responsible for mitigating a risk category
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum RiskFunction {
    #[default]
    BusinessSide,
    Architecture,
    Development,
    Operations,
}

impl TypeEnum for RiskFunction {
    const TYPE_NAME: &'static str = "RiskFunction";

    fn values() -> &'static [Self] {
        &[
            RiskFunction::BusinessSide,
            RiskFunction::Architecture,
            RiskFunction::Development,
            RiskFunction::Operations,
        ]
    }

    fn description(&self) -> TypeDescription {
        match self {
            RiskFunction::BusinessSide => {
                TypeDescription::new("business-side", "Business Side", "Business")
            }
            RiskFunction::Architecture => {
                TypeDescription::new("architecture", "Architecture", "Architecture")
            }
            RiskFunction::Development => {
                TypeDescription::new("development", "Development", "Development")
            }
            RiskFunction::Operations => {
                TypeDescription::new("operations", "Operations", "Operations")
            }
        }
    }
}
