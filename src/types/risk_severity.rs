use super::{RiskExploitationImpact, RiskExploitationLikelihood, TypeDescription, TypeEnum};
use serde::{Deserialize, Serialize};

/// Severity band of a risk, derived from likelihood and impact
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum RiskSeverity {
    #[default]
    Low,
    Medium,
    Elevated,
    High,
    Critical,
}

use self::RiskSeverity::{Critical as C, Elevated as E, High as H, Low as L, Medium as M};

/// Severity lookup. Rows are indexed by likelihood weight - 1
/// (unlikely..frequent), columns by impact weight - 1 (low..critical).
/// Every row and every column is non-decreasing.
const SEVERITY_TABLE: [[RiskSeverity; 5]; 4] = [
    // low medium elevated high critical
    [L, M, M, E, E], // unlikely
    [M, E, E, E, H], // likely
    [M, E, H, H, C], // very-likely
    [E, E, H, C, C], // frequent
];

impl RiskSeverity {
    /// Severity for a likelihood / impact pair
    pub fn calculate(
        likelihood: RiskExploitationLikelihood,
        impact: RiskExploitationImpact,
    ) -> RiskSeverity {
        let row = (likelihood.weight() - 1) as usize;
        let column = (impact.weight() - 1) as usize;
        SEVERITY_TABLE[row][column]
    }
}

impl TypeEnum for RiskSeverity {
    const TYPE_NAME: &'static str = "RiskSeverity";

    fn values() -> &'static [Self] {
        &[
            RiskSeverity::Low,
            RiskSeverity::Medium,
            RiskSeverity::Elevated,
            RiskSeverity::High,
            RiskSeverity::Critical,
        ]
    }

    fn description(&self) -> TypeDescription {
        match self {
            RiskSeverity::Low => TypeDescription::new("low", "Low", "Low"),
            RiskSeverity::Medium => TypeDescription::new("medium", "Medium", "Medium"),
            RiskSeverity::Elevated => TypeDescription::new("elevated", "Elevated", "Elevated"),
            RiskSeverity::High => TypeDescription::new("high", "High", "High"),
            RiskSeverity::Critical => TypeDescription::new("critical", "Critical", "Critical"),
        }
    }
}
