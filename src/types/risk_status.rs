use super::{TypeDescription, TypeEnum};
use serde::{Deserialize, Serialize};

/// Review state of a risk, taken from its risk tracking entry
///
/// The rank order doubles as the sort tie-break: open states sort before
/// closed ones.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum RiskStatus {
    #[default]
    Unchecked,
    InDiscussion,
    Accepted,
    InProgress,
    Mitigated,
    FalsePositive,
}

impl RiskStatus {
    /// True while the risk still counts as open
    pub fn is_still_at_risk(&self) -> bool {
        matches!(
            self,
            RiskStatus::Unchecked
                | RiskStatus::InDiscussion
                | RiskStatus::Accepted
                | RiskStatus::InProgress
        )
    }
}

impl TypeEnum for RiskStatus {
    const TYPE_NAME: &'static str = "RiskStatus";

    fn values() -> &'static [Self] {
        &[
            RiskStatus::Unchecked,
            RiskStatus::InDiscussion,
            RiskStatus::Accepted,
            RiskStatus::InProgress,
            RiskStatus::Mitigated,
            RiskStatus::FalsePositive,
        ]
    }

    fn description(&self) -> TypeDescription {
        match self {
            RiskStatus::Unchecked => TypeDescription::new(
                "unchecked",
                "Unchecked",
                "Risk has not yet been reviewed",
            ),
            RiskStatus::InDiscussion => TypeDescription::new(
                "in-discussion",
                "In Discussion",
                "Risk is currently being discussed (during review)",
            ),
            RiskStatus::Accepted => TypeDescription::new(
                "accepted",
                "Accepted",
                "Risk has been accepted (as possibly a corporate risk acceptance process defines)",
            ),
            RiskStatus::InProgress => TypeDescription::new(
                "in-progress",
                "In Progress",
                "Risk mitigation is currently in progress",
            ),
            RiskStatus::Mitigated => {
                TypeDescription::new("mitigated", "Mitigated", "Risk has been mitigated")
            }
            RiskStatus::FalsePositive => TypeDescription::new(
                "false-positive",
                "False Positive",
                "Risk is a false positive (i.e. no risk at all or not applicable)",
            ),
        }
    }
}
