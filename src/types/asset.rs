use super::{TypeDescription, TypeEnum};
use serde::{Deserialize, Serialize};

/// Kind of machine a technical asset runs on
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum TechnicalAssetMachine {
    #[default]
    Physical,
    Virtual,
    Container,
    Serverless,
}

impl TypeEnum for TechnicalAssetMachine {
    const TYPE_NAME: &'static str = "TechnicalAssetMachine";

    fn values() -> &'static [Self] {
        &[
            TechnicalAssetMachine::Physical,
            TechnicalAssetMachine::Virtual,
            TechnicalAssetMachine::Container,
            TechnicalAssetMachine::Serverless,
        ]
    }

    fn description(&self) -> TypeDescription {
        match self {
            TechnicalAssetMachine::Physical => {
                TypeDescription::new("physical", "Physical", "A physical machine")
            }
            TechnicalAssetMachine::Virtual => {
                TypeDescription::new("virtual", "Virtual", "A virtual machine")
            }
            TechnicalAssetMachine::Container => {
                TypeDescription::new("container", "Container", "A container")
            }
            TechnicalAssetMachine::Serverless => {
                TypeDescription::new("serverless", "Serverless", "A serverless application")
            }
        }
    }
}

/// Role of a technical asset in the architecture
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum TechnicalAssetType {
    #[default]
    ExternalEntity,
    Process,
    Datastore,
}

impl TypeEnum for TechnicalAssetType {
    const TYPE_NAME: &'static str = "TechnicalAssetType";

    fn values() -> &'static [Self] {
        &[
            TechnicalAssetType::ExternalEntity,
            TechnicalAssetType::Process,
            TechnicalAssetType::Datastore,
        ]
    }

    fn description(&self) -> TypeDescription {
        match self {
            TechnicalAssetType::ExternalEntity => TypeDescription::new(
                "external-entity",
                "External Entity",
                "This asset is hosted and managed by a third party",
            ),
            TechnicalAssetType::Process => TypeDescription::new(
                "process",
                "Process",
                "A software process",
            ),
            TechnicalAssetType::Datastore => TypeDescription::new(
                "datastore",
                "Datastore",
                "This asset stores data",
            ),
        }
    }
}

/// At-rest encryption applied by a technical asset
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum EncryptionStyle {
    #[default]
    None,
    Transparent,
    DataWithSymmetricSharedKey,
    DataWithAsymmetricSharedKey,
    DataWithEnduserIndividualKey,
}

impl TypeEnum for EncryptionStyle {
    const TYPE_NAME: &'static str = "EncryptionStyle";

    fn values() -> &'static [Self] {
        &[
            EncryptionStyle::None,
            EncryptionStyle::Transparent,
            EncryptionStyle::DataWithSymmetricSharedKey,
            EncryptionStyle::DataWithAsymmetricSharedKey,
            EncryptionStyle::DataWithEnduserIndividualKey,
        ]
    }

    fn description(&self) -> TypeDescription {
        match self {
            EncryptionStyle::None => TypeDescription::new("none", "None", "No encryption"),
            EncryptionStyle::Transparent => TypeDescription::new(
                "transparent",
                "Transparent",
                "Encrypted data at rest",
            ),
            EncryptionStyle::DataWithSymmetricSharedKey => TypeDescription::new(
                "data-with-symmetric-shared-key",
                "Data with Symmetric Shared Key",
                "Both communication partners have the same key",
            ),
            EncryptionStyle::DataWithAsymmetricSharedKey => TypeDescription::new(
                "data-with-asymmetric-shared-key",
                "Data with Asymmetric Shared Key",
                "The key is split into public and private",
            ),
            EncryptionStyle::DataWithEnduserIndividualKey => TypeDescription::new(
                "data-with-enduser-individual-key",
                "Data with End-User Individual Key",
                "The key is (managed) by the end user",
            ),
        }
    }
}

/// Confidentiality classification of data or an asset
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum Confidentiality {
    #[default]
    Public,
    Internal,
    Restricted,
    Confidential,
    StrictlyConfidential,
}

impl Confidentiality {
    /// Numeric rating 0..=4
    pub fn rating(&self) -> u8 {
        match self {
            Confidentiality::Public => 0,
            Confidentiality::Internal => 1,
            Confidentiality::Restricted => 2,
            Confidentiality::Confidential => 3,
            Confidentiality::StrictlyConfidential => 4,
        }
    }
}

impl TypeEnum for Confidentiality {
    const TYPE_NAME: &'static str = "Confidentiality";

    fn values() -> &'static [Self] {
        &[
            Confidentiality::Public,
            Confidentiality::Internal,
            Confidentiality::Restricted,
            Confidentiality::Confidential,
            Confidentiality::StrictlyConfidential,
        ]
    }

    fn description(&self) -> TypeDescription {
        match self {
            Confidentiality::Public => TypeDescription::new(
                "public",
                "Public",
                "Public available information",
            ),
            Confidentiality::Internal => TypeDescription::new(
                "internal",
                "Internal",
                "(Company) internal information - but all people in the institution can access it",
            ),
            Confidentiality::Restricted => TypeDescription::new(
                "restricted",
                "Restricted",
                "Internal and with restricted access",
            ),
            Confidentiality::Confidential => TypeDescription::new(
                "confidential",
                "Confidential",
                "Only a few selected people have access",
            ),
            Confidentiality::StrictlyConfidential => TypeDescription::new(
                "strictly-confidential",
                "Strictly Confidential",
                "Highest secrecy level",
            ),
        }
    }
}

/// Integrity or availability criticality of data or an asset
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum Criticality {
    #[default]
    Archive,
    Operational,
    Important,
    Critical,
    MissionCritical,
}

impl Criticality {
    /// Numeric rating 0..=4
    pub fn rating(&self) -> u8 {
        match self {
            Criticality::Archive => 0,
            Criticality::Operational => 1,
            Criticality::Important => 2,
            Criticality::Critical => 3,
            Criticality::MissionCritical => 4,
        }
    }
}

impl TypeEnum for Criticality {
    const TYPE_NAME: &'static str = "Criticality";

    fn values() -> &'static [Self] {
        &[
            Criticality::Archive,
            Criticality::Operational,
            Criticality::Important,
            Criticality::Critical,
            Criticality::MissionCritical,
        ]
    }

    fn description(&self) -> TypeDescription {
        match self {
            Criticality::Archive => TypeDescription::new(
                "archive",
                "Archive",
                "Stored, not active",
            ),
            Criticality::Operational => TypeDescription::new(
                "operational",
                "Operational",
                "If this fails, people will just have an ad-hoc coffee break until it is back",
            ),
            Criticality::Important => TypeDescription::new(
                "important",
                "Important",
                "Issues here results in angry people",
            ),
            Criticality::Critical => TypeDescription::new(
                "critical",
                "Critical",
                "Failure is really expensive or crippling",
            ),
            Criticality::MissionCritical => TypeDescription::new(
                "mission-critical",
                "Mission-Critical",
                "This must not fail",
            ),
        }
    }
}

/// Kind of perimeter a trust boundary represents
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum TrustBoundaryType {
    #[default]
    NetworkOnPrem,
    NetworkDedicatedHoster,
    NetworkVirtualLan,
    NetworkCloudProvider,
    NetworkCloudSecurityGroup,
    NetworkPolicyNamespaceIsolation,
    ExecutionEnvironment,
}

impl TrustBoundaryType {
    /// Everything except an execution environment separates networks
    pub fn is_network_boundary(&self) -> bool {
        !matches!(self, TrustBoundaryType::ExecutionEnvironment)
    }
}

impl TypeEnum for TrustBoundaryType {
    const TYPE_NAME: &'static str = "TrustBoundaryType";

    fn values() -> &'static [Self] {
        &[
            TrustBoundaryType::NetworkOnPrem,
            TrustBoundaryType::NetworkDedicatedHoster,
            TrustBoundaryType::NetworkVirtualLan,
            TrustBoundaryType::NetworkCloudProvider,
            TrustBoundaryType::NetworkCloudSecurityGroup,
            TrustBoundaryType::NetworkPolicyNamespaceIsolation,
            TrustBoundaryType::ExecutionEnvironment,
        ]
    }

    fn description(&self) -> TypeDescription {
        match self {
            TrustBoundaryType::NetworkOnPrem => TypeDescription::new(
                "network-on-prem",
                "Network On-Prem",
                "On-premises network",
            ),
            TrustBoundaryType::NetworkDedicatedHoster => TypeDescription::new(
                "network-dedicated-hoster",
                "Network Dedicated Hoster",
                "Dedicated hoster network",
            ),
            TrustBoundaryType::NetworkVirtualLan => TypeDescription::new(
                "network-virtual-lan",
                "Network Virtual LAN",
                "Virtual LAN",
            ),
            TrustBoundaryType::NetworkCloudProvider => TypeDescription::new(
                "network-cloud-provider",
                "Network Cloud Provider",
                "Cloud provider network",
            ),
            TrustBoundaryType::NetworkCloudSecurityGroup => TypeDescription::new(
                "network-cloud-security-group",
                "Network Cloud Security Group",
                "Cloud security group",
            ),
            TrustBoundaryType::NetworkPolicyNamespaceIsolation => TypeDescription::new(
                "network-policy-namespace-isolation",
                "Network Policy Namespace Isolation",
                "Network policy namespace isolation",
            ),
            TrustBoundaryType::ExecutionEnvironment => TypeDescription::new(
                "execution-environment",
                "Execution Environment",
                "Execution environment (i.e. no network boundary)",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratings_follow_rank() {
        for (rank, value) in Confidentiality::values().iter().enumerate() {
            assert_eq!(value.rating() as usize, rank);
        }
        for (rank, value) in Criticality::values().iter().enumerate() {
            assert_eq!(value.rating() as usize, rank);
        }
    }

    #[test]
    fn test_network_boundaries() {
        assert!(TrustBoundaryType::NetworkCloudProvider.is_network_boundary());
        assert!(!TrustBoundaryType::ExecutionEnvironment.is_network_boundary());
    }
}
