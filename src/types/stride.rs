use super::{TypeDescription, TypeEnum};
use serde::{Deserialize, Serialize};

/// STRIDE threat classification of a risk category
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum Stride {
    #[default]
    Spoofing,
    Tampering,
    Repudiation,
    InformationDisclosure,
    DenialOfService,
    ElevationOfPrivilege,
}

impl TypeEnum for Stride {
    const TYPE_NAME: &'static str = "STRIDE";

    fn values() -> &'static [Self] {
        &[
            Stride::Spoofing,
            Stride::Tampering,
            Stride::Repudiation,
            Stride::InformationDisclosure,
            Stride::DenialOfService,
            Stride::ElevationOfPrivilege,
        ]
    }

    fn description(&self) -> TypeDescription {
        match self {
            Stride::Spoofing => TypeDescription::new(
                "spoofing",
                "Spoofing",
                "Spoofing - Authenticity",
            ),
            Stride::Tampering => TypeDescription::new(
                "tampering",
                "Tampering",
                "Tampering - Integrity",
            ),
            Stride::Repudiation => TypeDescription::new(
                "repudiation",
                "Repudiation",
                "Repudiation - Non-repudiability",
            ),
            Stride::InformationDisclosure => TypeDescription::new(
                "information-disclosure",
                "Information Disclosure",
                "Information disclosure - Confidentiality",
            ),
            Stride::DenialOfService => TypeDescription::new(
                "denial-of-service",
                "Denial of Service",
                "Denial of service - Availability",
            ),
            Stride::ElevationOfPrivilege => TypeDescription::new(
                "elevation-of-privilege",
                "Elevation of Privilege",
                "Elevation of privilege - Authorization",
            ),
        }
    }
}
