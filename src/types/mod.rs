//! Enumerated scales used by the model and the risk engine
//!
//! Every scale is a small closed enum. Ordering comes from the variant rank
//! (derived `Ord`), never from the textual name. Each variant's metadata
//! lives in a [`TypeDescription`] returned by an exhaustive `match`, so the
//! compiler guarantees that no variant is missing its table entry.
//!
//! Parsing goes through [`parse_type_enum`]: the input is trimmed and then
//! matched case-sensitively against the short names. Serde uses the same
//! path, so a model file and the API accept exactly the same strings.

mod asset;
mod data_breach;
mod exploitation;
mod link;
mod risk_function;
mod risk_severity;
mod risk_status;
mod stride;

pub use asset::{
    Confidentiality, Criticality, EncryptionStyle, TechnicalAssetMachine, TechnicalAssetType,
    TrustBoundaryType,
};
pub use data_breach::DataBreachProbability;
pub use exploitation::{RiskExploitationImpact, RiskExploitationLikelihood};
pub use link::{Authentication, Authorization, Protocol};
pub use risk_function::RiskFunction;
pub use risk_severity::RiskSeverity;
pub use risk_status::RiskStatus;
pub use stride::Stride;

use crate::error::{EngineError, EngineResult};

/// Short name, display title and explanation of one enum variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDescription {
    /// Short name used for parsing and serialization (e.g. `in-discussion`)
    pub name: &'static str,
    /// Human-readable title (e.g. `In Discussion`)
    pub title: &'static str,
    /// One-line explanation
    pub description: &'static str,
}

impl TypeDescription {
    pub const fn new(name: &'static str, title: &'static str, description: &'static str) -> Self {
        Self {
            name,
            title,
            description,
        }
    }
}

/// Common behaviour of all enumerated scales
pub trait TypeEnum: Sized + Copy + PartialEq + 'static {
    /// Name used in parse errors
    const TYPE_NAME: &'static str;

    /// All variants in rank order
    fn values() -> &'static [Self];

    /// Metadata for this variant
    fn description(&self) -> TypeDescription;

    /// Value returned when parsing an empty string. `None` makes an empty
    /// string a parse error.
    fn empty_default() -> Option<Self> {
        None
    }

    fn name(&self) -> &'static str {
        self.description().name
    }

    fn title(&self) -> &'static str {
        self.description().title
    }

    fn explain(&self) -> &'static str {
        self.description().description
    }
}

/// Parse a short name into an enum value
pub fn parse_type_enum<T: TypeEnum>(value: &str) -> EngineResult<T> {
    let value = value.trim();
    if value.is_empty() {
        if let Some(default) = T::empty_default() {
            return Ok(default);
        }
    }
    T::values()
        .iter()
        .copied()
        .find(|candidate| candidate.name() == value)
        .ok_or_else(|| EngineError::parse(T::TYPE_NAME, value))
}

/// Display, FromStr and the String conversions serde uses
/// (`#[serde(try_from = "String", into = "String")]`).
macro_rules! impl_type_enum_conversions {
    ($($t:ty),* $(,)?) => {$(
        impl std::fmt::Display for $t {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::types::TypeEnum::name(self))
            }
        }

        impl std::str::FromStr for $t {
            type Err = $crate::error::EngineError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $crate::types::parse_type_enum(s)
            }
        }

        impl TryFrom<String> for $t {
            type Error = $crate::error::EngineError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                $crate::types::parse_type_enum(&value)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> String {
                $crate::types::TypeEnum::name(&value).to_string()
            }
        }
    )*};
}

impl_type_enum_conversions!(
    RiskStatus,
    RiskSeverity,
    RiskExploitationLikelihood,
    RiskExploitationImpact,
    Stride,
    RiskFunction,
    DataBreachProbability,
    TechnicalAssetMachine,
    TechnicalAssetType,
    EncryptionStyle,
    Confidentiality,
    Criticality,
    TrustBoundaryType,
    Protocol,
    Authentication,
    Authorization,
);
