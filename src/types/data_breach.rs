use super::{TypeDescription, TypeEnum};
use serde::{Deserialize, Serialize};

/// Probability that exploiting a risk leads to a data breach
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum DataBreachProbability {
    #[default]
    Improbable,
    Possible,
    Probable,
}

impl DataBreachProbability {
    pub fn weight(&self) -> u8 {
        match self {
            DataBreachProbability::Improbable => 1,
            DataBreachProbability::Possible => 2,
            DataBreachProbability::Probable => 3,
        }
    }
}

impl TypeEnum for DataBreachProbability {
    const TYPE_NAME: &'static str = "DataBreachProbability";

    fn values() -> &'static [Self] {
        &[
            DataBreachProbability::Improbable,
            DataBreachProbability::Possible,
            DataBreachProbability::Probable,
        ]
    }

    fn description(&self) -> TypeDescription {
        match self {
            DataBreachProbability::Improbable => {
                TypeDescription::new("improbable", "Improbable", "Improbable")
            }
            DataBreachProbability::Possible => {
                TypeDescription::new("possible", "Possible", "Possible")
            }
            DataBreachProbability::Probable => {
                TypeDescription::new("probable", "Probable", "Probable")
            }
        }
    }
}
