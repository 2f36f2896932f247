//! Error types for the risk engine
//!
//! The core returns [`EngineError`]; the loader, config and CLI layers wrap
//! it with `anyhow` context.

use thiserror::Error;

/// Errors that can occur while building a model or evaluating risks
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("cannot parse value {value:?} into {type_name}")]
    Parse {
        type_name: &'static str,
        value: String,
    },

    #[error("invalid model: {0}")]
    Model(String),

    #[error(
        "{} orphaned risk tracking entries not matching any generated risk: {}",
        ids.len(),
        ids.join(", ")
    )]
    OrphanedRiskTracking { ids: Vec<String> },

    #[error("risk rule {category} failed: {message}")]
    RuleFailed { category: String, message: String },
}

impl EngineError {
    pub fn parse(type_name: &'static str, value: impl Into<String>) -> Self {
        EngineError::Parse {
            type_name,
            value: value.into(),
        }
    }

    pub fn model(message: impl Into<String>) -> Self {
        EngineError::Model(message.into())
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
