//! Base risk rule trait and types
//!
//! This module defines the core abstractions for risk detection:
//! - `RiskRule` trait that all rules must implement
//! - `RuleContext` giving rules read access to the model and scores
//! - `RuleResult` for capturing execution results

use crate::error::EngineError;
use crate::model::{CommunicationLink, ModelGraph, TechnicalAsset};
use crate::models::{Risk, RiskCategory};
use crate::scoring::AttractivenessScores;
use crate::types::{Confidentiality, Criticality};
use anyhow::Result;

/// Result from running a single rule
#[derive(Debug, Clone)]
pub struct RuleResult {
    /// Category id of the rule that produced these risks
    pub category_id: String,
    /// Risks produced by the rule
    pub risks: Vec<Risk>,
    /// Execution time in milliseconds
    pub duration_ms: u64,
    /// Whether the rule completed successfully
    pub success: bool,
    /// Why the rule failed, always [`EngineError::RuleFailed`]
    pub error: Option<EngineError>,
}

impl RuleResult {
    /// Create a successful result
    pub fn success(category_id: String, risks: Vec<Risk>, duration_ms: u64) -> Self {
        Self {
            category_id,
            risks,
            duration_ms,
            success: true,
            error: None,
        }
    }

    /// Create a failed result
    pub fn failure(category_id: String, message: String, duration_ms: u64) -> Self {
        let error = EngineError::RuleFailed {
            category: category_id.clone(),
            message,
        };
        Self {
            category_id,
            risks: Vec::new(),
            duration_ms,
            success: false,
            error: Some(error),
        }
    }
}

/// Read-only view a rule evaluates against
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub graph: &'a ModelGraph,
    pub attractiveness: &'a AttractivenessScores,
}

impl<'a> RuleContext<'a> {
    pub fn new(graph: &'a ModelGraph, attractiveness: &'a AttractivenessScores) -> Self {
        Self {
            graph,
            attractiveness,
        }
    }

    /// Highest confidentiality of the asset or of data it processes or stores
    pub fn highest_confidentiality(&self, asset: &TechnicalAsset) -> Confidentiality {
        self.graph
            .data_assets_processed_or_stored(&asset.id)
            .into_iter()
            .map(|d| d.confidentiality)
            .fold(asset.confidentiality, Ord::max)
    }

    /// Highest integrity of the asset or of data it processes or stores
    pub fn highest_integrity(&self, asset: &TechnicalAsset) -> Criticality {
        self.graph
            .data_assets_processed_or_stored(&asset.id)
            .into_iter()
            .map(|d| d.integrity)
            .fold(asset.integrity, Ord::max)
    }

    /// Highest availability of the asset or of data it processes or stores
    pub fn highest_availability(&self, asset: &TechnicalAsset) -> Criticality {
        self.graph
            .data_assets_processed_or_stored(&asset.id)
            .into_iter()
            .map(|d| d.availability)
            .fold(asset.availability, Ord::max)
    }

    /// Highest confidentiality of data carried by the link
    pub fn link_confidentiality(&self, link: &CommunicationLink) -> Confidentiality {
        self.graph
            .data_assets_of_link(&link.id)
            .into_iter()
            .map(|d| d.confidentiality)
            .max()
            .unwrap_or_default()
    }

    /// Highest integrity of data carried by the link
    pub fn link_integrity(&self, link: &CommunicationLink) -> Criticality {
        self.graph
            .data_assets_of_link(&link.id)
            .into_iter()
            .map(|d| d.integrity)
            .max()
            .unwrap_or_default()
    }

    /// Confidential data, or critical integrity or availability
    pub fn is_sensitive(&self, asset: &TechnicalAsset) -> bool {
        self.highest_confidentiality(asset) >= Confidentiality::Confidential
            || self.highest_integrity(asset) >= Criticality::Critical
            || self.highest_availability(asset) >= Criticality::Critical
    }

    /// Strictly confidential or mission-critical in any dimension
    pub fn is_highly_sensitive(&self, asset: &TechnicalAsset) -> bool {
        self.highest_confidentiality(asset) == Confidentiality::StrictlyConfidential
            || self.highest_integrity(asset) == Criticality::MissionCritical
            || self.highest_availability(asset) == Criticality::MissionCritical
    }

    /// The asset itself is on the internet or is called from an asset that is
    pub fn is_internet_exposed(&self, asset: &TechnicalAsset) -> bool {
        asset.internet
            || self.graph.incoming_links(&asset.id).iter().any(|link| {
                self.graph
                    .technical_asset(&link.source_id)
                    .is_some_and(|source| source.internet)
            })
    }

    /// Source and target asset of a link
    pub fn endpoints(
        &self,
        link: &CommunicationLink,
    ) -> Option<(&'a TechnicalAsset, &'a TechnicalAsset)> {
        let source = self.graph.technical_asset(&link.source_id)?;
        let target = self.graph.technical_asset(&link.target_id)?;
        Some((source, target))
    }
}

/// Trait for all risk rules
///
/// A rule inspects the model and returns one [`Risk`] per occurrence of the
/// weakness it encodes. Rules must be pure: the same model and scores
/// always give the same risks, in any order. The engine fills in
/// `category`, `severity`, `synthetic_id` and `risk_status`; a rule only
/// rates likelihood and impact and names the most relevant elements.
///
/// # Example Implementation
///
/// ```ignore
/// pub struct MyRule {
///     category: RiskCategory,
/// }
///
/// impl RiskRule for MyRule {
///     fn category(&self) -> &RiskCategory {
///         &self.category
///     }
///
///     fn generate(&self, ctx: &RuleContext<'_>) -> Result<Vec<Risk>> {
///         // Walk the model and rate what you find
///         Ok(vec![])
///     }
/// }
/// ```
pub trait RiskRule: Send + Sync {
    /// Category describing the risks this rule produces
    fn category(&self) -> &RiskCategory;

    /// Evaluate the rule against the model
    fn generate(&self, ctx: &RuleContext<'_>) -> Result<Vec<Risk>>;

    /// Category id of this rule
    fn id(&self) -> &str {
        &self.category().id
    }
}
