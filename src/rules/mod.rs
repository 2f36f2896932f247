//! Risk rules
//!
//! This module provides the rule framework and the built-in rule catalog.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        RuleEngine                           │
//! │  - Resolves active rules from the registry                  │
//! │  - Runs rules in parallel (rayon)                           │
//! │  - Stamps severity and synthetic ids                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   RiskCategoryRegistry                      │
//! │  - Built-in rules and custom rules by lower-cased id        │
//! │  - Custom rules shadow built-in ones                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!              ┌───────────────┴───────────────┐
//!              ▼                               ▼
//! ┌──────────────────────────┐   ┌──────────────────────────────┐
//! │ Built-in rules           │   │ Custom rules                 │
//! │ (model pattern checks)   │   │ (ManualRiskRule from the     │
//! │                          │   │  model file, or user code)   │
//! └──────────────────────────┘   └──────────────────────────────┘
//! ```
//!
//! # Built-in Rules
//!
//! - `unencrypted-communication` - Sensitive data over plaintext protocols
//! - `missing-authentication` - Unauthenticated access to sensitive assets
//! - `unguarded-access-from-internet` - Direct internet access without a guard
//! - `unencrypted-asset` - Sensitive data stored without encryption
//! - `missing-network-segmentation` - Sensitive assets sharing a network with unrelated ones
//! - `mixed-targets-on-shared-runtime` - Unrelated targets on one runtime
//! - `unnecessary-technical-asset` - Assets without data or links
//! - `dos-risky-access-across-trust-boundary` - Availability-critical assets reachable across boundaries
//! - `missing-hardening` - Attractive targets needing hardening
//! - `cross-site-request-forgery` - Web applications used from browsers
//!
//! # Usage
//!
//! ```ignore
//! let registry = Arc::new(RiskCategoryRegistry::with_built_in_rules());
//! let engine = RuleEngine::builder(registry).workers(4).build();
//! let analysis = engine.analyze(&graph, &ledger)?;
//! ```

mod base;
mod engine;
mod manual;
mod registry;

mod cross_site_request_forgery;
mod dos_risky_access;
mod missing_authentication;
mod missing_hardening;
mod missing_network_segmentation;
mod mixed_targets_on_shared_runtime;
mod unencrypted_asset;
mod unencrypted_communication;
mod unguarded_access_from_internet;
mod unnecessary_technical_asset;

#[cfg(test)]
mod test_support;

pub use base::{RiskRule, RuleContext, RuleResult};
pub use engine::{EvaluationSummary, RuleEngine, RuleEngineBuilder};
pub use manual::{IndividualRiskCategory, ManualRiskRule};
pub use registry::RiskCategoryRegistry;

pub use cross_site_request_forgery::CrossSiteRequestForgeryRule;
pub use dos_risky_access::DosRiskyAccessAcrossTrustBoundaryRule;
pub use missing_authentication::MissingAuthenticationRule;
pub use missing_hardening::MissingHardeningRule;
pub use missing_network_segmentation::MissingNetworkSegmentationRule;
pub use mixed_targets_on_shared_runtime::MixedTargetsOnSharedRuntimeRule;
pub use unencrypted_asset::UnencryptedAssetRule;
pub use unencrypted_communication::UnencryptedCommunicationRule;
pub use unguarded_access_from_internet::UnguardedAccessFromInternetRule;
pub use unnecessary_technical_asset::UnnecessaryTechnicalAssetRule;

use std::sync::Arc;

/// Create the default set of built-in rules
pub fn built_in_rules() -> Vec<Arc<dyn RiskRule>> {
    vec![
        Arc::new(UnencryptedCommunicationRule::new()),
        Arc::new(MissingAuthenticationRule::new()),
        Arc::new(UnguardedAccessFromInternetRule::new()),
        Arc::new(UnencryptedAssetRule::new()),
        Arc::new(MissingNetworkSegmentationRule::new()),
        Arc::new(MixedTargetsOnSharedRuntimeRule::new()),
        Arc::new(UnnecessaryTechnicalAssetRule::new()),
        Arc::new(DosRiskyAccessAcrossTrustBoundaryRule::new()),
        Arc::new(MissingHardeningRule::new()),
        Arc::new(CrossSiteRequestForgeryRule::new()),
    ]
}
