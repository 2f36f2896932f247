//! JSON model file loader
//!
//! Reads a model document into a [`ModelGraph`] plus the risk tracking
//! ledger stored next to it. Communication links may be written either
//! nested under their source asset or at the top level with a `source_id`.
//! Custom risk categories declared in the file come back as definitions for
//! the caller to register.

use super::{
    CommunicationLink, DataAsset, ModelGraph, SharedRuntime, TechnicalAsset, TrustBoundary,
};
use crate::rules::IndividualRiskCategory;
use crate::tracking::{RiskTracking, RiskTrackingLedger};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// A parsed model together with its tracking ledger
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub graph: ModelGraph,
    pub risk_tracking: RiskTrackingLedger,
    pub custom_risk_categories: Vec<IndividualRiskCategory>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ModelFile {
    title: String,
    data_assets: Vec<DataAsset>,
    technical_assets: Vec<TechnicalAssetEntry>,
    communication_links: Vec<CommunicationLink>,
    trust_boundaries: Vec<TrustBoundary>,
    shared_runtimes: Vec<SharedRuntime>,
    risk_tracking: BTreeMap<String, RiskTracking>,
    custom_risk_categories: Vec<IndividualRiskCategory>,
}

#[derive(Debug, Deserialize)]
struct TechnicalAssetEntry {
    #[serde(flatten)]
    asset: TechnicalAsset,
    #[serde(default)]
    communication_links: Vec<CommunicationLink>,
}

/// Load a model file from disk
pub fn load_model(path: &Path) -> Result<LoadedModel> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read model file {}", path.display()))?;
    let model = parse_model(&content)
        .with_context(|| format!("Failed to load model file {}", path.display()))?;
    info!(
        "Loaded model {:?} from {} ({} risk tracking entries)",
        model.graph.title(),
        path.display(),
        model.risk_tracking.len()
    );
    Ok(model)
}

/// Parse a model document
pub fn parse_model(content: &str) -> Result<LoadedModel> {
    let file: ModelFile = serde_json::from_str(content).context("Invalid model JSON")?;

    let mut builder = ModelGraph::builder(file.title);
    for data_asset in file.data_assets {
        builder = builder.data_asset(data_asset);
    }
    for entry in file.technical_assets {
        for mut link in entry.communication_links {
            if link.source_id.is_empty() {
                link.source_id = entry.asset.id.clone();
            } else if link.source_id != entry.asset.id {
                bail!(
                    "communication link {} is nested under {} but has source {}",
                    link.id,
                    entry.asset.id,
                    link.source_id
                );
            }
            builder = builder.communication_link(link);
        }
        builder = builder.technical_asset(entry.asset);
    }
    for link in file.communication_links {
        builder = builder.communication_link(link);
    }
    for boundary in file.trust_boundaries {
        builder = builder.trust_boundary(boundary);
    }
    for runtime in file.shared_runtimes {
        builder = builder.shared_runtime(runtime);
    }
    let graph = builder.build()?;

    let risk_tracking = RiskTrackingLedger::from_entries(file.risk_tracking.into_iter().map(
        |(key, mut tracking)| {
            tracking.synthetic_risk_id = key;
            tracking
        },
    ))?;
    debug!(
        "Parsed {} risk tracking entries and {} custom risk categories",
        risk_tracking.len(),
        file.custom_risk_categories.len()
    );

    Ok(LoadedModel {
        graph,
        risk_tracking,
        custom_risk_categories: file.custom_risk_categories,
    })
}
