//! Entities of the architecture model
//!
//! All entities deserialize straight from the model file. Missing fields
//! fall back to the zero value of their type.

use crate::types::{
    Authentication, Authorization, Confidentiality, Criticality, EncryptionStyle, Protocol,
    TechnicalAssetMachine, TechnicalAssetType, TrustBoundaryType,
};
use serde::{Deserialize, Serialize};

/// A piece of information handled by the system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DataAsset {
    pub id: String,
    pub title: String,
    pub description: String,
    pub confidentiality: Confidentiality,
    pub integrity: Criticality,
    pub availability: Criticality,
    pub tags: Vec<String>,
}

/// A component of the architecture: an external entity, process or datastore
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TechnicalAsset {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(alias = "type")]
    pub asset_type: TechnicalAssetType,
    pub machine: TechnicalAssetMachine,
    pub technology: String,
    pub internet: bool,
    pub out_of_scope: bool,
    pub used_as_client_by_human: bool,
    pub web_application: bool,
    pub encryption: EncryptionStyle,
    pub confidentiality: Confidentiality,
    pub integrity: Criticality,
    pub availability: Criticality,
    pub data_assets_processed: Vec<String>,
    pub data_assets_stored: Vec<String>,
    pub tags: Vec<String>,
}

impl TechnicalAsset {
    pub fn is_datastore(&self) -> bool {
        self.asset_type == TechnicalAssetType::Datastore
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Directed data flow from `source_id` to `target_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CommunicationLink {
    pub id: String,
    pub title: String,
    pub description: String,
    pub source_id: String,
    pub target_id: String,
    pub protocol: Protocol,
    pub authentication: Authentication,
    pub authorization: Authorization,
    pub vpn: bool,
    pub ip_filtered: bool,
    pub readonly: bool,
    pub data_assets_sent: Vec<String>,
    pub data_assets_received: Vec<String>,
    pub tags: Vec<String>,
}

impl CommunicationLink {
    /// Ids of data sent and received, sorted and de-duplicated
    pub fn data_asset_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .data_assets_sent
            .iter()
            .chain(&self.data_assets_received)
            .map(String::as_str)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

/// A perimeter around technical assets, possibly nested in another one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TrustBoundary {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(alias = "type")]
    pub boundary_type: TrustBoundaryType,
    pub technical_assets_inside: Vec<String>,
    pub trust_boundaries_nested: Vec<String>,
    pub tags: Vec<String>,
}

/// Infrastructure shared by several technical assets (a host, a cluster)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SharedRuntime {
    pub id: String,
    pub title: String,
    pub description: String,
    pub technical_assets_running: Vec<String>,
    pub tags: Vec<String>,
}
