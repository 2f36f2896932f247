//! Architecture model graph
//!
//! The [`ModelGraph`] holds every entity of one architecture description and
//! answers the structural questions risk rules ask: which links touch an
//! asset, which boundary an asset sits in, whether a link crosses a trust
//! boundary.
//!
//! A graph is only obtainable through [`ModelGraphBuilder::build`], which
//! validates all references up front. Rules can therefore look entities up
//! without handling dangling ids. Entities are kept in `BTreeMap`s and every
//! list-returning traversal is sorted by id, so iteration order never
//! depends on insertion order.
//!
//! ```text
//!   [web] --(l-web-db)--> [db]        nodes: technical assets
//!     ^                               edges: communication links (by id)
//!     |
//!   (l-user-web)
//!     |
//!   [user]
//! ```

mod builder;
mod entities;
pub mod loader;

#[cfg(test)]
mod tests;

pub use builder::ModelGraphBuilder;
pub use entities::{CommunicationLink, DataAsset, SharedRuntime, TechnicalAsset, TrustBoundary};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Validated, immutable architecture model
#[derive(Debug, Clone)]
pub struct ModelGraph {
    title: String,
    data_assets: BTreeMap<String, DataAsset>,
    technical_assets: BTreeMap<String, TechnicalAsset>,
    communication_links: BTreeMap<String, CommunicationLink>,
    trust_boundaries: BTreeMap<String, TrustBoundary>,
    shared_runtimes: BTreeMap<String, SharedRuntime>,
    /// asset id -> id of the boundary directly containing it
    boundary_of_asset: BTreeMap<String, String>,
    /// asset id -> id of the runtime it runs on
    runtime_of_asset: BTreeMap<String, String>,
    /// boundary id -> id of the boundary it is nested in
    parent_boundary: BTreeMap<String, String>,
    /// Asset nodes with link ids on the edges
    graph: DiGraph<String, String>,
    node_index: HashMap<String, NodeIndex>,
}

impl ModelGraph {
    pub fn builder(title: impl Into<String>) -> ModelGraphBuilder {
        ModelGraphBuilder::new(title)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    // ==================== Lookups ====================

    pub fn technical_asset(&self, id: &str) -> Option<&TechnicalAsset> {
        self.technical_assets.get(id)
    }

    pub fn data_asset(&self, id: &str) -> Option<&DataAsset> {
        self.data_assets.get(id)
    }

    pub fn communication_link(&self, id: &str) -> Option<&CommunicationLink> {
        self.communication_links.get(id)
    }

    pub fn trust_boundary(&self, id: &str) -> Option<&TrustBoundary> {
        self.trust_boundaries.get(id)
    }

    pub fn shared_runtime(&self, id: &str) -> Option<&SharedRuntime> {
        self.shared_runtimes.get(id)
    }

    pub fn technical_assets(&self) -> impl Iterator<Item = &TechnicalAsset> {
        self.technical_assets.values()
    }

    pub fn data_assets(&self) -> impl Iterator<Item = &DataAsset> {
        self.data_assets.values()
    }

    pub fn communication_links(&self) -> impl Iterator<Item = &CommunicationLink> {
        self.communication_links.values()
    }

    pub fn trust_boundaries(&self) -> impl Iterator<Item = &TrustBoundary> {
        self.trust_boundaries.values()
    }

    pub fn shared_runtimes(&self) -> impl Iterator<Item = &SharedRuntime> {
        self.shared_runtimes.values()
    }

    // ==================== Membership ====================

    /// Boundary directly containing the asset
    pub fn trust_boundary_of(&self, asset_id: &str) -> Option<&TrustBoundary> {
        self.boundary_of_asset
            .get(asset_id)
            .and_then(|id| self.trust_boundaries.get(id))
    }

    /// Closest network boundary around the asset, walking up through
    /// execution-environment boundaries
    pub fn network_trust_boundary_of(&self, asset_id: &str) -> Option<&TrustBoundary> {
        let mut current = self.trust_boundary_of(asset_id);
        while let Some(boundary) = current {
            if boundary.boundary_type.is_network_boundary() {
                return Some(boundary);
            }
            current = self.parent_trust_boundary(&boundary.id);
        }
        None
    }

    pub fn parent_trust_boundary(&self, boundary_id: &str) -> Option<&TrustBoundary> {
        self.parent_boundary
            .get(boundary_id)
            .and_then(|id| self.trust_boundaries.get(id))
    }

    pub fn shared_runtime_of(&self, asset_id: &str) -> Option<&SharedRuntime> {
        self.runtime_of_asset
            .get(asset_id)
            .and_then(|id| self.shared_runtimes.get(id))
    }

    /// Assets inside the boundary, including those of nested boundaries
    pub fn assets_in_trust_boundary(&self, boundary_id: &str) -> Vec<&TechnicalAsset> {
        let mut ids = BTreeSet::new();
        let mut pending = vec![boundary_id];
        let mut seen = BTreeSet::new();
        while let Some(id) = pending.pop() {
            if !seen.insert(id) {
                continue;
            }
            if let Some(boundary) = self.trust_boundaries.get(id) {
                ids.extend(boundary.technical_assets_inside.iter().map(String::as_str));
                pending.extend(boundary.trust_boundaries_nested.iter().map(String::as_str));
            }
        }
        ids.into_iter()
            .filter_map(|id| self.technical_assets.get(id))
            .collect()
    }

    /// Assets running on the shared runtime
    pub fn assets_on_shared_runtime(&self, runtime_id: &str) -> Vec<&TechnicalAsset> {
        let Some(runtime) = self.shared_runtimes.get(runtime_id) else {
            return Vec::new();
        };
        let ids: BTreeSet<&str> = runtime
            .technical_assets_running
            .iter()
            .map(String::as_str)
            .collect();
        ids.into_iter()
            .filter_map(|id| self.technical_assets.get(id))
            .collect()
    }

    // ==================== Traversal ====================

    fn links_directed(&self, asset_id: &str, direction: Direction) -> Vec<&CommunicationLink> {
        let Some(&idx) = self.node_index.get(asset_id) else {
            return Vec::new();
        };
        let mut links: Vec<&CommunicationLink> = self
            .graph
            .edges_directed(idx, direction)
            .filter_map(|e| self.communication_links.get(e.weight()))
            .collect();
        links.sort_by(|a, b| a.id.cmp(&b.id));
        links
    }

    /// Links whose source is the asset
    pub fn outgoing_links(&self, asset_id: &str) -> Vec<&CommunicationLink> {
        self.links_directed(asset_id, Direction::Outgoing)
    }

    /// Links whose target is the asset
    pub fn incoming_links(&self, asset_id: &str) -> Vec<&CommunicationLink> {
        self.links_directed(asset_id, Direction::Incoming)
    }

    /// Links in either direction, each once
    pub fn links_touching(&self, asset_id: &str) -> Vec<&CommunicationLink> {
        let mut links = self.outgoing_links(asset_id);
        links.extend(self.incoming_links(asset_id));
        links.sort_by(|a, b| a.id.cmp(&b.id));
        links.dedup_by(|a, b| a.id == b.id);
        links
    }

    /// Data sent or received over the link
    pub fn data_assets_of_link(&self, link_id: &str) -> Vec<&DataAsset> {
        let Some(link) = self.communication_links.get(link_id) else {
            return Vec::new();
        };
        link.data_asset_ids()
            .into_iter()
            .filter_map(|id| self.data_assets.get(id))
            .collect()
    }

    /// Data the asset processes or stores
    pub fn data_assets_processed_or_stored(&self, asset_id: &str) -> Vec<&DataAsset> {
        let Some(asset) = self.technical_assets.get(asset_id) else {
            return Vec::new();
        };
        let ids: BTreeSet<&str> = asset
            .data_assets_processed
            .iter()
            .chain(&asset.data_assets_stored)
            .map(String::as_str)
            .collect();
        ids.into_iter()
            .filter_map(|id| self.data_assets.get(id))
            .collect()
    }

    /// Data stored by the asset
    pub fn data_assets_stored(&self, asset_id: &str) -> Vec<&DataAsset> {
        let Some(asset) = self.technical_assets.get(asset_id) else {
            return Vec::new();
        };
        let ids: BTreeSet<&str> = asset.data_assets_stored.iter().map(String::as_str).collect();
        ids.into_iter()
            .filter_map(|id| self.data_assets.get(id))
            .collect()
    }

    /// Source and target sit in different trust boundaries (or one in none)
    pub fn is_across_trust_boundary(&self, link_id: &str) -> bool {
        self.communication_links.get(link_id).is_some_and(|link| {
            let source = self.boundary_of_asset.get(&link.source_id);
            let target = self.boundary_of_asset.get(&link.target_id);
            source != target
        })
    }

    /// Like [`Self::is_across_trust_boundary`] but only network boundaries count
    pub fn is_across_network_trust_boundary(&self, link_id: &str) -> bool {
        self.communication_links.get(link_id).is_some_and(|link| {
            let source = self
                .network_trust_boundary_of(&link.source_id)
                .map(|b| b.id.as_str());
            let target = self
                .network_trust_boundary_of(&link.target_id)
                .map(|b| b.id.as_str());
            source != target
        })
    }
}
