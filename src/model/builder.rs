//! Validating construction of a [`ModelGraph`]

use super::{CommunicationLink, DataAsset, ModelGraph, SharedRuntime, TechnicalAsset, TrustBoundary};
use crate::error::{EngineError, EngineResult};
use petgraph::graph::DiGraph;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// Collects entities and checks every reference before producing a graph
#[derive(Debug, Default)]
pub struct ModelGraphBuilder {
    title: String,
    data_assets: Vec<DataAsset>,
    technical_assets: Vec<TechnicalAsset>,
    communication_links: Vec<CommunicationLink>,
    trust_boundaries: Vec<TrustBoundary>,
    shared_runtimes: Vec<SharedRuntime>,
}

impl ModelGraphBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn data_asset(mut self, asset: DataAsset) -> Self {
        self.data_assets.push(asset);
        self
    }

    pub fn technical_asset(mut self, asset: TechnicalAsset) -> Self {
        self.technical_assets.push(asset);
        self
    }

    pub fn communication_link(mut self, link: CommunicationLink) -> Self {
        self.communication_links.push(link);
        self
    }

    pub fn trust_boundary(mut self, boundary: TrustBoundary) -> Self {
        self.trust_boundaries.push(boundary);
        self
    }

    pub fn shared_runtime(mut self, runtime: SharedRuntime) -> Self {
        self.shared_runtimes.push(runtime);
        self
    }

    /// Validate all references and build the graph
    ///
    /// Fails with [`EngineError::Model`] on duplicate or empty ids, links or
    /// memberships that point at unknown entities, an asset inside more than
    /// one trust boundary or shared runtime, and cyclic boundary nesting.
    pub fn build(self) -> EngineResult<ModelGraph> {
        let data_assets = index_by_id("data asset", self.data_assets, |a| &a.id)?;
        let technical_assets = index_by_id("technical asset", self.technical_assets, |a| &a.id)?;
        let communication_links =
            index_by_id("communication link", self.communication_links, |l| &l.id)?;
        let trust_boundaries = index_by_id("trust boundary", self.trust_boundaries, |b| &b.id)?;
        let shared_runtimes = index_by_id("shared runtime", self.shared_runtimes, |r| &r.id)?;

        for asset in technical_assets.values() {
            for data_id in asset.data_assets_processed.iter().chain(&asset.data_assets_stored) {
                if !data_assets.contains_key(data_id) {
                    return Err(EngineError::model(format!(
                        "technical asset {} references unknown data asset {}",
                        asset.id, data_id
                    )));
                }
            }
        }

        for link in communication_links.values() {
            for endpoint in [&link.source_id, &link.target_id] {
                if !technical_assets.contains_key(endpoint) {
                    return Err(EngineError::model(format!(
                        "communication link {} references unknown technical asset {:?}",
                        link.id, endpoint
                    )));
                }
            }
            for data_id in link.data_assets_sent.iter().chain(&link.data_assets_received) {
                if !data_assets.contains_key(data_id) {
                    return Err(EngineError::model(format!(
                        "communication link {} references unknown data asset {}",
                        link.id, data_id
                    )));
                }
            }
        }

        let mut boundary_of_asset = BTreeMap::new();
        let mut parent_boundary = BTreeMap::new();
        for boundary in trust_boundaries.values() {
            for asset_id in &boundary.technical_assets_inside {
                if !technical_assets.contains_key(asset_id) {
                    return Err(EngineError::model(format!(
                        "trust boundary {} references unknown technical asset {}",
                        boundary.id, asset_id
                    )));
                }
                if let Some(previous) =
                    boundary_of_asset.insert(asset_id.clone(), boundary.id.clone())
                {
                    if previous != boundary.id {
                        return Err(EngineError::model(format!(
                            "technical asset {} is inside trust boundaries {} and {}",
                            asset_id, previous, boundary.id
                        )));
                    }
                }
            }
            for nested_id in &boundary.trust_boundaries_nested {
                if !trust_boundaries.contains_key(nested_id) {
                    return Err(EngineError::model(format!(
                        "trust boundary {} nests unknown trust boundary {}",
                        boundary.id, nested_id
                    )));
                }
                if let Some(previous) =
                    parent_boundary.insert(nested_id.clone(), boundary.id.clone())
                {
                    if previous != boundary.id {
                        return Err(EngineError::model(format!(
                            "trust boundary {} is nested in both {} and {}",
                            nested_id, previous, boundary.id
                        )));
                    }
                }
            }
        }
        check_nesting_is_acyclic(&parent_boundary)?;

        let mut runtime_of_asset = BTreeMap::new();
        for runtime in shared_runtimes.values() {
            for asset_id in &runtime.technical_assets_running {
                if !technical_assets.contains_key(asset_id) {
                    return Err(EngineError::model(format!(
                        "shared runtime {} references unknown technical asset {}",
                        runtime.id, asset_id
                    )));
                }
                if let Some(previous) =
                    runtime_of_asset.insert(asset_id.clone(), runtime.id.clone())
                {
                    if previous != runtime.id {
                        return Err(EngineError::model(format!(
                            "technical asset {} runs on shared runtimes {} and {}",
                            asset_id, previous, runtime.id
                        )));
                    }
                }
            }
        }

        let mut graph = DiGraph::with_capacity(technical_assets.len(), communication_links.len());
        let mut node_index = HashMap::with_capacity(technical_assets.len());
        for id in technical_assets.keys() {
            node_index.insert(id.clone(), graph.add_node(id.clone()));
        }
        for link in communication_links.values() {
            if let (Some(&from), Some(&to)) =
                (node_index.get(&link.source_id), node_index.get(&link.target_id))
            {
                graph.add_edge(from, to, link.id.clone());
            }
        }

        debug!(
            "Built model graph {:?}: {} technical assets, {} data assets, {} links, {} trust boundaries, {} shared runtimes",
            self.title,
            technical_assets.len(),
            data_assets.len(),
            communication_links.len(),
            trust_boundaries.len(),
            shared_runtimes.len()
        );

        Ok(ModelGraph {
            title: self.title,
            data_assets,
            technical_assets,
            communication_links,
            trust_boundaries,
            shared_runtimes,
            boundary_of_asset,
            runtime_of_asset,
            parent_boundary,
            graph,
            node_index,
        })
    }
}

fn index_by_id<T>(
    kind: &str,
    items: Vec<T>,
    id_of: impl Fn(&T) -> &String,
) -> EngineResult<BTreeMap<String, T>> {
    let mut map = BTreeMap::new();
    for item in items {
        let id = id_of(&item).clone();
        if id.trim().is_empty() {
            return Err(EngineError::model(format!("{kind} without id")));
        }
        if map.contains_key(&id) {
            return Err(EngineError::model(format!("duplicate {kind} id {id}")));
        }
        map.insert(id, item);
    }
    Ok(map)
}

fn check_nesting_is_acyclic(parent_boundary: &BTreeMap<String, String>) -> EngineResult<()> {
    for start in parent_boundary.keys() {
        let mut seen = BTreeSet::new();
        let mut current = start;
        while let Some(parent) = parent_boundary.get(current) {
            if !seen.insert(parent) || parent == start {
                return Err(EngineError::model(format!(
                    "trust boundary {start} is nested in itself"
                )));
            }
            current = parent;
        }
    }
    Ok(())
}
