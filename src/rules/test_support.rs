//! Model fixtures shared by the rule tests

use super::base::{RiskRule, RuleContext};
use crate::model::{CommunicationLink, DataAsset, ModelGraph, ModelGraphBuilder, TechnicalAsset};
use crate::models::Risk;
use crate::scoring::{Attractiveness, AttractivenessScorer};
use crate::types::{Confidentiality, Criticality, Protocol, TechnicalAssetType};

pub fn process(id: &str) -> TechnicalAsset {
    TechnicalAsset {
        id: id.to_string(),
        title: id.to_string(),
        asset_type: TechnicalAssetType::Process,
        ..Default::default()
    }
}

pub fn datastore(id: &str) -> TechnicalAsset {
    TechnicalAsset {
        asset_type: TechnicalAssetType::Datastore,
        ..process(id)
    }
}

pub fn data(id: &str, confidentiality: Confidentiality, integrity: Criticality) -> DataAsset {
    DataAsset {
        id: id.to_string(),
        title: id.to_string(),
        confidentiality,
        integrity,
        ..Default::default()
    }
}

pub fn link(id: &str, source: &str, target: &str, protocol: Protocol) -> CommunicationLink {
    CommunicationLink {
        id: id.to_string(),
        title: id.to_string(),
        source_id: source.to_string(),
        target_id: target.to_string(),
        protocol,
        ..Default::default()
    }
}

/// Run one rule against a built model with default attractiveness weights
pub fn run(rule: &dyn RiskRule, builder: ModelGraphBuilder) -> Vec<Risk> {
    let graph: ModelGraph = builder.build().expect("valid test model");
    let scores = AttractivenessScorer::score(&graph, &Attractiveness::default());
    rule.generate(&RuleContext::new(&graph, &scores))
        .expect("rule succeeds")
}

pub fn ids(risks: &[Risk], category: &str) -> Vec<String> {
    risks
        .iter()
        .map(|r| r.compute_synthetic_id(category))
        .collect()
}
