use crate::model::{DataAsset, ModelGraph, TechnicalAsset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Weights for one protection goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct AttackerFocus {
    #[serde(alias = "asset")]
    pub asset: u32,
    #[serde(alias = "processed_or_stored_data")]
    pub processed_or_stored_data: u32,
    #[serde(alias = "transferred_data")]
    pub transferred_data: u32,
}

impl Default for AttackerFocus {
    fn default() -> Self {
        Self {
            asset: default_asset_weight(),
            processed_or_stored_data: default_stored_weight(),
            transferred_data: default_transferred_weight(),
        }
    }
}

fn default_asset_weight() -> u32 {
    1
}
fn default_stored_weight() -> u32 {
    2
}
fn default_transferred_weight() -> u32 {
    1
}

/// Attractiveness weights for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "PascalCase")]
pub struct Attractiveness {
    #[serde(alias = "quantity")]
    pub quantity: u32,
    #[serde(alias = "confidentiality")]
    pub confidentiality: AttackerFocus,
    #[serde(alias = "integrity")]
    pub integrity: AttackerFocus,
    #[serde(alias = "availability")]
    pub availability: AttackerFocus,
}

/// Scores per asset and per link, keyed by id
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AttractivenessScores {
    pub assets: BTreeMap<String, u64>,
    pub links: BTreeMap<String, u64>,
}

impl AttractivenessScores {
    pub fn asset(&self, id: &str) -> u64 {
        self.assets.get(id).copied().unwrap_or(0)
    }

    pub fn link(&self, id: &str) -> u64 {
        self.links.get(id).copied().unwrap_or(0)
    }

    pub fn highest_asset(&self) -> u64 {
        self.assets.values().copied().max().unwrap_or(0)
    }

    /// Asset score as a percentage of the highest asset score (0 when all are 0)
    pub fn relative_asset(&self, id: &str) -> u32 {
        let highest = self.highest_asset();
        if highest == 0 {
            return 0;
        }
        (self.asset(id) * 100 / highest) as u32
    }
}

/// Ratings of one entity in C, I, A order
type Ratings = [u64; 3];

fn data_ratings(data: &DataAsset) -> Ratings {
    [
        data.confidentiality.rating() as u64,
        data.integrity.rating() as u64,
        data.availability.rating() as u64,
    ]
}

fn asset_ratings(asset: &TechnicalAsset) -> Ratings {
    [
        asset.confidentiality.rating() as u64,
        asset.integrity.rating() as u64,
        asset.availability.rating() as u64,
    ]
}

/// Per-dimension maximum over a set of data assets
fn max_ratings<'a>(data: impl IntoIterator<Item = &'a DataAsset>) -> Ratings {
    data.into_iter().map(data_ratings).fold([0; 3], |acc, r| {
        [acc[0].max(r[0]), acc[1].max(r[1]), acc[2].max(r[2])]
    })
}

pub struct AttractivenessScorer;

impl AttractivenessScorer {
    /// Score every asset and link of the model
    pub fn score(graph: &ModelGraph, config: &Attractiveness) -> AttractivenessScores {
        let focus = [config.confidentiality, config.integrity, config.availability];
        let quantity = config.quantity as u64;

        let links: BTreeMap<String, u64> = graph
            .communication_links()
            .map(|link| {
                let carried = max_ratings(graph.data_assets_of_link(&link.id));
                let score = quantity
                    + (0..3)
                        .map(|d| focus[d].transferred_data as u64 * carried[d])
                        .sum::<u64>();
                (link.id.clone(), score)
            })
            .collect();

        let assets: BTreeMap<String, u64> = graph
            .technical_assets()
            .map(|asset| {
                let own = asset_ratings(asset);
                let stored = max_ratings(graph.data_assets_processed_or_stored(&asset.id));
                let transferred = max_ratings(
                    graph
                        .links_touching(&asset.id)
                        .into_iter()
                        .flat_map(|link| graph.data_assets_of_link(&link.id)),
                );
                let score = quantity
                    + (0..3)
                        .map(|d| {
                            focus[d].asset as u64 * own[d]
                                + focus[d].processed_or_stored_data as u64 * stored[d]
                                + focus[d].transferred_data as u64 * transferred[d]
                        })
                        .sum::<u64>();
                (asset.id.clone(), score)
            })
            .collect();

        debug!(
            "Scored attractiveness of {} assets and {} links",
            assets.len(),
            links.len()
        );
        AttractivenessScores { assets, links }
    }
}
