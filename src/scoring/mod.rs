//! Attacker attractiveness scoring
//!
//! Estimates how interesting each technical asset and each data flow is to
//! an attacker, from the ratings of the asset itself and of the data it
//! touches. Rules use the scores to raise impact on valuable targets.
//!
//! # Scoring Formula
//!
//! ```text
//! Asset score = quantity + Σ over C, I, A of
//!     asset_w       × own rating
//!   + stored_w      × max rating of data processed or stored
//!   + transferred_w × max rating of data on any link touching the asset
//!
//! Link score  = quantity + Σ over C, I, A of
//!     transferred_w × max rating of data carried by the link
//! ```
//!
//! Confidentiality uses the confidentiality rating (0-4), integrity and
//! availability the criticality rating (0-4). `relative_asset` maps an asset
//! score onto 0-100 against the most attractive asset of the model.

mod attractiveness;

pub use attractiveness::{AttackerFocus, Attractiveness, AttractivenessScorer, AttractivenessScores};
