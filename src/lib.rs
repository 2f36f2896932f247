//! threatgraph - Graph-based threat modeling risk engine
//!
//! Evaluates a catalog of STRIDE-classified risk rules against an
//! architecture model, rates every finding by likelihood and impact,
//! scores attacker attractiveness and reconciles the findings with a risk
//! tracking ledger.
//!
//! ```ignore
//! use std::sync::Arc;
//! use threatgraph::model::loader::load_model;
//! use threatgraph::rules::{RiskCategoryRegistry, RuleEngine};
//!
//! let model = load_model(path)?;
//! let engine = RuleEngine::builder(Arc::new(RiskCategoryRegistry::with_built_in_rules())).build();
//! let analysis = engine.analyze(&model.graph, &model.risk_tracking)?;
//! for category in analysis.sorted_risk_categories() {
//!     println!("{}: {}", category.id, analysis.sorted_risks_of_category(category).len());
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod models;
pub mod query;
pub mod reporters;
pub mod rules;
pub mod scoring;
pub mod tracking;
pub mod types;
