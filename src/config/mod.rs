//! Configuration module for threatgraph
//!
//! This module handles:
//! - Engine configuration (threatgraph.toml / .threatgraphrc.json)
//! - The risk rule skip list
//! - Attractiveness weights and worker count

mod engine_config;

pub use engine_config::{
    load_engine_config, normalize_config_key, parse_skip_list, EngineConfig, CONFIG_FILE_NAMES,
};
