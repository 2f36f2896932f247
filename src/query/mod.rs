//! Query, sort and filter layer over an evaluation result
//!
//! Everything here is a pure view over a [`RiskAnalysis`]: nothing mutates
//! the analysis, and every list comes back in a total, deterministic order.

mod analysis;
mod sorting;

#[cfg(test)]
mod tests;

pub use analysis::RiskAnalysis;
pub use sorting::{
    compare_by_data_breach_probability, compare_by_risk_severity, highest_exploitation_impact,
    highest_exploitation_likelihood, highest_severity, highest_severity_still_at_risk,
    reduce_to_only_severity, reduce_to_only_status, reduce_to_only_still_at_risk,
    sort_by_data_breach_probability, sort_by_risk_severity,
};
