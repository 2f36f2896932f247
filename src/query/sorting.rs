//! Deterministic orderings and slice-level filters over risks

use crate::models::Risk;
use crate::types::{
    RiskExploitationImpact, RiskExploitationLikelihood, RiskSeverity, RiskStatus,
};
use std::cmp::Ordering;

/// Severity desc, status asc, impact desc, likelihood desc, title asc,
/// synthetic id asc
pub fn compare_by_risk_severity(a: &Risk, b: &Risk) -> Ordering {
    b.severity
        .cmp(&a.severity)
        .then_with(|| a.risk_status.cmp(&b.risk_status))
        .then_with(|| b.exploitation_impact.cmp(&a.exploitation_impact))
        .then_with(|| b.exploitation_likelihood.cmp(&a.exploitation_likelihood))
        .then_with(|| a.title.cmp(&b.title))
        .then_with(|| a.synthetic_id.cmp(&b.synthetic_id))
}

/// Breach probability desc, status asc, title asc, synthetic id asc
pub fn compare_by_data_breach_probability(a: &Risk, b: &Risk) -> Ordering {
    b.data_breach_probability
        .cmp(&a.data_breach_probability)
        .then_with(|| a.risk_status.cmp(&b.risk_status))
        .then_with(|| a.title.cmp(&b.title))
        .then_with(|| a.synthetic_id.cmp(&b.synthetic_id))
}

pub fn sort_by_risk_severity(risks: &mut [Risk]) {
    risks.sort_by(compare_by_risk_severity);
}

pub fn sort_by_data_breach_probability(risks: &mut [Risk]) {
    risks.sort_by(compare_by_data_breach_probability);
}

pub fn reduce_to_only_severity(risks: &[Risk], severity: RiskSeverity) -> Vec<Risk> {
    risks.iter().filter(|r| r.severity == severity).cloned().collect()
}

pub fn reduce_to_only_status(risks: &[Risk], status: RiskStatus) -> Vec<Risk> {
    risks.iter().filter(|r| r.risk_status == status).cloned().collect()
}

pub fn reduce_to_only_still_at_risk(risks: &[Risk]) -> Vec<Risk> {
    risks
        .iter()
        .filter(|r| r.risk_status.is_still_at_risk())
        .cloned()
        .collect()
}

pub fn highest_severity(risks: &[Risk]) -> Option<RiskSeverity> {
    risks.iter().map(|r| r.severity).max()
}

pub fn highest_severity_still_at_risk(risks: &[Risk]) -> Option<RiskSeverity> {
    risks
        .iter()
        .filter(|r| r.risk_status.is_still_at_risk())
        .map(|r| r.severity)
        .max()
}

pub fn highest_exploitation_likelihood(risks: &[Risk]) -> Option<RiskExploitationLikelihood> {
    risks.iter().map(|r| r.exploitation_likelihood).max()
}

pub fn highest_exploitation_impact(risks: &[Risk]) -> Option<RiskExploitationImpact> {
    risks.iter().map(|r| r.exploitation_impact).max()
}
