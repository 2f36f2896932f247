//! Risk tracking reconciliation
//!
//! A [`RiskTrackingLedger`] records the disposition a human gave to a
//! finding (accepted, mitigated, ...), keyed by the finding's synthetic id.
//! [`reconcile`] copies those dispositions onto freshly generated risks and
//! reports ledger entries that no longer match anything.
//!
//! Keys may contain `*`, which matches one `@`-separated element of a
//! synthetic id (`unencrypted-asset@*` covers every asset). An exact key
//! always wins over a wildcard key.

use crate::error::{EngineError, EngineResult};
use crate::models::Risk;
use crate::types::RiskStatus;
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Disposition of one finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RiskTracking {
    pub synthetic_risk_id: String,
    pub status: RiskStatus,
    pub justification: String,
    pub ticket: String,
    pub checked_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl RiskTracking {
    pub fn new(synthetic_risk_id: impl Into<String>, status: RiskStatus) -> Self {
        Self {
            synthetic_risk_id: synthetic_risk_id.into(),
            status,
            ..Default::default()
        }
    }
}

/// What to do with ledger entries that match no generated risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrphanPolicy {
    /// Log a warning per orphan and continue
    #[default]
    Warn,
    /// Fail with [`EngineError::OrphanedRiskTracking`]
    Fail,
}

impl OrphanPolicy {
    pub fn from_ignore_flag(ignore_orphaned_risk_tracking: bool) -> Self {
        if ignore_orphaned_risk_tracking {
            OrphanPolicy::Warn
        } else {
            OrphanPolicy::Fail
        }
    }
}

/// Tracking entries keyed by synthetic risk id
#[derive(Debug, Clone, Default)]
pub struct RiskTrackingLedger {
    entries: BTreeMap<String, RiskTracking>,
    /// Compiled patterns of the keys containing `*`, in key order
    wildcards: Vec<(String, Regex)>,
}

impl RiskTrackingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = RiskTracking>) -> EngineResult<Self> {
        let mut ledger = Self::new();
        for entry in entries {
            ledger.insert(entry)?;
        }
        Ok(ledger)
    }

    /// Add an entry, replacing any entry with the same key
    pub fn insert(&mut self, mut tracking: RiskTracking) -> EngineResult<()> {
        let key = tracking.synthetic_risk_id.trim().to_string();
        tracking.synthetic_risk_id = key.clone();
        if key.is_empty() {
            return Err(EngineError::model("risk tracking entry without synthetic risk id"));
        }
        if key.contains('*') && !self.entries.contains_key(&key) {
            let pattern = wildcard_pattern(&key)?;
            self.wildcards.push((key.clone(), pattern));
            self.wildcards.sort_by(|a, b| a.0.cmp(&b.0));
        }
        self.entries.insert(key, tracking);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in key order
    pub fn entries(&self) -> impl Iterator<Item = &RiskTracking> {
        self.entries.values()
    }

    fn lookup(&self, synthetic_id: &str) -> Option<&RiskTracking> {
        if let Some(tracking) = self.entries.get(synthetic_id) {
            return Some(tracking);
        }
        self.wildcards
            .iter()
            .find(|(_, pattern)| pattern.is_match(synthetic_id))
            .and_then(|(key, _)| self.entries.get(key))
    }

    pub fn get_risk_tracking(&self, risk: &Risk) -> Option<&RiskTracking> {
        self.lookup(&risk.synthetic_id)
    }

    /// Tracking of the risk, or an unchecked placeholder
    pub fn get_risk_tracking_with_default(&self, risk: &Risk) -> RiskTracking {
        self.get_risk_tracking(risk)
            .cloned()
            .unwrap_or_else(|| RiskTracking::new(risk.synthetic_id.clone(), RiskStatus::Unchecked))
    }

    pub fn is_risk_tracked(&self, risk: &Risk) -> bool {
        self.get_risk_tracking(risk).is_some()
    }

    /// Keys that match none of the given synthetic ids, sorted
    pub fn orphaned_keys<'a>(
        &self,
        synthetic_ids: impl IntoIterator<Item = &'a str>,
    ) -> Vec<String> {
        let generated: BTreeSet<&str> = synthetic_ids.into_iter().collect();
        let wildcard_hits: BTreeSet<&str> = self
            .wildcards
            .iter()
            .filter(|(_, pattern)| generated.iter().any(|id| pattern.is_match(id)))
            .map(|(key, _)| key.as_str())
            .collect();
        self.entries
            .keys()
            .filter(|key| {
                !generated.contains(key.as_str()) && !wildcard_hits.contains(key.as_str())
            })
            .cloned()
            .collect()
    }
}

/// `*` matches one non-empty `@`-separated element
fn wildcard_pattern(key: &str) -> EngineResult<Regex> {
    let pattern = format!("^{}$", regex::escape(key).replace(r"\*", "[^@]+"));
    Regex::new(&pattern)
        .map_err(|e| EngineError::model(format!("invalid risk tracking key {key:?}: {e}")))
}

/// Apply ledger statuses to the risks and detect orphaned entries.
///
/// Every risk gets the status of its tracking entry, or `unchecked` when it
/// has none. Returns the sorted orphan ids; under [`OrphanPolicy::Fail`] a
/// non-empty orphan list is an error instead.
pub fn reconcile(
    risks_by_category: &mut BTreeMap<String, Vec<Risk>>,
    ledger: &RiskTrackingLedger,
    policy: OrphanPolicy,
) -> EngineResult<Vec<String>> {
    let mut tracked = 0usize;
    for risk in risks_by_category.values_mut().flatten() {
        risk.risk_status = match ledger.get_risk_tracking(risk) {
            Some(tracking) => {
                tracked += 1;
                tracking.status
            }
            None => RiskStatus::Unchecked,
        };
    }

    let orphans = ledger.orphaned_keys(
        risks_by_category
            .values()
            .flatten()
            .map(|r| r.synthetic_id.as_str()),
    );
    debug!(
        "Reconciled risk tracking: {} tracked risks, {} orphaned entries",
        tracked,
        orphans.len()
    );

    if orphans.is_empty() {
        return Ok(orphans);
    }
    match policy {
        OrphanPolicy::Warn => {
            for id in &orphans {
                warn!("Risk tracking entry {} does not match any generated risk", id);
            }
            Ok(orphans)
        }
        OrphanPolicy::Fail => Err(EngineError::OrphanedRiskTracking { ids: orphans }),
    }
}
