//! Rule evaluation engine with parallel support
//!
//! The RuleEngine drives one evaluation pass:
//! - Scores attacker attractiveness for the model
//! - Runs every active rule in parallel using rayon
//! - Merges the results sequentially into a map keyed by category id
//! - Reconciles the risks against the tracking ledger
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                      RuleEngine                         │
//! ├─────────────────────────────────────────────────────────┤
//! │  1. Resolve active rules (registry minus skip list)     │
//! │  2. Run rules in parallel (rayon), contain failures     │
//! │  3. Stamp category, severity and synthetic id           │
//! │  4. Merge into BTreeMap<category, risks>                │
//! │  5. Reconcile with the risk tracking ledger             │
//! └─────────────────────────────────────────────────────────┘
//! ```

use super::base::{RiskRule, RuleContext, RuleResult};
use super::registry::RiskCategoryRegistry;
use crate::error::EngineError;
use crate::model::ModelGraph;
use crate::models::Risk;
use crate::query::RiskAnalysis;
use crate::scoring::{Attractiveness, AttractivenessScorer, AttractivenessScores};
use crate::tracking::{reconcile, OrphanPolicy, RiskTrackingLedger};
use crate::types::{RiskSeverity, RiskStatus};
use anyhow::Result;
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Upper bound on worker threads when auto-detecting
const MAX_AUTO_WORKERS: usize = 16;

/// Summary of one evaluation pass
#[derive(Debug, Clone, Default)]
pub struct EvaluationSummary {
    pub rules_run: usize,
    pub rules_failed: usize,
    /// One [`EngineError::RuleFailed`] per failed rule, in rule id order
    pub failures: Vec<EngineError>,
    pub total_risks: usize,
    pub duration_ms: u64,
}

/// Evaluates risk rules against a model graph
pub struct RuleEngine {
    registry: Arc<RiskCategoryRegistry>,
    /// Number of worker threads for parallel execution
    workers: usize,
    skip_risk_rules: Vec<String>,
    attractiveness: Attractiveness,
    orphan_policy: OrphanPolicy,
}

fn resolve_workers(workers: usize) -> usize {
    if workers == 0 {
        std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(4)
            .min(MAX_AUTO_WORKERS)
    } else {
        workers
    }
}

impl RuleEngine {
    /// Create a new engine
    ///
    /// # Arguments
    /// * `registry` - Rules to evaluate
    /// * `workers` - Number of worker threads (0 = auto-detect)
    pub fn new(registry: Arc<RiskCategoryRegistry>, workers: usize) -> Self {
        Self {
            registry,
            workers: resolve_workers(workers),
            skip_risk_rules: Vec::new(),
            attractiveness: Attractiveness::default(),
            orphan_policy: OrphanPolicy::default(),
        }
    }

    pub fn builder(registry: Arc<RiskCategoryRegistry>) -> RuleEngineBuilder {
        RuleEngineBuilder::new(registry)
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn registry(&self) -> &Arc<RiskCategoryRegistry> {
        &self.registry
    }

    /// Run all active rules and return the stamped risks per category.
    ///
    /// A rule that errors or panics yields no risks; the other rules are
    /// unaffected. Categories without risks are absent from the map.
    pub fn generate(
        &self,
        graph: &ModelGraph,
        scores: &AttractivenessScores,
    ) -> Result<(BTreeMap<String, Vec<Risk>>, EvaluationSummary)> {
        let start = Instant::now();
        let rules = self.registry.active_rules(&self.skip_risk_rules);
        info!(
            "Evaluating {} risk rules on {} workers",
            rules.len(),
            self.workers
        );

        let ctx = RuleContext::new(graph, scores);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()?;
        let results: Vec<RuleResult> = pool.install(|| {
            rules
                .par_iter()
                .map(|rule| Self::run_single_rule(rule, &ctx))
                .collect()
        });

        let mut summary = EvaluationSummary {
            rules_run: results.len(),
            ..Default::default()
        };
        let mut risks_by_category = BTreeMap::new();
        for result in results {
            if !result.success {
                summary.rules_failed += 1;
                summary.failures.extend(result.error);
                continue;
            }
            let risks = stamp_risks(&result.category_id, result.risks);
            if !risks.is_empty() {
                summary.total_risks += risks.len();
                risks_by_category.insert(result.category_id, risks);
            }
        }
        summary.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            "Generated {} risks in {} categories ({} rules failed) in {}ms",
            summary.total_risks,
            risks_by_category.len(),
            summary.rules_failed,
            summary.duration_ms
        );
        Ok((risks_by_category, summary))
    }

    /// Full evaluation pass: score, generate, reconcile
    pub fn analyze(&self, graph: &ModelGraph, ledger: &RiskTrackingLedger) -> Result<RiskAnalysis> {
        let scores = AttractivenessScorer::score(graph, &self.attractiveness);
        let (mut risks_by_category, _) = self.generate(graph, &scores)?;
        let orphans = reconcile(&mut risks_by_category, ledger, self.orphan_policy)?;
        Ok(RiskAnalysis::new(
            risks_by_category,
            Arc::clone(&self.registry),
            orphans,
            scores,
        ))
    }

    fn run_single_rule(rule: &Arc<dyn RiskRule>, ctx: &RuleContext<'_>) -> RuleResult {
        let id = rule.id().to_string();
        let start = Instant::now();

        debug!("Running risk rule: {}", id);

        // Wrap in catch_unwind to handle panics
        let generated =
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| rule.generate(ctx)));

        let duration = start.elapsed().as_millis() as u64;
        match generated {
            Ok(Ok(risks)) => {
                debug!("Rule {} found {} risks in {}ms", id, risks.len(), duration);
                RuleResult::success(id, risks, duration)
            }
            Ok(Err(e)) => {
                let result = RuleResult::failure(id, format!("{e:#}"), duration);
                if let Some(error) = &result.error {
                    warn!("{}, category skipped", error);
                }
                result
            }
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                error!("Risk rule {} panicked: {}", id, panic_msg);
                RuleResult::failure(id, format!("Panic: {}", panic_msg), duration)
            }
        }
    }
}

/// Fill in the engine-owned fields and drop duplicate synthetic ids
fn stamp_risks(category_id: &str, risks: Vec<Risk>) -> Vec<Risk> {
    let mut seen = BTreeSet::new();
    let mut stamped = Vec::with_capacity(risks.len());
    for mut risk in risks {
        risk.category = category_id.to_string();
        risk.severity =
            RiskSeverity::calculate(risk.exploitation_likelihood, risk.exploitation_impact);
        risk.synthetic_id = risk.compute_synthetic_id(category_id);
        risk.risk_status = RiskStatus::Unchecked;
        if !seen.insert(risk.synthetic_id.clone()) {
            warn!(
                "Duplicate synthetic risk id {} in category {}, keeping the first",
                risk.synthetic_id, category_id
            );
            continue;
        }
        stamped.push(risk);
    }
    stamped
}

/// Builder for RuleEngine with fluent API
pub struct RuleEngineBuilder {
    registry: Arc<RiskCategoryRegistry>,
    workers: usize,
    skip_risk_rules: Vec<String>,
    attractiveness: Attractiveness,
    orphan_policy: OrphanPolicy,
}

impl RuleEngineBuilder {
    /// Create a new builder
    pub fn new(registry: Arc<RiskCategoryRegistry>) -> Self {
        Self {
            registry,
            workers: 0,
            skip_risk_rules: Vec::new(),
            attractiveness: Attractiveness::default(),
            orphan_policy: OrphanPolicy::default(),
        }
    }

    /// Set number of worker threads
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set category ids to leave out
    pub fn skip_risk_rules(mut self, ids: Vec<String>) -> Self {
        self.skip_risk_rules = ids;
        self
    }

    pub fn attractiveness(mut self, attractiveness: Attractiveness) -> Self {
        self.attractiveness = attractiveness;
        self
    }

    pub fn orphan_policy(mut self, policy: OrphanPolicy) -> Self {
        self.orphan_policy = policy;
        self
    }

    /// Build the engine
    pub fn build(self) -> RuleEngine {
        RuleEngine {
            registry: self.registry,
            workers: resolve_workers(self.workers),
            skip_risk_rules: self.skip_risk_rules,
            attractiveness: self.attractiveness,
            orphan_policy: self.orphan_policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::model::TechnicalAsset;
    use crate::models::RiskCategory;
    use crate::tracking::RiskTracking;
    use crate::types::{RiskExploitationImpact, RiskExploitationLikelihood};

    enum Behaviour {
        PerAsset,
        Duplicate,
        Fail,
        Panic,
    }

    // Mock rule for testing
    struct MockRule {
        category: RiskCategory,
        behaviour: Behaviour,
    }

    impl MockRule {
        fn new(id: &str, behaviour: Behaviour) -> Arc<dyn RiskRule> {
            Arc::new(Self {
                category: RiskCategory {
                    id: id.to_string(),
                    title: id.to_string(),
                    ..Default::default()
                },
                behaviour,
            })
        }
    }

    impl RiskRule for MockRule {
        fn category(&self) -> &RiskCategory {
            &self.category
        }

        fn generate(&self, ctx: &RuleContext<'_>) -> Result<Vec<Risk>> {
            let risk_for = |asset: &TechnicalAsset| {
                Risk::new(
                    format!("{} at {}", self.category.id, asset.id),
                    RiskExploitationLikelihood::Frequent,
                    RiskExploitationImpact::Critical,
                )
                .with_technical_asset(&asset.id)
            };
            match self.behaviour {
                Behaviour::PerAsset => Ok(ctx.graph.technical_assets().map(risk_for).collect()),
                Behaviour::Duplicate => {
                    let first = ctx.graph.technical_assets().next();
                    Ok(first.into_iter().flat_map(|a| [risk_for(a), risk_for(a)]).collect())
                }
                Behaviour::Fail => anyhow::bail!("attribute missing"),
                Behaviour::Panic => panic!("rule bug"),
            }
        }
    }

    fn graph() -> ModelGraph {
        let asset = |id: &str| TechnicalAsset {
            id: id.to_string(),
            ..Default::default()
        };
        ModelGraph::builder("engine")
            .technical_asset(asset("b"))
            .technical_asset(asset("a"))
            .build()
            .unwrap()
    }

    fn registry(rules: Vec<Arc<dyn RiskRule>>) -> Arc<RiskCategoryRegistry> {
        let mut registry = RiskCategoryRegistry::new();
        for rule in rules {
            registry.register_custom(rule).unwrap();
        }
        Arc::new(registry)
    }

    #[test]
    fn test_auto_workers_capped() {
        let engine = RuleEngine::new(registry(vec![]), 0);
        assert!(engine.workers() >= 1 && engine.workers() <= MAX_AUTO_WORKERS);
        assert_eq!(RuleEngine::new(registry(vec![]), 3).workers(), 3);
    }

    #[test]
    fn test_risks_are_stamped() {
        let engine = RuleEngine::new(
            registry(vec![MockRule::new("per-asset", Behaviour::PerAsset)]),
            2,
        );
        let g = graph();
        let (risks, summary) = engine.generate(&g, &AttractivenessScores::default()).unwrap();
        let risks = &risks["per-asset"];
        assert_eq!(summary.total_risks, 2);
        assert_eq!(risks[0].synthetic_id, "per-asset@a");
        assert_eq!(risks[1].synthetic_id, "per-asset@b");
        assert!(risks.iter().all(|r| r.category == "per-asset"));
        assert!(risks.iter().all(|r| r.severity == RiskSeverity::Critical));
        assert!(risks.iter().all(|r| r.risk_status == RiskStatus::Unchecked));
    }

    #[test]
    fn test_duplicate_synthetic_ids_keep_first() {
        let engine = RuleEngine::new(
            registry(vec![MockRule::new("dup", Behaviour::Duplicate)]),
            1,
        );
        let (risks, _) = engine
            .generate(&graph(), &AttractivenessScores::default())
            .unwrap();
        assert_eq!(risks["dup"].len(), 1);
    }

    #[test]
    fn test_failing_rules_are_contained() {
        let engine = RuleEngine::new(
            registry(vec![
                MockRule::new("fails", Behaviour::Fail),
                MockRule::new("panics", Behaviour::Panic),
                MockRule::new("works", Behaviour::PerAsset),
            ]),
            2,
        );
        let (risks, summary) = engine
            .generate(&graph(), &AttractivenessScores::default())
            .unwrap();
        assert_eq!(summary.rules_run, 3);
        assert_eq!(summary.rules_failed, 2);
        let failed: Vec<&str> = summary
            .failures
            .iter()
            .map(|e| match e {
                EngineError::RuleFailed { category, .. } => category.as_str(),
                other => panic!("unexpected error {other:?}"),
            })
            .collect();
        assert_eq!(failed, vec!["fails", "panics"]);
        assert!(summary.failures[1].to_string().contains("Panic:"));
        assert_eq!(risks.keys().collect::<Vec<_>>(), vec!["works"]);
    }

    #[test]
    fn test_skip_list_removes_rule() {
        let engine = RuleEngine::builder(registry(vec![
            MockRule::new("one", Behaviour::PerAsset),
            MockRule::new("two", Behaviour::PerAsset),
        ]))
        .skip_risk_rules(vec!["TWO".into()])
        .workers(1)
        .build();
        let (risks, _) = engine
            .generate(&graph(), &AttractivenessScores::default())
            .unwrap();
        assert!(risks.contains_key("one"));
        assert!(!risks.contains_key("two"));
    }

    #[test]
    fn test_results_independent_of_worker_count() {
        let rules = || {
            registry(vec![
                MockRule::new("x", Behaviour::PerAsset),
                MockRule::new("y", Behaviour::PerAsset),
                MockRule::new("z", Behaviour::PerAsset),
            ])
        };
        let g = graph();
        let scores = AttractivenessScores::default();
        let (one, _) = RuleEngine::new(rules(), 1).generate(&g, &scores).unwrap();
        let (many, _) = RuleEngine::new(rules(), 8).generate(&g, &scores).unwrap();
        assert_eq!(one, many);
    }

    #[test]
    fn test_analyze_applies_orphan_policy() {
        let ledger = RiskTrackingLedger::from_entries([RiskTracking::new(
            "per-asset@removed",
            RiskStatus::Accepted,
        )])
        .unwrap();
        let rules = registry(vec![MockRule::new("per-asset", Behaviour::PerAsset)]);

        let analysis = RuleEngine::builder(Arc::clone(&rules))
            .build()
            .analyze(&graph(), &ledger)
            .unwrap();
        assert_eq!(analysis.orphaned_risk_tracking(), ["per-asset@removed".to_string()]);
        assert_eq!(analysis.total_risk_count(), 2);

        let err = RuleEngine::builder(rules)
            .orphan_policy(OrphanPolicy::Fail)
            .build()
            .analyze(&graph(), &ledger)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EngineError>(),
            Some(EngineError::OrphanedRiskTracking { .. })
        ));
    }
}
