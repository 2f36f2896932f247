use super::*;
use crate::models::{Risk, RiskCategory};
use crate::rules::{RiskCategoryRegistry, RiskRule, RuleContext};
use crate::scoring::AttractivenessScores;
use crate::types::{RiskFunction, RiskSeverity, RiskStatus, Stride, TypeEnum};
use anyhow::Result;
use std::collections::BTreeMap;
use std::sync::Arc;

struct FixedCategory {
    category: RiskCategory,
}

impl RiskRule for FixedCategory {
    fn category(&self) -> &RiskCategory {
        &self.category
    }

    fn generate(&self, _ctx: &RuleContext<'_>) -> Result<Vec<Risk>> {
        Ok(vec![])
    }
}

fn category(id: &str, title: &str, stride: Stride, function: RiskFunction) -> Arc<dyn RiskRule> {
    Arc::new(FixedCategory {
        category: RiskCategory {
            id: id.to_string(),
            title: title.to_string(),
            stride,
            function,
            model_failure_possible_reason: id == "unused",
            ..Default::default()
        },
    })
}

fn risk(category: &str, id: &str, severity: RiskSeverity, status: RiskStatus) -> Risk {
    Risk {
        category: category.to_string(),
        synthetic_id: format!("{category}@{id}"),
        title: id.to_string(),
        severity,
        risk_status: status,
        ..Default::default()
    }
}

fn analysis(risks: Vec<Risk>) -> RiskAnalysis {
    let mut registry = RiskCategoryRegistry::new();
    for rule in [
        category("sqli", "SQL Injection", Stride::Tampering, RiskFunction::Development),
        category("xss", "Cross-Site Scripting", Stride::Tampering, RiskFunction::Development),
        category("dos", "Denial of Service", Stride::DenialOfService, RiskFunction::Operations),
        category(
            "unused",
            "Unused Asset",
            Stride::ElevationOfPrivilege,
            RiskFunction::Architecture,
        ),
    ] {
        registry.register_built_in(rule).unwrap();
    }
    let mut by_category: BTreeMap<String, Vec<Risk>> = BTreeMap::new();
    for r in risks {
        by_category.entry(r.category.clone()).or_default().push(r);
    }
    RiskAnalysis::new(
        by_category,
        Arc::new(registry),
        Vec::new(),
        AttractivenessScores::default(),
    )
}

fn sample() -> RiskAnalysis {
    analysis(vec![
        risk("sqli", "a", RiskSeverity::Critical, RiskStatus::Unchecked),
        risk("sqli", "b", RiskSeverity::Medium, RiskStatus::Unchecked),
        risk("xss", "c", RiskSeverity::High, RiskStatus::Mitigated),
        risk("xss", "d", RiskSeverity::Low, RiskStatus::InDiscussion),
        risk("dos", "e", RiskSeverity::High, RiskStatus::Accepted),
        risk("unused", "f", RiskSeverity::Low, RiskStatus::FalsePositive),
        risk("ghost", "g", RiskSeverity::Critical, RiskStatus::Unchecked),
    ])
}

#[test]
fn test_cascading_buckets_use_highest_severity() {
    let analysis = sample();
    assert_eq!(analysis.categories_of_only_critical_risks(true), vec!["ghost", "sqli"]);
    assert!(!analysis.categories_of_only_medium_risks(true).contains(&"sqli".to_string()));
    assert_eq!(analysis.categories_of_only_high_risks(true), vec!["dos", "xss"]);
    assert_eq!(analysis.categories_of_only_low_risks(true), vec!["unused"]);
    assert!(analysis.categories_of_only_elevated_risks(true).is_empty());
}

#[test]
fn test_buckets_of_open_risks_only() {
    let analysis = sample();
    // xss keeps only its open low risk, unused has nothing open
    assert_eq!(analysis.categories_of_only_low_risks(false), vec!["xss"]);
    assert_eq!(analysis.categories_of_only_high_risks(false), vec!["dos"]);
}

#[test]
fn test_each_category_in_exactly_one_bucket() {
    let analysis = sample();
    for id in analysis.generated_risks_by_category().keys() {
        let hits = RiskSeverity::values()
            .iter()
            .filter(|s| {
                analysis
                    .categories_of_only_risks_with_highest(**s, true)
                    .contains(id)
            })
            .count();
        assert_eq!(hits, 1, "{id}");
    }
}

#[test]
fn test_sorted_risk_categories() {
    let analysis = sample();
    let ids: Vec<&str> = analysis
        .sorted_risk_categories()
        .into_iter()
        .map(|c| c.id.as_str())
        .collect();
    // sqli: open critical; dos: open high; xss: open low; unused: nothing open
    assert_eq!(ids, vec!["sqli", "dos", "xss", "unused"]);
}

#[test]
fn test_category_without_open_risks_sorts_after_same_tier() {
    let analysis = analysis(vec![
        risk("sqli", "a", RiskSeverity::Low, RiskStatus::Unchecked),
        risk("xss", "b", RiskSeverity::Low, RiskStatus::Mitigated),
    ]);
    let ids: Vec<&str> = analysis
        .sorted_risk_categories()
        .into_iter()
        .map(|c| c.id.as_str())
        .collect();
    // same tier: the category with an open risk comes first despite its title
    assert_eq!(ids, vec!["sqli", "xss"]);
}

#[test]
fn test_stride_and_function_partitions() {
    let analysis = sample();
    let tampering = analysis.risks_of_only_stride(Stride::Tampering);
    assert_eq!(tampering.keys().collect::<Vec<_>>(), vec!["sqli", "xss"]);
    assert_eq!(tampering["sqli"][0].title, "a");

    let operations = analysis.risks_of_only_function(RiskFunction::Operations);
    assert_eq!(operations.keys().collect::<Vec<_>>(), vec!["dos"]);

    let development = analysis.filtered_by_function(RiskFunction::Development);
    let titles: Vec<&str> = development.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["a", "c", "b", "d"]);

    assert_eq!(
        analysis.filter_by_model_failures().keys().collect::<Vec<_>>(),
        vec!["unused"]
    );
}

#[test]
fn test_status_filters() {
    let analysis = sample();
    assert_eq!(analysis.total_risk_count(), 7);
    assert_eq!(analysis.filtered_by_still_at_risk().len(), 5);
    assert_eq!(analysis.filtered_by_status(RiskStatus::Mitigated).len(), 1);
    assert_eq!(analysis.filtered_by_severity(RiskSeverity::High).len(), 2);
    assert_eq!(
        analysis.categories_of_only_risks_still_at_risk(),
        vec!["dos", "ghost", "sqli", "xss"]
    );
}

#[test]
fn test_all_risks_sorted() {
    let analysis = sample();
    let all = analysis.all_risks();
    assert_eq!(all.len(), 7);
    assert_eq!(all[0].severity, RiskSeverity::Critical);
    assert_eq!(all[6].severity, RiskSeverity::Low);
    let sorted_category = analysis
        .sorted_risks_of_category(analysis.registry().risk_category("sqli").unwrap());
    assert_eq!(sorted_category[0].title, "a");
}

#[test]
fn test_statistics_sum_matches_total() {
    let analysis = sample();
    let statistics = analysis.overall_risk_statistics();
    assert_eq!(statistics.total(), analysis.total_risk_count());
    assert_eq!(statistics.count(RiskSeverity::Critical, RiskStatus::Unchecked), 2);
    assert_eq!(statistics.risks.len(), 5);
    assert!(statistics.risks.values().all(|by_status| by_status.len() == 6));
}

#[test]
fn test_statistics_of_empty_analysis() {
    let statistics = analysis(vec![]).overall_risk_statistics();
    assert_eq!(statistics.total(), 0);
    assert_eq!(statistics.risks.values().map(|m| m.len()).sum::<usize>(), 30);
}

#[test]
fn test_analysis_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RiskAnalysis>();
}
