use super::sorting::{
    highest_severity, highest_severity_still_at_risk, reduce_to_only_still_at_risk,
    sort_by_risk_severity,
};
use crate::models::{Risk, RiskCategory, RiskStatistics};
use crate::rules::RiskCategoryRegistry;
use crate::scoring::AttractivenessScores;
use crate::types::{RiskFunction, RiskSeverity, RiskStatus, Stride};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Result of one evaluation pass
#[derive(Debug, Clone)]
pub struct RiskAnalysis {
    generated_risks_by_category: BTreeMap<String, Vec<Risk>>,
    registry: Arc<RiskCategoryRegistry>,
    orphaned_risk_tracking: Vec<String>,
    attractiveness: AttractivenessScores,
}

impl RiskAnalysis {
    pub fn new(
        generated_risks_by_category: BTreeMap<String, Vec<Risk>>,
        registry: Arc<RiskCategoryRegistry>,
        orphaned_risk_tracking: Vec<String>,
        attractiveness: AttractivenessScores,
    ) -> Self {
        Self {
            generated_risks_by_category,
            registry,
            orphaned_risk_tracking,
            attractiveness,
        }
    }

    pub fn generated_risks_by_category(&self) -> &BTreeMap<String, Vec<Risk>> {
        &self.generated_risks_by_category
    }

    pub fn registry(&self) -> &RiskCategoryRegistry {
        &self.registry
    }

    /// Tracking entries that matched no risk, sorted
    pub fn orphaned_risk_tracking(&self) -> &[String] {
        &self.orphaned_risk_tracking
    }

    pub fn attractiveness(&self) -> &AttractivenessScores {
        &self.attractiveness
    }

    /// Categories present in the result whose definition is known, by id
    fn known_categories(&self) -> impl Iterator<Item = (&RiskCategory, &Vec<Risk>)> {
        self.generated_risks_by_category
            .iter()
            .filter_map(|(id, risks)| match self.registry.risk_category(id) {
                Some(category) => Some((category, risks)),
                None => {
                    debug!("Skipping risks of unknown category {}", id);
                    None
                }
            })
    }

    fn collect_sorted<'a>(risks: impl Iterator<Item = &'a Risk>) -> Vec<Risk> {
        let mut risks: Vec<Risk> = risks.cloned().collect();
        sort_by_risk_severity(&mut risks);
        risks
    }

    /// Every risk, sorted by severity
    pub fn all_risks(&self) -> Vec<Risk> {
        Self::collect_sorted(self.generated_risks_by_category.values().flatten())
    }

    pub fn total_risk_count(&self) -> usize {
        self.generated_risks_by_category.values().map(Vec::len).sum()
    }

    /// Categories ordered by their highest still-open severity.
    ///
    /// Categories without open risks sort after those with open risks of
    /// the same tier, then by title and id. Unknown category ids are left out.
    pub fn sorted_risk_categories(&self) -> Vec<&RiskCategory> {
        let mut keyed: Vec<(RiskSeverity, bool, &RiskCategory)> = self
            .known_categories()
            .map(|(category, risks)| {
                let open = highest_severity_still_at_risk(risks);
                (open.unwrap_or_default(), open.is_some(), category)
            })
            .collect();
        keyed.sort_by(|a, b| {
            b.0.cmp(&a.0)
                .then_with(|| b.1.cmp(&a.1))
                .then_with(|| a.2.title.cmp(&b.2.title))
                .then_with(|| a.2.id.cmp(&b.2.id))
        });
        keyed.into_iter().map(|(_, _, category)| category).collect()
    }

    /// Risks of one category sorted by severity
    pub fn sorted_risks_of_category(&self, category: &RiskCategory) -> Vec<Risk> {
        self.generated_risks_by_category
            .get(&category.id)
            .map(|risks| Self::collect_sorted(risks.iter()))
            .unwrap_or_default()
    }

    fn by_category_where(
        &self,
        keep: impl Fn(&RiskCategory) -> bool,
    ) -> BTreeMap<String, Vec<Risk>> {
        self.known_categories()
            .filter(|(category, _)| keep(*category))
            .map(|(category, risks)| (category.id.clone(), Self::collect_sorted(risks.iter())))
            .collect()
    }

    /// Risks of the categories with the given STRIDE classification
    pub fn risks_of_only_stride(&self, stride: Stride) -> BTreeMap<String, Vec<Risk>> {
        self.by_category_where(|category| category.stride == stride)
    }

    /// Risks of the categories owned by the given function
    pub fn risks_of_only_function(&self, function: RiskFunction) -> BTreeMap<String, Vec<Risk>> {
        self.by_category_where(|category| category.function == function)
    }

    /// Risks of categories that may indicate a modelling mistake
    pub fn filter_by_model_failures(&self) -> BTreeMap<String, Vec<Risk>> {
        self.by_category_where(|category| category.model_failure_possible_reason)
    }

    /// Flat, sorted list of the risks owned by the given function
    pub fn filtered_by_function(&self, function: RiskFunction) -> Vec<Risk> {
        Self::collect_sorted(
            self.known_categories()
                .filter(|(category, _)| category.function == function)
                .flat_map(|(_, risks)| risks.iter()),
        )
    }

    pub fn filtered_by_severity(&self, severity: RiskSeverity) -> Vec<Risk> {
        Self::collect_sorted(
            self.generated_risks_by_category
                .values()
                .flatten()
                .filter(|r| r.severity == severity),
        )
    }

    pub fn filtered_by_status(&self, status: RiskStatus) -> Vec<Risk> {
        Self::collect_sorted(
            self.generated_risks_by_category
                .values()
                .flatten()
                .filter(|r| r.risk_status == status),
        )
    }

    pub fn filtered_by_still_at_risk(&self) -> Vec<Risk> {
        Self::collect_sorted(
            self.generated_risks_by_category
                .values()
                .flatten()
                .filter(|r| r.risk_status.is_still_at_risk()),
        )
    }

    /// Ids of categories with at least one open risk
    pub fn categories_of_only_risks_still_at_risk(&self) -> Vec<String> {
        self.generated_risks_by_category
            .iter()
            .filter(|(_, risks)| risks.iter().any(|r| r.risk_status.is_still_at_risk()))
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Ids of categories whose highest considered severity is `severity`.
    ///
    /// With `initial_risks` every risk counts, otherwise only open ones. A
    /// category lands in exactly one bucket, or none if nothing is considered.
    pub fn categories_of_only_risks_with_highest(
        &self,
        severity: RiskSeverity,
        initial_risks: bool,
    ) -> Vec<String> {
        self.generated_risks_by_category
            .iter()
            .filter(|(_, risks)| {
                let highest = if initial_risks {
                    highest_severity(risks)
                } else {
                    highest_severity(&reduce_to_only_still_at_risk(risks))
                };
                highest == Some(severity)
            })
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn categories_of_only_critical_risks(&self, initial_risks: bool) -> Vec<String> {
        self.categories_of_only_risks_with_highest(RiskSeverity::Critical, initial_risks)
    }

    pub fn categories_of_only_high_risks(&self, initial_risks: bool) -> Vec<String> {
        self.categories_of_only_risks_with_highest(RiskSeverity::High, initial_risks)
    }

    pub fn categories_of_only_elevated_risks(&self, initial_risks: bool) -> Vec<String> {
        self.categories_of_only_risks_with_highest(RiskSeverity::Elevated, initial_risks)
    }

    pub fn categories_of_only_medium_risks(&self, initial_risks: bool) -> Vec<String> {
        self.categories_of_only_risks_with_highest(RiskSeverity::Medium, initial_risks)
    }

    pub fn categories_of_only_low_risks(&self, initial_risks: bool) -> Vec<String> {
        self.categories_of_only_risks_with_highest(RiskSeverity::Low, initial_risks)
    }

    /// Risk counts per severity and status, every cell present
    pub fn overall_risk_statistics(&self) -> RiskStatistics {
        let mut statistics = RiskStatistics::seeded();
        for risk in self.generated_risks_by_category.values().flatten() {
            statistics.increment(risk.severity, risk.risk_status);
        }
        statistics
    }
}
