//! Risk category registry
//!
//! Holds built-in and custom rules under their lower-cased category id.
//! Custom rules shadow built-in rules with the same id. The registry is an
//! explicit value handed to the engine and the query layer; there is no
//! global catalog.

use super::base::RiskRule;
use super::built_in_rules;
use crate::error::{EngineError, EngineResult};
use crate::models::RiskCategory;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Clone, Default)]
pub struct RiskCategoryRegistry {
    built_in: BTreeMap<String, Arc<dyn RiskRule>>,
    custom: BTreeMap<String, Arc<dyn RiskRule>>,
}

impl fmt::Debug for RiskCategoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RiskCategoryRegistry")
            .field("built_in", &self.built_in.keys().collect::<Vec<_>>())
            .field("custom", &self.custom.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn normalize(id: &str) -> String {
    id.trim().to_lowercase()
}

impl RiskCategoryRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in rule
    pub fn with_built_in_rules() -> Self {
        let mut registry = Self::new();
        for rule in built_in_rules() {
            if let Err(e) = registry.register_built_in(rule) {
                warn!("Skipping built-in rule: {}", e);
            }
        }
        registry
    }

    fn register(
        map: &mut BTreeMap<String, Arc<dyn RiskRule>>,
        source: &str,
        rule: Arc<dyn RiskRule>,
    ) -> EngineResult<()> {
        let key = normalize(rule.id());
        if key.is_empty() {
            return Err(EngineError::model(format!("{source} risk category without id")));
        }
        if map.contains_key(&key) {
            return Err(EngineError::model(format!(
                "duplicate {source} risk category {}",
                rule.id()
            )));
        }
        map.insert(key, rule);
        Ok(())
    }

    pub fn register_built_in(&mut self, rule: Arc<dyn RiskRule>) -> EngineResult<()> {
        Self::register(&mut self.built_in, "built-in", rule)
    }

    pub fn register_custom(&mut self, rule: Arc<dyn RiskRule>) -> EngineResult<()> {
        let key = normalize(rule.id());
        if self.built_in.contains_key(&key) {
            debug!("Custom risk category {} shadows the built-in one", rule.id());
        }
        Self::register(&mut self.custom, "custom", rule)
    }

    /// Register the custom rules a loader produces.
    ///
    /// A failing loader is logged and skipped, as is each rule that cannot
    /// be registered. Returns the number of rules registered.
    pub fn load_custom<F>(&mut self, source: &str, loader: F) -> usize
    where
        F: FnOnce() -> anyhow::Result<Vec<Arc<dyn RiskRule>>>,
    {
        let rules = match loader() {
            Ok(rules) => rules,
            Err(e) => {
                warn!("Failed to load custom risk rules from {}: {:#}", source, e);
                return 0;
            }
        };
        let mut loaded = 0;
        for rule in rules {
            match self.register_custom(rule) {
                Ok(()) => loaded += 1,
                Err(e) => warn!("Skipping custom risk rule from {}: {}", source, e),
            }
        }
        info!("Loaded {} custom risk rules from {}", loaded, source);
        loaded
    }

    /// Rule for a category id, custom first, case-insensitive
    pub fn rule(&self, id: &str) -> Option<&Arc<dyn RiskRule>> {
        let key = normalize(id);
        self.custom.get(&key).or_else(|| self.built_in.get(&key))
    }

    /// Category for an id, custom first, case-insensitive
    pub fn risk_category(&self, id: &str) -> Option<&RiskCategory> {
        self.rule(id).map(|rule| rule.category())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rule(id).is_some()
    }

    /// Effective rules (custom shadowing built-in), sorted by id
    fn effective(&self) -> BTreeMap<&str, &Arc<dyn RiskRule>> {
        let mut rules: BTreeMap<&str, &Arc<dyn RiskRule>> = self
            .built_in
            .iter()
            .map(|(key, rule)| (key.as_str(), rule))
            .collect();
        for (key, rule) in &self.custom {
            rules.insert(key.as_str(), rule);
        }
        rules
    }

    /// Effective categories sorted by id
    pub fn categories(&self) -> Vec<&RiskCategory> {
        self.effective()
            .into_values()
            .map(|rule| rule.category())
            .collect()
    }

    /// Built-in categories sorted by id
    pub fn built_in_categories(&self) -> Vec<&RiskCategory> {
        self.built_in.values().map(|rule| rule.category()).collect()
    }

    /// Custom categories sorted by id
    pub fn custom_categories(&self) -> Vec<&RiskCategory> {
        self.custom.values().map(|rule| rule.category()).collect()
    }

    /// Rules to evaluate: all effective rules minus the skip list, sorted by id
    pub fn active_rules(&self, skip_list: &[String]) -> Vec<Arc<dyn RiskRule>> {
        let skip: BTreeSet<String> = skip_list
            .iter()
            .map(|id| normalize(id))
            .filter(|id| !id.is_empty())
            .collect();
        for id in &skip {
            if !self.contains(id) {
                warn!("Unknown risk rule {} in skip list", id);
            }
        }
        let active: Vec<Arc<dyn RiskRule>> = self
            .effective()
            .into_iter()
            .filter(|(key, _)| !skip.contains(*key))
            .map(|(_, rule)| Arc::clone(rule))
            .collect();
        debug!(
            "{} active risk rules ({} skipped)",
            active.len(),
            skip.len()
        );
        active
    }

    pub fn len(&self) -> usize {
        self.effective().len()
    }

    pub fn is_empty(&self) -> bool {
        self.built_in.is_empty() && self.custom.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Risk;
    use crate::rules::base::RuleContext;
    use crate::types::{RiskFunction, Stride};
    use anyhow::Result;

    struct StubRule {
        category: RiskCategory,
    }

    impl StubRule {
        fn new(id: &str, title: &str) -> Arc<dyn RiskRule> {
            Arc::new(Self {
                category: RiskCategory {
                    id: id.to_string(),
                    title: title.to_string(),
                    stride: Stride::Tampering,
                    function: RiskFunction::Development,
                    ..Default::default()
                },
            })
        }
    }

    impl RiskRule for StubRule {
        fn category(&self) -> &RiskCategory {
            &self.category
        }

        fn generate(&self, _ctx: &RuleContext<'_>) -> Result<Vec<Risk>> {
            Ok(vec![])
        }
    }

    #[test]
    fn test_custom_shadows_built_in_case_insensitively() {
        let mut registry = RiskCategoryRegistry::new();
        registry
            .register_built_in(StubRule::new("sql-injection", "Built-in"))
            .unwrap();
        registry
            .register_custom(StubRule::new("SQL-Injection", "Custom"))
            .unwrap();

        let category = registry.risk_category("sql-INJECTION").unwrap();
        assert_eq!(category.title, "Custom");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.active_rules(&[]).len(), 1);
        assert_eq!(registry.active_rules(&[])[0].category().title, "Custom");
    }

    #[test]
    fn test_unknown_category_is_none() {
        let registry = RiskCategoryRegistry::with_built_in_rules();
        assert!(registry.risk_category("does-not-exist").is_none());
    }

    #[test]
    fn test_duplicate_within_source_rejected() {
        let mut registry = RiskCategoryRegistry::new();
        registry.register_custom(StubRule::new("a", "A")).unwrap();
        assert!(registry.register_custom(StubRule::new("A", "A2")).is_err());
    }

    #[test]
    fn test_skip_list_is_case_insensitive() {
        let registry = RiskCategoryRegistry::with_built_in_rules();
        let all = registry.active_rules(&[]);
        let active = registry.active_rules(&[
            "Missing-Hardening".to_string(),
            "no-such-rule".to_string(),
        ]);
        assert_eq!(active.len(), all.len() - 1);
        assert!(active.iter().all(|r| r.id() != "missing-hardening"));
    }

    #[test]
    fn test_active_rules_sorted_by_id() {
        let registry = RiskCategoryRegistry::with_built_in_rules();
        let ids: Vec<String> = registry
            .active_rules(&[])
            .iter()
            .map(|r| r.id().to_string())
            .collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn test_failing_loader_is_skipped() {
        let mut registry = RiskCategoryRegistry::with_built_in_rules();
        let loaded = registry.load_custom("broken.json", || Err(anyhow::anyhow!("unreadable")));
        assert_eq!(loaded, 0);
        assert_eq!(registry.custom_categories().len(), 0);
        assert_eq!(registry.len(), 10);
    }

    #[test]
    fn test_loader_registers_rules() {
        let mut registry = RiskCategoryRegistry::new();
        let loaded = registry.load_custom("inline", || {
            Ok(vec![StubRule::new("x", "X"), StubRule::new("y", "Y")])
        });
        assert_eq!(loaded, 2);
        assert!(registry.contains("Y"));
    }
}
