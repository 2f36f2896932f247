//! `list-risk-rules` and `explain-risk-rules` commands

use crate::rules::RiskCategoryRegistry;
use crate::types::TypeEnum;

/// One line per built-in rule: id and title
pub fn list() -> String {
    let registry = RiskCategoryRegistry::with_built_in_rules();
    registry
        .built_in_categories()
        .into_iter()
        .map(|category| format!("{:<40} {}\n", category.id, category.title))
        .collect()
}

/// Id, STRIDE category, function and description of every built-in rule
pub fn explain() -> String {
    let registry = RiskCategoryRegistry::with_built_in_rules();
    let mut out = String::new();
    for category in registry.built_in_categories() {
        out.push_str(&format!(
            "{} ({}, {})\n  {}\n\n",
            category.id,
            category.stride.name(),
            category.function.name(),
            category.description
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_has_one_line_per_rule() {
        let listing = list();
        assert_eq!(listing.lines().count(), 10);
        assert!(listing.contains("unencrypted-communication"));
        assert!(listing.contains("Missing Hardening"));
    }

    #[test]
    fn test_explain_names_stride_and_function() {
        let text = explain();
        assert!(text.contains("cross-site-request-forgery (spoofing, development)"));
    }
}
