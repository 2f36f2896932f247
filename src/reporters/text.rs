//! Text (terminal) reporter with colors and formatting

use crate::models::Risk;
use crate::query::RiskAnalysis;
use crate::types::{RiskSeverity, RiskStatus, TypeEnum};
use anyhow::Result;

/// Severity colors (ANSI escape codes)
fn severity_color(severity: RiskSeverity) -> &'static str {
    match severity {
        RiskSeverity::Critical => "\x1b[31m", // Red
        RiskSeverity::High => "\x1b[91m",     // Light red
        RiskSeverity::Elevated => "\x1b[35m", // Magenta
        RiskSeverity::Medium => "\x1b[33m",   // Yellow
        RiskSeverity::Low => "\x1b[34m",      // Blue
    }
}

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Rows shown in the risk table
const TOP_RISKS: usize = 10;

fn severity_tag(severity: RiskSeverity) -> &'static str {
    match severity {
        RiskSeverity::Critical => "[C]",
        RiskSeverity::High => "[H]",
        RiskSeverity::Elevated => "[E]",
        RiskSeverity::Medium => "[M]",
        RiskSeverity::Low => "[L]",
    }
}

/// Render analysis as formatted terminal output
pub fn render(analysis: &RiskAnalysis, title: &str) -> Result<String> {
    let mut out = String::new();

    out.push_str(&format!("\n{BOLD}Threat Model: {title}{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));

    let stats = analysis.overall_risk_statistics();
    let open: usize = RiskSeverity::values()
        .iter()
        .flat_map(|severity| {
            RiskStatus::values()
                .iter()
                .filter(|status| status.is_still_at_risk())
                .map(|status| stats.count(*severity, *status))
        })
        .sum();
    out.push_str(&format!(
        "{BOLD}RISKS{RESET} ({} total, {} still at risk)\n",
        stats.total(),
        open
    ));

    let mut summary_parts = Vec::new();
    for severity in RiskSeverity::values().iter().rev() {
        let count: usize = RiskStatus::values()
            .iter()
            .map(|status| stats.count(*severity, *status))
            .sum();
        if count > 0 {
            summary_parts.push(format!(
                "{}{} {}{RESET}",
                severity_color(*severity),
                count,
                severity.name()
            ));
        }
    }
    if !summary_parts.is_empty() {
        out.push_str(&format!("  {}\n", summary_parts.join(" | ")));
    }
    out.push('\n');

    let categories = analysis.sorted_risk_categories();
    if !categories.is_empty() {
        out.push_str(&format!("{BOLD}CATEGORIES{RESET}\n"));
        for category in categories {
            let risks = analysis.sorted_risks_of_category(category);
            let still_open = risks
                .iter()
                .filter(|r| r.risk_status.is_still_at_risk())
                .count();
            out.push_str(&format!(
                "  {:<45} {DIM}{}/{} open  {}{RESET}\n",
                category.title,
                still_open,
                risks.len(),
                category.stride.name()
            ));
        }
        out.push('\n');
    }

    let risks = analysis.all_risks();
    if !risks.is_empty() {
        out.push_str(&format!(
            "{DIM}  #   SEV   STATUS           TITLE{RESET}\n"
        ));
        out.push_str(&format!(
            "{DIM}  ─────────────────────────────────────────────────────────────────{RESET}\n"
        ));
        for (i, risk) in risks.iter().take(TOP_RISKS).enumerate() {
            out.push_str(&format_risk_row(i + 1, risk));
        }
        let remaining = risks.len().saturating_sub(TOP_RISKS);
        if remaining > 0 {
            out.push_str(&format!(
                "\n  {DIM}...and {} more (use --format json for all){RESET}\n",
                remaining
            ));
        }
        out.push('\n');
    }

    let orphans = analysis.orphaned_risk_tracking();
    if !orphans.is_empty() {
        out.push_str(&format!(
            "{BOLD}ORPHANED TRACKING{RESET} ({} entries match no risk)\n",
            orphans.len()
        ));
        for id in orphans {
            out.push_str(&format!("  {DIM}{id}{RESET}\n"));
        }
    }

    Ok(out)
}

fn format_risk_row(index: usize, risk: &Risk) -> String {
    // chars() keeps multi-byte titles intact
    let title: String = if risk.title.chars().count() > 60 {
        format!("{}...", risk.title.chars().take(57).collect::<String>())
    } else {
        risk.title.clone()
    };
    format!(
        "  {DIM}{:>3}{RESET}  {}{}{RESET}  {:<15}  {}\n",
        index,
        severity_color(risk.severity),
        severity_tag(risk.severity),
        risk.risk_status.name(),
        title
    )
}
