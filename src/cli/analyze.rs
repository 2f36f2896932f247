//! `analyze` command: load model and config, evaluate, report

use crate::config::{load_engine_config, parse_skip_list, EngineConfig};
use crate::model::loader::{load_model, LoadedModel};
use crate::reporters;
use crate::rules::{ManualRiskRule, RiskCategoryRegistry, RiskRule};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Command-line settings of one analyze run
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub model: PathBuf,
    pub config: Option<PathBuf>,
    pub skip_risk_rules: Option<String>,
    pub ignore_orphaned_risk_tracking: Option<bool>,
    pub workers: Option<usize>,
    pub format: String,
    pub output: Option<PathBuf>,
}

/// Config file values overridden by the command-line flags that were given
fn effective_config(options: &AnalyzeOptions) -> Result<EngineConfig> {
    let model_dir = options
        .model
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut config = load_engine_config(model_dir, options.config.as_deref())?;
    if let Some(skip) = &options.skip_risk_rules {
        config.skip_risk_rules = parse_skip_list(skip);
    }
    if let Some(ignore) = options.ignore_orphaned_risk_tracking {
        config.ignore_orphaned_risk_tracking = ignore;
    }
    if let Some(workers) = options.workers {
        config.workers = workers;
    }
    Ok(config)
}

/// Built-in rules plus the custom categories declared in the model
fn registry_for(model: &mut LoadedModel, source: &Path) -> RiskCategoryRegistry {
    let mut registry = RiskCategoryRegistry::with_built_in_rules();
    let custom = std::mem::take(&mut model.custom_risk_categories);
    if !custom.is_empty() {
        registry.load_custom(&source.display().to_string(), || {
            Ok(custom
                .into_iter()
                .map(|definition| Arc::new(ManualRiskRule::new(definition)) as Arc<dyn RiskRule>)
                .collect())
        });
    }
    registry
}

/// Run the analysis and return the rendered report
pub fn render(options: &AnalyzeOptions) -> Result<String> {
    let config = effective_config(options)?;
    let mut model = load_model(&options.model)?;
    let registry = registry_for(&mut model, &options.model);

    let engine = config.engine(Arc::new(registry));
    let analysis = engine
        .analyze(&model.graph, &model.risk_tracking)
        .with_context(|| format!("Failed to analyze {}", options.model.display()))?;
    info!(
        "{} risks in {} categories",
        analysis.total_risk_count(),
        analysis.generated_risks_by_category().len()
    );
    reporters::report(&analysis, model.graph.title(), &options.format)
}

pub fn run(options: AnalyzeOptions) -> Result<()> {
    let output = render(&options)?;
    match &options.output {
        Some(path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            // stderr keeps stdout clean for piping
            eprintln!("Report written to: {}", path.display());
        }
        None => println!("{}", output),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const MODEL: &str = r#"{
        "title": "Tiny",
        "technical_assets": [{"id": "app", "type": "process"}],
        "risk_tracking": {"missing-hardening@ghost": {"status": "accepted"}}
    }"#;

    fn options(dir: &Path) -> AnalyzeOptions {
        let model = dir.join("model.json");
        fs::write(&model, MODEL).unwrap();
        AnalyzeOptions {
            model,
            format: "json".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("threatgraph.toml"),
            "SkipRiskRules = \"a\"\nWorkers = 3\n",
        )
        .unwrap();
        let mut opts = options(dir.path());
        let config = effective_config(&opts).unwrap();
        assert_eq!(config.skip_risk_rules, vec!["a"]);
        assert_eq!(config.workers, 3);

        opts.skip_risk_rules = Some("b, c".into());
        opts.workers = Some(1);
        let config = effective_config(&opts).unwrap();
        assert_eq!(config.skip_risk_rules, vec!["b", "c"]);
        assert_eq!(config.workers, 1);
    }

    #[test]
    fn test_orphans_warn_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let out = render(&options(dir.path())).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            parsed["orphaned_risk_tracking"],
            serde_json::json!(["missing-hardening@ghost"])
        );
    }

    #[test]
    fn test_orphans_fail_when_not_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options(dir.path());
        opts.ignore_orphaned_risk_tracking = Some(false);
        let err = render(&opts).unwrap_err();
        assert!(format!("{err:#}").contains("missing-hardening@ghost"));
    }

    #[test]
    fn test_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options(dir.path());
        let out = dir.path().join("report.json");
        opts.output = Some(out.clone());
        run(opts).unwrap();
        assert!(fs::read_to_string(out).unwrap().contains("\"title\": \"Tiny\""));
    }
}
