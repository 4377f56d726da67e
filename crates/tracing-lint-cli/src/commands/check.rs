//! Check command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing_lint_core::{Analyzer, Config, RuleBox};
use tracing_lint_rules::{rule_by_name, Preset};

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command.
///
/// Returns `Ok(false)` when violations at or above the configured `fail_on`
/// severity were found.
pub fn run(
    path: &Path,
    format: OutputFormat,
    rules_filter: Option<String>,
    exclude: Vec<String>,
    source: &ConfigSource,
) -> Result<bool> {
    let config = load_config(source)?;
    let fail_on = config
        .fail_on_severity()
        .context("Invalid fail_on in configuration")?;

    let rules = match rules_filter {
        Some(filter) => filter_rules(&filter)?,
        None => preset_rules(&config)?,
    };

    let analyzer = Analyzer::builder()
        .root(path)
        .config(config)
        .excludes(exclude)
        .rules(rules)
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {} with {} rules",
        path.display(),
        analyzer.rule_count()
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, format, analyzer.base_dir())?;

    Ok(!result.has_violations_at(fail_on))
}

/// Loads the configuration named by `source`.
fn load_config(source: &ConfigSource) -> Result<Config> {
    let Some(path) = source.path() else {
        tracing::debug!("No configuration file found, using defaults");
        return Ok(Config::default());
    };
    if source.is_global() {
        tracing::info!("Using global config: {}", path.display());
    }
    Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
}

/// Rules of the preset named in the configuration.
fn preset_rules(config: &Config) -> Result<Vec<RuleBox>> {
    let preset = match config.preset.as_deref() {
        Some(name) => name.parse::<Preset>().map_err(anyhow::Error::msg)?,
        None => Preset::default(),
    };
    tracing::debug!("Using preset: {}", preset.as_str());
    Ok(preset.rules())
}

/// Rules named in a comma-separated `--rules` filter.
fn filter_rules(filter: &str) -> Result<Vec<RuleBox>> {
    let mut rules = Vec::new();
    for name in filter.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        match rule_by_name(name) {
            Some(rule) => rules.push(rule),
            None => tracing::warn!("Unknown rule: {}", name),
        }
    }
    if rules.is_empty() {
        bail!("No known rules in --rules '{filter}'");
    }
    Ok(rules)
}
