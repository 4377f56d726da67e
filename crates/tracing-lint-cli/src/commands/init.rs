//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing_lint_core::CONFIG_FILE_NAME;

const DEFAULT_CONFIG: &str = r#"# tracing-lint configuration
# See https://github.com/bcheidemann/tracing-eslint for rule documentation

# Rule set: "recommended" or "all"
preset = "recommended"

# Exit with a non-zero code when violations at or above this severity exist
fail_on = "error"

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./src"

# Glob patterns to exclude from analysis
exclude = [
    "**/node_modules/**",
    "**/dist/**",
]

# Respect .gitignore files
respect_gitignore = true

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.prefer-explicit-resource-management]
enabled = true
# severity = "warning"

# Only active with preset = "all"
[rules.invalid-skip-attribute]
enabled = true
"#;

/// Runs the init command in the current directory.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new("."), force)?;

    println!("Created {CONFIG_FILE_NAME}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE_NAME} to configure rules");
    println!("  2. Run: tracing-lint check");

    Ok(())
}

fn write_config(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tracing_lint_core::{Config, Severity};

    #[test]
    fn template_parses() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.preset.as_deref(), Some("recommended"));
        assert_eq!(config.fail_on_severity().unwrap(), Severity::Error);
        assert!(config.is_rule_enabled("invalid-skip-attribute"));
        assert!(config.analyzer.respect_gitignore);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "preset = \"all\"").unwrap();

        assert!(write_config(tmp.path(), false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "preset = \"all\"");

        write_config(tmp.path(), true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
