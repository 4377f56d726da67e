//! Configuration file lookup.
//!
//! Order:
//!
//! 1. `--config` flag (or `TRACING_LINT_CONFIG`)
//! 2. `tracing-lint.toml` or `.tracing-lint.toml` in the checked directory or
//!    the nearest ancestor that has one
//! 3. `config.toml` in the global directory (`$TRACING_LINT_CONFIG_DIR`, else
//!    `~/.tracing-lint/`)
//! 4. built-in defaults

use std::path::{Path, PathBuf};
use tracing_lint_core::CONFIG_FILE_NAME;

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given on the command line.
    Explicit(PathBuf),
    /// Found next to the checked sources.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

const PROJECT_CONFIG_NAMES: [&str; 2] = [CONFIG_FILE_NAME, ".tracing-lint.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration for checking `target`.
#[must_use]
pub fn resolve(target: &Path, explicit: Option<&Path>) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }
    let start = std::path::absolute(target).unwrap_or_else(|_| target.to_path_buf());
    lookup(&start, global_config_dir())
}

fn lookup(target: &Path, global_dir: Option<PathBuf>) -> ConfigSource {
    let start = if target.is_file() {
        target.parent().unwrap_or(target)
    } else {
        target
    };

    if let Some(found) = start.ancestors().find_map(project_config_in) {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.is_file())
        .map_or(ConfigSource::Default, |candidate| {
            tracing::debug!("Found global config: {}", candidate.display());
            ConfigSource::Global(candidate)
        })
}

fn project_config_in(dir: &Path) -> Option<PathBuf> {
    PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Global config directory: `$TRACING_LINT_CONFIG_DIR`, else `~/.tracing-lint/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("TRACING_LINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".tracing-lint"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_is_trusted_as_is() {
        let result = resolve(Path::new("."), Some(Path::new("/nonexistent.toml")));
        assert_eq!(
            result,
            ConfigSource::Explicit(PathBuf::from("/nonexistent.toml"))
        );
    }

    #[test]
    fn project_config_in_target() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".tracing-lint.toml"), "").unwrap();
        assert_eq!(
            lookup(tmp.path(), None),
            ConfigSource::Project(tmp.path().join(".tracing-lint.toml"))
        );

        fs::write(tmp.path().join(CONFIG_FILE_NAME), "").unwrap();
        assert_eq!(
            lookup(tmp.path(), None),
            ConfigSource::Project(tmp.path().join(CONFIG_FILE_NAME))
        );
    }

    #[test]
    fn nearest_ancestor_wins() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("packages/api/src");
        fs::create_dir_all(&nested).unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "").unwrap();
        fs::write(tmp.path().join("packages/api").join(CONFIG_FILE_NAME), "").unwrap();

        assert_eq!(
            lookup(&nested, None),
            ConfigSource::Project(tmp.path().join("packages/api").join(CONFIG_FILE_NAME))
        );
    }

    #[test]
    fn file_target_starts_at_parent() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "").unwrap();
        let file = tmp.path().join("app.ts");
        fs::write(&file, "").unwrap();

        assert_eq!(
            lookup(&file, None),
            ConfigSource::Project(tmp.path().join(CONFIG_FILE_NAME))
        );
    }

    #[test]
    fn directory_named_like_config_is_ignored() {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("project");
        fs::create_dir_all(project.join(CONFIG_FILE_NAME)).unwrap();
        let global = TempDir::new().unwrap();

        assert_eq!(
            lookup(&project, Some(global.path().to_path_buf())),
            ConfigSource::Default
        );
    }

    #[test]
    fn global_used_only_without_project_config() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join(GLOBAL_CONFIG_NAME), "").unwrap();

        let result = lookup(project.path(), Some(global.path().to_path_buf()));
        assert!(result.is_global());
        assert_eq!(result.path(), Some(global.path().join("config.toml").as_path()));

        fs::write(project.path().join(CONFIG_FILE_NAME), "").unwrap();
        let result = lookup(project.path(), Some(global.path().to_path_buf()));
        assert!(matches!(result, ConfigSource::Project(_)));
    }

    #[test]
    fn default_has_no_path() {
        assert!(ConfigSource::Default.path().is_none());
        assert!(!ConfigSource::Default.is_global());
    }
}
