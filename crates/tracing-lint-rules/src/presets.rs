//! Rule presets for common configurations.

use crate::{InvalidSkipAttribute, PreferExplicitResourceManagement};
use tracing_lint_core::{RuleBox, Severity};

/// Preset configurations for tracing-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// The rules published as the recommended configuration.
    #[default]
    Recommended,
    /// Every available rule.
    All,
}

impl Preset {
    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::All => all_rules(),
        }
    }

    /// Returns the preset name as used in configuration files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::All => "all",
        }
    }
}

impl std::str::FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recommended" => Ok(Self::Recommended),
            "all" => Ok(Self::All),
            other => Err(format!(
                "unknown preset '{other}' (expected 'recommended' or 'all')"
            )),
        }
    }
}

/// Returns the recommended set of rules.
///
/// Includes:
/// - `prefer-explicit-resource-management` (TL001) at error
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    vec![Box::new(
        PreferExplicitResourceManagement::new().severity(Severity::Error),
    )]
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(PreferExplicitResourceManagement::new()),
        Box::new(InvalidSkipAttribute::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(rules: &[RuleBox]) -> Vec<&'static str> {
        rules.iter().map(|r| r.name()).collect()
    }

    #[test]
    fn test_recommended() {
        let rules = Preset::Recommended.rules();
        assert_eq!(names(&rules), vec!["prefer-explicit-resource-management"]);
        assert_eq!(rules[0].default_severity(), Severity::Error);
    }

    #[test]
    fn test_all() {
        assert_eq!(
            names(&Preset::All.rules()),
            vec!["prefer-explicit-resource-management", "invalid-skip-attribute"]
        );
    }

    #[test]
    fn test_all_rule_table() {
        let table: Vec<String> = all_rules()
            .iter()
            .map(|r| format!("{} {} ({})", r.code(), r.name(), r.category()))
            .collect();
        insta::assert_snapshot!(table.join("\n"), @r"
        TL001 prefer-explicit-resource-management (suggestion)
        TL002 invalid-skip-attribute (problem)
        ");
    }

    #[test]
    fn test_parse_preset() {
        assert_eq!("all".parse::<Preset>(), Ok(Preset::All));
        assert_eq!(
            Preset::Recommended.as_str().parse::<Preset>(),
            Ok(Preset::Recommended)
        );
        assert!("strict".parse::<Preset>().is_err());
    }
}
