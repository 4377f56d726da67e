//! Plugin metadata and rule lookup.

use serde::Serialize;
use tracing_lint_core::RuleBox;

use crate::presets::all_rules;

/// Name and version of this rule set, as published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PluginMeta {
    /// Package name.
    pub name: &'static str,
    /// Package version.
    pub version: &'static str,
}

/// Metadata of this crate.
pub const PLUGIN: PluginMeta = PluginMeta {
    name: env!("CARGO_PKG_NAME"),
    version: env!("CARGO_PKG_VERSION"),
};

/// Looks up a rule by kebab-case name or code (case-insensitive).
#[must_use]
pub fn rule_by_name(name: &str) -> Option<RuleBox> {
    all_rules()
        .into_iter()
        .find(|rule| rule.name() == name || rule.code().eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_from_manifest() {
        assert_eq!(PLUGIN.name, "tracing-lint-rules");
        assert!(!PLUGIN.version.is_empty());
    }

    #[test]
    fn lookup_by_name_and_code() {
        let by_name = rule_by_name("invalid-skip-attribute").map(|r| r.code());
        assert_eq!(by_name, Some("TL002"));
        let by_code = rule_by_name("tl001").map(|r| r.name());
        assert_eq!(by_code, Some("prefer-explicit-resource-management"));
        assert!(rule_by_name("no-such-rule").is_none());
    }
}
