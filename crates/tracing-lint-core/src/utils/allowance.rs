//! Comment-based allowance directives.
//!
//! A directive on the violation's line or the line above suppresses it:
//! ```text
//! // tracing-lint: allow(prefer-explicit-resource-management) reason="guard handed to caller"
//! ```

use std::collections::HashSet;

const DIRECTIVE_PREFIX: &str = "tracing-lint:";

/// Result of checking for allow directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowCheck {
    /// Rule is not allowed.
    Denied,
    /// Rule is allowed with optional reason.
    Allowed {
        /// The reason provided (if any).
        reason: Option<String>,
    },
}

impl AllowCheck {
    /// Returns true if allowed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Returns the reason if allowed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed { reason } => reason.as_deref(),
            Self::Denied => None,
        }
    }
}

/// Parsed allowance directive.
#[derive(Debug, Clone)]
struct AllowDirective {
    rules: HashSet<String>,
    reason: Option<String>,
}

/// Checks source code for an allowance comment covering `line` (1-indexed).
///
/// Both the line itself (trailing comment) and the line before are checked.
/// `all` allows every rule.
#[must_use]
pub fn check_allow_with_reason(content: &str, line: usize, rule_name: &str) -> AllowCheck {
    let lines: Vec<&str> = content.lines().collect();

    for check_line in [line.saturating_sub(1), line] {
        if check_line == 0 || check_line > lines.len() {
            continue;
        }

        if let Some(directive) = parse_allow_directive(lines[check_line - 1]) {
            if directive.rules.contains(rule_name) || directive.rules.contains("all") {
                return AllowCheck::Allowed {
                    reason: directive.reason,
                };
            }
        }
    }

    AllowCheck::Denied
}

/// Parses an allowance directive from a line, which may hold code before the comment.
fn parse_allow_directive(line: &str) -> Option<AllowDirective> {
    let start = line.find(DIRECTIVE_PREFIX)?;
    if !line[..start].trim_end().ends_with("//") {
        return None;
    }
    let directive = line[start + DIRECTIVE_PREFIX.len()..].trim();
    let allow_content = directive.strip_prefix("allow(")?.trim();

    let paren_end = allow_content.find(')')?;
    let rules: HashSet<String> = allow_content[..paren_end]
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if rules.is_empty() {
        return None;
    }

    let rest = allow_content[paren_end + 1..].trim();
    let reason = rest
        .strip_prefix("reason=")
        .and_then(|r| r.trim().strip_prefix('"'))
        .and_then(|r| r.find('"').map(|end| r[..end].to_string()))
        .filter(|r| !r.trim().is_empty());

    Some(AllowDirective { rules, reason })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULE: &str = "prefer-explicit-resource-management";

    #[test]
    fn test_parse_allow_directive() {
        let directive = parse_allow_directive("// tracing-lint: allow(invalid-skip-attribute)")
            .expect("directive");
        assert!(directive.rules.contains("invalid-skip-attribute"));
        assert!(directive.reason.is_none());
    }

    #[test]
    fn test_parse_multiple_rules_with_reason() {
        let directive = parse_allow_directive(
            r#"  // tracing-lint: allow(rule1, rule2) reason="generated code""#,
        )
        .expect("directive");
        assert!(directive.rules.contains("rule1"));
        assert!(directive.rules.contains("rule2"));
        assert_eq!(directive.reason.as_deref(), Some("generated code"));
    }

    #[test]
    fn test_not_a_directive() {
        assert!(parse_allow_directive("// eslint-disable-next-line").is_none());
        assert!(parse_allow_directive("const x = 1;").is_none());
        assert!(parse_allow_directive("// tracing-lint: allow()").is_none());
    }

    #[test]
    fn test_previous_line() {
        let content = r#"function run() {
  // tracing-lint: allow(prefer-explicit-resource-management) reason="exited by caller"
  const guard = span("run").enter();
}"#;
        let result = check_allow_with_reason(content, 3, RULE);
        assert!(result.is_allowed());
        assert_eq!(result.reason(), Some("exited by caller"));
        assert!(!check_allow_with_reason(content, 3, "invalid-skip-attribute").is_allowed());
    }

    #[test]
    fn test_trailing_comment_and_all() {
        let content = r#"span("run").enter(); // tracing-lint: allow(all)"#;
        let result = check_allow_with_reason(content, 1, RULE);
        assert!(result.is_allowed());
        assert_eq!(result.reason(), None);
    }

    #[test]
    fn test_denied() {
        let content = "function run() {\n  span(\"run\").enter();\n}";
        let result = check_allow_with_reason(content, 2, RULE);
        assert_eq!(result, AllowCheck::Denied);
        assert_eq!(result.reason(), None);
    }
}
