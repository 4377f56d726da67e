//! Rule to require `using` declarations for entered spans.
//!
//! # Rationale
//!
//! A span entered with `span("name").enter()` must be exited by hand. When
//! the guard is bound with `using`, it is exited on every path out of the
//! scope, including early returns and thrown errors.
//!
//! ```ts
//! span("load").enter();                   // reported at the call
//! const guard = span("load").enter();     // reported at the declaration
//! using guard = span("load").enter();     // ok
//! ```
//!
//! # Suppression
//!
//! - `// tracing-lint: allow(prefer-explicit-resource-management) reason="..."`

use tracing_lint_core::syntax::{NodeId, NodeKind, SyntaxKind, SyntaxTree};
use tracing_lint_core::{MessageId, Reporter, Rule, RuleCategory, Severity};

/// Rule code for prefer-explicit-resource-management.
pub const CODE: &str = "TL001";

/// Rule name for prefer-explicit-resource-management.
pub const NAME: &str = "prefer-explicit-resource-management";

/// Functions that create a span.
pub const SPAN_FACTORIES: &[&str] = &[
    "span",
    "traceSpan",
    "debugSpan",
    "infoSpan",
    "warnSpan",
    "errorSpan",
    "criticalSpan",
];

const MESSAGES: &[(MessageId, &str)] = &[(
    MessageId::PreferExplicitResourceManagement,
    "Prefer explicit resource management over manually exiting spans.",
)];

/// Reports spans that are entered without a `using` binding.
#[derive(Debug, Clone)]
pub struct PreferExplicitResourceManagement {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for PreferExplicitResourceManagement {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferExplicitResourceManagement {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

/// Returns true for `<factory>(...).enter()`.
fn is_entered_span(tree: &SyntaxTree, call: NodeId) -> bool {
    let NodeKind::CallExpression { callee, .. } = tree.kind(call) else {
        return false;
    };
    let NodeKind::MemberExpression { object, property } = tree.kind(*callee) else {
        return false;
    };
    tree.identifier_name(*property) == Some("enter")
        && tree
            .callee_name(*object)
            .is_some_and(|name| SPAN_FACTORIES.contains(&name))
}

impl Rule for PreferExplicitResourceManagement {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "When manually exiting spans, it is easy to forget to exit spans, which may lead to \
         unexpected results. Therefore, explicit resource management (using declarations) is \
         preferred."
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Suggestion
    }

    fn messages(&self) -> &'static [(MessageId, &'static str)] {
        MESSAGES
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn node_kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::CallExpression]
    }

    fn check_node(&self, tree: &SyntaxTree, node: NodeId, reporter: &mut dyn Reporter) {
        if !is_entered_span(tree, node) {
            return;
        }

        let declaration = tree
            .parent(node)
            .filter(|&p| {
                matches!(tree.kind(p), NodeKind::VariableDeclarator { init: Some(init), .. } if *init == node)
            })
            .and_then(|declarator| tree.parent(declarator))
            .and_then(|d| match tree.kind(d) {
                NodeKind::VariableDeclaration { kind, .. } => Some((d, *kind)),
                _ => None,
            });

        match declaration {
            Some((_, kind)) if kind.is_scoped() => {}
            Some((declaration, _)) => {
                reporter.report(MessageId::PreferExplicitResourceManagement, declaration);
            }
            None => reporter.report(MessageId::PreferExplicitResourceManagement, node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_lint_core::syntax::{parse, SourceLanguage};
    use tracing_lint_core::Diagnostic;

    /// Returns the source text of each reported anchor.
    fn check_code(code: &str) -> Vec<String> {
        let tree = parse(code, SourceLanguage::TypeScript).expect("Failed to parse");
        let rule = PreferExplicitResourceManagement::new();
        let mut found: Vec<Diagnostic> = Vec::new();
        for node in tree.preorder() {
            if rule.node_kinds().contains(&tree.tag(node)) {
                rule.check_node(&tree, node, &mut found);
            }
        }
        assert!(found
            .iter()
            .all(|d| d.message_id == MessageId::PreferExplicitResourceManagement));
        found
            .iter()
            .map(|d| tree.text(d.anchor).to_string())
            .collect()
    }

    #[test]
    fn test_bare_enter_anchors_call() {
        let found = check_code("span(\"message\").enter();");
        assert_eq!(found, vec!["span(\"message\").enter()"]);
    }

    #[test]
    fn test_const_anchors_declaration() {
        let found = check_code("const guard = infoSpan(\"message\").enter();");
        assert_eq!(found, vec!["const guard = infoSpan(\"message\").enter();"]);
    }

    #[test]
    fn test_let_and_var() {
        assert_eq!(check_code("let g = span('m').enter();").len(), 1);
        assert_eq!(check_code("var g = span('m').enter();").len(), 1);
    }

    #[test]
    fn test_using_is_valid() {
        assert!(check_code("using _guard = errorSpan(\"message\").enter();").is_empty());
    }

    #[test]
    fn test_unrelated_calls() {
        assert!(check_code("const g = span('m');").is_empty());
        assert!(check_code("span('m').dummy();").is_empty());
        assert!(check_code("makeSpan('m').enter();").is_empty());
        assert!(check_code("tracer.span('m').enter();").is_empty());
        assert!(check_code("span.enter();").is_empty());
    }

    #[test]
    fn test_nested_in_other_expressions() {
        let found = check_code("function f() { return warnSpan('m').enter(); }");
        assert_eq!(found, vec!["warnSpan('m').enter()"]);
        let found = check_code("const g = wrap(span('m').enter());");
        assert_eq!(found, vec!["span('m').enter()"]);
    }

    #[test]
    fn test_each_declaration_in_a_list() {
        let found = check_code("const a = span('a').enter(), b = span('b').enter();");
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_metadata() {
        let rule = PreferExplicitResourceManagement::new();
        assert_eq!(rule.code(), CODE);
        assert_eq!(rule.category(), RuleCategory::Suggestion);
        assert_eq!(
            rule.docs_url(),
            "https://github.com/bcheidemann/tracing-eslint#prefer-explicit-resource-management"
        );
        assert_eq!(rule.default_severity(), Severity::Error);
        assert_eq!(
            rule.severity(Severity::Warning).default_severity(),
            Severity::Warning
        );
    }
}
