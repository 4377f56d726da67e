//! Rule dispatch over a single syntax tree.

use std::collections::HashMap;

use tracing::trace;

use crate::context::FileContext;
use crate::rule::{Diagnostic, MessageId, Reporter, Rule, RuleBox};
use crate::syntax::{NodeId, SyntaxKind, SyntaxTree};
use crate::types::{Location, Severity, Suggestion, Violation};
use crate::utils::allowance::check_allow_with_reason;

/// Runs a set of rules over syntax trees.
///
/// The kind → rules registry is built once; each tree is then walked a
/// single time, top-down, and every node is handed to the rules registered
/// for its kind.
pub struct Linter {
    rules: Vec<RuleBox>,
    registry: HashMap<SyntaxKind, Vec<usize>>,
}

/// Reporter that tags each finding with the rule that produced it.
struct RuleReporter<'a> {
    rule: usize,
    out: &'a mut Vec<(usize, Diagnostic)>,
}

impl Reporter for RuleReporter<'_> {
    fn report(&mut self, message_id: MessageId, anchor: NodeId) {
        self.out.push((self.rule, Diagnostic { message_id, anchor }));
    }
}

impl Linter {
    /// Creates a linter and registers each rule under the kinds it listens to.
    #[must_use]
    pub fn new(rules: Vec<RuleBox>) -> Self {
        let mut registry: HashMap<SyntaxKind, Vec<usize>> = HashMap::new();
        for (index, rule) in rules.iter().enumerate() {
            for kind in rule.node_kinds() {
                registry.entry(*kind).or_default().push(index);
            }
        }
        Self { rules, registry }
    }

    /// Returns the registered rules.
    #[must_use]
    pub fn rules(&self) -> &[RuleBox] {
        &self.rules
    }

    /// Walks `tree` and returns every finding with the rule that reported it,
    /// in traversal order.
    #[must_use]
    pub fn diagnostics(&self, tree: &SyntaxTree) -> Vec<(&dyn Rule, Diagnostic)> {
        let mut found = Vec::new();
        for node in tree.preorder() {
            let Some(listeners) = self.registry.get(&tree.tag(node)) else {
                continue;
            };
            for &rule in listeners {
                let mut reporter = RuleReporter {
                    rule,
                    out: &mut found,
                };
                self.rules[rule].check_node(tree, node, &mut reporter);
            }
        }

        found
            .into_iter()
            .map(|(rule, diagnostic)| (self.rules[rule].as_ref(), diagnostic))
            .collect()
    }

    /// Lints one parsed file, turning findings into located violations.
    ///
    /// Findings covered by an allow directive are dropped. An allow directive
    /// without a reason, for a rule that requires one, yields a warning.
    #[must_use]
    pub fn lint(&self, ctx: &FileContext<'_>, tree: &SyntaxTree) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (rule, diagnostic) in self.diagnostics(tree) {
            let span = tree.span(diagnostic.anchor);
            let location = Location::from_span(ctx.relative_path.clone(), span);

            let allow_check = check_allow_with_reason(ctx.content, span.line, rule.name());
            if allow_check.is_allowed() {
                trace!(rule = rule.name(), line = span.line, "finding allowed by directive");
                if rule.requires_allow_reason() && allow_check.reason().is_none() {
                    violations.push(
                        Violation::new(
                            rule.code(),
                            rule.name(),
                            Severity::Warning,
                            location,
                            format!(
                                "Allow directive for '{}' is missing required reason",
                                rule.name()
                            ),
                        )
                        .with_suggestion(Suggestion::new(
                            "Add reason=\"...\" to explain why this exception is necessary",
                        )),
                    );
                }
                continue;
            }

            let message = rule
                .message(diagnostic.message_id)
                .unwrap_or(diagnostic.message_id.as_str());
            violations.push(
                Violation::new(
                    rule.code(),
                    rule.name(),
                    rule.default_severity(),
                    location,
                    message,
                )
                .with_message_id(diagnostic.message_id)
                .with_doc_ref(rule.docs_url()),
            );
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::rule::RuleCategory;
    use crate::syntax::{parse, SourceLanguage};

    /// Reports every call to `flagged`.
    struct FlagCalls;

    impl Rule for FlagCalls {
        fn name(&self) -> &'static str {
            "flag-calls"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn category(&self) -> RuleCategory {
            RuleCategory::Problem
        }
        fn messages(&self) -> &'static [(MessageId, &'static str)] {
            &[(MessageId::AvoidDynamicSkipAttributes, "flagged call")]
        }
        fn node_kinds(&self) -> &'static [SyntaxKind] {
            &[SyntaxKind::CallExpression]
        }
        fn check_node(&self, tree: &SyntaxTree, node: NodeId, reporter: &mut dyn Reporter) {
            if tree.callee_name(node) == Some("flagged") {
                reporter.report(MessageId::AvoidDynamicSkipAttributes, node);
            }
        }
    }

    fn lint(src: &str) -> Vec<Violation> {
        let tree = parse(src, SourceLanguage::TypeScript).expect("parse");
        let ctx = FileContext::for_source(Path::new("a.ts"), src);
        Linter::new(vec![Box::new(FlagCalls)]).lint(&ctx, &tree)
    }

    #[test]
    fn dispatches_by_kind_in_source_order() {
        let src = "flagged(1);\nother();\nflagged(other());\n";
        let tree = parse(src, SourceLanguage::TypeScript).expect("parse");
        let linter = Linter::new(vec![Box::new(FlagCalls)]);
        let found = linter.diagnostics(&tree);
        let lines: Vec<usize> = found
            .iter()
            .map(|(_, d)| tree.span(d.anchor).line)
            .collect();
        assert_eq!(lines, vec![1, 3]);
        assert!(found.iter().all(|(rule, _)| rule.name() == "flag-calls"));
    }

    #[test]
    fn violations_carry_message_and_location() {
        let violations = lint("  flagged();");
        assert_eq!(violations.len(), 1);
        let v = &violations[0];
        assert_eq!(v.message, "flagged call");
        assert_eq!(v.message_id, Some(MessageId::AvoidDynamicSkipAttributes));
        assert_eq!((v.location.line, v.location.column), (1, 3));
        assert_eq!(v.location.length, "flagged()".len());
        assert_eq!(
            v.doc_ref.as_deref(),
            Some("https://github.com/bcheidemann/tracing-eslint#flag-calls")
        );
    }

    #[test]
    fn allow_directive_with_reason_suppresses() {
        let violations =
            lint("// tracing-lint: allow(flag-calls) reason=\"fixture\"\nflagged();\n");
        assert!(violations.is_empty());
    }

    #[test]
    fn allow_directive_without_reason_warns() {
        let violations = lint("flagged(); // tracing-lint: allow(flag-calls)\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].severity, Severity::Warning);
        assert!(violations[0].message.contains("missing required reason"));
        assert_eq!(violations[0].message_id, None);
    }

    #[test]
    fn no_rules_no_findings() {
        let tree = parse("flagged();", SourceLanguage::TypeScript).expect("parse");
        assert!(Linter::new(Vec::new()).diagnostics(&tree).is_empty());
    }
}
