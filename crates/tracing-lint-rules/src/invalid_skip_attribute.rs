//! Rule to validate `skip(...)` attributes against the instrumented parameters.
//!
//! # Rationale
//!
//! `skip` tells the instrumentation layer which parameters to leave out of the
//! recorded span fields. A skip that refers to no parameter silently records
//! everything, which may leak data into logs.
//!
//! Two call shapes are recognized:
//!
//! ```ts
//! class Service {
//!   @instrument(skip(0), skip("token"))
//!   login(user, token) {}
//! }
//!
//! const login = instrumentCallback(
//!   [skip("token")],
//!   (user, token) => {},
//! );
//! ```
//!
//! Each skip argument is checked on its own. A numeric index must be a
//! non-negative integer below the parameter count (any index is accepted
//! when the last parameter is a rest parameter). A string must name a
//! parameter. Non-literal arguments cannot be verified and are reported too.
//!
//! # Suppression
//!
//! - `// tracing-lint: allow(invalid-skip-attribute) reason="..."`

use tracing::trace;
use tracing_lint_core::syntax::{NodeId, NodeKind, SyntaxKind, SyntaxTree};
use tracing_lint_core::{MessageId, Reporter, Rule, RuleCategory, Severity};

use crate::params::{
    classify_argument, describe_params, match_index, match_name, MatchOutcome,
    ParameterDescriptor, SkipArgument,
};

/// Rule code for invalid-skip-attribute.
pub const CODE: &str = "TL002";

/// Rule name for invalid-skip-attribute.
pub const NAME: &str = "invalid-skip-attribute";

const SKIP: &str = "skip";
const INSTRUMENT: &str = "instrument";
const INSTRUMENT_CALLBACK: &str = "instrumentCallback";

const MESSAGES: &[(MessageId, &str)] = &[
    (
        MessageId::InvalidSkipByIndexAttribute,
        "The index does not correspond to the index of a parameter on the instrumented function or method.",
    ),
    (
        MessageId::InvalidSkipByNameAttribute,
        "The name does not correspond to the name of a parameter on the instrumented function or method.",
    ),
    (
        MessageId::AvoidDynamicSkipAttributes,
        "Avoid dynamic skip attributes. These cannot be statically verified.",
    ),
    (
        MessageId::AvoidComplexSkipByNameAttributes,
        "Avoid skipping destructured parameters by name. The name must match the parameter source text exactly.",
    ),
];

/// Validates `skip(...)` attributes on instrumented functions and methods.
#[derive(Debug, Clone)]
pub struct InvalidSkipAttribute {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for InvalidSkipAttribute {
    fn default() -> Self {
        Self::new()
    }
}

impl InvalidSkipAttribute {
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

/// Finds the parameters a skip call applies to, if it sits in a known shape.
fn target_params(tree: &SyntaxTree, skip_call: NodeId) -> Option<&[NodeId]> {
    let parent = tree.parent(skip_call)?;
    match tree.kind(parent) {
        // instrumentCallback([skip(..)], function (..) {})
        NodeKind::ArrayExpression { .. } => {
            let outer = tree.parent(parent)?;
            if tree.callee_name(outer) != Some(INSTRUMENT_CALLBACK) {
                return None;
            }
            let arguments = tree.call_arguments(outer)?;
            if arguments.first() != Some(&parent) {
                return None;
            }
            match tree.kind(*arguments.get(1)?) {
                NodeKind::FunctionExpression { params }
                | NodeKind::ArrowFunctionExpression { params } => Some(params),
                _ => None,
            }
        }
        // @instrument(skip(..)) method(..) {}
        NodeKind::CallExpression { arguments, .. } => {
            if tree.callee_name(parent) != Some(INSTRUMENT) || !arguments.contains(&skip_call) {
                return None;
            }
            let decorator = tree.parent(parent)?;
            if !matches!(tree.kind(decorator), NodeKind::Decorator { expression } if *expression == parent)
            {
                return None;
            }
            match tree.kind(tree.parent(decorator)?) {
                NodeKind::MethodDefinition { params, .. } => Some(params),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Decides the message, if any, for one skip argument.
fn evaluate(params: &[ParameterDescriptor], argument: &SkipArgument) -> Option<MessageId> {
    match argument {
        SkipArgument::SignedNumber => Some(MessageId::InvalidSkipByIndexAttribute),
        SkipArgument::Dynamic => Some(MessageId::AvoidDynamicSkipAttributes),
        SkipArgument::OtherLiteral => None,
        SkipArgument::Index(index) => match match_index(params, *index) {
            MatchOutcome::Match => None,
            MatchOutcome::NoMatch | MatchOutcome::Ambiguous => {
                Some(MessageId::InvalidSkipByIndexAttribute)
            }
        },
        SkipArgument::Name(name) => match match_name(params, name) {
            MatchOutcome::Match => None,
            MatchOutcome::NoMatch => Some(MessageId::InvalidSkipByNameAttribute),
            MatchOutcome::Ambiguous => Some(MessageId::AvoidComplexSkipByNameAttributes),
        },
    }
}

impl Rule for InvalidSkipAttribute {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Validates the correct usage of the skip attribute."
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Problem
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
        if tree.callee_name(node) != Some(SKIP) {
            return;
        }
        let Some(arguments) = tree.call_arguments(node).filter(|a| !a.is_empty()) else {
            return;
        };
        let Some(params) = target_params(tree, node) else {
            trace!(line = tree.span(node).line, "skip call outside instrumentation");
            return;
        };

        let params = describe_params(tree, params);
        for &argument in arguments {
            if let Some(message_id) = evaluate(&params, &classify_argument(tree, argument)) {
                reporter.report(message_id, argument);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple(names: &[&str]) -> Vec<ParameterDescriptor> {
        names
            .iter()
            .map(|n| ParameterDescriptor::Simple((*n).to_string()))
            .collect()
    }

    #[test]
    fn evaluate_each_argument_kind() {
        let params = simple(&["arg0"]);
        assert_eq!(evaluate(&params, &SkipArgument::Index(0.0)), None);
        assert_eq!(
            evaluate(&params, &SkipArgument::Index(1.0)),
            Some(MessageId::InvalidSkipByIndexAttribute)
        );
        assert_eq!(
            evaluate(&params, &SkipArgument::SignedNumber),
            Some(MessageId::InvalidSkipByIndexAttribute)
        );
        assert_eq!(
            evaluate(&params, &SkipArgument::Dynamic),
            Some(MessageId::AvoidDynamicSkipAttributes)
        );
        assert_eq!(evaluate(&params, &SkipArgument::OtherLiteral), None);
        assert_eq!(evaluate(&params, &SkipArgument::Name("arg0".into())), None);
        assert_eq!(
            evaluate(&params, &SkipArgument::Name("arg1".into())),
            Some(MessageId::InvalidSkipByNameAttribute)
        );
    }

    #[test]
    fn evaluate_complex_name() {
        let params = vec![ParameterDescriptor::Complex("{ a }".into())];
        assert_eq!(
            evaluate(&params, &SkipArgument::Name("{ a }".into())),
            Some(MessageId::AvoidComplexSkipByNameAttributes)
        );
    }

    #[test]
    fn every_message_has_text() {
        let rule = InvalidSkipAttribute::new();
        for id in [
            MessageId::InvalidSkipByIndexAttribute,
            MessageId::InvalidSkipByNameAttribute,
            MessageId::AvoidDynamicSkipAttributes,
            MessageId::AvoidComplexSkipByNameAttributes,
        ] {
            assert!(rule.message(id).is_some(), "missing text for {id}");
        }
        assert_eq!(rule.category(), RuleCategory::Problem);
    }
}
