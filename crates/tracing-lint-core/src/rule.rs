//! Rule trait and diagnostic reporting.

use serde::{Deserialize, Serialize};

use crate::syntax::{NodeId, SyntaxKind, SyntaxTree};
use crate::types::Severity;

/// Base URL of the rule documentation; the rule name is appended as anchor.
pub const DOCS_BASE_URL: &str = "https://github.com/bcheidemann/tracing-eslint#";

/// Broad classification of what a rule reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleCategory {
    /// Code that is wrong or will misbehave.
    Problem,
    /// Code that works but has a better alternative.
    Suggestion,
}

impl std::fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Problem => write!(f, "problem"),
            Self::Suggestion => write!(f, "suggestion"),
        }
    }
}

/// Identifier of a diagnostic message.
///
/// Rules report identifiers only; the text lives in each rule's catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageId {
    /// A span is entered without a `using` binding.
    PreferExplicitResourceManagement,
    /// A skip index does not refer to a parameter.
    InvalidSkipByIndexAttribute,
    /// A skip name does not refer to a parameter.
    InvalidSkipByNameAttribute,
    /// A skip argument is not a literal.
    AvoidDynamicSkipAttributes,
    /// A skip name refers to a destructured parameter.
    AvoidComplexSkipByNameAttributes,
}

impl MessageId {
    /// Returns the camelCase identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PreferExplicitResourceManagement => "preferExplicitResourceManagement",
            Self::InvalidSkipByIndexAttribute => "invalidSkipByIndexAttribute",
            Self::InvalidSkipByNameAttribute => "invalidSkipByNameAttribute",
            Self::AvoidDynamicSkipAttributes => "avoidDynamicSkipAttributes",
            Self::AvoidComplexSkipByNameAttributes => "avoidComplexSkipByNameAttributes",
        }
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A finding reported by a rule: which message, anchored where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    /// The message to show.
    pub message_id: MessageId,
    /// The node the message points at.
    pub anchor: NodeId,
}

/// Sink for rule findings.
pub trait Reporter {
    /// Records one finding.
    fn report(&mut self, message_id: MessageId, anchor: NodeId);
}

impl Reporter for Vec<Diagnostic> {
    fn report(&mut self, message_id: MessageId, anchor: NodeId) {
        self.push(Diagnostic { message_id, anchor });
    }
}

/// A lint rule over a JavaScript/TypeScript syntax tree.
///
/// Rules declare the node kinds they are interested in through
/// [`Rule::node_kinds`]. The [`Linter`](crate::Linter) walks each tree once
/// and calls [`Rule::check_node`] for every node of a registered kind.
///
/// # Example
///
/// ```ignore
/// use tracing_lint_core::{MessageId, Reporter, Rule, RuleCategory};
/// use tracing_lint_core::syntax::{NodeId, SyntaxKind, SyntaxTree};
///
/// pub struct NoEmptySkip;
///
/// impl Rule for NoEmptySkip {
///     fn name(&self) -> &'static str { "no-empty-skip" }
///     fn code(&self) -> &'static str { "TL900" }
///     fn category(&self) -> RuleCategory { RuleCategory::Suggestion }
///     fn messages(&self) -> &'static [(MessageId, &'static str)] { &[] }
///     fn node_kinds(&self) -> &'static [SyntaxKind] { &[SyntaxKind::CallExpression] }
///
///     fn check_node(&self, tree: &SyntaxTree, node: NodeId, reporter: &mut dyn Reporter) {
///         // inspect `tree.kind(node)` and call `reporter.report(..)`
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "invalid-skip-attribute").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "TL002").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the category of this rule.
    fn category(&self) -> RuleCategory;

    /// Returns the message catalog of this rule.
    fn messages(&self) -> &'static [(MessageId, &'static str)];

    /// Looks up the text for a message id.
    fn message(&self, id: MessageId) -> Option<&'static str> {
        self.messages()
            .iter()
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, text)| *text)
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Whether this rule requires a reason when using allow directives.
    ///
    /// By default, rules with `Severity::Error` require a reason.
    fn requires_allow_reason(&self) -> bool {
        self.default_severity() == Severity::Error
    }

    /// Returns the documentation URL of this rule.
    fn docs_url(&self) -> String {
        format!("{DOCS_BASE_URL}{}", self.name())
    }

    /// Returns the node kinds this rule wants to visit.
    fn node_kinds(&self) -> &'static [SyntaxKind];

    /// Checks one node of a registered kind.
    fn check_node(&self, tree: &SyntaxTree, node: NodeId, reporter: &mut dyn Reporter);
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
