//! Matching `skip(...)` arguments against declared parameters.
//!
//! Everything here is pure: parameter nodes and argument nodes are turned
//! into small descriptors, and the matchers compare descriptors only.

use tracing_lint_core::syntax::{NodeId, NodeKind, SyntaxTree};

/// How a declared parameter can be referred to by a skip attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterDescriptor {
    /// `name`
    Simple(String),
    /// `...name`, holding the source text of the rest pattern.
    Rest(String),
    /// `name = default`
    Defaulted(String),
    /// A destructuring pattern, holding its source text.
    Complex(String),
}

impl ParameterDescriptor {
    /// Describes one declared parameter node.
    #[must_use]
    pub fn from_node(tree: &SyntaxTree, param: NodeId) -> Self {
        match tree.kind(param) {
            NodeKind::Identifier { name } => Self::Simple(name.clone()),
            NodeKind::RestElement { .. } => Self::Rest(tree.text(param).to_owned()),
            NodeKind::AssignmentPattern { left, .. } => match tree.identifier_name(*left) {
                Some(name) => Self::Defaulted(name.to_owned()),
                None => Self::Complex(tree.text(*left).to_owned()),
            },
            _ => Self::Complex(tree.text(param).to_owned()),
        }
    }

    /// Returns true for a rest parameter.
    #[must_use]
    pub fn is_rest(&self) -> bool {
        matches!(self, Self::Rest(_))
    }
}

/// Describes a parameter list, preserving declaration order.
#[must_use]
pub fn describe_params(tree: &SyntaxTree, params: &[NodeId]) -> Vec<ParameterDescriptor> {
    params
        .iter()
        .map(|&param| ParameterDescriptor::from_node(tree, param))
        .collect()
}

/// What a single skip argument is, syntactically.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipArgument {
    /// A numeric literal.
    Index(f64),
    /// A string literal.
    Name(String),
    /// `+n` or `-n` on a numeric literal.
    SignedNumber,
    /// Anything that is not a literal.
    Dynamic,
    /// A boolean, `null`, regular expression or BigInt literal.
    OtherLiteral,
}

/// Classifies one argument of a skip call.
#[must_use]
pub fn classify_argument(tree: &SyntaxTree, argument: NodeId) -> SkipArgument {
    match tree.kind(argument) {
        NodeKind::UnaryExpression { operator, argument }
            if operator.is_sign()
                && matches!(tree.kind(*argument), NodeKind::NumericLiteral { .. }) =>
        {
            SkipArgument::SignedNumber
        }
        NodeKind::NumericLiteral { value } => SkipArgument::Index(*value),
        NodeKind::StringLiteral { value } => SkipArgument::Name(value.clone()),
        NodeKind::Literal => SkipArgument::OtherLiteral,
        _ => SkipArgument::Dynamic,
    }
}

/// Result of matching a skip value against a parameter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The value refers to a parameter.
    Match,
    /// The value refers to no parameter.
    NoMatch,
    /// The value names a destructured parameter by its source text.
    Ambiguous,
}

/// Matches a positional skip index.
///
/// A rest parameter in last position accepts any non-negative integer.
#[must_use]
#[allow(clippy::float_cmp, clippy::cast_precision_loss)]
pub fn match_index(params: &[ParameterDescriptor], index: f64) -> MatchOutcome {
    let Some(last) = params.last() else {
        return MatchOutcome::NoMatch;
    };
    if !index.is_finite() || index < 0.0 || index.trunc() != index {
        return MatchOutcome::NoMatch;
    }
    if last.is_rest() || index < params.len() as f64 {
        MatchOutcome::Match
    } else {
        MatchOutcome::NoMatch
    }
}

/// Matches a skip name. The first parameter that matches decides.
#[must_use]
pub fn match_name(params: &[ParameterDescriptor], name: &str) -> MatchOutcome {
    for param in params {
        match param {
            ParameterDescriptor::Simple(n)
            | ParameterDescriptor::Defaulted(n)
            | ParameterDescriptor::Rest(n)
                if n == name =>
            {
                return MatchOutcome::Match;
            }
            ParameterDescriptor::Complex(text) if text == name => {
                return MatchOutcome::Ambiguous;
            }
            _ => {}
        }
    }
    MatchOutcome::NoMatch
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_lint_core::syntax::{parse, SourceLanguage, SyntaxKind};

    use super::ParameterDescriptor::{Complex, Defaulted, Rest, Simple};

    fn params_of(src: &str) -> Vec<ParameterDescriptor> {
        let tree = parse(src, SourceLanguage::TypeScript).expect("parse");
        let func = tree
            .preorder()
            .find(|&id| tree.function_params(id).is_some())
            .expect("function");
        describe_params(&tree, tree.function_params(func).unwrap_or_default())
    }

    fn first_skip_argument(src: &str) -> SkipArgument {
        let tree = parse(src, SourceLanguage::TypeScript).expect("parse");
        let call = tree
            .preorder()
            .find(|&id| tree.tag(id) == SyntaxKind::CallExpression)
            .expect("call");
        let args = tree.call_arguments(call).expect("arguments");
        classify_argument(&tree, args[0])
    }

    #[test]
    fn describes_each_parameter_shape() {
        let params = params_of("function f(a, b = 1, { c, d }, [e], ...rest: number[]) {}");
        assert_eq!(
            params,
            vec![
                Simple("a".into()),
                Defaulted("b".into()),
                Complex("{ c, d }".into()),
                Complex("[e]".into()),
                Rest("...rest".into()),
            ]
        );
    }

    #[test]
    fn typed_and_optional_parameters_are_simple() {
        let params = params_of("const f = (a: string, b?: number) => {};");
        assert_eq!(params, vec![Simple("a".into()), Simple("b".into())]);
    }

    #[test]
    fn destructured_default_is_complex() {
        let params = params_of("function f({ a } = {}) {}");
        assert_eq!(params, vec![Complex("{ a }".into())]);
    }

    #[test]
    fn classifies_arguments() {
        assert_eq!(first_skip_argument("skip(0)"), SkipArgument::Index(0.0));
        assert_eq!(first_skip_argument("skip(0.5)"), SkipArgument::Index(0.5));
        assert_eq!(first_skip_argument("skip('a')"), SkipArgument::Name("a".into()));
        assert_eq!(first_skip_argument("skip(\"a\")"), SkipArgument::Name("a".into()));
        assert_eq!(first_skip_argument("skip(-1)"), SkipArgument::SignedNumber);
        assert_eq!(first_skip_argument("skip(+1)"), SkipArgument::SignedNumber);
        assert_eq!(first_skip_argument("skip(-x)"), SkipArgument::Dynamic);
        assert_eq!(first_skip_argument("skip(!0)"), SkipArgument::Dynamic);
        assert_eq!(first_skip_argument("skip(2 / 2)"), SkipArgument::Dynamic);
        assert_eq!(first_skip_argument("skip(index)"), SkipArgument::Dynamic);
        assert_eq!(first_skip_argument("skip(`a`)"), SkipArgument::Dynamic);
        assert_eq!(first_skip_argument("skip(true)"), SkipArgument::OtherLiteral);
        assert_eq!(first_skip_argument("skip(null)"), SkipArgument::OtherLiteral);
    }

    #[test]
    fn index_bounds() {
        let one = [Simple("arg0".into())];
        assert_eq!(match_index(&one, 0.0), MatchOutcome::Match);
        assert_eq!(match_index(&one, 1.0), MatchOutcome::NoMatch);
        assert_eq!(match_index(&one, 0.5), MatchOutcome::NoMatch);
        assert_eq!(match_index(&one, -1.0), MatchOutcome::NoMatch);
        assert_eq!(match_index(&one, f64::NAN), MatchOutcome::NoMatch);
        assert_eq!(match_index(&[], 0.0), MatchOutcome::NoMatch);
    }

    #[test]
    fn index_bounds_grow_with_parameter_count() {
        for n in 1_u32..6 {
            let params: Vec<_> = (0..n).map(|i| Simple(format!("arg{i}"))).collect();
            let last = f64::from(n - 1);
            assert_eq!(match_index(&params, last), MatchOutcome::Match);
            assert_eq!(match_index(&params, last + 1.0), MatchOutcome::NoMatch);
        }
    }

    #[test]
    fn trailing_rest_accepts_any_index() {
        let params = [Simple("arg0".into()), Rest("...args".into())];
        assert_eq!(match_index(&params, 2.0), MatchOutcome::Match);
        assert_eq!(match_index(&params, 100.0), MatchOutcome::Match);
        assert_eq!(match_index(&params, 1.5), MatchOutcome::NoMatch);
    }

    #[test]
    fn names() {
        let params = [
            Simple("a".into()),
            Defaulted("b".into()),
            Complex("{ c }".into()),
            Rest("...rest".into()),
        ];
        assert_eq!(match_name(&params, "a"), MatchOutcome::Match);
        assert_eq!(match_name(&params, "b"), MatchOutcome::Match);
        assert_eq!(match_name(&params, "...rest"), MatchOutcome::Match);
        assert_eq!(match_name(&params, "rest"), MatchOutcome::NoMatch);
        assert_eq!(match_name(&params, "{ c }"), MatchOutcome::Ambiguous);
        assert_eq!(match_name(&params, "{c}"), MatchOutcome::NoMatch);
        assert_eq!(match_name(&params, "c"), MatchOutcome::NoMatch);
        assert_eq!(match_name(&[], "a"), MatchOutcome::NoMatch);
    }
}
