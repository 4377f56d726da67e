//! TypeScript/JavaScript parsing via Tree-sitter.
//!
//! The concrete syntax tree produced by `tree-sitter-typescript` is lowered
//! into the arena [`SyntaxTree`] with a few ESTree-style normalizations:
//!
//! - parenthesized expressions are transparent
//! - `arguments` and `formal_parameters` wrappers are flattened, so the parent
//!   of an argument is its call and the parent of a parameter is its function
//! - a parameter with an initializer becomes an [`NodeKind::AssignmentPattern`]
//! - `using x = ...` (an assignment with a leading `using` token in this
//!   grammar) becomes a [`DeclarationKind::Using`] declaration
//! - decorators written before a class method become children of that method
//! - type annotations, type arguments and type parameters are dropped

use std::path::Path;

use tree_sitter::{Language, Node as TsNode, Parser};

use super::kind::{DeclarationKind, NodeKind, UnaryOperator};
use super::tree::{Node, NodeId, Span, SyntaxTree};

/// Grammar used to parse a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceLanguage {
    /// TypeScript and plain JavaScript.
    TypeScript,
    /// TSX and JSX.
    Tsx,
}

impl SourceLanguage {
    /// File extensions handled by any supported grammar.
    pub const EXTENSIONS: &'static [&'static str] =
        &["ts", "mts", "cts", "js", "mjs", "cjs", "tsx", "jsx"];

    /// Selects a grammar from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "ts" | "mts" | "cts" | "js" | "mjs" | "cjs" => Some(Self::TypeScript),
            "tsx" | "jsx" => Some(Self::Tsx),
            _ => None,
        }
    }

    /// Short identifier for logs and errors.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::Tsx => "tsx",
        }
    }

    fn grammar(self) -> Language {
        match self {
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// Errors raised while parsing a source file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The grammar could not be loaded into the parser.
    #[error("failed to load {language} grammar: {message}")]
    Language {
        /// Grammar name.
        language: &'static str,
        /// Loader message.
        message: String,
    },

    /// The parser gave up without producing a tree.
    #[error("{language} parser produced no tree")]
    Aborted {
        /// Grammar name.
        language: &'static str,
    },
}

/// Parses `source` and lowers it into a [`SyntaxTree`].
///
/// Syntax errors are recovered from and reported through
/// [`SyntaxTree::has_errors`]; only a parser failure is an error.
///
/// # Errors
///
/// Returns [`ParseError`] if the grammar cannot be loaded or parsing aborts.
pub fn parse(source: &str, language: SourceLanguage) -> Result<SyntaxTree, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&language.grammar())
        .map_err(|e| ParseError::Language {
            language: language.name(),
            message: e.to_string(),
        })?;

    let tree = parser
        .parse(source, None)
        .ok_or(ParseError::Aborted {
            language: language.name(),
        })?;
    let root = tree.root_node();

    let mut lowering = Lowering::new(source.as_bytes());
    lowering.lower(root, None);
    lowering.drain_deferred();

    Ok(SyntaxTree::from_parts(
        source.to_owned(),
        lowering.nodes,
        root.has_error(),
    ))
}

/// Grammar nodes that only carry type information.
const TYPE_ONLY: &[&str] = &[
    "type_annotation",
    "type_arguments",
    "type_parameters",
    "asserts_annotation",
    "type_predicate_annotation",
    "accessibility_modifier",
    "override_modifier",
];

fn is_type_only(kind: &str) -> bool {
    TYPE_ONLY.contains(&kind)
}

/// Unwraps parenthesized expressions down to the expression inside.
fn skip_parens(mut node: TsNode<'_>) -> TsNode<'_> {
    while node.kind() == "parenthesized_expression" {
        match named_children(node)
            .into_iter()
            .find(|c| !is_type_only(c.kind()))
        {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}

fn span_of(node: TsNode<'_>) -> Span {
    let start = node.start_position();
    Span {
        start: node.start_byte(),
        end: node.end_byte(),
        line: start.row + 1,
        column: start.column + 1,
    }
}

/// Named, non-comment children in source order.
fn named_children(node: TsNode<'_>) -> Vec<TsNode<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| !c.is_extra())
        .collect()
}

/// Named, non-comment children with the grammar field they occupy.
fn fielded_children(node: TsNode<'_>) -> Vec<(Option<&'static str>, TsNode<'_>)> {
    let mut cursor = node.walk();
    let mut out = Vec::new();
    if cursor.goto_first_child() {
        loop {
            let child = cursor.node();
            if child.is_named() && !child.is_extra() {
                out.push((cursor.field_name(), child));
            }
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }
    out
}

/// Nesting depth lowered on the native stack before a subtree is deferred.
const MAX_LOWERING_DEPTH: usize = 128;

struct Lowering<'s, 't> {
    src: &'s [u8],
    nodes: Vec<Node>,
    depth: usize,
    /// Subtrees whose node is allocated but not yet lowered.
    deferred: Vec<(TsNode<'t>, NodeId)>,
}

impl<'s, 't> Lowering<'s, 't> {
    fn new(src: &'s [u8]) -> Self {
        Self {
            src,
            nodes: Vec::new(),
            depth: 0,
            deferred: Vec::new(),
        }
    }

    /// Lowers deferred subtrees until none remain. Each one starts again at
    /// depth zero and may defer further subtrees of its own.
    fn drain_deferred(&mut self) {
        while let Some((ts, id)) = self.deferred.pop() {
            self.lower_into(ts, id);
        }
    }

    fn text(&self, node: TsNode<'_>) -> &str {
        node.utf8_text(self.src).unwrap_or("")
    }

    fn alloc(&mut self, span: Span, parent: Option<NodeId>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node {
            kind: NodeKind::Other { grammar_kind: "" },
            span,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(id);
        }
        id
    }

    fn set_kind(&mut self, id: NodeId, kind: NodeKind) {
        self.nodes[id.index()].kind = kind;
    }

    fn lower(&mut self, ts: TsNode<'t>, parent: Option<NodeId>) -> NodeId {
        let ts = skip_parens(ts);
        match ts.kind() {
            "required_parameter" | "optional_parameter" => {
                return self.lower_parameter(ts, parent);
            }
            "method_definition" => return self.lower_method(ts, parent, &[]),
            _ => {}
        }

        let id = self.alloc(span_of(ts), parent);
        if self.depth >= MAX_LOWERING_DEPTH {
            self.deferred.push((ts, id));
        } else {
            self.depth += 1;
            self.lower_into(ts, id);
            self.depth -= 1;
        }
        id
    }

    /// Lowers the children of `ts` and gives the allocated node `id` its kind.
    fn lower_into(&mut self, ts: TsNode<'t>, id: NodeId) {
        let kind = match ts.kind() {
            "program" => {
                self.lower_children(ts, id);
                NodeKind::Program
            }
            "call_expression" => self.lower_call(ts, id),
            "member_expression" => self.lower_member(ts, id),
            "identifier"
            | "property_identifier"
            | "shorthand_property_identifier"
            | "shorthand_property_identifier_pattern"
            | "undefined" => NodeKind::Identifier {
                name: self.text(ts).to_owned(),
            },
            "number" => lower_number(self.text(ts)),
            "string" => NodeKind::StringLiteral {
                value: unescape(strip_quotes(self.text(ts))),
            },
            "true" | "false" | "null" | "regex" => NodeKind::Literal,
            "unary_expression" => self.lower_unary(ts, id),
            "array" => NodeKind::ArrayExpression {
                elements: self.lower_children(ts, id),
            },
            "function_expression" | "function" | "generator_function" => {
                NodeKind::FunctionExpression {
                    params: self.lower_function_parts(ts, id).0,
                }
            }
            "arrow_function" => NodeKind::ArrowFunctionExpression {
                params: self.lower_function_parts(ts, id).0,
            },
            "function_declaration" | "generator_function_declaration" => {
                NodeKind::FunctionDeclaration {
                    params: self.lower_function_parts(ts, id).0,
                }
            }
            "decorator" => match self.lower_children(ts, id).first() {
                Some(&expression) => NodeKind::Decorator { expression },
                None => NodeKind::Other {
                    grammar_kind: ts.kind(),
                },
            },
            "lexical_declaration" => {
                let kind = match ts.child_by_field_name("kind").map(|k| k.kind()) {
                    Some("let") => DeclarationKind::Let,
                    _ => DeclarationKind::Const,
                };
                NodeKind::VariableDeclaration {
                    kind,
                    declarators: self.lower_children(ts, id),
                }
            }
            "variable_declaration" => NodeKind::VariableDeclaration {
                kind: DeclarationKind::Var,
                declarators: self.lower_children(ts, id),
            },
            "variable_declarator" => self.lower_declarator(ts, id),
            "assignment_expression" if ts.child(0).is_some_and(|c| c.kind() == "using") => {
                self.lower_using(ts, id)
            }
            "assignment_pattern" => self.lower_assignment_pattern(ts, id),
            "rest_pattern" => match self.lower_children(ts, id).first() {
                Some(&argument) => NodeKind::RestElement { argument },
                None => NodeKind::Other {
                    grammar_kind: ts.kind(),
                },
            },
            "object_pattern" => {
                self.lower_children(ts, id);
                NodeKind::ObjectPattern
            }
            "array_pattern" => {
                self.lower_children(ts, id);
                NodeKind::ArrayPattern
            }
            "class_body" => {
                self.lower_class_body(ts, id);
                NodeKind::Other {
                    grammar_kind: ts.kind(),
                }
            }
            other => {
                self.lower_children(ts, id);
                NodeKind::Other {
                    grammar_kind: other,
                }
            }
        };
        self.set_kind(id, kind);
    }

    /// Lowers every named child of `ts` under `id`, skipping type-only nodes.
    fn lower_children(&mut self, ts: TsNode<'t>, id: NodeId) -> Vec<NodeId> {
        named_children(ts)
            .into_iter()
            .filter(|c| !is_type_only(c.kind()))
            .map(|c| self.lower(c, Some(id)))
            .collect()
    }

    fn lower_call(&mut self, ts: TsNode<'t>, id: NodeId) -> NodeKind {
        let callee = ts
            .child_by_field_name("function")
            .map(|f| self.lower(f, Some(id)));

        match ts.child_by_field_name("arguments") {
            Some(args) if args.kind() == "arguments" => {
                let arguments = self.lower_children(args, id);
                match callee {
                    Some(callee) => NodeKind::CallExpression { callee, arguments },
                    None => NodeKind::Other {
                        grammar_kind: ts.kind(),
                    },
                }
            }
            // Tagged template: not a call with an argument list.
            Some(template) => {
                self.lower(template, Some(id));
                NodeKind::Other {
                    grammar_kind: "tagged_template",
                }
            }
            None => NodeKind::Other {
                grammar_kind: ts.kind(),
            },
        }
    }

    fn lower_member(&mut self, ts: TsNode<'t>, id: NodeId) -> NodeKind {
        let object = ts
            .child_by_field_name("object")
            .map(|o| self.lower(o, Some(id)));
        let property = ts
            .child_by_field_name("property")
            .map(|p| self.lower(p, Some(id)));
        match (object, property) {
            (Some(object), Some(property)) => NodeKind::MemberExpression { object, property },
            _ => NodeKind::Other {
                grammar_kind: ts.kind(),
            },
        }
    }

    fn lower_unary(&mut self, ts: TsNode<'t>, id: NodeId) -> NodeKind {
        let operator = ts
            .child_by_field_name("operator")
            .and_then(|op| UnaryOperator::from_token(op.kind()));
        let argument = ts
            .child_by_field_name("argument")
            .map(|a| self.lower(a, Some(id)));
        match (operator, argument) {
            (Some(operator), Some(argument)) => NodeKind::UnaryExpression { operator, argument },
            _ => NodeKind::Other {
                grammar_kind: ts.kind(),
            },
        }
    }

    /// Lowers a function-like node, returning its parameters and any
    /// decorators written inside it.
    fn lower_function_parts(
        &mut self,
        ts: TsNode<'t>,
        id: NodeId,
    ) -> (Vec<NodeId>, Vec<NodeId>) {
        let mut params = Vec::new();
        let mut decorators = Vec::new();
        for (field, child) in fielded_children(ts) {
            match field {
                Some("parameters") => params = self.lower_children(child, id),
                Some("parameter") => params = vec![self.lower(child, Some(id))],
                Some("decorator") => decorators.push(self.lower(child, Some(id))),
                _ if is_type_only(child.kind()) => {}
                _ => {
                    self.lower(child, Some(id));
                }
            }
        }
        (params, decorators)
    }

    fn lower_method(
        &mut self,
        ts: TsNode<'t>,
        parent: Option<NodeId>,
        outer_decorators: &[TsNode<'t>],
    ) -> NodeId {
        let mut span = span_of(ts);
        if let Some(first) = outer_decorators.first() {
            let head = span_of(*first);
            span.start = head.start;
            span.line = head.line;
            span.column = head.column;
        }

        let id = self.alloc(span, parent);
        let mut decorators: Vec<NodeId> = outer_decorators
            .iter()
            .map(|d| self.lower(*d, Some(id)))
            .collect();
        let (params, inner) = self.lower_function_parts(ts, id);
        decorators.extend(inner);

        self.set_kind(id, NodeKind::MethodDefinition { params, decorators });
        id
    }

    /// Attaches decorators that precede a method to that method.
    fn lower_class_body(&mut self, ts: TsNode<'t>, id: NodeId) {
        let mut pending: Vec<TsNode<'t>> = Vec::new();
        for child in named_children(ts) {
            match child.kind() {
                "decorator" => pending.push(child),
                "method_definition" => {
                    self.lower_method(child, Some(id), &pending);
                    pending.clear();
                }
                _ => {
                    for decorator in pending.drain(..) {
                        self.lower(decorator, Some(id));
                    }
                    self.lower(child, Some(id));
                }
            }
        }
        for decorator in pending {
            self.lower(decorator, Some(id));
        }
    }

    fn lower_parameter(&mut self, ts: TsNode<'t>, parent: Option<NodeId>) -> NodeId {
        let pattern = ts
            .child_by_field_name("pattern")
            .or_else(|| ts.child_by_field_name("name"));
        let value = ts.child_by_field_name("value");

        match (pattern, value) {
            (Some(pattern), Some(value)) => {
                let id = self.alloc(span_of(ts), parent);
                let left = self.lower_pattern(pattern, Some(id));
                let right = self.lower(value, Some(id));
                self.set_kind(id, NodeKind::AssignmentPattern { left, right });
                id
            }
            (Some(pattern), None) => self.lower_pattern(pattern, parent),
            _ => {
                let id = self.alloc(span_of(ts), parent);
                self.lower_children(ts, id);
                self.set_kind(
                    id,
                    NodeKind::Other {
                        grammar_kind: ts.kind(),
                    },
                );
                id
            }
        }
    }

    /// A parameter binding; the TypeScript `this` parameter is named `this`.
    fn lower_pattern(&mut self, ts: TsNode<'t>, parent: Option<NodeId>) -> NodeId {
        if ts.kind() != "this" {
            return self.lower(ts, parent);
        }
        let id = self.alloc(span_of(ts), parent);
        self.set_kind(
            id,
            NodeKind::Identifier {
                name: "this".to_owned(),
            },
        );
        id
    }

    fn lower_declarator(&mut self, ts: TsNode<'t>, id: NodeId) -> NodeKind {
        let name = ts
            .child_by_field_name("name")
            .map(|n| self.lower(n, Some(id)));
        let init = ts
            .child_by_field_name("value")
            .map(|v| self.lower(v, Some(id)));
        match name {
            Some(name) => NodeKind::VariableDeclarator { id: name, init },
            None => NodeKind::Other {
                grammar_kind: ts.kind(),
            },
        }
    }

    /// `using x = init` becomes a declaration holding one declarator.
    fn lower_using(&mut self, ts: TsNode<'t>, id: NodeId) -> NodeKind {
        let (Some(left), Some(right)) = (
            ts.child_by_field_name("left"),
            ts.child_by_field_name("right"),
        ) else {
            self.lower_children(ts, id);
            return NodeKind::Other {
                grammar_kind: ts.kind(),
            };
        };

        let declarator = self.alloc(span_of(ts), Some(id));
        let binding = self.lower(left, Some(declarator));
        let init = self.lower(right, Some(declarator));
        self.set_kind(
            declarator,
            NodeKind::VariableDeclarator {
                id: binding,
                init: Some(init),
            },
        );

        NodeKind::VariableDeclaration {
            kind: DeclarationKind::Using,
            declarators: vec![declarator],
        }
    }

    fn lower_assignment_pattern(&mut self, ts: TsNode<'t>, id: NodeId) -> NodeKind {
        let left = ts
            .child_by_field_name("left")
            .map(|l| self.lower(l, Some(id)));
        let right = ts
            .child_by_field_name("right")
            .map(|r| self.lower(r, Some(id)));
        match (left, right) {
            (Some(left), Some(right)) => NodeKind::AssignmentPattern { left, right },
            _ => NodeKind::Other {
                grammar_kind: ts.kind(),
            },
        }
    }
}

fn lower_number(text: &str) -> NodeKind {
    if text.ends_with('n') {
        return NodeKind::Literal;
    }
    NodeKind::NumericLiteral {
        value: parse_number(text).unwrap_or(f64::NAN),
    }
}

/// Parses a JavaScript numeric literal.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != '_')
        .collect::<String>()
        .to_ascii_lowercase();

    let radix = |digits: &str, radix: u32| {
        u64::from_str_radix(digits, radix)
            .ok()
            .map(|v| v as f64)
    };

    if let Some(digits) = cleaned.strip_prefix("0x") {
        return radix(digits, 16);
    }
    if let Some(digits) = cleaned.strip_prefix("0o") {
        return radix(digits, 8);
    }
    if let Some(digits) = cleaned.strip_prefix("0b") {
        return radix(digits, 2);
    }
    cleaned.parse::<f64>().ok()
}

fn strip_quotes(text: &str) -> &str {
    if text.len() >= 2 {
        text.get(1..text.len() - 1).unwrap_or("")
    } else {
        ""
    }
}

/// Decodes escape sequences in the body of a string literal.
pub(crate) fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('v') => out.push('\u{b}'),
            Some('0') if !chars.peek().is_some_and(char::is_ascii_digit) => out.push('\0'),
            Some('x') => {
                let hex: String = chars.by_ref().take(2).collect();
                push_code_point(&mut out, &hex);
            }
            Some('u') => {
                let hex: String = if chars.peek() == Some(&'{') {
                    chars.next();
                    chars.by_ref().take_while(|c| *c != '}').collect()
                } else {
                    chars.by_ref().take(4).collect()
                };
                push_code_point(&mut out, &hex);
            }
            // Line continuation.
            Some('\r') => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            Some('\n' | '\u{2028}' | '\u{2029}') | None => {}
            Some(other) => out.push(other),
        }
    }

    out
}

fn push_code_point(out: &mut String, hex: &str) {
    if let Some(c) = u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
        out.push(c);
    }
}
