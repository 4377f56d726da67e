//! Node kinds for the arena syntax tree.
//!
//! [`NodeKind`] is a closed set of ESTree-like shapes. Fields that point at
//! other nodes hold [`NodeId`]s into the same arena. Anything the lint rules
//! have no use for is kept as [`NodeKind::Other`] so that traversal still
//! reaches the expressions nested inside it.

use super::tree::NodeId;

/// Binding kind of a variable declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    /// `var x = ...`
    Var,
    /// `let x = ...`
    Let,
    /// `const x = ...`
    Const,
    /// `using x = ...` (explicit resource management).
    Using,
}

impl DeclarationKind {
    /// Returns true if the binding releases its value on every scope exit.
    #[must_use]
    pub fn is_scoped(self) -> bool {
        matches!(self, Self::Using)
    }

    /// Returns the keyword as written in source.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Var => "var",
            Self::Let => "let",
            Self::Const => "const",
            Self::Using => "using",
        }
    }
}

/// Operator of a unary expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// `-x`
    Minus,
    /// `+x`
    Plus,
    /// `!x`
    Not,
    /// `~x`
    BitNot,
    /// `typeof x`
    Typeof,
    /// `void x`
    Void,
    /// `delete x`
    Delete,
}

impl UnaryOperator {
    /// Parses an operator token.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "-" => Some(Self::Minus),
            "+" => Some(Self::Plus),
            "!" => Some(Self::Not),
            "~" => Some(Self::BitNot),
            "typeof" => Some(Self::Typeof),
            "void" => Some(Self::Void),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }

    /// Returns true for the numeric sign operators `+` and `-`.
    #[must_use]
    pub fn is_sign(self) -> bool {
        matches!(self, Self::Minus | Self::Plus)
    }
}

/// The shape of a syntax node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Root of a parsed file.
    Program,
    /// `callee(arguments...)`
    CallExpression {
        /// The called expression.
        callee: NodeId,
        /// Arguments in source order.
        arguments: Vec<NodeId>,
    },
    /// `object.property`
    MemberExpression {
        /// The accessed object.
        object: NodeId,
        /// The property identifier.
        property: NodeId,
    },
    /// A plain identifier (binding, reference or property name).
    Identifier {
        /// Identifier text.
        name: String,
    },
    /// A numeric literal.
    NumericLiteral {
        /// Parsed numeric value.
        value: f64,
    },
    /// A string literal.
    StringLiteral {
        /// Unescaped string value.
        value: String,
    },
    /// Any other literal: booleans, `null`, regular expressions, BigInts.
    Literal,
    /// `operator argument`
    UnaryExpression {
        /// The operator.
        operator: UnaryOperator,
        /// The operand.
        argument: NodeId,
    },
    /// `[elements...]`
    ArrayExpression {
        /// Elements in source order.
        elements: Vec<NodeId>,
    },
    /// `function name(params) {}` used as an expression.
    FunctionExpression {
        /// Declared parameters.
        params: Vec<NodeId>,
    },
    /// `(params) => body`
    ArrowFunctionExpression {
        /// Declared parameters.
        params: Vec<NodeId>,
    },
    /// `function name(params) {}` as a statement.
    FunctionDeclaration {
        /// Declared parameters.
        params: Vec<NodeId>,
    },
    /// A class or object method.
    MethodDefinition {
        /// Declared parameters.
        params: Vec<NodeId>,
        /// Decorators attached to the method, in source order.
        decorators: Vec<NodeId>,
    },
    /// `@expression`
    Decorator {
        /// The decorator expression.
        expression: NodeId,
    },
    /// `kind declarators...`
    VariableDeclaration {
        /// Binding kind.
        kind: DeclarationKind,
        /// Declarators in source order.
        declarators: Vec<NodeId>,
    },
    /// `id = init`
    VariableDeclarator {
        /// Bound name or pattern.
        id: NodeId,
        /// Initializer, if any.
        init: Option<NodeId>,
    },
    /// `left = right` in a binding position (defaulted parameter).
    AssignmentPattern {
        /// The binding.
        left: NodeId,
        /// The default value.
        right: NodeId,
    },
    /// `...argument` in a binding position.
    RestElement {
        /// The binding that collects the remaining values.
        argument: NodeId,
    },
    /// `{ a, b }` in a binding position.
    ObjectPattern,
    /// `[a, b]` in a binding position.
    ArrayPattern,
    /// A node the lint rules do not inspect, tagged with its grammar kind.
    Other {
        /// The tree-sitter node kind.
        grammar_kind: &'static str,
    },
}

impl NodeKind {
    /// Returns the fieldless tag used for visitor dispatch.
    #[must_use]
    pub fn tag(&self) -> SyntaxKind {
        match self {
            Self::Program => SyntaxKind::Program,
            Self::CallExpression { .. } => SyntaxKind::CallExpression,
            Self::MemberExpression { .. } => SyntaxKind::MemberExpression,
            Self::Identifier { .. } => SyntaxKind::Identifier,
            Self::NumericLiteral { .. } => SyntaxKind::NumericLiteral,
            Self::StringLiteral { .. } => SyntaxKind::StringLiteral,
            Self::Literal => SyntaxKind::Literal,
            Self::UnaryExpression { .. } => SyntaxKind::UnaryExpression,
            Self::ArrayExpression { .. } => SyntaxKind::ArrayExpression,
            Self::FunctionExpression { .. } => SyntaxKind::FunctionExpression,
            Self::ArrowFunctionExpression { .. } => SyntaxKind::ArrowFunctionExpression,
            Self::FunctionDeclaration { .. } => SyntaxKind::FunctionDeclaration,
            Self::MethodDefinition { .. } => SyntaxKind::MethodDefinition,
            Self::Decorator { .. } => SyntaxKind::Decorator,
            Self::VariableDeclaration { .. } => SyntaxKind::VariableDeclaration,
            Self::VariableDeclarator { .. } => SyntaxKind::VariableDeclarator,
            Self::AssignmentPattern { .. } => SyntaxKind::AssignmentPattern,
            Self::RestElement { .. } => SyntaxKind::RestElement,
            Self::ObjectPattern => SyntaxKind::ObjectPattern,
            Self::ArrayPattern => SyntaxKind::ArrayPattern,
            Self::Other { .. } => SyntaxKind::Other,
        }
    }

    /// Returns true for literal nodes of any kind.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Self::NumericLiteral { .. } | Self::StringLiteral { .. } | Self::Literal
        )
    }
}

/// Fieldless node tag, used as the key when rules register interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum SyntaxKind {
    Program,
    CallExpression,
    MemberExpression,
    Identifier,
    NumericLiteral,
    StringLiteral,
    Literal,
    UnaryExpression,
    ArrayExpression,
    FunctionExpression,
    ArrowFunctionExpression,
    FunctionDeclaration,
    MethodDefinition,
    Decorator,
    VariableDeclaration,
    VariableDeclarator,
    AssignmentPattern,
    RestElement,
    ObjectPattern,
    ArrayPattern,
    Other,
}
