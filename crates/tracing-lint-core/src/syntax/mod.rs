//! Syntax trees for JavaScript and TypeScript sources.
//!
//! [`parse`] turns source text into an immutable [`SyntaxTree`]. Rules only
//! ever see the lowered tree, never the underlying Tree-sitter nodes.

mod kind;
mod parse;
mod tree;

pub use kind::{DeclarationKind, NodeKind, SyntaxKind, UnaryOperator};
pub use parse::{parse, ParseError, SourceLanguage};
pub use tree::{Node, NodeId, Preorder, Span, SyntaxTree};
