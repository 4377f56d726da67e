//! # tracing-lint-core
//!
//! Core framework for linting JavaScript and TypeScript code that uses a
//! tracing/instrumentation library.
//!
//! This crate provides:
//!
//! - [`syntax`]: an immutable arena [`SyntaxTree`](syntax::SyntaxTree) built
//!   from a Tree-sitter parse
//! - [`Rule`] trait with [`Reporter`]-based diagnostics
//! - [`Linter`] for single-pass, kind-dispatched rule execution
//! - [`Analyzer`] for walking a project and collecting [`Violation`]s
//!
//! ## Example
//!
//! ```ignore
//! use tracing_lint_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .rule(MyRule)
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! result.print_report();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod linter;
mod rule;
mod types;

pub mod syntax;

/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig, CONFIG_FILE_NAME};
pub use context::FileContext;
pub use linter::Linter;
pub use rule::{Diagnostic, MessageId, Reporter, Rule, RuleBox, RuleCategory, DOCS_BASE_URL};
pub use types::{LintResult, Location, Severity, Suggestion, Violation, ViolationDiagnostic};
pub use utils::allowance::AllowCheck;
