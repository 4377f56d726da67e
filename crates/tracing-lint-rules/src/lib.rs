//! # tracing-lint-rules
//!
//! Built-in lint rules for code instrumented with a tracing library.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | TL001 | `prefer-explicit-resource-management` | Requires `using` for entered spans |
//! | TL002 | `invalid-skip-attribute` | Validates `skip(...)` against the instrumented parameters |
//!
//! ## Usage
//!
//! ```ignore
//! use tracing_lint_core::Analyzer;
//! use tracing_lint_rules::{InvalidSkipAttribute, PreferExplicitResourceManagement};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .rule(PreferExplicitResourceManagement::new())
//!     .rule(InvalidSkipAttribute::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invalid_skip_attribute;
pub mod params;
pub mod prefer_explicit_resource_management;
mod plugin;
mod presets;

pub use invalid_skip_attribute::InvalidSkipAttribute;
pub use plugin::{rule_by_name, PluginMeta, PLUGIN};
pub use prefer_explicit_resource_management::{PreferExplicitResourceManagement, SPAN_FACTORIES};
pub use presets::{all_rules, recommended_rules, Preset};

/// Re-export core types for convenience.
pub use tracing_lint_core::{Rule, Severity, Violation};
