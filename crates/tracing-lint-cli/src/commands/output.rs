//! Output formatting for lint results.

use anyhow::Result;
use miette::{NamedSource, Report};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing_lint_core::{LintResult, Severity, Violation, ViolationDiagnostic};

use crate::OutputFormat;

/// Prints lint results in the specified format.
///
/// `base` is the directory violation paths are relative to; the pretty
/// format reads source snippets from it.
pub fn print(result: &LintResult, format: OutputFormat, base: &Path) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
        OutputFormat::Pretty => print_pretty(result, base),
    }
    Ok(())
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[31merror\x1b[0m",
        Severity::Warning => "\x1b[33mwarning\x1b[0m",
        Severity::Info => "\x1b[34minfo\x1b[0m",
    }
}

fn print_text(result: &LintResult) {
    for violation in &result.violations {
        println!(
            "{} {} at {}:{}:{}",
            violation.code,
            violation.rule,
            violation.location.file.display(),
            violation.location.line,
            violation.location.column,
        );
        println!("  {}: {}", severity_label(violation.severity), violation.message);
        if let Some(suggestion) = &violation.suggestion {
            println!("  = help: {}", suggestion.message);
        }
        if let Some(doc) = &violation.doc_ref {
            println!("  = see: {doc}");
        }
        println!();
    }
    print_summary(result);
}

fn print_summary(result: &LintResult) {
    let (errors, warnings, infos) = result.count_by_severity();
    let color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };
    println!(
        "{color}Found {errors} error(s), {warnings} warning(s), {infos} info(s) in {} file(s)\x1b[0m",
        result.files_checked
    );
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for violation in &result.violations {
        println!("{violation}");
    }
}

fn print_pretty(result: &LintResult, base: &Path) {
    let mut sources: HashMap<PathBuf, Option<String>> = HashMap::new();
    for violation in &result.violations {
        let file = &violation.location.file;
        let content = sources
            .entry(file.clone())
            .or_insert_with(|| read_source(base, file));
        println!("{}", render(violation, content.as_deref()));
    }
    print_summary(result);
}

fn read_source(base: &Path, file: &Path) -> Option<String> {
    let path = if file.is_absolute() {
        file.to_path_buf()
    } else {
        base.join(file)
    };
    match std::fs::read_to_string(&path) {
        Ok(content) => Some(content),
        Err(e) => {
            tracing::debug!("Cannot read {} for snippet: {}", path.display(), e);
            None
        }
    }
}

/// Renders one violation as a miette report, with a source snippet when the
/// file content is available.
fn render(violation: &Violation, content: Option<&str>) -> String {
    let diagnostic = ViolationDiagnostic::from(violation);
    let report = match content {
        Some(content) => Report::new(diagnostic).with_source_code(NamedSource::new(
            violation.location.file.display().to_string(),
            content.to_string(),
        )),
        None => Report::new(diagnostic),
    };
    format!("{report:?}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_lint_core::{Location, Suggestion};

    fn violation() -> Violation {
        Violation::new(
            "TL001",
            "prefer-explicit-resource-management",
            Severity::Error,
            Location::new(PathBuf::from("src/app.ts"), 1, 1).with_span(0, 11),
            "Use `using` to enter spans",
        )
        .with_suggestion(Suggestion::new("declare the guard with `using`"))
    }

    #[test]
    fn render_includes_message_and_help() {
        let rendered = render(&violation(), Some("const guard = span(\"x\").enter();\n"));
        assert!(rendered.contains("[TL001] Use `using` to enter spans"));
        assert!(rendered.contains("declare the guard with `using`"));
        assert!(rendered.contains("src/app.ts"));
    }

    #[test]
    fn render_without_source() {
        let rendered = render(&violation(), None);
        assert!(rendered.contains("[TL001]"));
    }

    #[test]
    fn read_source_relative_to_base() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join("a.ts"), "let a = 1;").unwrap();
        assert_eq!(
            read_source(tmp.path(), Path::new("a.ts")).as_deref(),
            Some("let a = 1;")
        );
        assert!(read_source(tmp.path(), Path::new("missing.ts")).is_none());
    }
}
