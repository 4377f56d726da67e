//! Context types for rule execution.

use std::path::{Path, PathBuf};

use crate::syntax::SourceLanguage;

/// The file a syntax tree was parsed from.
///
/// Used when turning rule diagnostics into located violations.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Absolute path to the file.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Path relative to the project root.
    pub relative_path: PathBuf,
    /// Grammar the file was parsed with.
    pub language: SourceLanguage,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path, language: SourceLanguage) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            content,
            relative_path,
            language,
        }
    }

    /// Creates a context for in-memory source with no project root.
    #[must_use]
    pub fn for_source(path: &'a Path, content: &'a str) -> Self {
        let language = SourceLanguage::from_path(path).unwrap_or(SourceLanguage::TypeScript);
        Self {
            path,
            content,
            relative_path: path.to_path_buf(),
            language,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_to_root() {
        let ctx = FileContext::new(
            Path::new("/project/src/app.ts"),
            "",
            Path::new("/project"),
            SourceLanguage::TypeScript,
        );
        assert_eq!(ctx.relative_path, PathBuf::from("src/app.ts"));
    }

    #[test]
    fn outside_root_keeps_path() {
        let ctx = FileContext::new(
            Path::new("/elsewhere/app.ts"),
            "",
            Path::new("/project"),
            SourceLanguage::TypeScript,
        );
        assert_eq!(ctx.relative_path, PathBuf::from("/elsewhere/app.ts"));
    }

    #[test]
    fn for_source_picks_language() {
        let ctx = FileContext::for_source(Path::new("view.tsx"), "");
        assert_eq!(ctx.language, SourceLanguage::Tsx);
        let ctx = FileContext::for_source(Path::new("snippet"), "");
        assert_eq!(ctx.language, SourceLanguage::TypeScript);
    }
}
