use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::frontmatter;
use crate::slug::{Slug, SlugError};

/// A markdown document loaded from the content root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub slug: Slug,
    pub title: String,
    /// Markdown with the frontmatter block removed.
    pub body: String,
}

/// Both variants surface to clients as "not found".
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("document not found: {0}")]
    NotFound(String),
    #[error("invalid document path: {0}")]
    InvalidSlug(#[from] SlugError),
}

/// Maps request segments to markdown files under a content root.
pub struct RouteResolver {
    source_dir: PathBuf,
}

impl RouteResolver {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            source_dir: path.as_ref().to_path_buf(),
        }
    }

    /// Resolve raw request segments, validating them first.
    pub fn resolve<S: AsRef<str>>(&self, segments: &[S]) -> Result<Document, ResolveError> {
        let slug = Slug::new(segments.iter().map(|s| s.as_ref().to_string()))?;
        self.resolve_slug(&slug)
    }

    pub fn resolve_slug(&self, slug: &Slug) -> Result<Document, ResolveError> {
        let path = self.source_dir.join(slug.file_path());

        // Invalid UTF-8 is replaced rather than rejected, so every scanned file resolves
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                if err.kind() == ErrorKind::NotFound {
                    debug!(path = %path.display(), "no document at path");
                } else {
                    warn!(path = %path.display(), error = %err, "unable to read document");
                }
                return Err(ResolveError::NotFound(slug.to_string()));
            }
        };

        let content = String::from_utf8_lossy(&bytes);
        let parsed = frontmatter::parse(&content);
        let title = parsed.title.unwrap_or_else(|| slug.name().to_string());

        Ok(Document {
            slug: slug.clone(),
            title,
            body: parsed.body.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn content_root() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("a/b.md"), "---\ntitle: Hello\n---\n# Hi").unwrap();
        fs::write(dir.path().join("plain.md"), "# Plain\n\ntext").unwrap();
        dir
    }

    #[test]
    fn test_resolve_with_frontmatter_title() {
        let dir = content_root();
        let doc = RouteResolver::new(dir.path()).resolve(&["a", "b"]).unwrap();

        assert_eq!(doc.title, "Hello");
        assert_eq!(doc.body, "# Hi");
        assert_eq!(doc.slug.to_string(), "a/b");
    }

    #[test]
    fn test_resolve_falls_back_to_last_segment() {
        let dir = content_root();
        let doc = RouteResolver::new(dir.path()).resolve(&["plain"]).unwrap();

        assert_eq!(doc.title, "plain");
        assert_eq!(doc.body, "# Plain\n\ntext");
    }

    #[test]
    fn test_non_utf8_document_still_resolves() {
        let dir = content_root();
        fs::write(dir.path().join("latin1.md"), b"# Caf\xe9\n").unwrap();

        let doc = RouteResolver::new(dir.path()).resolve(&["latin1"]).unwrap();

        assert_eq!(doc.title, "latin1");
        assert_eq!(doc.body, "# Caf\u{FFFD}\n");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = content_root();
        let err = RouteResolver::new(dir.path())
            .resolve(&["a", "missing"])
            .unwrap_err();

        assert!(matches!(err, ResolveError::NotFound(ref slug) if slug == "a/missing"));
    }

    #[test]
    fn test_directory_is_not_a_document() {
        let dir = content_root();
        fs::create_dir(dir.path().join("folder.md")).unwrap();

        let err = RouteResolver::new(dir.path()).resolve(&["folder"]).unwrap_err();
        assert!(matches!(err, ResolveError::NotFound(_)));
    }

    #[test]
    fn test_traversal_is_rejected() {
        let dir = content_root();
        fs::write(dir.path().join("secret.md"), "outside").unwrap();
        let inner = RouteResolver::new(dir.path().join("a"));

        let err = inner.resolve(&["..", "secret"]).unwrap_err();
        assert!(matches!(err, ResolveError::InvalidSlug(_)));
    }

    #[test]
    fn test_empty_segments_are_rejected() {
        let dir = content_root();
        let resolver = RouteResolver::new(dir.path());

        assert!(resolver.resolve::<&str>(&[]).is_err());
        assert!(resolver.resolve(&["a", ""]).is_err());
    }

    #[test]
    fn test_missing_root_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = RouteResolver::new(dir.path().join("nope"));

        assert!(matches!(
            resolver.resolve(&["anything"]),
            Err(ResolveError::NotFound(_))
        ));
    }
}
