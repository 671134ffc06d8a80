use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

/// URL prefix every document is served under.
pub const DOCS_PREFIX: &str = "/docs";

/// Ordered path segments identifying a document, relative to the content
/// root and without the `.md` extension.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Slug(Vec<String>);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlugError {
    #[error("slug has no segments")]
    Empty,
    #[error("invalid slug segment: {0:?}")]
    InvalidSegment(String),
}

impl Slug {
    pub fn new<I, S>(segments: I) -> Result<Self, SlugError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(SlugError::Empty);
        }

        for segment in &segments {
            if !is_valid_segment(segment) {
                return Err(SlugError::InvalidSegment(segment.clone()));
            }
        }

        Ok(Self(segments))
    }

    /// Parse the tail of a request path such as `a/b` or `/a/b/`.
    pub fn parse(path: &str) -> Result<Self, SlugError> {
        Self::new(path.trim_matches('/').split('/'))
    }

    /// Derive a slug from a markdown file path relative to the content root.
    ///
    /// Returns `None` for non-markdown files and for paths that are not
    /// plain UTF-8 relative paths.
    pub fn from_relative_path(path: &Path) -> Option<Self> {
        if path.extension().is_none_or(|ext| ext != "md") {
            return None;
        }

        let mut segments = Vec::new();
        for component in path.with_extension("").components() {
            match component {
                Component::Normal(part) => segments.push(part.to_str()?.to_string()),
                _ => return None,
            }
        }

        Self::new(segments).ok()
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Final segment, used as the fallback title.
    pub fn name(&self) -> &str {
        // Construction guarantees at least one segment.
        self.0.last().map(String::as_str).unwrap_or_default()
    }

    /// Markdown file this slug maps to, relative to the content root.
    pub fn file_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        for (i, segment) in self.0.iter().enumerate() {
            if i + 1 == self.0.len() {
                path.push(format!("{segment}.md"));
            } else {
                path.push(segment);
            }
        }
        path
    }

    pub fn href(&self) -> String {
        format!("{}/{}", DOCS_PREFIX, self)
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\', '\0'])
}
