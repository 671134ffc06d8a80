use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::markdown::{RenderOptions, render_markdown};
use crate::navigation::NavTree;
use crate::resolver::{Document, ResolveError, RouteResolver};
use crate::scanner::SiteScanner;
use crate::slug::Slug;

/// A resolved document with its body rendered to HTML.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub slug: Slug,
    pub title: String,
    pub html: String,
}

impl Page {
    pub fn url(&self) -> String {
        self.slug.href()
    }

    /// Output location relative to the build directory.
    pub fn out_path(&self) -> PathBuf {
        let mut out = PathBuf::from("docs");
        out.extend(self.slug.segments());
        out.join("index.html")
    }
}

/// Read-only view over a content root.
///
/// Holds no document state. Every call re-scans or re-reads the disk, so
/// edits show up on the next request without invalidation.
pub struct DocSite {
    scanner: SiteScanner,
    resolver: RouteResolver,
    render_options: RenderOptions,
}

impl DocSite {
    pub fn new<P: AsRef<Path>>(source_dir: P, render_options: RenderOptions) -> Self {
        Self {
            scanner: SiteScanner::new(&source_dir),
            resolver: RouteResolver::new(&source_dir),
            render_options,
        }
    }

    pub fn source_dir(&self) -> &Path {
        self.scanner.source_dir()
    }

    pub fn slugs(&self) -> impl Iterator<Item = Slug> + '_ {
        self.scanner.slugs()
    }

    pub fn navigation(&self) -> NavTree {
        NavTree::from_slugs(self.scanner.slugs())
    }

    pub fn document<S: AsRef<str>>(&self, segments: &[S]) -> Result<Document, ResolveError> {
        self.resolver.resolve(segments)
    }

    pub fn page<S: AsRef<str>>(&self, segments: &[S]) -> Result<Page, ResolveError> {
        let document = self.resolver.resolve(segments)?;
        Ok(self.render(document))
    }

    pub fn page_for_slug(&self, slug: &Slug) -> Result<Page, ResolveError> {
        let document = self.resolver.resolve_slug(slug)?;
        Ok(self.render(document))
    }

    fn render(&self, document: Document) -> Page {
        Page {
            html: render_markdown(&document.body, &self.render_options),
            slug: document.slug,
            title: document.title,
        }
    }
}
