use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::slug::Slug;

/// Discovers markdown documents under a content root.
pub struct SiteScanner {
    source_dir: PathBuf,
}

impl SiteScanner {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            source_dir: path.as_ref().to_path_buf(),
        }
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Lazily yields one slug per `.md` file, in file-name order.
    ///
    /// A missing or unreadable root yields nothing. Unreadable entries
    /// below it are logged and skipped.
    pub fn slugs(&self) -> impl Iterator<Item = Slug> + '_ {
        debug!(root = %self.source_dir.display(), "scanning content root");

        WalkDir::new(&self.source_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) if err.depth() == 0 => {
                    debug!(
                        root = %self.source_dir.display(),
                        error = %err,
                        "content root unavailable"
                    );
                    None
                }
                Err(err) => {
                    warn!(error = %err, "skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| self.slug_for(&entry))
    }

    /// Eager variant of [`SiteScanner::slugs`].
    pub fn scan(&self) -> Vec<Slug> {
        self.slugs().collect()
    }

    fn slug_for(&self, entry: &DirEntry) -> Option<Slug> {
        if entry.path().extension().is_none_or(|ext| ext != "md") {
            return None;
        }

        let relative_path = entry.path().strip_prefix(&self.source_dir).ok()?;
        let slug = Slug::from_relative_path(relative_path);
        if slug.is_none() {
            warn!(path = %entry.path().display(), "skipping markdown file with unusable name");
        }
        slug
    }
}
