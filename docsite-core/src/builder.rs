use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::Config;
use crate::navigation::NavTree;
use crate::renderer::SiteRenderer;
use crate::resolver::ResolveError;
use crate::site::DocSite;
use crate::template::TemplateError;

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),
    #[error("Scanned document failed to resolve: {0}")]
    Resolve(#[from] ResolveError),
    #[error("Unable to prepare output directory {}: {source}", path.display())]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Summary of a finished build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub pages: usize,
    pub output_dir: PathBuf,
}

/// Render the home page and every scanned document into `output_dir`.
///
/// Layout: `index.html` at the root and `docs/<slug>/index.html` per
/// document, mirroring the URLs the server answers.
pub fn build_site(
    config: &Config,
    source_dir: &Path,
    output_dir: &Path,
    theme_dir: &Path,
) -> Result<BuildReport, BuildError> {
    info!(source = %source_dir.display(), output = %output_dir.display(), "building site");

    std::fs::create_dir_all(output_dir).map_err(|source| BuildError::Output {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let site = DocSite::new(source_dir, config.site.render_options());
    let renderer = SiteRenderer::new(config.clone(), Some(theme_dir))?;
    let slugs: Vec<_> = site.slugs().collect();
    let navigation = NavTree::from_slugs(slugs.iter().cloned());

    renderer.write_home(&navigation, &output_dir.join("index.html"))?;

    for slug in &slugs {
        let page = site.page_for_slug(slug)?;
        let out_path = output_dir.join(page.out_path());
        debug!(slug = %slug, out = %out_path.display(), "rendering page");
        renderer.write_doc(&page, &navigation, &out_path)?;
    }

    info!(pages = slugs.len(), "site built");

    Ok(BuildReport {
        pages: slugs.len(),
        output_dir: output_dir.to_path_buf(),
    })
}
