use std::path::Path;

use tera::Context;

use crate::config::Config;
use crate::navigation::NavTree;
use crate::site::Page;
use crate::template::{TemplateError, TemplateRenderer};

/// Wraps rendered documents in the page shell: sidebar, header and layout.
pub struct SiteRenderer {
    templates: TemplateRenderer,
    config: Config,
}

impl SiteRenderer {
    pub fn new(config: Config, theme_dir: Option<&Path>) -> Result<Self, TemplateError> {
        let mut templates = TemplateRenderer::new(theme_dir)?;
        templates.set_global("site", &config.site);

        Ok(Self { templates, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn render_home(&self, navigation: &NavTree) -> Result<String, TemplateError> {
        let context = self.home_context(navigation);
        self.templates.render("home.html", &context)
    }

    pub fn render_doc(&self, page: &Page, navigation: &NavTree) -> Result<String, TemplateError> {
        let context = self.doc_context(page, navigation);
        self.templates.render("doc.html", &context)
    }

    pub fn write_home(
        &self,
        navigation: &NavTree,
        output_path: &Path,
    ) -> Result<(), TemplateError> {
        let context = self.home_context(navigation);
        self.templates.render_to_file("home.html", &context, output_path)
    }

    pub fn write_doc(
        &self,
        page: &Page,
        navigation: &NavTree,
        output_path: &Path,
    ) -> Result<(), TemplateError> {
        let context = self.doc_context(page, navigation);
        self.templates.render_to_file("doc.html", &context, output_path)
    }

    fn home_context(&self, navigation: &NavTree) -> Context {
        let mut context = Context::new();
        context.insert("navigation", &navigation.items());
        context.insert("current", "/");
        context.insert("home", &self.config.home);
        context
    }

    fn doc_context(&self, page: &Page, navigation: &NavTree) -> Context {
        let mut context = Context::new();
        context.insert("navigation", &navigation.items());
        context.insert("current", &page.url());
        context.insert("title", &page.title);
        context.insert("content", &page.html);
        context
    }
}
