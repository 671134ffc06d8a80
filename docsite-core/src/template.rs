use std::path::Path;

use serde::Serialize;
use tera::{Context, Tera};
use tracing::debug;

/// Templates compiled into the binary. A theme directory can replace any
/// of them by providing a file with the same name.
const BUILTIN_TEMPLATES: [(&str, &str); 4] = [
    ("nav.html", include_str!("theme/nav.html")),
    ("layout.html", include_str!("theme/layout.html")),
    ("doc.html", include_str!("theme/doc.html")),
    ("home.html", include_str!("theme/home.html")),
];

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Template error: {0}")]
    Tera(#[from] tera::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct TemplateRenderer {
    tera: Tera,
    globals: Context,
}

impl TemplateRenderer {
    /// Load theme overrides from `theme_dir` (if it exists) on top of the
    /// built-in templates.
    pub fn new(theme_dir: Option<&Path>) -> Result<Self, TemplateError> {
        let mut tera = match theme_dir.filter(|dir| dir.is_dir()) {
            Some(dir) => {
                debug!(theme = %dir.display(), "loading theme templates");
                Tera::new(&format!("{}/**/*.html", dir.display()))?
            }
            None => Tera::default(),
        };

        let mut builtin = Tera::default();
        builtin.add_raw_templates(BUILTIN_TEMPLATES)?;
        tera.extend(&builtin)?;

        Ok(Self {
            tera,
            globals: Context::new(),
        })
    }

    /// Add a value every render sees.
    pub fn set_global<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        self.globals.insert(key, value);
    }

    /// Render a template with page-specific values layered over the globals.
    pub fn render(&self, template: &str, context: &Context) -> Result<String, TemplateError> {
        let mut merged = self.globals.clone();
        merged.extend(context.clone());
        Ok(self.tera.render(template, &merged)?)
    }

    /// Render a template and write it, creating parent directories.
    pub fn render_to_file(
        &self,
        template: &str,
        context: &Context,
        output_path: &Path,
    ) -> Result<(), TemplateError> {
        let rendered = self.render(template, context)?;

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(output_path, rendered)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_templates_load_without_theme() {
        let renderer = TemplateRenderer::new(None).unwrap();
        let names: Vec<_> = renderer.tera.get_template_names().collect();

        for (name, _) in BUILTIN_TEMPLATES {
            assert!(names.contains(&name), "missing {name}");
        }
    }

    #[test]
    fn test_theme_overrides_builtin() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("doc.html"), "custom {{ title }}").unwrap();

        let renderer = TemplateRenderer::new(Some(dir.path())).unwrap();
        let mut context = Context::new();
        context.insert("title", "Page");

        assert_eq!(renderer.render("doc.html", &context).unwrap(), "custom Page");
    }

    #[test]
    fn test_missing_theme_dir_uses_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = TemplateRenderer::new(Some(&dir.path().join("nope"))).unwrap();

        assert!(renderer.tera.get_template_names().any(|name| name == "layout.html"));
    }

    #[test]
    fn test_globals_and_page_values_merge() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("probe.html"), "{{ site }}:{{ page }}").unwrap();

        let mut renderer = TemplateRenderer::new(Some(dir.path())).unwrap();
        renderer.set_global("site", "docs");
        let mut context = Context::new();
        context.insert("page", "intro");

        let out = dir.path().join("out/probe/index.html");
        renderer.render_to_file("probe.html", &context, &out).unwrap();
        assert_eq!(std::fs::read_to_string(out).unwrap(), "docs:intro");
    }
}
