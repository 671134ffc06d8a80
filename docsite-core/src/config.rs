use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::markdown::{DEFAULT_SYNTAX_THEME, RenderOptions};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parsing(#[from] toml::de::Error),
}

/// Site-level settings read from the `[site]` and `[home]` tables.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub home: HomeConfig,
}

impl Config {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&data)?;

        Ok(config)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    pub tagline: Option<String>,
    /// Heading above the sidebar tree.
    pub nav_heading: String,
    /// syntect theme name; empty disables highlighting.
    pub syntax_theme: String,
    pub line_breaks: bool,
    pub gfm: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Engineering 101".into(),
            tagline: Some("Master SOLID Principles and Domain-Driven Design".to_string()),
            nav_heading: "Course Content".into(),
            syntax_theme: DEFAULT_SYNTAX_THEME.to_string(),
            line_breaks: true,
            gfm: true,
        }
    }
}

impl SiteConfig {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            line_breaks: self.line_breaks,
            gfm: self.gfm,
            syntax_theme: (!self.syntax_theme.is_empty()).then(|| self.syntax_theme.clone()),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct HomeConfig {
    pub courses: Vec<Course>,
    pub footer_note: Option<String>,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            courses: vec![
                Course {
                    title: "SOLID Principles".into(),
                    description: "Learn the five fundamental principles of object-oriented design that make code maintainable and extensible.".into(),
                    link: "/docs/1-SOLID-Principles/0-README".into(),
                },
                Course {
                    title: "Domain-Driven Design".into(),
                    description: "Master the art of modeling complex business domains and building software that reflects real-world concepts.".into(),
                    link: "/docs/2-Domain-Driven-Design/0-README".into(),
                },
            ],
            footer_note: Some(
                "Use the sidebar navigation to browse through all available lessons, examples, and exercises.".into(),
            ),
        }
    }
}

/// A card on the home page linking to a course's first lesson.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Course {
    pub title: String,
    pub description: String,
    pub link: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.site.title, "Engineering 101");
        assert_eq!(config.home.courses.len(), 2);

        let options = config.site.render_options();
        assert!(options.line_breaks);
        assert!(options.gfm);
        assert_eq!(options.syntax_theme.as_deref(), Some(DEFAULT_SYNTAX_THEME));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docsite.toml");
        std::fs::write(
            &path,
            "[site]\ntitle = \"Notes\"\nsyntax_theme = \"\"\n\n[[home.courses]]\ntitle = \"Rust\"\ndescription = \"Ownership\"\nlink = \"/docs/rust/intro\"\n",
        )
        .unwrap();

        let config = Config::read(&path).unwrap();
        assert_eq!(config.site.title, "Notes");
        assert_eq!(config.site.nav_heading, "Course Content");
        assert!(config.site.render_options().syntax_theme.is_none());
        assert_eq!(config.home.courses.len(), 1);
        assert_eq!(config.home.courses[0].link, "/docs/rust/intro");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docsite.toml");
        std::fs::write(&path, "[site\ntitle = 1").unwrap();

        assert!(matches!(Config::read(&path), Err(ConfigError::Parsing(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::read(dir.path().join("absent.toml")),
            Err(ConfigError::Io(_))
        ));
    }
}
