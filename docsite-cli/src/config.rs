use anyhow::Result;
use clap::ArgMatches;
use clap::parser::ValueSource;
use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = "./docsite.toml";

/// Complete configuration that merges CLI args, env vars, config files, and defaults
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DocsiteConfig {
    /// Build and serve settings
    #[serde(default)]
    pub build: BuildConfig,
    /// Site configuration (from docsite-core)
    #[serde(flatten)]
    pub site: docsite_core::config::Config,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Content root containing markdown files
    pub source: String,
    /// Output directory for generated site
    pub output: String,
    /// Theme directory
    pub theme: String,
    /// Configuration file path
    pub config: String,
    /// Host for the server
    pub host: String,
    /// Port for the server
    pub port: u16,
    /// Open browser automatically
    pub open: bool,
    /// Reload open pages when content changes
    pub reload: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source: "./courses".to_string(),
            output: "./out".to_string(),
            theme: "./theme".to_string(),
            config: DEFAULT_CONFIG_FILE.to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            open: false,
            reload: true,
        }
    }
}

impl DocsiteConfig {
    /// Load configuration with cascading precedence:
    /// 1. CLI arguments (highest priority)
    /// 2. Environment variables (DOCSITE_*)
    /// 3. Configuration file
    /// 4. Defaults (lowest priority)
    pub fn load(args: &ArgMatches) -> Result<Self> {
        let config_file = cli_string(args, "config")
            .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());

        let mut builder = ConfigBuilder::builder()
            .add_source(ConfigBuilder::try_from(&Self::default())?)
            .add_source(File::from(PathBuf::from(&config_file)).required(false))
            .add_source(
                Environment::with_prefix("DOCSITE")
                    .prefix_separator("_")
                    .separator("__") // Use double underscore for nested keys
                    .try_parsing(true),
            );

        // Only values the user actually typed override the layers below
        for key in ["source", "output", "theme"] {
            if let Some(value) = cli_string(args, key) {
                builder = builder.set_override(format!("build.{key}"), value)?;
            }
        }
        builder = builder.set_override("build.config", config_file)?;

        if let Some(host) = cli_string(args, "host") {
            builder = builder.set_override("build.host", host)?;
        }
        if let Some(port) = cli_value::<u16>(args, "port") {
            builder = builder.set_override("build.port", i64::from(port))?;
        }
        if cli_flag(args, "open") {
            builder = builder.set_override("build.open", true)?;
        }
        if cli_flag(args, "no-reload") {
            builder = builder.set_override("build.reload", false)?;
        }

        let config: DocsiteConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    pub fn source_dir(&self) -> PathBuf {
        PathBuf::from(&self.build.source)
    }

    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.build.output)
    }

    pub fn theme_dir(&self) -> PathBuf {
        PathBuf::from(&self.build.theme)
    }
}

fn typed_on_command_line(args: &ArgMatches, id: &str) -> bool {
    matches!(
        args.try_get_raw(id)
            .ok()
            .flatten()
            .and_then(|_| args.value_source(id)),
        Some(ValueSource::CommandLine)
    )
}

fn cli_string(args: &ArgMatches, id: &str) -> Option<String> {
    cli_value::<String>(args, id)
}

fn cli_value<T: Clone + Send + Sync + 'static>(args: &ArgMatches, id: &str) -> Option<T> {
    if !typed_on_command_line(args, id) {
        return None;
    }
    args.try_get_one::<T>(id).ok().flatten().cloned()
}

fn cli_flag(args: &ArgMatches, id: &str) -> bool {
    typed_on_command_line(args, id) && args.try_get_one::<bool>(id).ok().flatten() == Some(&true)
}
