//! HTTP host for a docsite content root.
//!
//! Every request scans the content root and reads the requested file again.
//! Only configuration and compiled templates are shared between requests.

mod error;
mod live_reload;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use axum::extract::{Path, State};
use axum::response::Html;
use axum::routing::get;
use docsite_core::config::Config;
use docsite_core::{DocSite, SiteRenderer};
use tokio::sync::broadcast;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub use error::ServerError;
pub use live_reload::{LIVE_RELOAD_PATH, inject_livereload_script};

/// Configuration for the documentation server
#[derive(Debug, Clone)]
pub struct DocServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to serve on
    pub port: u16,
    /// Content root holding the markdown files
    pub source_dir: PathBuf,
    /// Theme directory; `static/` inside it is served at `/static`
    pub theme_dir: PathBuf,
    /// Auto-open browser
    pub open: bool,
    /// Push a reload to open pages when content changes
    pub live_reload: bool,
    /// Patterns to ignore when watching
    pub ignore: Vec<String>,
    /// Site and home page settings
    pub site: Config,
}

impl Default for DocServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            source_dir: PathBuf::from("./courses"),
            theme_dir: PathBuf::from("./theme"),
            open: false,
            live_reload: true,
            ignore: vec![".git".to_string(), ".tmp".to_string(), ".swp".to_string()],
            site: Config::default(),
        }
    }
}

#[derive(Clone)]
pub(crate) struct AppState {
    site: Arc<DocSite>,
    renderer: Arc<SiteRenderer>,
    reload_tx: Option<broadcast::Sender<String>>,
}

/// Serves rendered documents straight from the content root
pub struct DocServer {
    config: DocServerConfig,
    reload_tx: Option<broadcast::Sender<String>>,
}

impl DocServer {
    pub fn new(config: DocServerConfig) -> Self {
        let reload_tx = config
            .live_reload
            .then(|| broadcast::channel::<String>(100).0);
        Self { config, reload_tx }
    }

    /// Build the application router.
    pub fn router(&self) -> Result<Router, ServerError> {
        let state = AppState {
            site: Arc::new(DocSite::new(
                &self.config.source_dir,
                self.config.site.site.render_options(),
            )),
            renderer: Arc::new(SiteRenderer::new(
                self.config.site.clone(),
                Some(&self.config.theme_dir),
            )?),
            reload_tx: self.reload_tx.clone(),
        };

        let mut app = Router::new()
            .route("/", get(home_handler))
            .route("/docs/{*path}", get(doc_handler));

        if self.reload_tx.is_some() {
            app = app.route(LIVE_RELOAD_PATH, get(live_reload::websocket_handler));
        }

        Ok(app
            .nest_service("/static", ServeDir::new(self.config.theme_dir.join("static")))
            .layer(TraceLayer::new_for_http())
            .with_state(state))
    }

    /// Run the server until it fails
    pub async fn run(self) -> Result<()> {
        let app = self.router()?;

        if let Some(reload_tx) = self.reload_tx.clone() {
            let watch_paths = vec![self.config.source_dir.clone(), self.config.theme_dir.clone()];
            let ignore_patterns = self.config.ignore.clone();

            tokio::spawn(async move {
                if let Err(e) =
                    live_reload::watch_for_changes(watch_paths, reload_tx, ignore_patterns).await
                {
                    error!(error = %e, "file watcher error");
                }
            });
        }

        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port).parse()?;

        info!("Serving at http://{}", addr);
        info!(root = %self.config.source_dir.display(), "content root");
        if self.reload_tx.is_some() {
            info!("Live reload enabled at ws://{}{}", addr, LIVE_RELOAD_PATH);
        }

        if self.config.open {
            if let Err(e) = open::that(format!("http://{}", addr)) {
                error!(error = %e, "failed to open browser");
            }
        }

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

async fn home_handler(State(state): State<AppState>) -> Result<Html<String>, ServerError> {
    let html = {
        let state = state.clone();
        tokio::task::spawn_blocking(move || {
            let navigation = state.site.navigation();
            state.renderer.render_home(&navigation)
        })
        .await??
    };

    Ok(Html(finish_page(&state, html)))
}

async fn doc_handler(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Html<String>, ServerError> {
    let html = {
        let state = state.clone();
        tokio::task::spawn_blocking(move || -> Result<String, ServerError> {
            let segments: Vec<&str> = path.trim_end_matches('/').split('/').collect();
            let page = state.site.page(&segments)?;
            let navigation = state.site.navigation();
            Ok(state.renderer.render_doc(&page, &navigation)?)
        })
        .await??
    };

    Ok(Html(finish_page(&state, html)))
}

fn finish_page(state: &AppState, html: String) -> String {
    if state.reload_tx.is_some() {
        inject_livereload_script(&html)
    } else {
        html
    }
}
