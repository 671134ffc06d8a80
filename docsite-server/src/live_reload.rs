use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use notify_debouncer_mini::{DebounceEventResult, new_debouncer};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::AppState;

pub const LIVE_RELOAD_PATH: &str = "/__livereload";

const RELOAD_MESSAGE: &str = "reload";

pub(crate) async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let reload_tx = state.reload_tx.clone();
    ws.on_upgrade(move |socket| async move {
        if let Some(reload_tx) = reload_tx {
            websocket_connection(socket, reload_tx).await;
        }
    })
}

async fn websocket_connection(mut socket: WebSocket, reload_tx: broadcast::Sender<String>) {
    let mut reloads = reload_tx.subscribe();
    debug!("live reload client connected");

    loop {
        tokio::select! {
            signal = reloads.recv() => match signal {
                Ok(message) => {
                    if socket.send(Message::Text(message.into())).await.is_err() {
                        break;
                    }
                }
                // A slow client only needs the next reload, not the ones it missed
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(skipped, "live reload client lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }

    debug!("live reload client disconnected");
}

/// Watch content and theme directories, broadcasting a reload on change.
///
/// Pages are rendered per request, so a browser refresh is all a change
/// needs.
pub(crate) async fn watch_for_changes(
    watch_paths: Vec<PathBuf>,
    reload_tx: broadcast::Sender<String>,
    ignore_patterns: Vec<String>,
) -> Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::channel(100);

    let mut debouncer = new_debouncer(
        Duration::from_millis(500),
        move |res: DebounceEventResult| {
            if let Ok(events) = res {
                for event in events {
                    if !is_ignored(&event.path, &ignore_patterns) {
                        let _ = tx.blocking_send(event.path);
                    }
                }
            }
        },
    )?;

    for path in &watch_paths {
        if !path.exists() {
            warn!(path = %path.display(), "not watching missing path");
            continue;
        }
        debouncer
            .watcher()
            .watch(path, notify::RecursiveMode::Recursive)?;
        info!(path = %path.display(), "watching for changes");
    }

    // Coalesce bursts of saves into one reload
    let mut last_reload: Option<Instant> = None;
    while let Some(path) = rx.recv().await {
        debug!(path = %path.display(), "file changed");

        let now = Instant::now();
        if last_reload.is_none_or(|last| now.duration_since(last) > Duration::from_millis(1000)) {
            let _ = reload_tx.send(RELOAD_MESSAGE.to_string());
            last_reload = Some(now);
            debug!("sent reload signal");
        } else {
            debug!("skipping reload (too soon)");
        }
    }

    Ok(())
}

/// A pattern matches a whole path component (`.git`) or the end of the
/// file name (`.swp`).
fn is_ignored(path: &Path, ignore_patterns: &[String]) -> bool {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();

    ignore_patterns.iter().any(|pattern| {
        file_name.ends_with(pattern.as_str())
            || path
                .components()
                .any(|component| component.as_os_str() == pattern.as_str())
    })
}

/// Inject the live reload client before `</body>`, or append it.
pub fn inject_livereload_script(html: &str) -> String {
    let script = format!(
        r#"
<script>
(function() {{
    const scheme = location.protocol === 'https:' ? 'wss://' : 'ws://';
    const socket = new WebSocket(scheme + location.host + '{LIVE_RELOAD_PATH}');
    socket.onmessage = function(event) {{
        if (event.data === '{RELOAD_MESSAGE}') {{
            location.reload();
        }}
    }};
    socket.onclose = function() {{
        console.log('Live reload disconnected');
    }};
}})();
</script>
"#
    );

    if let Some(pos) = html.rfind("</body>") {
        let mut result = String::with_capacity(html.len() + script.len());
        result.push_str(&html[..pos]);
        result.push_str(&script);
        result.push_str(&html[pos..]);
        result
    } else {
        format!("{html}{script}")
    }
}
