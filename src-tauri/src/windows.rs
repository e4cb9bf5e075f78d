//! Webview URL construction and window lifecycle.
//!
//! Creates the `main` window, which hosts the player page and receives bridge commands, and the
//! small `player` window. Provides the Minimize toggle the tray uses.

use tauri::{Manager, Url, WebviewUrl, WebviewWindow, WebviewWindowBuilder};
use tracing::warn;

use crate::bridge::bootstrap;
use crate::config::BridgeSettings;

pub const MAIN_WINDOW_LABEL: &str = "main";
pub const PLAYER_WINDOW_LABEL: &str = "player";

// --- URL building ---

/// Builds a WebviewUrl for the given HTML file path.
/// In dev mode with a configured dev_url, loads from the dev server; otherwise uses the
/// bundled frontend through the app protocol.
pub fn build_webview_url<R: tauri::Runtime>(
    app: &tauri::AppHandle<R>,
    html_path: &str,
) -> Result<WebviewUrl, String> {
    let config = app.config();
    let dev_url = if tauri::is_dev() {
        config.build.dev_url.as_ref()
    } else {
        None
    };
    webview_url_for(dev_url, html_path)
}

fn webview_url_for(dev_url: Option<&Url>, html_path: &str) -> Result<WebviewUrl, String> {
    match dev_url {
        Some(base) => {
            let url = format!("{}/{}", base.as_str().trim_end_matches('/'), html_path);
            Ok(WebviewUrl::External(
                url.parse().map_err(|e| format!("dev_url parse: {}", e))?,
            ))
        }
        None => Ok(WebviewUrl::App(html_path.into())),
    }
}

// --- Creation ---

/// Creates the main window with the bridge bootstrap installed before page scripts run.
pub fn create_main_window<R: tauri::Runtime>(
    app: &tauri::AppHandle<R>,
    settings: &BridgeSettings,
) -> Result<WebviewWindow<R>, String> {
    if let Some(win) = app.get_webview_window(MAIN_WINDOW_LABEL) {
        return Ok(win);
    }
    let url = build_webview_url(app, "index.html")?;
    WebviewWindowBuilder::new(app, MAIN_WINDOW_LABEL, url)
        .title("Headset")
        .inner_size(1000.0, 700.0)
        .min_inner_size(640.0, 480.0)
        .initialization_script(bootstrap::init_script(&settings.event_bus_global))
        .build()
        .map_err(|e| e.to_string())
}

pub fn create_player_window<R: tauri::Runtime>(
    app: &tauri::AppHandle<R>,
) -> Result<WebviewWindow<R>, String> {
    if let Some(win) = app.get_webview_window(PLAYER_WINDOW_LABEL) {
        return Ok(win);
    }
    let url = build_webview_url(app, "player.html")?;
    WebviewWindowBuilder::new(app, PLAYER_WINDOW_LABEL, url)
        .title("Headset Player")
        .inner_size(385.0, 200.0)
        .resizable(false)
        .build()
        .map_err(|e| e.to_string())
}

// --- Visibility ---

fn toggle_window<R: tauri::Runtime>(win: &WebviewWindow<R>) {
    let result = if win.is_visible().unwrap_or(false) {
        win.hide()
    } else {
        win.show().and_then(|_| win.set_focus())
    };
    if let Err(e) = result {
        warn!(window = win.label(), error = %e, "Failed to toggle window visibility");
    }
}

/// Flips visibility of the main and player windows independently.
pub fn toggle_windows<R: tauri::Runtime>(app: &tauri::AppHandle<R>) {
    for label in [MAIN_WINDOW_LABEL, PLAYER_WINDOW_LABEL] {
        if let Some(win) = app.get_webview_window(label) {
            toggle_window(&win);
        }
    }
}
