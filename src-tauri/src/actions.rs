//! High-level execution of playback commands.
//!
//! Invoked by the tray menu and the Unix action socket. Looks up the main window and the
//! bridge settings, then hands the command to `route_command` on the async runtime, which picks
//! the delivery form. With `require_ack` set, the page's acknowledgement is awaited and logged.
//!
//! A command requested on the command line before the app was running waits in `StartAction`
//! until the page reports it has loaded.

use std::sync::Mutex;

use tauri::{Manager, State};
use tracing::{debug, info, warn};

use crate::bridge::{self, Ack, AckRegistry, BridgeError, ContentTarget, DeliveryMode};
use crate::command::PlayerCommand;
use crate::config::BridgeSettings;
use crate::windows;

/// Sends `command` to the main window. Called from tray and action socket.
pub fn execute_command<R: tauri::Runtime>(
    app: &tauri::AppHandle<R>,
    command: PlayerCommand,
    source: &'static str,
) {
    info!(source, command = %command, "Executing command");

    let Some(settings) = app
        .try_state::<BridgeSettings>()
        .map(|state| state.inner().clone())
    else {
        warn!(source, "BridgeSettings state not found");
        return;
    };
    let Some(win) = app.get_webview_window(windows::MAIN_WINDOW_LABEL) else {
        warn!(source, command = %command, "Main window not found, command dropped");
        return;
    };

    let registry = app
        .try_state::<AckRegistry>()
        .map(|state| state.inner().clone())
        .unwrap_or_default();

    tauri::async_runtime::spawn(async move {
        match route_command(&win, &settings, &registry, command).await {
            Ok(None) => {}
            Ok(Some(Ack::Handled)) => debug!(source, command = %command, "Command handled"),
            Ok(Some(Ack::Unhandled)) => {
                warn!(source, command = %command, "Page has no listener for command")
            }
            Err(e) => warn!(source, command = %command, error = %e, "Command not acknowledged"),
        }
    });
}

/// Delivers `command` to `target` according to the delivery mode. Returns the page's answer
/// when an acknowledgement was requested, `None` for fire-and-forget delivery.
pub async fn route_command<T: ContentTarget + ?Sized>(
    target: &T,
    settings: &BridgeSettings,
    registry: &AckRegistry,
    command: PlayerCommand,
) -> Result<Option<Ack>, BridgeError> {
    match settings.delivery {
        DeliveryMode::Script => {
            if settings.require_ack {
                warn!(command = %command, "Acknowledgement requested but script delivery has no reply path");
            }
            bridge::dispatch::dispatch_on(target, &settings.event_bus_global, command.as_str());
            Ok(None)
        }
        DeliveryMode::Message if settings.ack_applies() => {
            bridge::dispatch_with_ack(target, registry, command.as_str(), settings.ack_timeout)
                .await
                .map(Some)
        }
        DeliveryMode::Message => {
            bridge::dispatch_message(target, command.as_str());
            Ok(None)
        }
    }
}

/// Command passed at launch, held until the page is ready to receive it.
#[derive(Debug, Default)]
pub struct StartAction(Mutex<Option<PlayerCommand>>);

impl StartAction {
    pub fn new(command: Option<PlayerCommand>) -> Self {
        Self(Mutex::new(command))
    }

    pub fn take(&self) -> Option<PlayerCommand> {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).take()
    }
}

/// Invoked by the page bootstrap once the main page has loaded.
#[tauri::command]
pub fn bridge_ready(app: tauri::AppHandle, start_action: State<'_, StartAction>) {
    debug!("Player page ready");
    if let Some(command) = start_action.take() {
        execute_command(&app, command, "startup");
    }
}
