//! Tray menu action handling.
//!
//! Minimize toggles the main and player windows; playback items go through
//! `actions::execute_command`; Exit quits.

use tauri::menu::MenuEvent;
use tracing::debug;

use crate::actions;
use crate::command::PlayerCommand;
use crate::tray;
use crate::windows;

/// Handles a tray menu click. Call from `tray.on_menu_event` in setup.
pub fn handle_tray_menu_event<R: tauri::Runtime>(app: &tauri::AppHandle<R>, event: MenuEvent) {
    let id = event.id().0.as_str();
    match id {
        tray::TOGGLE_WINDOWS_ID => {
            debug!("Minimizing to tray");
            windows::toggle_windows(app);
        }
        tray::QUIT_ID => {
            app.exit(0);
        }
        other => match PlayerCommand::parse(other) {
            Some(command) => actions::execute_command(app, command, "tray"),
            None => debug!(id = other, "Unhandled tray menu id"),
        },
    }
}
