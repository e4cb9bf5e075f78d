//! System tray icon and menu.
//!
//! Builds the tray menu (Minimize, Play/Pause, Next, Previous, Like, Exit) and provides the app
//! logo for the tray icon. Menu event handling lives in `tray_actions`. Playback items use the
//! command identifier as their menu id.

use tauri::menu::{Menu, MenuItem, PredefinedMenuItem};

use crate::command::PlayerCommand;

/// Tray icon: app logo at 32x32 (icons/32x32.png).
pub const TRAY_ICON_PNG: &[u8] = include_bytes!("../icons/32x32.png");

pub const TRAY_TOOLTIP: &str = "Headset";

pub const TOGGLE_WINDOWS_ID: &str = "toggle_windows";
pub const QUIT_ID: &str = "quit";

fn command_label(command: PlayerCommand) -> &'static str {
    match command {
        PlayerCommand::PlayPause => "Play/Pause",
        PlayerCommand::PlayNext => "Next",
        PlayerCommand::PlayPrevious => "Previous",
        PlayerCommand::Like => "Like",
    }
}

fn command_item<R: tauri::Runtime>(
    app: &impl tauri::Manager<R>,
    command: PlayerCommand,
) -> Result<MenuItem<R>, tauri::Error> {
    MenuItem::with_id(
        app,
        command.as_str(),
        command_label(command),
        true,
        None::<&str>,
    )
}

pub fn build_tray_menu<R: tauri::Runtime>(
    app: &impl tauri::Manager<R>,
) -> Result<Menu<R>, tauri::Error> {
    let minimize = MenuItem::with_id(app, TOGGLE_WINDOWS_ID, "Minimize", true, None::<&str>)?;
    let sep1 = PredefinedMenuItem::separator(app)?;
    let play_pause = command_item(app, PlayerCommand::PlayPause)?;
    let next = command_item(app, PlayerCommand::PlayNext)?;
    let previous = command_item(app, PlayerCommand::PlayPrevious)?;
    let sep2 = PredefinedMenuItem::separator(app)?;
    let like = command_item(app, PlayerCommand::Like)?;
    let sep3 = PredefinedMenuItem::separator(app)?;
    let quit = MenuItem::with_id(app, QUIT_ID, "Exit", true, None::<&str>)?;
    Menu::with_items(
        app,
        &[
            &minimize, &sep1, &play_pause, &next, &previous, &sep2, &like, &sep3, &quit,
        ],
    )
}
