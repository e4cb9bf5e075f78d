mod action_socket;
mod actions;
pub mod bridge;
pub mod command;
pub mod config;
mod tray;
mod tray_actions;
mod windows;

use tauri::Manager;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

pub use action_socket::{send_action_to_running_instance, START_ACTION_ENV};

fn init_tracing(settings: &config::BridgeSettings) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.log_level.as_filter())),
        )
        .init();
}

/// Command handed over by `main` when no running instance took it.
fn start_action_from_env() -> Option<command::PlayerCommand> {
    let raw = std::env::var(START_ACTION_ENV).ok()?;
    let parsed = command::PlayerCommand::parse(&raw);
    if parsed.is_none() {
        warn!(action = %raw, "Ignoring unknown start action");
    }
    parsed
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let settings = config::load_settings();
    init_tracing(&settings);
    info!(
        delivery = settings.delivery.as_str(),
        require_ack = settings.require_ack,
        "Starting Headset"
    );

    let start_action = actions::StartAction::new(start_action_from_env());

    if let Err(e) = tauri::Builder::default()
        .plugin(tauri_plugin_window_state::Builder::default().build())
        .manage(settings)
        .manage(bridge::AckRegistry::new())
        .manage(start_action)
        .invoke_handler(tauri::generate_handler![
            bridge::ack::bridge_ack,
            actions::bridge_ready
        ])
        .setup(|app| {
            let handle = app.handle().clone();
            let settings = app.state::<config::BridgeSettings>().inner().clone();

            windows::create_main_window(&handle, &settings)?;
            windows::create_player_window(&handle)?;

            let menu = tray::build_tray_menu(app)?;
            let mut tray_builder = tauri::tray::TrayIconBuilder::with_id("main")
                .tooltip(tray::TRAY_TOOLTIP)
                .menu(&menu)
                .on_menu_event(|app, event| tray_actions::handle_tray_menu_event(app, event));
            match tauri::image::Image::from_bytes(tray::TRAY_ICON_PNG) {
                Ok(icon) => tray_builder = tray_builder.icon(icon),
                Err(e) => warn!(error = %e, "Failed to load tray icon"),
            }
            tray_builder.build(app)?;

            action_socket::start_action_socket_listener(handle);
            Ok(())
        })
        .run(tauri::generate_context!())
    {
        error!(error = %e, "Error while running Tauri application");
        std::process::exit(1);
    }
}
