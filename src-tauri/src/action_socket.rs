//! Unix domain socket used for single-instance command dispatch.
//!
//! When a second process is started (e.g. `headset action play-next`), it tries to connect to a
//! running instance via this socket and send the command string instead of starting a new app.
//! The path is chosen in order: `XDG_RUNTIME_DIR`, then `/run/user/{uid}`, then
//! `/tmp/headset-{uid}.sock`. On non-Unix platforms the socket is not used; `main.rs` still calls
//! `send_action_to_running_instance` and falls back to setting `HEADSET_START_ACTION` for the
//! next run.
//!
//! The listener runs in a background thread; each incoming connection sends a single command
//! string which is parsed and executed via the actions module.

#[cfg(unix)]
use std::io::{Read, Write};
#[cfg(unix)]
use std::os::unix::net::{UnixListener, UnixStream};
#[cfg(unix)]
use std::path::PathBuf;
#[cfg(unix)]
use std::time::Duration;

#[cfg(unix)]
use tracing::{debug, warn};

use crate::command::PlayerCommand;

const SOCKET_FILE_NAME: &str = "headset.sock";

/// How long one connection may take to deliver its command before it is dropped.
#[cfg(unix)]
const ACTION_READ_TIMEOUT: Duration = Duration::from_secs(2);

/// Environment variable carrying a command to run once the app has started.
pub const START_ACTION_ENV: &str = "HEADSET_START_ACTION";

#[cfg(unix)]
fn current_uid() -> u32 {
    std::fs::metadata("/proc/self")
        .map(|meta| std::os::unix::fs::MetadataExt::uid(&meta))
        .unwrap_or(0)
}

// --- Path selection (Unix) ---

/// Returns the path where the action socket is bound.
/// Prefers XDG_RUNTIME_DIR, then /run/user/{uid}, then /tmp/headset-{uid}.sock.
#[cfg(unix)]
pub fn action_socket_path() -> PathBuf {
    if let Ok(runtime_dir) = std::env::var("XDG_RUNTIME_DIR") {
        let dir = PathBuf::from(runtime_dir);
        if dir.exists() {
            return dir.join(SOCKET_FILE_NAME);
        }
    }

    let uid = current_uid();
    let run_user = PathBuf::from(format!("/run/user/{uid}"));
    if run_user.exists() {
        return run_user.join(SOCKET_FILE_NAME);
    }

    PathBuf::from(format!("/tmp/headset-{uid}.sock"))
}

#[cfg(not(unix))]
pub fn action_socket_path() -> std::path::PathBuf {
    std::path::PathBuf::from(SOCKET_FILE_NAME)
}

/// Validates a command line action before it is forwarded anywhere.
pub fn parse_action(action: &str) -> Result<PlayerCommand, String> {
    PlayerCommand::parse(action).ok_or_else(|| format!("unknown action: {}", action.trim()))
}

// --- Sending action to running instance (used by main.rs) ---

#[cfg(unix)]
pub fn send_action_to_running_instance(action: &str) -> Result<(), String> {
    let command = parse_action(action)?;
    let uid = current_uid();

    let mut candidates = Vec::new();
    if let Ok(runtime_dir) = std::env::var("XDG_RUNTIME_DIR") {
        candidates.push(PathBuf::from(runtime_dir).join(SOCKET_FILE_NAME));
    }
    candidates.push(PathBuf::from(format!("/run/user/{uid}/{SOCKET_FILE_NAME}")));
    candidates.push(PathBuf::from(format!("/tmp/headset-{uid}.sock")));
    candidates.sort();
    candidates.dedup();

    for path in candidates {
        let mut stream = match UnixStream::connect(&path) {
            Ok(stream) => stream,
            Err(_) => continue,
        };

        stream
            .write_all(command.as_str().as_bytes())
            .map_err(|e| format!("failed to send action to running instance: {e}"))?;
        return Ok(());
    }

    Err("could not connect to a running instance action socket".to_string())
}

#[cfg(not(unix))]
pub fn send_action_to_running_instance(action: &str) -> Result<(), String> {
    parse_action(action)?;
    Err("action bridge is not supported on this platform".to_string())
}

// --- Listener (Unix only): bound in setup, dispatches to actions ---

/// Reads one command from a connection, giving up after `timeout` so a client that never
/// closes cannot stall the accept loop.
#[cfg(unix)]
fn read_action(stream: &mut UnixStream, timeout: Duration) -> std::io::Result<String> {
    stream.set_read_timeout(Some(timeout))?;
    let mut payload = String::new();
    stream.read_to_string(&mut payload)?;
    Ok(payload)
}

#[cfg(unix)]
fn bind_listener(path: &std::path::Path) -> Option<UnixListener> {
    match UnixListener::bind(path) {
        Ok(listener) => Some(listener),
        Err(bind_err) => {
            if !path.exists() {
                warn!(error = %bind_err, path = %path.display(), "Failed to bind action socket");
                return None;
            }
            if UnixStream::connect(path).is_ok() {
                warn!(path = %path.display(), "Action socket already in use by another instance");
                return None;
            }
            // Stale socket left by a crashed instance.
            let _ = std::fs::remove_file(path);
            match UnixListener::bind(path) {
                Ok(listener) => Some(listener),
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "Failed to bind action socket after cleanup");
                    None
                }
            }
        }
    }
}

/// Starts a background thread that binds the action socket and executes incoming commands.
/// Called from lib's setup. On Unix only.
pub fn start_action_socket_listener<R: tauri::Runtime>(app: tauri::AppHandle<R>) {
    #[cfg(unix)]
    {
        let path = action_socket_path();
        std::thread::spawn(move || {
            let Some(listener) = bind_listener(&path) else {
                return;
            };
            debug!(path = %path.display(), "Action socket listening");

            for stream_result in listener.incoming() {
                let mut stream = match stream_result {
                    Ok(stream) => stream,
                    Err(e) => {
                        warn!(error = %e, "Action socket accept failed");
                        continue;
                    }
                };

                let payload = match read_action(&mut stream, ACTION_READ_TIMEOUT) {
                    Ok(payload) => payload,
                    Err(e) => {
                        warn!(error = %e, "Action socket read failed");
                        continue;
                    }
                };

                match parse_action(&payload) {
                    Ok(command) => crate::actions::execute_command(&app, command, "socket"),
                    Err(e) => warn!(error = %e, "Unknown action command"),
                }
            }
        });
    }
    #[cfg(not(unix))]
    let _ = app;
}
