//! Native-to-page command bridge.
//!
//! Delivers playback commands from the native side (tray, action socket) into the player page,
//! where an event bus installed by `bootstrap` re-emits them as named events. Two delivery forms
//! exist: the legacy script statement (`script`), kept for pages that only know the global bus,
//! and a structured message over Tauri's event channel (`message`), optionally acknowledged
//! (`ack`). Delivery is best-effort; only the acknowledged path reports failures to its caller.

pub mod ack;
pub mod bootstrap;
pub mod dispatch;
pub mod message;
pub mod script;
#[cfg(test)]
pub(crate) mod testing;

use tauri::{Emitter, EventTarget, Runtime, WebviewWindow};
use thiserror::Error;

pub use ack::{Ack, AckRegistry};
pub use dispatch::{dispatch, dispatch_message, dispatch_with_ack, DeliveryMode};
pub use message::BridgeMessage;

/// Event name the page bootstrap listens on for structured messages.
pub const COMMAND_EVENT: &str = "headset://command";

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("command identifier is empty")]
    EmptyIdentifier,
    #[error("command identifier {0:?} would break out of the script statement")]
    UnsafeIdentifier(String),
    #[error("content context unavailable: {0}")]
    ContextUnavailable(String),
    #[error("no acknowledgement for {command} within {timeout_ms}ms")]
    AckTimeout { command: String, timeout_ms: u64 },
    #[error("acknowledgement channel closed before a reply")]
    AckDropped,
}

impl From<tauri::Error> for BridgeError {
    fn from(e: tauri::Error) -> Self {
        BridgeError::ContextUnavailable(e.to_string())
    }
}

/// A content context that accepts injected statements and structured messages.
///
/// Both operations only submit; execution happens later on the context's own event loop.
pub trait ContentTarget {
    fn label(&self) -> &str;

    /// Submits a script statement for asynchronous execution.
    fn submit_script(&self, script: &str) -> Result<(), BridgeError>;

    /// Posts a structured message to the context's bridge listener.
    fn post(&self, message: &BridgeMessage) -> Result<(), BridgeError>;
}

impl<R: Runtime> ContentTarget for WebviewWindow<R> {
    fn label(&self) -> &str {
        WebviewWindow::label(self)
    }

    fn submit_script(&self, script: &str) -> Result<(), BridgeError> {
        self.eval(script)?;
        Ok(())
    }

    fn post(&self, message: &BridgeMessage) -> Result<(), BridgeError> {
        let target = EventTarget::webview_window(WebviewWindow::label(self));
        self.emit_to(target, COMMAND_EVENT, message)?;
        Ok(())
    }
}
