//! Command dispatch into a content context.
//!
//! `dispatch` and `dispatch_message` are fire-and-forget: they submit and return, log any
//! submission failure, and never report it to the caller. `dispatch_with_ack` is the variant that
//! waits, bounded by a timeout, for the page to confirm it re-emitted the event.

use std::time::Duration;

use tracing::{debug, warn};

use super::ack::{Ack, AckRegistry};
use super::message::BridgeMessage;
use super::script;
use super::{BridgeError, ContentTarget};

/// How commands reach the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryMode {
    /// Structured message over the event channel.
    #[default]
    Message,
    /// Injected `<global>.emit('<command>')` statement.
    Script,
}

impl DeliveryMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "message" => Some(Self::Message),
            "script" => Some(Self::Script),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Script => "script",
        }
    }
}

/// Injects `electronConnector.emit('<command>')` into `target`.
pub fn dispatch<T: ContentTarget + ?Sized>(target: &T, command: &str) {
    dispatch_on(target, script::DEFAULT_EVENT_BUS_GLOBAL, command);
}

/// Injects `<global>.emit('<command>')` into `target`. Identifiers that would break out of the
/// string literal are refused.
pub fn dispatch_on<T: ContentTarget + ?Sized>(target: &T, global: &str, command: &str) {
    debug!(command, target = target.label(), "Executing command via script");
    if let Err(e) = script::check_identifier(command) {
        warn!(command, error = %e, "Refusing to inject command");
        return;
    }
    let statement = script::emit_statement_for(global, command);
    if let Err(e) = target.submit_script(&statement) {
        warn!(command, target = target.label(), error = %e, "Command injection failed");
    }
}

/// Posts `command` to `target` as a structured message.
pub fn dispatch_message<T: ContentTarget + ?Sized>(target: &T, command: &str) {
    debug!(command, target = target.label(), "Executing command via message");
    if command.is_empty() {
        warn!("Refusing to post empty command");
        return;
    }
    if let Err(e) = target.post(&BridgeMessage::command(command)) {
        warn!(command, target = target.label(), error = %e, "Command message failed");
    }
}

/// Posts `command` and waits up to `timeout` for the page to acknowledge it.
pub async fn dispatch_with_ack<T: ContentTarget + ?Sized>(
    target: &T,
    registry: &AckRegistry,
    command: &str,
    timeout: Duration,
) -> Result<Ack, BridgeError> {
    debug!(command, target = target.label(), "Executing command with acknowledgement");
    if command.is_empty() {
        return Err(BridgeError::EmptyIdentifier);
    }

    let (id, rx) = registry.register();
    let message = BridgeMessage::command(command).with_ack(id.clone());
    if let Err(e) = target.post(&message) {
        registry.forget(&id);
        return Err(e);
    }

    match tokio::time::timeout(timeout, rx).await {
        Ok(Ok(handled)) => Ok(Ack::from(handled)),
        Ok(Err(_)) => Err(BridgeError::AckDropped),
        Err(_) => {
            registry.forget(&id);
            Err(BridgeError::AckTimeout {
                command: command.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            })
        }
    }
}
