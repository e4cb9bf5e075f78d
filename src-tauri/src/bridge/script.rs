//! Legacy script-statement payload: `<global>.emit('<command>')`.
//!
//! The identifier is interpolated verbatim into a single-quoted JS string. Nothing here escapes
//! it; `check_identifier` is the gate callers run first.

use super::BridgeError;

/// Global name the page bootstrap binds the event bus to unless configured otherwise.
pub const DEFAULT_EVENT_BUS_GLOBAL: &str = "electronConnector";

/// Statement emitting `command` on the default global bus.
pub fn emit_statement(command: &str) -> String {
    emit_statement_for(DEFAULT_EVENT_BUS_GLOBAL, command)
}

pub fn emit_statement_for(global: &str, command: &str) -> String {
    format!("{global}.emit('{command}')")
}

/// Rejects identifiers that cannot sit inside a single-quoted JS string literal unescaped.
pub fn check_identifier(command: &str) -> Result<(), BridgeError> {
    if command.is_empty() {
        return Err(BridgeError::EmptyIdentifier);
    }
    let breaks_out = command
        .chars()
        .any(|c| matches!(c, '\'' | '\\' | '\n' | '\r' | '\u{2028}' | '\u{2029}'));
    if breaks_out {
        return Err(BridgeError::UnsafeIdentifier(command.to_string()));
    }
    Ok(())
}

/// True when `name` can be used as a bare global in the statement (`[A-Za-z_$][A-Za-z0-9_$]*`).
pub fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
