//! Structured command message carried over the Tauri event channel.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeMessage {
    pub event: String,
    #[serde(default)]
    pub args: Vec<Value>,
    /// Acknowledgement id; the page replies through `bridge_ack` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ack: Option<String>,
}

impl BridgeMessage {
    /// A player command: the event is the identifier and no arguments follow.
    pub fn command(command: &str) -> Self {
        Self {
            event: command.to_string(),
            args: Vec::new(),
            ack: None,
        }
    }

    pub fn with_ack(mut self, id: impl Into<String>) -> Self {
        self.ack = Some(id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_command_message_shape() {
        let msg = BridgeMessage::command("play-pause");
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({ "event": "play-pause", "args": [] })
        );
    }

    #[test]
    fn test_ack_id_is_serialized() {
        let msg = BridgeMessage::command("like").with_ack("abc");
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({ "event": "like", "args": [], "ack": "abc" })
        );
    }

    #[test]
    fn test_hostile_identifier_stays_data() {
        let hostile = "like'); maliciousCode(); //";
        let encoded = serde_json::to_string(&BridgeMessage::command(hostile)).unwrap();
        let decoded: BridgeMessage = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.event, hostile);
        assert!(decoded.args.is_empty());
    }
}
