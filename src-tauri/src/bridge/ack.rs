//! Pending acknowledgements for structured command messages.
//!
//! Each acknowledged dispatch registers a oneshot under a fresh id; the page answers through the
//! `bridge_ack` command with whether any listener handled the event. Stored as Tauri state.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tauri::State;
use tokio::sync::oneshot;
use tracing::debug;

/// Outcome reported by the content context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ack {
    /// At least one listener ran for the event.
    Handled,
    /// The bus received the event but nothing was registered under that name.
    Unhandled,
}

impl From<bool> for Ack {
    fn from(handled: bool) -> Self {
        if handled {
            Ack::Handled
        } else {
            Ack::Unhandled
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AckRegistry {
    pending: Arc<Mutex<HashMap<String, oneshot::Sender<bool>>>>,
}

impl AckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, oneshot::Sender<bool>>> {
        // A panic while holding the lock cannot leave the map inconsistent.
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Registers a new pending acknowledgement and returns its id and receiver.
    pub fn register(&self) -> (String, oneshot::Receiver<bool>) {
        let (tx, rx) = oneshot::channel();
        let id = nanoid::nanoid!();
        self.lock().insert(id.clone(), tx);
        (id, rx)
    }

    /// Resolves a pending acknowledgement. Returns false for unknown or expired ids.
    pub fn acknowledge(&self, id: &str, handled: bool) -> bool {
        let Some(tx) = self.lock().remove(id) else {
            debug!(id, "Acknowledgement for unknown or expired id");
            return false;
        };
        tx.send(handled).is_ok()
    }

    /// Drops a pending entry whose waiter gave up.
    pub fn forget(&self, id: &str) {
        self.lock().remove(id);
    }

    pub fn pending(&self) -> usize {
        self.lock().len()
    }
}

/// Called by the page bootstrap after it re-emitted an acknowledged message.
#[tauri::command]
pub fn bridge_ack(registry: State<'_, AckRegistry>, id: String, handled: bool) {
    registry.acknowledge(&id, handled);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_acknowledge() {
        let registry = AckRegistry::new();
        let (id, mut rx) = registry.register();
        assert_eq!(registry.pending(), 1);

        assert!(registry.acknowledge(&id, true));
        assert_eq!(rx.try_recv(), Ok(true));
        assert_eq!(registry.pending(), 0);
    }

    #[test]
    fn test_ids_are_distinct() {
        let registry = AckRegistry::new();
        let (a, _rx_a) = registry.register();
        let (b, _rx_b) = registry.register();
        assert_ne!(a, b);
        assert_eq!(registry.pending(), 2);
    }

    #[test]
    fn test_unknown_and_repeated_ids_are_ignored() {
        let registry = AckRegistry::new();
        assert!(!registry.acknowledge("missing", true));

        let (id, _rx) = registry.register();
        assert!(registry.acknowledge(&id, false));
        assert!(!registry.acknowledge(&id, false));
    }

    #[test]
    fn test_forget_expires_entry() {
        let registry = AckRegistry::new();
        let (id, _rx) = registry.register();
        registry.forget(&id);
        assert_eq!(registry.pending(), 0);
        assert!(!registry.acknowledge(&id, true));
    }

    #[test]
    fn test_clones_share_pending_map() {
        let registry = AckRegistry::new();
        let other = registry.clone();
        let (id, mut rx) = registry.register();
        assert!(other.acknowledge(&id, false));
        assert_eq!(rx.try_recv(), Ok(false));
    }

    #[test]
    fn test_registry_is_shareable_across_threads() {
        let registry = Arc::new(AckRegistry::new());
        let (id, mut rx) = registry.register();
        let remote = registry.clone();
        std::thread::spawn(move || remote.acknowledge(&id, true))
            .join()
            .unwrap();
        assert_eq!(rx.try_recv(), Ok(true));
    }

    #[test]
    fn test_ack_from_bool() {
        assert_eq!(Ack::from(true), Ack::Handled);
        assert_eq!(Ack::from(false), Ack::Unhandled);
    }
}
