//! Page-side half of the bridge, injected as a webview initialization script.
//!
//! Installs one event bus (`on`, `off`, `emit`) before any page script runs, binds it to the
//! configured global so legacy `<global>.emit('<command>')` statements resolve, and subscribes
//! to structured messages on the current webview window. Acknowledged messages are answered
//! through `bridge_ack` with whether a listener ran. `bridge_ready` is invoked once the page has
//! loaded, after its own scripts had the chance to register listeners.

use super::COMMAND_EVENT;

const BRIDGE_TEMPLATE: &str = r#"(function () {
  if (window.__HEADSET_BRIDGE__) { return; }
  var listeners = Object.create(null);
  var bus = {
    on: function (name, fn) {
      (listeners[name] = listeners[name] || []).push(fn);
      return bus;
    },
    off: function (name, fn) {
      var list = listeners[name];
      if (list) { listeners[name] = list.filter(function (f) { return f !== fn; }); }
      return bus;
    },
    emit: function (name) {
      var args = Array.prototype.slice.call(arguments, 1);
      var list = (listeners[name] || []).slice();
      list.forEach(function (fn) {
        try { fn.apply(null, args); } catch (e) { console.error('[headset] listener for', name, 'failed', e); }
      });
      return list.length;
    }
  };
  Object.defineProperty(window, '__HEADSET_BRIDGE__', { value: bus });
  window[__GLOBAL__] = bus;

  var tauri = window.__TAURI__;
  if (!tauri || !tauri.webviewWindow) { return; }
  tauri.webviewWindow.getCurrentWebviewWindow().listen(__EVENT__, function (e) {
    var msg = e.payload || {};
    if (typeof msg.event !== 'string') { return; }
    var handled = bus.emit.apply(null, [msg.event].concat(msg.args || [])) > 0;
    if (msg.ack) {
      tauri.core.invoke('bridge_ack', { id: msg.ack, handled: handled });
    }
  });
  window.addEventListener('load', function () { tauri.core.invoke('bridge_ready'); });
})();"#;

/// Builds the initialization script binding the bus to `global`.
pub fn init_script(global: &str) -> String {
    let global_json = serde_json::to_string(global).unwrap_or_else(|_| "\"\"".to_string());
    let event_json =
        serde_json::to_string(COMMAND_EVENT).unwrap_or_else(|_| "\"\"".to_string());
    BRIDGE_TEMPLATE
        .replace("__GLOBAL__", &global_json)
        .replace("__EVENT__", &event_json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binds_configured_global() {
        let script = init_script("electronConnector");
        assert!(script.contains(r#"window["electronConnector"] = bus;"#));
        assert!(!script.contains("__GLOBAL__"));
    }

    #[test]
    fn test_listens_on_command_event() {
        let script = init_script("electronConnector");
        assert!(script.contains(r#"listen("headset://command""#));
        assert!(!script.contains("__EVENT__"));
    }

    #[test]
    fn test_answers_acknowledgements() {
        let script = init_script("bus");
        assert!(script.contains("invoke('bridge_ack', { id: msg.ack, handled: handled })"));
    }

    #[test]
    fn test_reports_ready_after_load() {
        let script = init_script("bus");
        assert!(script.contains("addEventListener('load'"));
        assert!(script.contains("invoke('bridge_ready')"));
    }

    #[test]
    fn test_global_is_quoted_as_data() {
        let script = init_script("a\"];alert(1);//");
        assert!(script.contains(r#"window["a\"];alert(1);//"] = bus;"#));
    }
}
