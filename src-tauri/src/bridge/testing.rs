//! In-memory content contexts shared by the bridge and action tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::sync::Mutex;

use super::{AckRegistry, BridgeError, BridgeMessage, ContentTarget};

enum Submission {
    Script(String),
    Message(BridgeMessage),
}

type Listener = Box<dyn Fn(&[serde_json::Value])>;

/// Stand-in for a page: queues submissions and runs them later against its own bus, the way
/// the webview's event loop would.
#[derive(Default)]
pub(crate) struct FakeContext {
    alive: bool,
    queue: RefCell<VecDeque<Submission>>,
    listeners: RefCell<HashMap<String, Vec<Listener>>>,
    pub(crate) submitted: RefCell<Vec<String>>,
    pub(crate) posted: RefCell<Vec<BridgeMessage>>,
}

impl FakeContext {
    pub(crate) fn live() -> Self {
        Self {
            alive: true,
            ..Default::default()
        }
    }

    pub(crate) fn torn_down() -> Self {
        Self::default()
    }

    pub(crate) fn on(&self, event: &str, f: impl Fn(&[serde_json::Value]) + 'static) {
        self.listeners
            .borrow_mut()
            .entry(event.to_string())
            .or_default()
            .push(Box::new(f));
    }

    fn emit(&self, event: &str, args: &[serde_json::Value]) -> usize {
        let listeners = self.listeners.borrow();
        let Some(list) = listeners.get(event) else {
            return 0;
        };
        for f in list {
            f(args);
        }
        list.len()
    }

    /// Runs queued submissions; only the exact `electronConnector.emit('x')` statement form
    /// is understood.
    pub(crate) fn run_pending(&self) {
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(item) = next else {
                break;
            };
            match item {
                Submission::Script(s) => {
                    if let Some(event) = s
                        .strip_prefix("electronConnector.emit('")
                        .and_then(|rest| rest.strip_suffix("')"))
                    {
                        self.emit(event, &[]);
                    }
                }
                Submission::Message(m) => {
                    self.emit(&m.event, &m.args);
                }
            }
        }
    }
}

impl ContentTarget for FakeContext {
    fn label(&self) -> &str {
        "main"
    }

    fn submit_script(&self, script: &str) -> Result<(), BridgeError> {
        if !self.alive {
            return Err(BridgeError::ContextUnavailable("webview destroyed".into()));
        }
        self.submitted.borrow_mut().push(script.to_string());
        self.queue
            .borrow_mut()
            .push_back(Submission::Script(script.to_string()));
        Ok(())
    }

    fn post(&self, message: &BridgeMessage) -> Result<(), BridgeError> {
        if !self.alive {
            return Err(BridgeError::ContextUnavailable("webview destroyed".into()));
        }
        self.posted.borrow_mut().push(message.clone());
        self.queue
            .borrow_mut()
            .push_back(Submission::Message(message.clone()));
        Ok(())
    }
}

/// Page that acknowledges every message immediately on post.
pub(crate) struct AckingContext {
    registry: AckRegistry,
    listeners: Vec<String>,
    pub(crate) submitted: Mutex<Vec<String>>,
    pub(crate) posted: Mutex<Vec<BridgeMessage>>,
}

impl AckingContext {
    pub(crate) fn new(registry: AckRegistry, listeners: &[&str]) -> Self {
        Self {
            registry,
            listeners: listeners.iter().map(|s| s.to_string()).collect(),
            submitted: Mutex::new(Vec::new()),
            posted: Mutex::new(Vec::new()),
        }
    }
}

impl ContentTarget for AckingContext {
    fn label(&self) -> &str {
        "main"
    }

    fn submit_script(&self, script: &str) -> Result<(), BridgeError> {
        self.submitted.lock().unwrap().push(script.to_string());
        Ok(())
    }

    fn post(&self, message: &BridgeMessage) -> Result<(), BridgeError> {
        self.posted.lock().unwrap().push(message.clone());
        if let Some(id) = &message.ack {
            let handled = self.listeners.contains(&message.event);
            self.registry.acknowledge(id, handled);
        }
        Ok(())
    }
}

/// Page that never answers.
pub(crate) struct SilentContext;

impl ContentTarget for SilentContext {
    fn label(&self) -> &str {
        "main"
    }

    fn submit_script(&self, _script: &str) -> Result<(), BridgeError> {
        Ok(())
    }

    fn post(&self, _message: &BridgeMessage) -> Result<(), BridgeError> {
        Ok(())
    }
}

/// Registers a listener on `ctx` recording the argument count of every call.
pub(crate) fn counter(ctx: &FakeContext, event: &str) -> Rc<RefCell<Vec<usize>>> {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = calls.clone();
    ctx.on(event, move |args| sink.borrow_mut().push(args.len()));
    calls
}
