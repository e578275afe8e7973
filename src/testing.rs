//! In-memory collaborator doubles shared by unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::task::Poll;

use serde_json::Value;

use crate::net::wallet::{Eip1193, WalletError};
use crate::state::wallet::{WalletState, WaveStore};
use crate::util::dialogs::Dialogs;

type Hook = Box<dyn Fn(&str, &Value)>;

/// Scripted EIP-1193 wallet.
///
/// Each method has a queue of responses; the last queued response repeats
/// once the queue is down to one entry. Unscripted methods answer with a
/// JSON-RPC "method not found" error.
#[derive(Default)]
pub(crate) struct ScriptedWallet {
    responses: RefCell<HashMap<String, VecDeque<Result<Value, WalletError>>>>,
    calls: RefCell<Vec<(String, Value)>>,
    hook: RefCell<Option<Hook>>,
    stalls: RefCell<HashMap<String, usize>>,
}

impl ScriptedWallet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, method: &str, result: Result<Value, WalletError>) -> &Self {
        self.responses
            .borrow_mut()
            .entry(method.to_owned())
            .or_default()
            .push_back(result);
        self
    }

    pub(crate) fn ok(&self, method: &str, value: Value) -> &Self {
        self.respond(method, Ok(value))
    }

    /// Run `hook` on every request, before the scripted answer is produced.
    pub(crate) fn on_request(&self, hook: impl Fn(&str, &Value) + 'static) {
        *self.hook.borrow_mut() = Some(Box::new(hook));
    }

    /// Make the next `method` request return `Pending` once before answering,
    /// so other futures joined with it get polled in between.
    pub(crate) fn stall_once(&self, method: &str) {
        *self.stalls.borrow_mut().entry(method.to_owned()).or_default() += 1;
    }

    fn take_stall(&self, method: &str) -> bool {
        let mut stalls = self.stalls.borrow_mut();
        match stalls.get_mut(method) {
            Some(n) if *n > 0 => {
                *n -= 1;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn calls(&self) -> Vec<(String, Value)> {
        self.calls.borrow().clone()
    }

    pub(crate) fn count(&self, method: &str) -> usize {
        self.calls.borrow().iter().filter(|(m, _)| m == method).count()
    }
}

impl std::fmt::Debug for ScriptedWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedWallet").field("calls", &self.calls.borrow().len()).finish_non_exhaustive()
    }
}

impl Eip1193 for ScriptedWallet {
    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        self.calls.borrow_mut().push((method.to_owned(), params.clone()));
        if let Some(hook) = self.hook.borrow().as_ref() {
            hook(method, &params);
        }
        if self.take_stall(method) {
            yield_once().await;
        }
        let unscripted = || Err(WalletError::Rpc { code: -32601, message: format!("no script for {method}") });
        let mut responses = self.responses.borrow_mut();
        let Some(queue) = responses.get_mut(method) else {
            return unscripted();
        };
        let next = if queue.len() > 1 { queue.pop_front() } else { queue.front().cloned() };
        next.unwrap_or_else(unscripted)
    }
}

async fn yield_once() {
    let mut yielded = false;
    futures::future::poll_fn(|cx| {
        if yielded {
            Poll::Ready(())
        } else {
            yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    })
    .await;
}

impl WaveStore for Rc<RefCell<WalletState>> {
    fn snapshot(&self) -> WalletState {
        self.borrow().clone()
    }

    fn modify<R>(&self, f: impl FnOnce(&mut WalletState) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

/// Dialog sink that records every alert instead of blocking.
#[derive(Clone, Default)]
pub(crate) struct RecordingDialogs {
    alerts: Rc<RefCell<Vec<String>>>,
}

impl RecordingDialogs {
    pub(crate) fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }
}

impl Dialogs for RecordingDialogs {
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_owned());
    }
}
