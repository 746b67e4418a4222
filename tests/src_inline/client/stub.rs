use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use serde_json::Value;
use tokio::sync::Notify;

use crate::client::{HttpReply, Transport};
use crate::error::ClientError;

/// Scripted transport: replies are queued per path and every call is recorded.
#[derive(Default)]
pub(crate) struct StubTransport {
    replies: RefCell<HashMap<String, VecDeque<Result<HttpReply, ClientError>>>>,
    calls: RefCell<Vec<(String, Option<Value>)>>,
    gate: Option<Rc<Notify>>,
}

impl StubTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(self, path: &str, status: u16, body: &str) -> Self {
        self.push(path, Ok(HttpReply::new(status, body)))
    }

    pub(crate) fn fail(self, path: &str, message: &str) -> Self {
        self.push(path, Err(ClientError::Transport(message.to_string())))
    }

    /// Holds every reply until the returned handle is notified.
    pub(crate) fn gated(mut self) -> (Self, Rc<Notify>) {
        let gate = Rc::new(Notify::new());
        self.gate = Some(gate.clone());
        (self, gate)
    }

    pub(crate) fn calls(&self) -> Vec<(String, Option<Value>)> {
        self.calls.borrow().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn push(self, path: &str, reply: Result<HttpReply, ClientError>) -> Self {
        self.replies
            .borrow_mut()
            .entry(path.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    async fn answer(&self, path: &str, body: Option<Value>) -> Result<HttpReply, ClientError> {
        self.calls.borrow_mut().push((path.to_string(), body));
        match &self.gate {
            Some(gate) => gate.notified().await,
            None => tokio::task::yield_now().await,
        }
        self.replies
            .borrow_mut()
            .get_mut(path)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(ClientError::Transport(format!("no reply queued for {path}"))))
    }
}

impl Transport for StubTransport {
    async fn get(&self, path: &str) -> Result<HttpReply, ClientError> {
        self.answer(path, None).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<HttpReply, ClientError> {
        self.answer(path, Some(body.clone())).await
    }
}
