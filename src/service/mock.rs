/*!
 * Mock transport for testing.
 *
 * Replies are scripted per route and returned in FIFO order:
 * - `reply_submit` / `reply_health` / `reply_fetch` queue an immediate reply
 * - `reply_submit_with_trigger` holds the reply until the returned sender fires
 *
 * Every call is recorded so tests can assert on what was sent.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::oneshot;

use crate::errors::TransportError;
use super::{ServiceResponse, SubmissionRequest, TranslationTransport};

type Reply = Result<ServiceResponse, TransportError>;

/// A scripted reply that can optionally wait for a trigger before completing
#[derive(Debug)]
enum MockReply {
    /// Returned as soon as the call is made
    Immediate(Reply),
    /// Returned once the trigger fires or its sender is dropped
    Triggered {
        reply: Reply,
        trigger: oneshot::Receiver<()>,
    },
}

/// Record of a submit call made to the mock
#[derive(Debug, Clone)]
pub struct MockCall {
    /// Filename of the submitted document
    pub filename: String,
    /// Size of the submitted payload
    pub payload_len: usize,
    /// Languages in request order
    pub languages: Vec<String>,
}

#[derive(Debug, Default)]
struct Script {
    submit: VecDeque<MockReply>,
    health: VecDeque<Reply>,
    fetch: HashMap<String, VecDeque<Reply>>,
}

/// Scripted translation service
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    script: Arc<Mutex<Script>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
    fetched: Arc<Mutex<Vec<String>>>,
    in_flight: Arc<AtomicUsize>,
}

struct InFlightGuard {
    in_flight: Arc<AtomicUsize>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl MockTransport {
    /// Create a mock with nothing scripted
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for the next submit
    pub fn reply_submit(&self, reply: Reply) {
        self.script.lock().submit.push_back(MockReply::Immediate(reply));
    }

    /// Queue a JSON reply with the given status for the next submit
    pub fn reply_submit_json(&self, status: u16, body: serde_json::Value) {
        self.reply_submit(Ok(ServiceResponse::new(status, body.to_string())));
    }

    /// Queue a reply that is held back until the returned sender fires
    pub fn reply_submit_with_trigger(&self, reply: Reply) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.script.lock().submit.push_back(MockReply::Triggered { reply, trigger: rx });
        tx
    }

    /// Queue a reply for the next health check
    pub fn reply_health(&self, reply: Reply) {
        self.script.lock().health.push_back(reply);
    }

    /// Queue a reply for the next fetch of `url`
    pub fn reply_fetch(&self, url: &str, reply: Reply) {
        self.script.lock().fetch.entry(url.to_string()).or_default().push_back(reply);
    }

    /// All submit calls made so far
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().clone()
    }

    /// Number of submit calls made so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// URLs fetched so far, in order
    pub fn fetched_urls(&self) -> Vec<String> {
        self.fetched.lock().clone()
    }

    /// Number of submit calls currently awaiting their reply
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

fn unscripted(route: &str) -> Reply {
    Err(TransportError::Connection(format!("no scripted reply for {}", route)))
}

#[async_trait]
impl TranslationTransport for MockTransport {
    async fn submit(&self, request: &SubmissionRequest) -> Result<ServiceResponse, TransportError> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let _guard = InFlightGuard { in_flight: self.in_flight.clone() };

        self.calls.lock().push(MockCall {
            filename: request.document.filename().to_string(),
            payload_len: request.document.len(),
            languages: request.languages.clone(),
        });

        let scripted = self.script.lock().submit.pop_front();
        match scripted {
            Some(MockReply::Immediate(reply)) => reply,
            Some(MockReply::Triggered { reply, trigger }) => {
                // A dropped sender releases the reply as well
                let _ = trigger.await;
                reply
            }
            None => unscripted("submit"),
        }
    }

    async fn health(&self) -> Result<ServiceResponse, TransportError> {
        let scripted = self.script.lock().health.pop_front();
        scripted.unwrap_or_else(|| unscripted("health"))
    }

    async fn fetch(&self, url: &str) -> Result<ServiceResponse, TransportError> {
        self.fetched.lock().push(url.to_string());
        let scripted = self.script.lock().fetch.get_mut(url).and_then(VecDeque::pop_front);
        scripted.unwrap_or_else(|| unscripted(url))
    }
}
