//! Mock transport implementation for testing.
//!
//! This module provides a transport that answers from a script of canned
//! replies and records every request it receives, allowing tests to run
//! without network dependencies.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::RwLock;

use super::traits::{EntityTransport, ListRequest, ListResponse, Transport, TransportStats};
use crate::Error;

/// HTTP method of a recorded request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

/// A request seen by [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// Request method.
    pub method: Method,
    /// Path plus query string, e.g. `api/dishes?sort=id,ASC`.
    pub target: String,
    /// JSON body, for writes.
    pub body: Option<serde_json::Value>,
}

/// A canned reply.
#[derive(Debug)]
pub enum MockReply {
    /// Reply to a list request.
    List(ListResponse),
    /// Reply to a get or write with this body.
    Body(serde_json::Value),
    /// Fail the request.
    Fail(Error),
}

struct Scripted {
    reply: MockReply,
    delay: Option<Duration>,
}

/// Mock transport for testing.
///
/// Replies are consumed in FIFO order, one per request. With the script
/// empty, lists come back empty, gets fail with `NotFound`, writes echo their
/// body and deletes succeed.
///
/// ```rust
/// use ifoodapp::transport::{ListResponse, MockTransport};
///
/// let mock = MockTransport::new();
/// mock.push_list(
///     ListResponse::new(serde_json::json!([{ "id": 1 }])).with_total_count("1"),
/// );
/// assert_eq!(mock.pending_replies(), 1);
/// ```
pub struct MockTransport {
    /// Canned replies.
    script: RwLock<VecDeque<Scripted>>,
    /// Every request received, in arrival order.
    requests: RwLock<Vec<RecordedRequest>>,
    /// Request counter.
    request_count: AtomicU64,
    /// Failure counter.
    failure_count: AtomicU64,
}

impl MockTransport {
    /// Creates a new mock transport with an empty script.
    pub fn new() -> Self {
        Self {
            script: RwLock::new(VecDeque::new()),
            requests: RwLock::new(Vec::new()),
            request_count: AtomicU64::new(0),
            failure_count: AtomicU64::new(0),
        }
    }

    /// Appends a reply to the script.
    pub fn push(&self, reply: MockReply) {
        self.script.write().push_back(Scripted { reply, delay: None });
    }

    /// Appends a reply that is delivered after `delay`.
    pub fn push_delayed(&self, reply: MockReply, delay: Duration) {
        self.script.write().push_back(Scripted {
            reply,
            delay: Some(delay),
        });
    }

    /// Appends a list reply.
    pub fn push_list(&self, response: ListResponse) {
        self.push(MockReply::List(response));
    }

    /// Appends a body reply.
    pub fn push_body(&self, body: serde_json::Value) {
        self.push(MockReply::Body(body));
    }

    /// Appends a failure.
    pub fn push_failure(&self, error: Error) {
        self.push(MockReply::Fail(error));
    }

    /// Returns the number of replies not yet consumed.
    pub fn pending_replies(&self) -> usize {
        self.script.read().len()
    }

    /// Returns the number of requests made.
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Returns a copy of every request received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().clone()
    }

    /// Returns the targets of every request received so far.
    pub fn targets(&self) -> Vec<String> {
        self.requests
            .read()
            .iter()
            .map(|request| request.target.clone())
            .collect()
    }

    /// Records a request and takes the next scripted reply, waiting out its
    /// delay.
    async fn next_reply(&self, request: RecordedRequest) -> Option<MockReply> {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        self.requests.write().push(request);

        let scripted = self.script.write().pop_front()?;
        if let Some(delay) = scripted.delay {
            tokio::time::sleep(delay).await;
        }
        if matches!(scripted.reply, MockReply::Fail(_)) {
            self.failure_count.fetch_add(1, Ordering::Relaxed);
        }
        Some(scripted.reply)
    }

    async fn exchange_body(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, Error> {
        let request = RecordedRequest {
            method,
            target: path.to_string(),
            body: body.clone(),
        };
        match self.next_reply(request).await {
            Some(MockReply::Body(value)) => Ok(value),
            Some(MockReply::Fail(error)) => Err(error),
            Some(MockReply::List(_)) => Err(Error::internal(format!(
                "mock: list reply scripted for {:?} {}",
                method, path
            ))),
            None => match body {
                Some(body) => Ok(body),
                None => {
                    self.failure_count.fetch_add(1, Ordering::Relaxed);
                    Err(Error::from_status(404, format!("mock: nothing at {}", path)))
                },
            },
        }
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("pending_replies", &self.pending_replies())
            .field("request_count", &self.request_count())
            .finish()
    }
}

#[async_trait::async_trait]
impl EntityTransport for MockTransport {
    async fn list(&self, request: ListRequest) -> Result<ListResponse, Error> {
        let recorded = RecordedRequest {
            method: Method::Get,
            target: request.target(),
            body: None,
        };
        match self.next_reply(recorded).await {
            Some(MockReply::List(response)) => Ok(response),
            Some(MockReply::Fail(error)) => Err(error),
            Some(MockReply::Body(body)) => Ok(ListResponse::new(body)),
            None => Ok(ListResponse::new(serde_json::json!([]))),
        }
    }

    async fn get(&self, path: &str) -> Result<serde_json::Value, Error> {
        self.exchange_body(Method::Get, path, None).await
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> Result<serde_json::Value, Error> {
        self.exchange_body(Method::Post, path, Some(body)).await
    }

    async fn put(&self, path: &str, body: serde_json::Value) -> Result<serde_json::Value, Error> {
        self.exchange_body(Method::Put, path, Some(body)).await
    }

    async fn patch(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, Error> {
        self.exchange_body(Method::Patch, path, Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<(), Error> {
        let request = RecordedRequest {
            method: Method::Delete,
            target: path.to_string(),
            body: None,
        };
        match self.next_reply(request).await {
            Some(MockReply::Fail(error)) => Err(error),
            _ => Ok(()),
        }
    }

    fn transport_type(&self) -> Transport {
        Transport::Mock
    }

    fn stats(&self) -> TransportStats {
        TransportStats {
            requests_sent: self.request_count(),
            requests_failed: self.failure_count.load(Ordering::Relaxed),
        }
    }
}
