//! In-memory transport for exercising builders without a server.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{RestError, RestResult};
use crate::http::{HttpRequest, HttpResponse};
use crate::traits::{BoxFuture, HttpExecutor};

#[derive(Debug, Default)]
struct MockState {
    queued: VecDeque<HttpResponse>,
    fallback: Option<HttpResponse>,
    failing: bool,
    requests: Vec<HttpRequest>,
}

/// An [`HttpExecutor`] that records requests and replays scripted responses.
///
/// Responses pushed with [`enqueue`](Self::enqueue) are returned first, in
/// order; after that every call gets the fallback response. Clones share
/// state, so a test can hand a clone to an endpoint and inspect the
/// original.
///
/// ```rust
/// use prest_query::testing::MockExecutor;
///
/// let mock = MockExecutor::respond_with(200, "[]");
/// assert_eq!(mock.call_count(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockExecutor {
    state: Arc<Mutex<MockState>>,
}

impl MockExecutor {
    /// A mock that answers `200` with an empty body.
    pub fn new() -> Self {
        Self::respond_with(200, "")
    }

    /// A mock that answers every request with the given response.
    pub fn respond_with(status: u16, body: impl Into<String>) -> Self {
        let mock = Self::default();
        mock.state.lock().fallback = Some(HttpResponse::new(status, body));
        mock
    }

    /// A mock whose every call fails at the transport level.
    pub fn failing() -> Self {
        let mock = Self::default();
        mock.state.lock().failing = true;
        mock
    }

    /// Queue a response for the next unanswered call.
    pub fn enqueue(&self, status: u16, body: impl Into<String>) -> &Self {
        self.state
            .lock()
            .queued
            .push_back(HttpResponse::new(status, body));
        self
    }

    /// All requests received so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().requests.clone()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.state.lock().requests.last().cloned()
    }

    /// Number of requests received.
    pub fn call_count(&self) -> usize {
        self.state.lock().requests.len()
    }

    fn respond(&self, request: HttpRequest) -> RestResult<HttpResponse> {
        let mut state = self.state.lock();
        let url = request.full_url();
        state.requests.push(request);

        if state.failing {
            return Err(RestError::transport("mock transport failure").with_url(url));
        }

        match state.queued.pop_front() {
            Some(response) => Ok(response),
            None => state
                .fallback
                .clone()
                .ok_or_else(|| RestError::transport("no scripted response").with_url(url)),
        }
    }
}

impl HttpExecutor for MockExecutor {
    fn execute(&self, request: HttpRequest) -> BoxFuture<'_, RestResult<HttpResponse>> {
        let result = self.respond(request);
        Box::pin(async move { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;

    #[tokio::test]
    async fn test_queue_then_fallback() {
        let mock = MockExecutor::respond_with(200, "fallback");
        mock.enqueue(201, "first").enqueue(409, "second");

        let request = HttpRequest::new(HttpMethod::Get, "http://api/a");
        let first = mock.execute(request.clone()).await.unwrap();
        let second = mock.execute(request.clone()).await.unwrap();
        let third = mock.execute(request).await.unwrap();

        assert_eq!(first, HttpResponse::new(201, "first"));
        assert_eq!(second.status, 409);
        assert_eq!(third.body, "fallback");
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn test_failing_records_request() {
        let mock = MockExecutor::failing();
        let err = mock
            .execute(HttpRequest::new(HttpMethod::Delete, "http://api/a"))
            .await
            .unwrap_err();

        assert!(err.is_transport());
        assert_eq!(err.context.url.as_deref(), Some("http://api/a"));
        assert_eq!(mock.last_request().unwrap().method, HttpMethod::Delete);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let mock = MockExecutor::new();
        let clone = mock.clone();
        clone
            .execute(HttpRequest::new(HttpMethod::Get, "http://api/a"))
            .await
            .unwrap();
        assert_eq!(mock.requests().len(), 1);
    }
}
