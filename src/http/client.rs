use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;

use super::transport::Transport;
use crate::error::{SendError, TransportError};
use crate::models::{RequestDraft, Response, ResponseBody};

pub type HttpResult = Result<Response, SendError>;

/// Runs one draft through validation, the network and body decoding
pub struct Dispatcher<T> {
    transport: T,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub async fn dispatch(&self, draft: &RequestDraft) -> HttpResult {
        draft.validate()?;

        let request = draft.outgoing();
        tracing::debug!(
            method = request.method.as_str(),
            url = %request.url,
            headers = request.headers.len(),
            has_body = request.body.is_some(),
            "dispatching request"
        );

        let start = Instant::now();
        let raw = self.transport.execute(request).await.map_err(|e| {
            tracing::warn!(error = %e, url = %draft.url, "request failed");
            SendError::Transport(e)
        })?;
        let elapsed = raw.received_at.saturating_duration_since(start);

        let size_bytes = raw.size_bytes;
        let response = Response {
            status: raw.status,
            status_text: raw.status_text,
            headers: raw.headers,
            body: ResponseBody::decode(raw.body),
            elapsed,
            size_bytes,
        };

        tracing::info!(
            status = response.status,
            elapsed_ms = response.elapsed_ms(),
            size_bytes,
            json = response.body.is_json(),
            "request completed"
        );

        Ok(response)
    }
}

/// Owns the result channel for one send.
///
/// Dropping it without calling `finish` (panic, task abort, runtime shutdown)
/// still reports a transport failure, so the UI always leaves the in-flight state.
struct Completion {
    tx: Option<mpsc::UnboundedSender<HttpResult>>,
}

impl Completion {
    fn new(tx: mpsc::UnboundedSender<HttpResult>) -> Self {
        Self { tx: Some(tx) }
    }

    fn finish(mut self, result: HttpResult) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(result);
        }
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        if let Some(tx) = self.tx.take() {
            tracing::warn!("request task ended without a result");
            let _ = tx.send(Err(SendError::Transport(TransportError::Interrupted)));
        }
    }
}

/// Task body for a single send; the result arrives on `tx` exactly once
pub async fn send_request<T: Transport>(
    dispatcher: Arc<Dispatcher<T>>,
    draft: RequestDraft,
    tx: mpsc::UnboundedSender<HttpResult>,
) {
    let completion = Completion::new(tx);
    let result = dispatcher.dispatch(&draft).await;
    completion.finish(result);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::transport::{RawResponse, TransportFuture};
    use crate::models::{HttpMethod, OutgoingRequest};
    use std::sync::Mutex;
    use std::time::Duration;

    enum Reply {
        Body(&'static str),
        Sized(&'static str, usize),
        Fail,
        Panic,
    }

    struct MockTransport {
        reply: Reply,
        seen: Mutex<Vec<OutgoingRequest>>,
    }

    impl MockTransport {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn seen(&self) -> Vec<OutgoingRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl Transport for MockTransport {
        fn execute(&self, request: OutgoingRequest) -> TransportFuture<'_> {
            self.seen.lock().unwrap().push(request);
            Box::pin(async move {
                match self.reply {
                    Reply::Body(body) => {
                        tokio::time::sleep(Duration::from_millis(2)).await;
                        Ok(RawResponse {
                            status: 201,
                            status_text: "Created".to_string(),
                            headers: vec![("content-type".into(), "application/json".into())],
                            body: body.to_string(),
                            size_bytes: body.len(),
                            received_at: Instant::now(),
                        })
                    }
                    Reply::Sized(body, size_bytes) => Ok(RawResponse {
                        status: 200,
                        status_text: "OK".to_string(),
                        headers: Vec::new(),
                        body: body.to_string(),
                        size_bytes,
                        received_at: Instant::now(),
                    }),
                    Reply::Fail => Err(TransportError::InvalidHeader("boom".into())),
                    Reply::Panic => panic!("transport blew up"),
                }
            })
        }
    }

    #[tokio::test]
    async fn empty_url_never_reaches_the_network() {
        let dispatcher = Dispatcher::new(MockTransport::new(Reply::Body("{}")));

        let err = dispatcher.dispatch(&RequestDraft::default()).await.unwrap_err();

        assert!(matches!(err, SendError::UrlRequired));
        assert_eq!(err.to_string(), "URL is required");
        assert!(dispatcher.transport.seen().is_empty());
    }

    #[tokio::test]
    async fn success_populates_every_field() {
        let dispatcher = Dispatcher::new(MockTransport::new(Reply::Body(r#"{"a":1}"#)));
        let draft = RequestDraft::new(HttpMethod::Get, "http://example.test/");

        let response = dispatcher.dispatch(&draft).await.unwrap();

        assert_eq!(response.status, 201);
        assert_eq!(response.status_text, "Created");
        assert_eq!(response.headers.len(), 1);
        assert_eq!(response.body, ResponseBody::Json("{\n  \"a\": 1\n}".to_string()));
        assert_eq!(response.size_bytes, 7);
        assert!(response.elapsed >= Duration::from_millis(2));
    }

    #[tokio::test]
    async fn size_comes_from_the_transport() {
        let dispatcher = Dispatcher::new(MockTransport::new(Reply::Sized("\u{fffd}", 1)));
        let draft = RequestDraft::new(HttpMethod::Get, "http://example.test/");

        let response = dispatcher.dispatch(&draft).await.unwrap();

        assert_eq!(response.size_bytes, 1);
        assert_eq!(response.body.as_str(), "\u{fffd}");
    }

    #[tokio::test]
    async fn non_json_body_passes_through() {
        let dispatcher = Dispatcher::new(MockTransport::new(Reply::Body("not json")));
        let draft = RequestDraft::new(HttpMethod::Get, "http://example.test/");

        let response = dispatcher.dispatch(&draft).await.unwrap();

        assert_eq!(response.body.as_str(), "not json");
    }

    #[tokio::test]
    async fn get_drops_body_and_post_keeps_it() {
        let dispatcher = Dispatcher::new(MockTransport::new(Reply::Body("")));

        let get = RequestDraft::new(HttpMethod::Get, "http://example.test/")
            .with_headers("A: 1\nB: 2")
            .with_body("payload");
        let post = RequestDraft::new(HttpMethod::Post, "http://example.test/").with_body("payload");
        dispatcher.dispatch(&get).await.unwrap();
        dispatcher.dispatch(&post).await.unwrap();

        let seen = dispatcher.transport.seen();
        assert_eq!(seen[0].body, None);
        assert_eq!(seen[0].headers.get("A"), Some("1"));
        assert_eq!(seen[0].headers.get("B"), Some("2"));
        assert_eq!(seen[1].method, HttpMethod::Post);
        assert_eq!(seen[1].body.as_deref(), Some("payload"));
    }

    #[tokio::test]
    async fn transport_failure_uses_fixed_message() {
        let dispatcher = Dispatcher::new(MockTransport::new(Reply::Fail));
        let draft = RequestDraft::new(HttpMethod::Get, "http://example.test/");

        let err = dispatcher.dispatch(&draft).await.unwrap_err();

        assert!(matches!(err, SendError::Transport(_)));
        assert_eq!(err.to_string(), "Failed to fetch. Check URL or CORS.");
    }

    #[tokio::test]
    async fn send_request_delivers_result_once() {
        let dispatcher = Arc::new(Dispatcher::new(MockTransport::new(Reply::Body("ok"))));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let draft = RequestDraft::new(HttpMethod::Get, "http://example.test/");

        send_request(dispatcher, draft, tx).await;

        let result = rx.recv().await.unwrap();
        assert_eq!(result.unwrap().body.as_str(), "ok");
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn panicking_task_still_reports_failure() {
        let dispatcher = Arc::new(Dispatcher::new(MockTransport::new(Reply::Panic)));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let draft = RequestDraft::new(HttpMethod::Get, "http://example.test/");

        let handle = tokio::spawn(send_request(dispatcher, draft, tx));
        assert!(handle.await.is_err());

        let err = rx.recv().await.unwrap().unwrap_err();
        assert!(matches!(err, SendError::Transport(TransportError::Interrupted)));
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn aborted_task_still_reports_failure() {
        struct Hang;
        impl Transport for Hang {
            fn execute(&self, _request: OutgoingRequest) -> TransportFuture<'_> {
                Box::pin(std::future::pending())
            }
        }

        let dispatcher = Arc::new(Dispatcher::new(Hang));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let draft = RequestDraft::new(HttpMethod::Get, "http://example.test/");

        let handle = tokio::spawn(send_request(dispatcher, draft, tx));
        // Let the task reach the hung transport before aborting it
        tokio::time::sleep(Duration::from_millis(10)).await;
        handle.abort();

        let err = rx.recv().await.unwrap().unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch. Check URL or CORS.");
    }
}
