use std::collections::VecDeque;
use std::io;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;

use super::{HttpRequest, HttpResponse, Transport};

enum Scripted {
    Respond(HttpResponse),
    Refuse,
}

/// A mock transport for testing. Records every request and replays
/// scripted responses in order, populated via the builder pattern.
pub struct MockTransport {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn builder() -> MockTransportBuilder {
        MockTransportBuilder {
            script: VecDeque::new(),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

pub struct MockTransportBuilder {
    script: VecDeque<Scripted>,
}

impl MockTransportBuilder {
    pub fn respond_json(self, status: u16, body: Value) -> Self {
        let text = if status == 200 { "OK" } else { "" };
        self.respond_raw(status, text, body.to_string().as_bytes())
    }

    pub fn respond_status(self, status: u16, status_text: &str) -> Self {
        self.respond_raw(status, status_text, b"")
    }

    pub fn respond_raw(mut self, status: u16, status_text: &str, body: &[u8]) -> Self {
        self.script.push_back(Scripted::Respond(HttpResponse {
            status,
            status_text: status_text.to_owned(),
            body: body.to_vec(),
        }));
        self
    }

    /// Fail the next request as if the daemon refused the connection.
    pub fn fail_connection(mut self) -> Self {
        self.script.push_back(Scripted::Refuse);
        self
    }

    pub fn build(self) -> MockTransport {
        MockTransport {
            script: Mutex::new(self.script),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        match self.script.lock().unwrap().pop_front() {
            Some(Scripted::Respond(response)) => Ok(response),
            Some(Scripted::Refuse) => Err(TransportError::new(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
            None => Err(TransportError::new("mock transport script exhausted")),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn replays_script_in_order_and_records_requests() {
        let mock = MockTransport::builder()
            .respond_json(200, json!({"a": 1}))
            .fail_connection()
            .build();
        let request = HttpRequest {
            url: "http://127.0.0.1:37128".into(),
            method: "POST",
            headers: Default::default(),
            body: "{}".into(),
        };

        let first = mock.send(request.clone()).await.unwrap();
        assert_eq!(first.json().unwrap(), json!({"a": 1}));
        assert!(mock.send(request.clone()).await.is_err());
        assert!(mock.send(request).await.is_err());
        assert_eq!(mock.requests().len(), 3);
    }
}
