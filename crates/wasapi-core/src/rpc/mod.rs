//! Wasabi wallet JSON-RPC layer.
//!
//! Defines the [`Transport`] seam the client sends through, the reqwest
//! implementation ([`HttpTransport`]), and the [`WalletClient`] exposing one
//! method per daemon RPC. A test double lives in `mock::MockTransport`.

mod auth;
mod client;
mod http_adapter;
#[cfg(test)]
pub mod mock;
pub mod protocol;

pub use auth::basic_auth_header;
pub use client::{classify_response, WalletClient};
pub use http_adapter::HttpTransport;
pub use protocol::{build_envelope, JsonRpcReply, JsonRpcRequest};

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::TransportError;

/// An outbound HTTP request as the client hands it to a [`Transport`].
///
/// Header names are lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub method: &'static str,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

/// The transport's view of the daemon's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Sends one HTTP request and returns the response.
///
/// Implementations own timeouts and connection handling; any failure to
/// obtain a response is reported as a [`TransportError`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request).await
    }
}
