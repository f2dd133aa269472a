//! HTTP request executor.
//!
//! A thin wrapper over a blocking HTTP client that normalizes every failure
//! mode into a uniform `(status, payload)` pair:
//!
//! - transport failure (DNS, TLS, refused connection, timeout): status 0 and
//!   a body with an `error` field; `send` never returns an error.
//! - HTTP error status: the response body parsed as JSON, or the raw text
//!   wrapped in an `error` field when it isn't JSON.
//! - success: the parsed JSON body; an empty body yields an empty mapping.
//!
//! Every invocation is a fresh round trip - no retries, no caching. The
//! client carries a request counter so tests can assert that short-circuit
//! paths perform no network call.

use reqwest::Method;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

/// Fixed per-request ceiling; on expiry the transport-failure variant is
/// returned, never a hang.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A configured HTTP client.
#[derive(Debug, Clone)]
pub struct Client {
    inner: reqwest::blocking::Client,
    timeout: Duration,
    requests: Arc<AtomicU64>,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Create a new client with the default timeout.
    pub fn new() -> Self {
        Self {
            inner: reqwest::blocking::Client::new(),
            timeout: DEFAULT_TIMEOUT,
            requests: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Override the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Number of requests sent through this client (including failed ones).
    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    /// Create a GET request builder.
    pub fn get(&self, url: impl Into<String>) -> RequestBuilder<'_> {
        self.request(Method::GET, url)
    }

    /// Create a POST request builder.
    pub fn post(&self, url: impl Into<String>) -> RequestBuilder<'_> {
        self.request(Method::POST, url)
    }

    fn request(&self, method: Method, url: impl Into<String>) -> RequestBuilder<'_> {
        RequestBuilder {
            client: self,
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    fn execute(
        &self,
        method: Method,
        url: &str,
        headers: &[(String, String)],
        body: Option<&Value>,
    ) -> (u16, Value) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        debug!(%method, url = redact_query(url).as_str(), "sending request");

        let mut request = self.inner.request(method, url).timeout(self.timeout);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send() {
            Ok(response) => response,
            Err(e) => {
                warn!(url = redact_query(url).as_str(), error = %e, "transport failure");
                return (0, json!({ "error": format!("Connection failed: {e}") }));
            }
        };

        let status = response.status().as_u16();
        let is_success = response.status().is_success();
        let text = match response.text() {
            Ok(text) => text,
            Err(e) => return (status, json!({ "error": format!("Failed to read response body: {e}") })),
        };

        if text.trim().is_empty() {
            return (status, json!({}));
        }

        match serde_json::from_str::<Value>(&text) {
            Ok(parsed) => (status, parsed),
            // An undecodable success body counts as a failed round trip; an
            // error body is preserved verbatim under "error".
            Err(e) if is_success => (0, json!({ "error": format!("Invalid JSON response: {e}") })),
            Err(_) => (status, json!({ "error": text })),
        }
    }
}

/// HTTP request builder.
#[derive(Debug)]
pub struct RequestBuilder<'a> {
    client: &'a Client,
    method: Method,
    url: String,
    headers: Vec<(String, String)>,
    body: Option<Value>,
}

impl RequestBuilder<'_> {
    /// Add a header to the request.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the request body as JSON.
    #[must_use]
    pub fn json(mut self, body: &impl serde::Serialize) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => self.body = Some(value),
            Err(e) => {
                // Our request types serialize infallibly; record the defect
                // instead of panicking if that ever stops holding.
                warn!(error = %e, "request body failed to serialize");
            }
        }
        self
    }

    /// Send the request, normalizing all failures into `(status, payload)`.
    pub fn send(self) -> (u16, Value) {
        self.client
            .execute(self.method, &self.url, &self.headers, self.body.as_ref())
    }
}

/// Strip query values from a URL for logging (the Google listing URL carries
/// the API key as a query parameter).
fn redact_query(url: &str) -> String {
    url.split_once('?')
        .map_or_else(|| url.to_string(), |(base, _)| format!("{base}?<redacted>"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_failure_yields_status_zero_with_error_body() {
        // Unroutable port; refused immediately, no external traffic.
        let client = Client::new().with_timeout(Duration::from_millis(500));
        let (status, body) = client.get("http://127.0.0.1:1/models").send();
        assert_eq!(status, 0);
        assert!(body["error"].as_str().is_some_and(|e| e.contains("Connection failed")));
    }

    #[test]
    fn request_counter_tracks_sends() {
        let client = Client::new().with_timeout(Duration::from_millis(500));
        assert_eq!(client.request_count(), 0);
        let _ = client.get("http://127.0.0.1:1/").send();
        assert_eq!(client.request_count(), 1);
    }

    #[test]
    fn query_strings_are_redacted_for_logs() {
        assert_eq!(
            redact_query("https://example.com/models?key=secret"),
            "https://example.com/models?<redacted>"
        );
        assert_eq!(redact_query("https://example.com/models"), "https://example.com/models");
    }
}
