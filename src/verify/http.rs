//! HTTP client for the verification oracle.
//!
//! # Wire Contract
//!
//! | Endpoint | Request | Success |
//! |----------|---------|---------|
//! | `POST <base>/verify` | `{"url": "..."}` | `200 {"action": <code>, "id": <record>}` |
//! | `POST <base>/feedback` | `{"id": <record>}` | `200` |
//!
//! Any non-2xx status is a verification failure.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::identifiers::RecordId;

use super::{Verdict, VerificationClient, VerificationResult};

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Serialize)]
struct VerifyRequest<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    action: i64,
    #[serde(default)]
    id: Option<RecordId>,
}

#[derive(Debug, Serialize)]
struct FeedbackRequest<'a> {
    id: &'a RecordId,
}

// ============================================================================
// HttpVerificationClient
// ============================================================================

/// [`VerificationClient`] backed by the oracle's HTTP API.
#[derive(Clone)]
pub struct HttpVerificationClient {
    client: Client,
    base: String,
}

impl fmt::Debug for HttpVerificationClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpVerificationClient")
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

impl HttpVerificationClient {
    /// Creates a client for the oracle at `base_url`.
    ///
    /// `timeout` bounds every request end to end.
    ///
    /// # Errors
    ///
    /// - [`Error::Url`] if `base_url` does not parse
    /// - [`Error::Config`] if it has no host
    /// - [`Error::Http`] if the underlying client cannot be built
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let parsed = Url::parse(base_url)?;
        if parsed.host_str().is_none() {
            return Err(Error::config(format!("oracle URL has no host: {base_url}")));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client from a session configuration.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        Self::new(&config.oracle_url, config.verification_timeout)
    }

    /// Returns the full URL of an oracle endpoint.
    #[inline]
    #[must_use]
    pub fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.base, name)
    }

    async fn post<T: Serialize + ?Sized>(&self, name: &str, body: &T) -> Result<reqwest::Response> {
        let url = self.endpoint(name);
        let response = self.client.post(&url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint = %url, %status, "Oracle answered with failure status");
            return Err(Error::verification(format!("{name} returned {status}")));
        }

        Ok(response)
    }
}

#[async_trait]
impl VerificationClient for HttpVerificationClient {
    async fn verify(&self, url: &str) -> Result<VerificationResult> {
        debug!(url = %url, "Requesting verification");

        let response = self.post("verify", &VerifyRequest { url }).await?;
        let body: VerifyResponse = response
            .json()
            .await
            .map_err(|e| Error::verification(format!("malformed verify response: {e}")))?;

        let verdict = Verdict::from_code(body.action).ok_or_else(|| {
            Error::verification(format!("unknown verdict code {}", body.action))
        })?;

        debug!(url = %url, %verdict, "Verification answered");
        Ok(VerificationResult::new(verdict, body.id))
    }

    async fn report_user_action(&self, record_id: &RecordId) -> Result<()> {
        debug!(%record_id, "Reporting user trust decision");
        self.post("feedback", &FeedbackRequest { id: record_id })
            .await?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    /// Serves exactly one HTTP response and returns the raw request it saw.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.expect("accept");
            let request = read_request(&mut stream).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.expect("write");
            let _ = stream.shutdown().await;
            request
        });

        (format!("http://{addr}"), handle)
    }

    async fn read_request(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).await.expect("read");
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
                let content_length = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = HttpVerificationClient::new("http://oracle.test:5000/", Duration::from_secs(1))
            .expect("client");
        assert_eq!(client.endpoint("verify"), "http://oracle.test:5000/verify");
    }

    #[test]
    fn test_rejects_hostless_base() {
        let result = HttpVerificationClient::new("data:text/plain,x", Duration::from_secs(1));
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[tokio::test]
    async fn test_verify_parses_verdict_and_record() {
        let (base, server) = serve_once("200 OK", r#"{"action":1,"id":"r1"}"#).await;
        let client = HttpVerificationClient::new(&base, Duration::from_secs(5)).expect("client");

        let result = client.verify("http://evil.example").await.expect("verify");
        assert_eq!(result.verdict, Verdict::Deceptive);
        assert_eq!(result.record_id, Some(RecordId::from("r1")));

        let request = server.await.expect("server");
        assert!(request.starts_with("POST /verify "));
        assert!(request.contains(r#"{"url":"http://evil.example"}"#));
    }

    #[tokio::test]
    async fn test_verify_failure_status_is_verification_error() {
        let (base, server) = serve_once("503 Service Unavailable", "{}").await;
        let client = HttpVerificationClient::new(&base, Duration::from_secs(5)).expect("client");

        let err = client.verify("http://safe.example").await.unwrap_err();
        assert!(err.is_verification_error());
        server.await.expect("server");
    }

    #[tokio::test]
    async fn test_verify_unknown_code_is_verification_error() {
        let (base, server) = serve_once("200 OK", r#"{"action":42,"id":9}"#).await;
        let client = HttpVerificationClient::new(&base, Duration::from_secs(5)).expect("client");

        let err = client.verify("http://odd.example").await.unwrap_err();
        assert!(matches!(err, Error::Verification { .. }));
        server.await.expect("server");
    }

    #[tokio::test]
    async fn test_feedback_echoes_record_id() {
        let (base, server) = serve_once("200 OK", "{}").await;
        let client = HttpVerificationClient::new(&base, Duration::from_secs(5)).expect("client");

        client
            .report_user_action(&RecordId::from(77))
            .await
            .expect("feedback");

        let request = server.await.expect("server");
        assert!(request.starts_with("POST /feedback "));
        assert!(request.contains(r#"{"id":77}"#));
    }
}
