//! Relay for the NCBI sequence viewer CGIs
//!
//! The viewer's JavaScript calls its CGIs relative to the page, so the portal
//! forwards them. Query string and form body are merged into one POST body.

use axum::body::Bytes;
use axum::http::{header, HeaderMap, StatusCode};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum SviewerError {
    #[error("Invalid CGI script name: {0}")]
    InvalidScript(String),
    #[error("Sequence viewer request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

/// Relayed upstream response
#[derive(Debug)]
pub struct ProxiedResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[derive(Debug, Clone)]
pub struct SviewerProxy {
    client: Client,
    base_url: String,
}

impl SviewerProxy {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SviewerError> {
        let client = Client::builder().timeout(timeout).build()?;
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Ok(Self { client, base_url })
    }

    #[tracing::instrument(skip(self, body))]
    pub async fn forward(
        &self,
        script: &str,
        query: Option<&str>,
        body: &[u8],
    ) -> Result<ProxiedResponse, SviewerError> {
        validate_script(script)?;

        let data = merge_params(query, body);
        let url = format!("{}{}", self.base_url, script);

        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(data)
            .send()
            .await?;

        let status = response.status();
        let headers = relayed_headers(response.headers());
        let body = response.bytes().await?;
        debug!(url = %url, status = %status, bytes = body.len(), "Relayed sequence viewer call");

        Ok(ProxiedResponse {
            status,
            headers,
            body,
        })
    }
}

fn validate_script(script: &str) -> Result<(), SviewerError> {
    let valid = !script.is_empty()
        && !script.contains("..")
        && script
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(SviewerError::InvalidScript(script.to_string()))
    }
}

/// `query&body`, skipping whichever side is empty
fn merge_params(query: Option<&str>, body: &[u8]) -> Vec<u8> {
    let query = query.unwrap_or_default().as_bytes();
    let mut data = Vec::with_capacity(query.len() + body.len() + 1);
    data.extend_from_slice(query);
    if !query.is_empty() && !body.is_empty() {
        data.push(b'&');
    }
    data.extend_from_slice(body);
    data
}

/// Upstream headers minus the connection-level ones
fn relayed_headers(upstream: &HeaderMap) -> HeaderMap {
    upstream
        .iter()
        .filter(|(name, _)| *name != header::TRANSFER_ENCODING && *name != header::CONNECTION)
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use wiremock::matchers::{body_string, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_merge_params() {
        assert_eq!(merge_params(Some("id=1"), b"fmt=json"), b"id=1&fmt=json");
        assert_eq!(merge_params(None, b"fmt=json"), b"fmt=json");
        assert_eq!(merge_params(Some("id=1"), b""), b"id=1");
        assert!(merge_params(None, b"").is_empty());
    }

    #[test]
    fn test_script_names() {
        assert!(validate_script("seqconfig.cgi").is_ok());
        assert!(validate_script("").is_err());
        assert!(validate_script("..").is_err());
        assert!(validate_script("a b.cgi").is_err());
    }

    #[test]
    fn test_connection_headers_are_dropped() {
        let mut upstream = HeaderMap::new();
        upstream.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        upstream.insert(header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
        upstream.insert(header::CONNECTION, HeaderValue::from_static("close"));

        let relayed = relayed_headers(&upstream);
        assert_eq!(relayed.len(), 1);
        assert!(relayed.contains_key(header::CONTENT_TYPE));
    }

    #[tokio::test]
    async fn test_forward_posts_merged_params() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/projects/sviewer/seqconfig.cgi"))
            .and(body_string("id=NC_002607&report=json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("x-sviewer", "1")
                    .set_body_string("{}"),
            )
            .mount(&server)
            .await;

        let proxy = SviewerProxy::new(
            format!("{}/projects/sviewer", server.uri()),
            Duration::from_secs(5),
        )
        .unwrap();
        let response = proxy
            .forward("seqconfig.cgi", Some("id=NC_002607"), b"report=json")
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.headers.get("x-sviewer").unwrap(), "1");
        assert_eq!(&response.body[..], b"{}");
    }
}
