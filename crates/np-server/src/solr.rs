//! Client for the Solr index built over genes
//!
//! Queries are posted straight to the select handler; every term gets a
//! trailing wildcard so partial gene names match.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum SolrError {
    #[error("Solr request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Solr returned status {0}")]
    Status(reqwest::StatusCode),
}

/// One hit from the index. Only the fields the portal reads are typed.
#[derive(Debug, Clone, Deserialize)]
pub struct SolrDoc {
    pub id: serde_json::Value,
    #[serde(default)]
    pub doc_type: Option<String>,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl SolrDoc {
    pub fn is_gene(&self) -> bool {
        self.doc_type.as_deref() == Some("GENE")
    }

    /// Database id of the document; Solr may hand it back as a string or a number
    pub fn database_id(&self) -> Option<i32> {
        match &self.id {
            serde_json::Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
            serde_json::Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SelectResponse {
    response: SelectBody,
}

#[derive(Debug, Deserialize)]
struct SelectBody {
    docs: Vec<SolrDoc>,
}

/// Wildcard every space separated term and join them with `+`.
/// `/` stays unescaped so path-like terms reach Solr as typed.
pub fn make_query_string(q: &str) -> String {
    q.split(' ')
        .map(|term| urlencoding::encode(&format!("{}*", term)).replace("%2F", "/"))
        .collect::<Vec<_>>()
        .join("+")
}

#[derive(Debug, Clone)]
pub struct SolrClient {
    client: Client,
    select_url: String,
}

impl SolrClient {
    pub fn new(select_url: impl Into<String>, timeout: Duration) -> Result<Self, SolrError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("network-portal/0.1")
            .build()?;
        Ok(Self {
            client,
            select_url: select_url.into(),
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn search(&self, q: &str) -> Result<Vec<SolrDoc>, SolrError> {
        let body = format!("wt=json&q={}", make_query_string(q));

        let response = self
            .client
            .post(&self.select_url)
            .header(reqwest::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SolrError::Status(response.status()));
        }

        let parsed: SelectResponse = response.json().await?;
        debug!(hits = parsed.response.docs.len(), "Solr query finished");
        Ok(parsed.response.docs)
    }
}
