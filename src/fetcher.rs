//! Query document retrieval.
//!
//! The translation core only sees [`QueryFetcher`]; [`HttpFetcher`] talks to
//! the HSD-ES query metadata endpoint.

use std::future::Future;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::ApiConfig;
use crate::error::FetchError;

/// Source of raw query XML, keyed by record id.
pub trait QueryFetcher {
    fn fetch(&self, id: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Fetches `query.query_xml` of a record over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
    credentials: Option<(String, Option<String>)>,
}

impl HttpFetcher {
    /// Build a client from the `[api]` config section.
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.insecure)
            .build()?;

        Ok(Self {
            client,
            api_url: config.url.clone(),
            token: config.token.clone(),
            credentials: config
                .username
                .clone()
                .map(|user| (user, config.password.clone())),
        })
    }
}

impl QueryFetcher for HttpFetcher {
    async fn fetch(&self, id: &str) -> Result<String, FetchError> {
        info!(id, url = %self.api_url, "fetching query");

        let mut request = self
            .client
            .get(&self.api_url)
            .query(&[("id", id), ("fields", "query.query_xml")]);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        } else if let Some((user, password)) = &self.credentials {
            request = request.basic_auth(user, password.as_deref());
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(id, %status, bytes = body.len(), "query response");

        if !status.is_success() {
            return Err(FetchError::Status {
                id: id.to_string(),
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        query_xml(id, &body)
    }
}

#[derive(Debug, Deserialize)]
struct MetaDataResponse {
    #[serde(default)]
    data: Vec<MetaDataRecord>,
}

#[derive(Debug, Deserialize)]
struct MetaDataRecord {
    #[serde(rename = "query.query_xml")]
    query_xml: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Pull the query XML of the first record out of a metadata response.
fn query_xml(id: &str, body: &str) -> Result<String, FetchError> {
    let response: MetaDataResponse = serde_json::from_str(body).map_err(|e| FetchError::Decode {
        id: id.to_string(),
        message: e.to_string(),
    })?;
    response
        .data
        .into_iter()
        .next()
        .and_then(|record| record.query_xml)
        .ok_or_else(|| FetchError::MissingXml(id.to_string()))
}

/// The service reports failures as `{"message": ...}`; fall back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| body.trim().to_string())
}
