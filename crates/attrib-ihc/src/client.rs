// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the IHC attribution API.
//!
//! Provides [`IhcClient`] which handles request construction,
//! authentication, and response parsing. Business-level status codes inside
//! the body are left for the credit extractor.

use std::time::Duration;

use async_trait::async_trait;
use attrib_config::model::ScoringConfig;
use attrib_core::{AttribError, JourneyRecord, RawResponse, ScoringService};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::types::ScoringRequest;

/// HTTP client for IHC API communication.
#[derive(Debug, Clone)]
pub struct IhcClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl IhcClient {
    /// Creates a client for `config.base_url` and `config.conv_type_id`.
    pub fn new(config: &ScoringConfig, api_key: &SecretString) -> Result<Self, AttribError> {
        let mut key = HeaderValue::from_str(api_key.expose_secret())
            .map_err(|e| AttribError::Config(format!("invalid API key header value: {e}")))?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", key);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AttribError::Network {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        let mut endpoint = Url::parse(&config.base_url).map_err(|e| {
            AttribError::Config(format!("invalid scoring.base_url `{}`: {e}", config.base_url))
        })?;
        endpoint
            .query_pairs_mut()
            .append_pair("conv_type_id", &config.conv_type_id);

        Ok(Self { client, endpoint })
    }

    /// The full request URL, query string included.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ScoringService for IhcClient {
    fn name(&self) -> &str {
        "ihc"
    }

    async fn score_batch(&self, batch: &[JourneyRecord]) -> Result<RawResponse, AttribError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&ScoringRequest::from_records(batch))
            .send()
            .await
            .map_err(|e| AttribError::Network {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, records = batch.len(), "scoring response received");

        let body = response.text().await.map_err(|e| AttribError::Network {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            return Err(AttribError::Network {
                message: format!("API returned {status}: {body}"),
                source: None,
            });
        }

        serde_json::from_str(&body).map_err(|e| AttribError::MalformedResponse {
            message: format!("response is not JSON: {e}"),
        })
    }
}
