// SPDX-FileCopyrightText: 2026 Tempo contributors
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP transport with bearer authentication and uniform status mapping.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};

use crate::config::ApiConfig;
use crate::envelope::Envelope;
use crate::error::ApiError;

/// HTTP client for the Tempo backend.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    config: ApiConfig,
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or client initialization
    /// fails.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        if config.base_url.is_empty() {
            return Err(ApiError::Config("base_url must be set".to_string()));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client, config })
    }

    /// Builds a request for a backend path with the bearer token attached.
    pub fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        let mut req = self.client.request(method, url);

        if let Some(token) = &self.config.token {
            req = req.bearer_auth(token);
        }

        req
    }

    /// Executes a request and maps error statuses.
    ///
    /// A 401 becomes [`ApiError::SessionExpired`]: the token is no longer
    /// valid and the caller must broadcast a logout. Any other non-success
    /// status becomes [`ApiError::Rejected`], with the message mined from the
    /// response envelope when one is present.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or returns an error status code.
    pub async fn execute(&self, req: RequestBuilder) -> Result<Response, ApiError> {
        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp);
        }

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::SessionExpired);
        }

        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Envelope<serde_json::Value>>(&body)
            .map(|env| env.message.joined())
            .ok()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| status.to_string());

        Err(ApiError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
