// API client module: a small blocking HTTP client for the two endpoints the
// workflow talks to, the token endpoint (GET) and the application endpoint
// (POST). Both calls share one client configured with the run's timeout.

use crate::config::Config;
use crate::error::TransportError;
use crate::fields::ExtraInformation;
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};

/// Body sent to the application endpoint. Field names are the wire names.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ApplicationPayload {
    pub name: String,
    pub email: String,
    pub job_title: String,
    pub final_attempt: bool,
    pub extra_information: ExtraInformation,
}

/// Status code and body of a completed HTTP exchange, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        HttpReply {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The remote side of the workflow.
pub trait ApplicationApi {
    /// GET the token endpoint.
    fn fetch_token(&self) -> Result<HttpReply, TransportError>;

    /// POST `payload` as JSON, authorized with `token`.
    fn submit(&self, token: &str, payload: &ApplicationPayload) -> Result<HttpReply, TransportError>;
}

/// reqwest-backed implementation holding the configured endpoint URLs.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    secret_url: String,
    apply_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            secret_url: config.secret_url.clone(),
            apply_url: config.apply_url.clone(),
        })
    }

    fn auth_headers(token: &str) -> Result<HeaderMap, TransportError> {
        let mut headers = HeaderMap::new();
        let val = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| TransportError(format!("token is not a valid header value: {}", e)))?;
        headers.insert(AUTHORIZATION, val);
        Ok(headers)
    }

    fn read_reply(res: reqwest::blocking::Response) -> Result<HttpReply, TransportError> {
        let status = res.status().as_u16();
        let body = res.text()?;
        Ok(HttpReply { status, body })
    }
}

impl ApplicationApi for ApiClient {
    fn fetch_token(&self) -> Result<HttpReply, TransportError> {
        tracing::debug!(url = %self.secret_url, "fetching token");
        let res = self.client.get(&self.secret_url).send()?;
        Self::read_reply(res)
    }

    fn submit(&self, token: &str, payload: &ApplicationPayload) -> Result<HttpReply, TransportError> {
        tracing::debug!(url = %self.apply_url, "submitting application");
        // `.json()` sets `Content-Type: application/json`.
        let res = self
            .client
            .post(&self.apply_url)
            .headers(Self::auth_headers(token)?)
            .json(payload)
            .send()?;
        Self::read_reply(res)
    }
}
