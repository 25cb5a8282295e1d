//! REST client for the Steam Web API item schema endpoints.
//!
//! Wraps `IEconItems_440/GetSchemaOverview` and `IEconItems_440/GetSchemaItems`
//! plus the paintkit token file using [`reqwest`], and exposes them as a
//! [`SchemaSource`].

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tf2schema_core::{ItemsPage, SchemaError, SchemaOverview, SchemaSource};

use crate::config::SteamConfig;
use crate::paintkits::parse_paintkits;

/// Status the Web API reports inside `result` for a successful call.
const STATUS_OK: i64 = 1;

/// HTTP client for the TF2 schema endpoints.
pub struct SteamSchemaSource {
    client: reqwest::Client,
    config: SteamConfig,
}

/// Errors from the Steam Web API layer.
#[derive(Debug, thiserror::Error)]
pub enum SteamApiError {
    /// No API key is configured.
    #[error("STEAM_API_KEY is not set")]
    MissingApiKey,

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Steam returned a non-2xx status code.
    #[error("Steam API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The body was not the expected `{"result": {...}}` document.
    #[error("Malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The call succeeded at the HTTP level but `result.status` is not 1.
    #[error("Steam reported status {status}: {note}")]
    Status { status: i64, note: String },
}

impl From<SteamApiError> for SchemaError {
    fn from(err: SteamApiError) -> Self {
        match err {
            SteamApiError::MissingApiKey => SchemaError::Configuration(err.to_string()),
            SteamApiError::Request(e) if e.is_decode() => {
                SchemaError::InvalidResponse(e.to_string())
            }
            SteamApiError::Request(e) => SchemaError::Fetch(e.to_string()),
            SteamApiError::ApiError { status, body } => SchemaError::Upstream { status, body },
            SteamApiError::Malformed(_) | SteamApiError::Status { .. } => {
                SchemaError::InvalidResponse(err.to_string())
            }
        }
    }
}

/// `{"result": {"status": 1, ...}}`
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    result: ResultBody<T>,
}

#[derive(Debug, Deserialize)]
struct ResultBody<T> {
    #[serde(default = "default_status")]
    status: i64,
    #[serde(default)]
    note: Option<String>,
    #[serde(flatten)]
    body: T,
}

fn default_status() -> i64 {
    STATUS_OK
}

/// Unwrap a Web API envelope, rejecting non-OK statuses.
fn decode_result<T: DeserializeOwned>(text: &str) -> Result<T, SteamApiError> {
    let envelope: Envelope<T> = serde_json::from_str(text)?;
    let result = envelope.result;

    if result.status != STATUS_OK {
        return Err(SteamApiError::Status {
            status: result.status,
            note: result.note.unwrap_or_default(),
        });
    }

    Ok(result.body)
}

impl SteamSchemaSource {
    /// Create a new client from `config`.
    pub fn new(config: SteamConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: SteamConfig) -> Self {
        Self { client, config }
    }

    /// `GET /IEconItems_440/GetSchemaOverview/v0001/`
    pub async fn get_schema_overview(&self) -> Result<SchemaOverview, SteamApiError> {
        let key = self.api_key()?;

        let response = self
            .client
            .get(format!(
                "{}/IEconItems_440/GetSchemaOverview/v0001/",
                self.config.api_url
            ))
            .query(&[("key", key), ("language", self.config.language.as_str())])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// `GET /IEconItems_440/GetSchemaItems/v0001/?start={cursor}`
    pub async fn get_schema_items(&self, cursor: u32) -> Result<ItemsPage, SteamApiError> {
        let key = self.api_key()?;
        let start = cursor.to_string();

        let response = self
            .client
            .get(format!(
                "{}/IEconItems_440/GetSchemaItems/v0001/",
                self.config.api_url
            ))
            .query(&[
                ("key", key),
                ("language", self.config.language.as_str()),
                ("start", start.as_str()),
            ])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Download the protobuf token file and extract the paintkit names.
    ///
    /// The file is public, so no API key is needed.
    pub async fn get_paintkits(&self) -> Result<BTreeMap<u32, String>, SteamApiError> {
        let response = self
            .client
            .get(&self.config.paintkits_url)
            .send()
            .await?;

        let body = Self::ensure_success(response).await?.text().await?;
        let paintkits = parse_paintkits(&body);
        tracing::debug!(count = paintkits.len(), "Parsed paintkit names");
        Ok(paintkits)
    }

    // ---- private helpers ----

    fn api_key(&self) -> Result<&str, SteamApiError> {
        self.config
            .api_key
            .as_deref()
            .ok_or(SteamApiError::MissingApiKey)
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`SteamApiError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, SteamApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(SteamApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful enveloped JSON response into the expected type.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, SteamApiError> {
        let response = Self::ensure_success(response).await?;
        let text = response.text().await?;
        decode_result(&text)
    }
}

#[async_trait]
impl SchemaSource for SteamSchemaSource {
    async fn fetch_overview(&self) -> Result<SchemaOverview, SchemaError> {
        Ok(self.get_schema_overview().await?)
    }

    async fn fetch_items_page(&self, cursor: u32) -> Result<ItemsPage, SchemaError> {
        Ok(self.get_schema_items(cursor).await?)
    }

    async fn fetch_paintkits(&self) -> Result<BTreeMap<u32, String>, SchemaError> {
        Ok(self.get_paintkits().await?)
    }
}
