// # HTTP Directory Client
//
// This crate provides a reqwest-backed implementation of `DirectoryApi`
// against the `phonebookd` wire surface.
//
// ## Constraints
//
// The client is a single-shot transport:
// - One HTTP request per trait call, with a fixed timeout
// - No retry logic (every failure is terminal for that attempt;
//   reconciliation is owned by the `SyncController`)
// - No caching (the client cache is owned by the `SyncController`)
//
// ## Error Mapping
//
// Failures are mapped from the wire back into the core taxonomy:
// - transport failure (server unreachable, timeout) → `Error::Network`
// - 404 with `{"error": "person not found"}` → `Error::NotFound`
// - 400 with the uniqueness message → `Error::Conflict`
// - any other 400 → `Error::Validation`
// - anything else non-success → `Error::Http`

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use phonebook_core::config::ClientConfig;
use phonebook_core::model::{Contact, ContactPayload};
use phonebook_core::traits::DirectoryApi;
use phonebook_core::{Error, Result};

/// Default per-request timeout
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Structured error body produced by the server
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

/// reqwest-backed [`DirectoryApi`] implementation
#[derive(Debug, Clone)]
pub struct HttpDirectoryApi {
    /// Server base URL, without a trailing slash
    base_url: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

impl HttpDirectoryApi {
    /// Create a client against `base_url` with the default timeout
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_HTTP_TIMEOUT)
    }

    /// Create a client with an explicit per-request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::http(format!("failed to build HTTP client: {e}")))?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { base_url, client })
    }

    /// Create a client from configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        Self::with_timeout(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    fn collection_url(&self) -> String {
        format!("{}/api/contacts", self.base_url)
    }

    fn contact_url(&self, id: &str) -> String {
        format!("{}/api/contacts/{}", self.base_url, id)
    }

    /// Map a non-success response into the core error taxonomy
    async fn error_from_response(response: reqwest::Response) -> Error {
        let status = response.status().as_u16();
        let message = match response.json::<ApiErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => String::new(),
        };
        map_status(status, message)
    }
}

/// Translate an HTTP status plus server error message into [`Error`]
fn map_status(status: u16, message: String) -> Error {
    match status {
        404 => {
            if message.is_empty() {
                Error::not_found("person not found")
            } else {
                Error::not_found(message)
            }
        }
        400 => {
            if message.contains("unique") {
                Error::conflict(message)
            } else if message.is_empty() {
                Error::validation("name or number missing")
            } else {
                Error::validation(message)
            }
        }
        other => Error::http(format!("unexpected status {other}: {message}")),
    }
}

fn transport(err: reqwest::Error) -> Error {
    Error::network(err.to_string())
}

#[async_trait]
impl DirectoryApi for HttpDirectoryApi {
    async fn list(&self) -> Result<Vec<Contact>> {
        debug!(url = %self.collection_url(), "GET collection");
        let response = self
            .client
            .get(self.collection_url())
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        response.json().await.map_err(transport)
    }

    async fn create(&self, payload: &ContactPayload) -> Result<Contact> {
        let response = self
            .client
            .post(self.collection_url())
            .json(payload)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        response.json().await.map_err(transport)
    }

    async fn get(&self, id: &str) -> Result<Contact> {
        let response = self
            .client
            .get(self.contact_url(id))
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        response.json().await.map_err(transport)
    }

    async fn update(&self, id: &str, payload: &ContactPayload) -> Result<Contact> {
        let response = self
            .client
            .put(self.contact_url(id))
            .json(payload)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        response.json().await.map_err(transport)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.contact_url(id))
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        // 204: no body to read
        Ok(())
    }
}
