//! HTTP client for the controller's measurement endpoint.
//!
//! Issues `GET /getMeasures` and parses the body into a [`Snapshot`].
//! Only a 200 response with a well-formed body counts as success.
//!
//! ## Example
//!
//! ```rust,no_run
//! use poolwatch::{MeasurementClient, MeasurementSource};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MeasurementClient::builder()
//!         .endpoint("http://192.168.1.50")
//!         .timeout(Duration::from_secs(5))
//!         .build()?;
//!
//!     let snapshot = client.fetch().await?;
//!     println!("pH {} / ORP {} mV", snapshot.ph, snapshot.orp);
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use super::{FetchError, MeasurementSource};
use crate::data::Snapshot;

/// Path of the measurement endpoint, relative to the controller base URL.
pub const MEASURES_PATH: &str = "/getMeasures";

/// Default controller address when none is configured.
const DEFAULT_ENDPOINT: &str = "http://192.168.1.50";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Async client for `GET /getMeasures`.
#[derive(Debug, Clone)]
pub struct MeasurementClient {
    client: Client,
    url: String,
    description: String,
}

impl MeasurementClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> MeasurementClientBuilder {
        MeasurementClientBuilder::default()
    }

    /// The full URL that is polled.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl MeasurementSource for MeasurementClient {
    async fn fetch(&self) -> Result<Snapshot, FetchError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::BadStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        debug!(bytes = body.len(), url = %self.url, "received measures");

        Ok(Snapshot::from_json(&body)?)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Builder for [`MeasurementClient`].
#[derive(Debug, Default)]
pub struct MeasurementClientBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
}

impl MeasurementClientBuilder {
    /// Set the controller base URL (e.g., "http://192.168.1.50").
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the request timeout (default: 5 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<MeasurementClient, FetchError> {
        let client = Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()?;

        let endpoint = self
            .endpoint
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let url = measures_url(&endpoint);

        Ok(MeasurementClient {
            client,
            description: format!("http: {}", url),
            url,
        })
    }
}

// Join the base URL and the endpoint path without doubling the slash
fn measures_url(endpoint: &str) -> String {
    format!("{}{}", endpoint.trim_end_matches('/'), MEASURES_PATH)
}
