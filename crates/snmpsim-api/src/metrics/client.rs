// Metrics API HTTP client
//
// Every metrics call is a GET expecting 200, so this client needs a
// single call shape on top of the shared transport.

use std::time::Duration;

use reqwest::{Method, StatusCode};
use secrecy::SecretString;
use serde::de::DeserializeOwned;

use crate::error::Error;
use crate::filter::Filter;
use crate::transport::{Transport, TransportConfig};

/// Path prefix of the metrics API, relative to the service root.
pub const METRICS_PREFIX: &str = "snmpsim/metrics/v1/";

/// Async client for the simulator metrics API.
#[derive(Debug, Clone)]
pub struct MetricsClient {
    transport: Transport,
}

impl MetricsClient {
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Self::with_config(base_url, &TransportConfig::default())
    }

    pub fn with_config(base_url: &str, config: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            transport: Transport::new(base_url, config)?,
        })
    }

    pub fn with_client(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self {
            transport: Transport::with_client(base_url, http)?,
        })
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Enable HTTP basic auth for all subsequent calls.
    pub fn set_credentials(
        &mut self,
        username: impl Into<String>,
        password: SecretString,
    ) -> Result<(), Error> {
        self.transport.set_credentials(username, password)
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.transport.set_timeout(timeout);
    }

    /// `GET {rel}` with optional filter, expecting 200.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        rel: &str,
        filter: Option<&Filter>,
    ) -> Result<T, Error> {
        self.transport
            .fetch_json(
                Method::GET,
                &format!("{METRICS_PREFIX}{rel}"),
                "",
                filter,
                StatusCode::OK,
            )
            .await
    }
}
