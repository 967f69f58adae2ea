// Management API HTTP client
//
// Owns a `Transport` and adds the call shapes every control-plane
// resource shares: list with filter, get, create, delete, and
// relationship link/unlink. Resource endpoints live in sibling files as
// inherent methods to keep this module focused on those shapes.

use std::time::Duration;

use reqwest::{Method, StatusCode};
use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Error;
use crate::filter::Filter;
use crate::transport::{Transport, TransportConfig};

/// Path prefix of the management API, relative to the service root.
pub const MGMT_PREFIX: &str = "snmpsim/mgmt/v1/";

/// Async client for the simulator management API (CRUD over labs,
/// agents, engines, endpoints, users, tags and record files).
#[derive(Debug, Clone)]
pub struct ManagementClient {
    transport: Transport,
}

impl ManagementClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build with default transport settings.
    ///
    /// `base_url` is the service root (e.g. `http://sim:8000/`); it must
    /// not be empty.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Self::with_config(base_url, &TransportConfig::default())
    }

    pub fn with_config(base_url: &str, config: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            transport: Transport::new(base_url, config)?,
        })
    }

    /// Wrap an existing `reqwest::Client`.
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

    // ── Call shapes ──────────────────────────────────────────────────

    pub(crate) fn path(rel: &str) -> String {
        format!("{MGMT_PREFIX}{rel}")
    }

    /// `GET {rel}` with optional filter, expecting 200 and a JSON array.
    pub(crate) async fn list<T: DeserializeOwned>(
        &self,
        rel: &str,
        filter: Option<&Filter>,
    ) -> Result<Vec<T>, Error> {
        self.transport
            .fetch_json(Method::GET, &Self::path(rel), "", filter, StatusCode::OK)
            .await
    }

    /// `GET {rel}`, expecting 200 and a JSON object.
    pub(crate) async fn get_one<T: DeserializeOwned>(&self, rel: &str) -> Result<T, Error> {
        self.transport
            .fetch_json(Method::GET, &Self::path(rel), "", None, StatusCode::OK)
            .await
    }

    /// `POST {rel}` with a JSON body, expecting 201 and the new object.
    pub(crate) async fn create<T: DeserializeOwned>(
        &self,
        rel: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        let body = serde_json::to_string(body).map_err(Error::Serialization)?;
        self.transport
            .fetch_json(
                Method::POST,
                &Self::path(rel),
                &body,
                None,
                StatusCode::CREATED,
            )
            .await
    }

    /// `DELETE {rel}`, expecting 204.
    pub(crate) async fn remove(&self, rel: &str) -> Result<(), Error> {
        self.transport
            .fetch_empty(
                Method::DELETE,
                &Self::path(rel),
                "",
                None,
                StatusCode::NO_CONTENT,
            )
            .await
    }

    /// `PUT {rel}` on a relationship or state sub-path, expecting 200.
    pub(crate) async fn link(&self, rel: &str) -> Result<(), Error> {
        self.transport
            .fetch_empty(Method::PUT, &Self::path(rel), "", None, StatusCode::OK)
            .await
    }

    /// `DELETE {rel}`, expecting 200 and the affected object.
    pub(crate) async fn remove_with_response<T: DeserializeOwned>(
        &self,
        rel: &str,
    ) -> Result<T, Error> {
        self.transport
            .fetch_json(Method::DELETE, &Self::path(rel), "", None, StatusCode::OK)
            .await
    }
}

/// Reject an empty required argument before any request is made.
pub(crate) fn require<'a>(value: &'a str, what: &'static str) -> Result<&'a str, Error> {
    if value.is_empty() {
        Err(Error::InvalidArgument(what))
    } else {
        Ok(value)
    }
}

/// Substitute `default` for an empty optional argument.
pub(crate) fn or_default<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => default,
    }
}
