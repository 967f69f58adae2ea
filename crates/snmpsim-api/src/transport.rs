// Shared transport for both API surfaces.
//
// `TransportConfig` builds the `reqwest::Client`; `Transport` is the
// client handle each façade owns: normalized base URL, optional basic-auth
// credentials, per-request timeout, and the single verb dispatcher.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::{Error, HttpError};
use crate::filter::Filter;
use crate::path::{escape_path, has_dot_segment};

/// TLS verification mode.
#[derive(Debug, Clone, Default)]
pub enum TlsMode {
    /// Use the system certificate store.
    #[default]
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (for self-signed lab deployments).
    DangerAcceptInvalid,
}

/// Settings used to build the underlying HTTP client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder().user_agent(concat!(
            "snmpsim-api/",
            env!("CARGO_PKG_VERSION")
        ));

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

/// HTTP basic-auth credentials.
#[derive(Debug, Clone)]
struct Credentials {
    username: String,
    password: SecretString,
}

/// Client handle shared by the management and metrics façades.
///
/// Read-only after construction except through [`set_credentials`] and
/// [`set_timeout`], which take `&mut self`.
///
/// [`set_credentials`]: Self::set_credentials
/// [`set_timeout`]: Self::set_timeout
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    base_url: Url,
    credentials: Option<Credentials>,
    timeout: Duration,
}

impl Transport {
    /// Build a transport with its own HTTP client.
    pub fn new(base_url: &str, config: &TransportConfig) -> Result<Self, Error> {
        let http = config.build_client()?;
        Ok(Self {
            http,
            base_url: Self::normalize_base_url(base_url)?,
            credentials: None,
            timeout: config.timeout,
        })
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: Self::normalize_base_url(base_url)?,
            credentials: None,
            timeout: TransportConfig::default().timeout,
        })
    }

    /// Reject empty input and make sure the path ends with `/` so that
    /// joining a relative path appends rather than replaces.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(Error::InvalidArgument("invalid base url"));
        }
        let mut url = Url::parse(raw)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether basic auth is attached to every request.
    pub fn auth_enabled(&self) -> bool {
        self.credentials.is_some()
    }

    /// Enable HTTP basic auth. Both parts must be non-empty.
    pub fn set_credentials(
        &mut self,
        username: impl Into<String>,
        password: SecretString,
    ) -> Result<(), Error> {
        let username = username.into();
        if username.is_empty() {
            return Err(Error::InvalidArgument("invalid username"));
        }
        if password.expose_secret().is_empty() {
            return Err(Error::InvalidArgument("invalid password"));
        }
        self.credentials = Some(Credentials { username, password });
        Ok(())
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    /// Issue exactly one HTTP request and return the raw response.
    ///
    /// `path` is escaped segment by segment and joined onto the base URL.
    /// A path with a `.` or `..` segment is rejected before sending.
    /// A non-empty `body` is attached verbatim. `Content-Type:
    /// application/json` is sent unless `headers` overrides it. No status
    /// checking happens here.
    pub async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: &str,
        headers: Option<HeaderMap>,
        query: Option<&Filter>,
    ) -> Result<reqwest::Response, Error> {
        if !matches!(
            method,
            Method::GET | Method::POST | Method::PUT | Method::DELETE
        ) {
            return Err(Error::InvalidMethod(method));
        }

        if has_dot_segment(path) {
            return Err(Error::InvalidArgument("path contains a dot segment"));
        }
        let url = self.base_url.join(&escape_path(path))?;
        debug!(%method, %url, ?query, "dispatching request");

        let mut request = self
            .http
            .request(method, url)
            .timeout(self.timeout)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(headers) = headers {
            request = request.headers(headers);
        }
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            request = request.query(query);
        }
        if !body.is_empty() {
            request = request.body(body.to_owned());
        }
        if let Some(creds) = &self.credentials {
            request = request.basic_auth(&creds.username, Some(creds.password.expose_secret()));
        }

        let resp = request.send().await?;
        trace!(status = %resp.status(), "response received");
        Ok(resp)
    }

    // ── Response handling ────────────────────────────────────────────

    /// Dispatch and decode a JSON body, requiring exactly `expected`.
    pub(crate) async fn fetch_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &str,
        query: Option<&Filter>,
        expected: StatusCode,
    ) -> Result<T, Error> {
        let resp = self.dispatch(method, path, body, None, query).await?;
        let text = Self::expect_text(resp, expected).await?;
        serde_json::from_str(&text).map_err(|e| {
            let preview: String = text.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: text.clone(),
            }
        })
    }

    /// Dispatch and discard the body, requiring exactly `expected`.
    pub(crate) async fn fetch_empty(
        &self,
        method: Method,
        path: &str,
        body: &str,
        headers: Option<HeaderMap>,
        expected: StatusCode,
    ) -> Result<(), Error> {
        let resp = self.dispatch(method, path, body, headers, None).await?;
        if resp.status() == expected {
            Ok(())
        } else {
            Err(HttpError::from_response(resp).await.into())
        }
    }

    /// Dispatch and return the body as text, requiring exactly `expected`.
    pub(crate) async fn fetch_text(
        &self,
        method: Method,
        path: &str,
        headers: Option<HeaderMap>,
        expected: StatusCode,
    ) -> Result<String, Error> {
        let resp = self.dispatch(method, path, "", headers, None).await?;
        Self::expect_text(resp, expected).await
    }

    async fn expect_text(resp: reqwest::Response, expected: StatusCode) -> Result<String, Error> {
        if resp.status() == expected {
            Ok(resp.text().await?)
        } else {
            Err(HttpError::from_response(resp).await.into())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let t = Transport::with_client("http://sim.local:8000/api", reqwest::Client::new()).unwrap();
        assert_eq!(t.base_url().as_str(), "http://sim.local:8000/api/");
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let err = Transport::with_client("  ", reqwest::Client::new()).err();
        assert!(matches!(err, Some(Error::InvalidArgument("invalid base url"))));
    }

    #[test]
    fn credentials_must_be_non_empty() {
        let mut t = Transport::with_client("http://sim.local/", reqwest::Client::new()).unwrap();
        assert!(t.set_credentials("", SecretString::from("pw")).is_err());
        assert!(t.set_credentials("admin", SecretString::from("")).is_err());
        assert!(!t.auth_enabled());
        assert!(t.set_credentials("admin", SecretString::from("pw")).is_ok());
        assert!(t.auth_enabled());
    }

    #[tokio::test]
    async fn unsupported_method_fails_before_sending() {
        let t = Transport::with_client("http://127.0.0.1:9/", reqwest::Client::new()).unwrap();
        let err = t.dispatch(Method::PATCH, "labs", "", None, None).await.err();
        assert!(matches!(err, Some(Error::InvalidMethod(m)) if m == Method::PATCH));
    }

    #[tokio::test]
    async fn dot_segments_fail_before_sending() {
        let t = Transport::with_client("http://127.0.0.1:9/", reqwest::Client::new()).unwrap();
        let err = t
            .dispatch(Method::GET, "snmpsim/mgmt/v1/recordings/../x.snmprec", "", None, None)
            .await
            .err();
        assert!(matches!(err, Some(Error::InvalidArgument(_))));
    }
}
