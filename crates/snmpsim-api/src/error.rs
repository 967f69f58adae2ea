use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error type for the `snmpsim-api` crate.
///
/// Variants fall into three disjoint groups: local misuse (nothing was
/// sent), transport failure (the request never completed), and
/// [`HttpError`] (the server answered with an unexpected status).
#[derive(Debug, Error)]
pub enum Error {
    // ── Client misuse ───────────────────────────────────────────────
    /// A required argument was empty or otherwise unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The dispatcher only speaks GET, POST, PUT and DELETE.
    #[error("invalid http method: {0}")]
    InvalidMethod(reqwest::Method),

    /// Record-file paths must carry the `.snmprec` suffix.
    #[error("{path:?} is not a valid record file (expected a {} suffix)", crate::RECORD_FILE_EXTENSION)]
    NotRecordFile { path: String },

    /// Base URL or joined request URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A local record file could not be read before upload.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A request payload could not be encoded.
    #[error("error during marshal: {0}")]
    Serialization(#[source] serde_json::Error),

    /// TLS material could not be loaded or the HTTP client not built.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Transport ───────────────────────────────────────────────────
    /// The HTTP round trip could not complete (DNS, refused, timeout).
    #[error("error during http request: {0}")]
    Transport(#[from] reqwest::Error),

    // ── Domain ──────────────────────────────────────────────────────
    /// The server answered with a status other than the one expected.
    #[error(transparent)]
    Http(#[from] HttpError),

    // ── Data ────────────────────────────────────────────────────────
    /// A success body did not decode into the expected record.
    #[error("error during unmarshalling http response: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// HTTP status code when the server rejected the call.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http(e) => Some(e.status_code),
            _ => None,
        }
    }

    /// Returns `true` for a 404 from the server.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// Returns `true` for a 400 from the server (validation, duplicate,
    /// or a bad relationship).
    pub fn is_bad_request(&self) -> bool {
        self.status_code() == Some(400)
    }

    /// Returns `true` if the server could not be reached at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns `true` if the call was rejected locally without any
    /// network round trip.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument(_)
                | Self::InvalidMethod(_)
                | Self::NotRecordFile { .. }
                | Self::InvalidUrl(_)
                | Self::Io { .. }
                | Self::Serialization(_)
        )
    }

    /// The structured server error, if any.
    pub fn http_error(&self) -> Option<&HttpError> {
        match self {
            Self::Http(e) => Some(e),
            _ => None,
        }
    }
}

// ── HTTP error ──────────────────────────────────────────────────────

/// Error body shape returned by the simulator control plane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub status: i64,
}

/// A non-success response, classified.
///
/// `body` is `None` when the response body was not the documented
/// `{"message", "status"}` shape; that case is not a separate error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    pub status_code: u16,
    pub status: String,
    pub body: Option<ErrorResponse>,
}

impl HttpError {
    /// Build from a status line and the raw response body.
    pub fn new(status: reqwest::StatusCode, raw_body: &[u8]) -> Self {
        Self {
            status_code: status.as_u16(),
            status: status.to_string(),
            body: serde_json::from_slice(raw_body).ok(),
        }
    }

    /// Consume a response and classify it.
    ///
    /// A body that cannot be read is treated like one that cannot be
    /// decoded.
    pub async fn from_response(resp: reqwest::Response) -> Self {
        let status = resp.status();
        let raw = resp.bytes().await.unwrap_or_default();
        Self::new(status, &raw)
    }

    /// The decoded server message, if present.
    pub fn message(&self) -> Option<&str> {
        self.body.as_ref().map(|b| b.message.as_str())
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "http error: status code: {} // status: {}",
            self.status_code, self.status
        )?;
        if let Some(body) = &self.body {
            write!(f, " // message: {}", body.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for HttpError {}
