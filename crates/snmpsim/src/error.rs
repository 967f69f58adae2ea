//! CLI error types with miette diagnostics.
//!
//! Maps `snmpsim_api::Error` and `ConfigError` into user-facing errors
//! with actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use snmpsim_api::Error as ApiError;
use snmpsim_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to simulator at {url}")]
    #[diagnostic(
        code(snmpsim::connection_failed),
        help(
            "Check that the simulator control plane is running and reachable.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: ApiError,
    },

    #[error("TLS setup failed: {message}")]
    #[diagnostic(
        code(snmpsim::tls_error),
        help("Use --insecure (-k) for self-signed lab deployments, or set ca_cert in your profile.")
    )]
    Tls { message: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(snmpsim::timeout),
        help("Increase timeout with --timeout or check simulator responsiveness.")
    )]
    Timeout {
        #[source]
        source: ApiError,
    },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed ({status})")]
    #[diagnostic(
        code(snmpsim::auth_failed),
        help("Check --username/--password or the profile's password_env.")
    )]
    AuthFailed { status: u16 },

    #[error("No password for user '{username}' in profile '{profile}'")]
    #[diagnostic(
        code(snmpsim::no_password),
        help("Pass --password, set SNMPSIM_PASSWORD, or configure password_env in the profile.")
    )]
    NoPassword { profile: String, username: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("Not found: {message}")]
    #[diagnostic(
        code(snmpsim::not_found),
        help("Run the matching `list` subcommand to see available IDs.")
    )]
    NotFound { message: String },

    #[error("Rejected by simulator: {message}")]
    #[diagnostic(
        code(snmpsim::bad_request),
        help(
            "The name may already be taken, or the relationship may be invalid\n\
             or already in place."
        )
    )]
    BadRequest { message: String },

    #[error("API error ({status}): {message}")]
    #[diagnostic(code(snmpsim::api_error))]
    Api { status: u16, message: String },

    #[error("Unexpected response from simulator: {message}")]
    #[diagnostic(code(snmpsim::unexpected_response))]
    UnexpectedResponse { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(snmpsim::validation))]
    Validation { field: String, reason: String },

    #[error("'{path}' is not a record file")]
    #[diagnostic(code(snmpsim::not_record_file), help("Record file paths must end in .snmprec."))]
    NotRecordFile { path: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(snmpsim::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: snmpsimctl config init <URL> --name {name}"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No simulator URL configured")]
    #[diagnostic(
        code(snmpsim::no_config),
        help(
            "Pass --url, set SNMPSIM_URL, or create a profile with: snmpsimctl config init <URL>\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(snmpsim::config))]
    Config(Box<ConfigError>),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error("Failed to read {path}")]
    #[diagnostic(code(snmpsim::io))]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to render TOML: {0}")]
    Toml(#[from] toml::ser::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::Tls { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoPassword { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::BadRequest { .. } => exit_code::CONFLICT,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. }
            | Self::NotRecordFile { .. }
            | Self::ProfileNotFound { .. }
            | Self::NoConfig { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::NoPassword { profile, username } => Self::NoPassword { profile, username },
            other => Self::Config(Box::new(other)),
        }
    }
}

// ── ApiError → CliError mapping ──────────────────────────────────────

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        if let Some(http) = err.http_error() {
            let status = http.status_code;
            let message = http.message().unwrap_or(&http.status).to_owned();
            return match status {
                400 => Self::BadRequest { message },
                401 | 403 => Self::AuthFailed { status },
                404 => Self::NotFound { message },
                _ => Self::Api { status, message },
            };
        }

        let transport = match &err {
            ApiError::Transport(e) => Some((
                e.is_timeout(),
                e.url()
                    .map_or_else(|| "(unknown)".into(), ToString::to_string),
            )),
            _ => None,
        };
        if let Some((timed_out, url)) = transport {
            return if timed_out {
                Self::Timeout { source: err }
            } else {
                Self::ConnectionFailed { url, source: err }
            };
        }

        match err {
            ApiError::NotRecordFile { path } => Self::NotRecordFile { path },
            ApiError::Io { path, source } => Self::ReadFile {
                path: path.display().to_string(),
                source,
            },
            ApiError::Tls(message) => Self::Tls { message },
            ApiError::InvalidArgument(reason) => Self::Validation {
                field: "argument".into(),
                reason: reason.into(),
            },
            ApiError::InvalidUrl(e) => Self::Validation {
                field: "url".into(),
                reason: e.to_string(),
            },
            other => Self::UnexpectedResponse {
                message: other.to_string(),
            },
        }
    }
}
