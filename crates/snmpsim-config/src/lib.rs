//! Shared configuration for snmpsim tools.
//!
//! TOML profiles, credential resolution (env + plaintext), and
//! translation into the `snmpsim_api` transport settings. The CLI layers
//! its flag overrides on top of what this crate resolves.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use snmpsim_api::{TlsMode, TransportConfig};

/// Environment prefix for overrides; nested keys use `__`
/// (`SNMPSIM_DEFAULTS__TIMEOUT=60`).
pub const ENV_PREFIX: &str = "SNMPSIM_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{0}' not found in config")]
    UnknownProfile(String),

    #[error("no password configured for user '{username}' in profile '{profile}'")]
    NoPassword { profile: String, username: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named simulator profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Name of the profile to use: the explicit one, else the configured
    /// default, else `"default"`.
    pub fn profile_name<'a>(&'a self, explicit: Option<&'a str>) -> &'a str {
        explicit
            .or(self.default_profile.as_deref())
            .unwrap_or("default")
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile(name.into()))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named simulator profile.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Profile {
    /// Service root (e.g., "http://127.0.0.1:8000/").
    pub url: String,

    /// Username for HTTP basic auth.
    pub username: Option<String>,

    /// Password (plaintext; prefer `password_env`).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "snmpsim", "snmpsim").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("snmpsim");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from a specific file + environment. A missing file yields the
/// defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if it can't be read.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution (without CLI flags) ───────────────────────

/// Resolve the profile password: `password_env` first, then plaintext.
pub fn resolve_password(profile: &Profile) -> Option<SecretString> {
    if let Some(ref env_name) = profile.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Some(SecretString::from(val));
        }
    }
    profile.password.clone().map(SecretString::from)
}

/// Basic-auth credentials for a profile. `None` when the profile has no
/// username; a username without any password is an error.
pub fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
) -> Result<Option<(String, SecretString)>, ConfigError> {
    let Some(username) = profile.username.clone().filter(|u| !u.is_empty()) else {
        return Ok(None);
    };
    match resolve_password(profile) {
        Some(password) => Ok(Some((username, password))),
        None => Err(ConfigError::NoPassword {
            profile: profile_name.into(),
            username,
        }),
    }
}

// ── Profile resolution ──────────────────────────────────────────────

/// Everything needed to build an API client from a profile.
#[derive(Debug, Clone)]
pub struct ResolvedProfile {
    pub name: String,
    pub base_url: String,
    pub transport: TransportConfig,
    pub credentials: Option<(String, SecretString)>,
}

/// TLS mode for a profile: profile `insecure` beats the global default,
/// then a custom CA, then system roots.
pub fn profile_tls(profile: &Profile, defaults: &Defaults) -> TlsMode {
    if profile.insecure.unwrap_or(defaults.insecure) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    }
}

/// Build a `ResolvedProfile` from config alone, no CLI flag overrides.
pub fn resolve_profile(cfg: &Config, profile_name: &str) -> Result<ResolvedProfile, ConfigError> {
    let profile = cfg.profile(profile_name)?;

    url::Url::parse(&profile.url).map_err(|_| ConfigError::Validation {
        field: "url".into(),
        reason: format!("invalid URL: {}", profile.url),
    })?;

    let timeout = Duration::from_secs(profile.timeout.unwrap_or(cfg.defaults.timeout));

    Ok(ResolvedProfile {
        name: profile_name.into(),
        base_url: profile.url.clone(),
        transport: TransportConfig {
            tls: profile_tls(profile, &cfg.defaults),
            timeout,
        },
        credentials: resolve_credentials(profile, profile_name)?,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    fn lab_profile() -> Profile {
        Profile {
            url: "http://127.0.0.1:8000/".into(),
            username: Some("admin".into()),
            password: Some("plain".into()),
            ..Profile::default()
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.profiles.insert("lab".into(), lab_profile());
        cfg.default_profile = Some("lab".into());
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.default_profile.as_deref(), Some("lab"));
        assert_eq!(loaded.profiles["lab"].url, "http://127.0.0.1:8000/");
        assert_eq!(loaded.defaults.timeout, 30);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.defaults.output, "table");
        assert_eq!(cfg.profile_name(None), "default");
        assert_eq!(cfg.profile_name(Some("other")), "other");
    }

    #[test]
    fn resolve_profile_applies_overrides() {
        let mut cfg = Config::default();
        cfg.defaults.timeout = 10;
        cfg.profiles.insert(
            "lab".into(),
            Profile {
                insecure: Some(true),
                timeout: Some(3),
                ..lab_profile()
            },
        );

        let resolved = resolve_profile(&cfg, "lab").unwrap();
        assert_eq!(resolved.transport.timeout, Duration::from_secs(3));
        assert!(matches!(resolved.transport.tls, TlsMode::DangerAcceptInvalid));
        let (user, password) = resolved.credentials.unwrap();
        assert_eq!(user, "admin");
        assert_eq!(password.expose_secret(), "plain");
    }

    #[test]
    fn ca_cert_selects_custom_roots() {
        let profile = Profile {
            ca_cert: Some("/etc/ssl/lab-ca.pem".into()),
            ..lab_profile()
        };
        assert!(matches!(
            profile_tls(&profile, &Defaults::default()),
            TlsMode::CustomCa(ref p) if p == Path::new("/etc/ssl/lab-ca.pem")
        ));
    }

    #[test]
    fn username_without_password_is_rejected() {
        let profile = Profile {
            password: None,
            ..lab_profile()
        };
        assert!(matches!(
            resolve_credentials(&profile, "lab"),
            Err(ConfigError::NoPassword { .. })
        ));

        let anonymous = Profile {
            username: None,
            ..lab_profile()
        };
        assert!(resolve_credentials(&anonymous, "lab").unwrap().is_none());
    }

    #[test]
    fn unknown_profile_and_bad_url() {
        let mut cfg = Config::default();
        assert!(matches!(
            resolve_profile(&cfg, "nope"),
            Err(ConfigError::UnknownProfile(_))
        ));

        cfg.profiles.insert(
            "broken".into(),
            Profile {
                url: "not a url".into(),
                ..Profile::default()
            },
        );
        assert!(matches!(
            resolve_profile(&cfg, "broken"),
            Err(ConfigError::Validation { .. })
        ));
    }
}
