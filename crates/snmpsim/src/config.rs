//! CLI-side configuration: profile selection and flag overrides on top of
//! `snmpsim_config`.
//!
//! Flags beat environment, which beats the profile, which beats
//! `[defaults]`.

use std::collections::HashMap;

use snmpsim_api::{ManagementClient, MetricsClient};
use snmpsim_config::ResolvedProfile;

pub use snmpsim_config::{Config, Profile, config_path, load_config_or_default, save_config};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Connection settings for one invocation.
pub type Connection = ResolvedProfile;

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.profile_name(global.profile.as_deref()).to_owned()
}

/// Comma-separated profile names, sorted, or `(none)`.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

/// Apply flag overrides to a profile.
fn apply_overrides(profile: &mut Profile, global: &GlobalOpts) {
    if let Some(ref url) = global.url {
        profile.url.clone_from(url);
    }
    if let Some(ref username) = global.username {
        profile.username = Some(username.clone());
    }
    if let Some(ref password) = global.password {
        profile.password = Some(password.clone());
        profile.password_env = None;
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
}

/// Build the connection for a command from config file, profile and flags.
///
/// Without a matching profile, `--url` alone is enough.
pub fn resolve_connection(global: &GlobalOpts) -> Result<Connection, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let mut profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None if global.url.is_some() => Profile::default(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(&cfg),
            });
        }
        None => {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
    };
    apply_overrides(&mut profile, global);

    tracing::debug!(profile = %profile_name, url = %profile.url, "resolved connection");

    let single = Config {
        profiles: HashMap::from([(profile_name.clone(), profile)]),
        ..cfg
    };
    Ok(snmpsim_config::resolve_profile(&single, &profile_name)?)
}

pub fn management_client(connection: &Connection) -> Result<ManagementClient, CliError> {
    let mut client = ManagementClient::with_config(&connection.base_url, &connection.transport)?;
    if let Some((ref username, ref password)) = connection.credentials {
        client.set_credentials(username.clone(), password.clone())?;
    }
    Ok(client)
}

pub fn metrics_client(connection: &Connection) -> Result<MetricsClient, CliError> {
    let mut client = MetricsClient::with_config(&connection.base_url, &connection.transport)?;
    if let Some((ref username, ref password)) = connection.credentials {
        client.set_credentials(username.clone(), password.clone())?;
    }
    Ok(client)
}
