//! CLI configuration: thin wrapper around `wcflux_config`.
//!
//! Adds resolution that honours `GlobalOpts` overrides (--site-url,
//! --insecure, --timeout, ...).

use std::time::Duration;

use secrecy::SecretString;

use wcflux_core::{AuthCredentials, RouteStyle, StoreConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use wcflux_config::{
    Config, Profile, SecretKind, config_path, load_config, save_config, store_secret,
};

/// Resolve the active profile name from flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .unwrap_or_else(|| config.active_profile_name().to_owned())
}

/// Build the `StoreConfig` for this invocation.
///
/// A configured profile is used with flag overrides on top. Without one,
/// `--site-url` plus username/password flags (or their env vars) suffice.
pub fn build_store_config(global: &GlobalOpts) -> Result<StoreConfig, CliError> {
    let cfg = load_config()?;
    let profile_name = active_profile_name(global, &cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        return resolve_profile(profile, &profile_name, &cfg, global);
    }

    // An explicitly named profile must exist.
    if global.profile.is_some() {
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available_profiles(&cfg),
        });
    }

    let url_str = global.site_url.as_deref().ok_or_else(|| CliError::NoConfig {
        path: config_path().display().to_string(),
    })?;
    let url = parse_url(url_str)?;

    let (Some(username), Some(password)) = (&global.username, &global.password) else {
        return Err(CliError::NoCredentials {
            profile: profile_name,
        });
    };

    Ok(StoreConfig {
        url,
        auth: AuthCredentials::ApplicationPassword {
            username: username.clone(),
            password: SecretString::from(password.clone()),
        },
        site_id: 1,
        route_style: RouteStyle::default(),
        tls: if global.insecure {
            TlsVerification::DangerAcceptInvalid
        } else {
            TlsVerification::SystemDefaults
        },
        timeout: Duration::from_secs(global.timeout.unwrap_or(cfg.defaults.timeout)),
    })
}

/// Translate a profile plus flag overrides into a `StoreConfig`.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<StoreConfig, CliError> {
    let mut store = wcflux_config::profile_to_store_config(profile, profile_name, &cfg.defaults)?;

    if let Some(ref url) = global.site_url {
        store.url = parse_url(url)?;
    }
    if let (Some(username), Some(password)) = (&global.username, &global.password) {
        store.auth = AuthCredentials::ApplicationPassword {
            username: username.clone(),
            password: SecretString::from(password.clone()),
        };
    }
    if global.insecure {
        store.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        store.timeout = Duration::from_secs(secs);
    }
    Ok(store)
}

pub fn available_profiles(cfg: &Config) -> String {
    if cfg.profiles.is_empty() {
        return "(none)".into();
    }
    cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
}

fn parse_url(raw: &str) -> Result<url::Url, CliError> {
    raw.parse().map_err(|_| CliError::Validation {
        field: "site-url".into(),
        reason: format!("invalid URL: {raw}"),
    })
}
