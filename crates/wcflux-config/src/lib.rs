//! Configuration for the wcflux CLI.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext), and
//! translation to `wcflux_core::StoreConfig`. The CLI layers flag overrides
//! on top.

use std::collections::BTreeMap;
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

use wcflux_api::RouteStyle;
use wcflux_core::{AuthCredentials, StoreConfig, TlsVerification};

/// Service name for keyring entries.
pub const KEYRING_SERVICE: &str = "wcflux";

/// Overrides the config file location when set.
pub const CONFIG_PATH_ENV: &str = "WCFLUX_CONFIG";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{name}' not found")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// The profile to use when none is named explicitly.
    pub fn active_profile_name(&self) -> &str {
        self.default_profile.as_deref().unwrap_or("default")
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,

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

/// A named store profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Store base URL (e.g. "https://shop.example.com").
    pub site_url: String,

    /// Local site identifier stamped on cached records.
    #[serde(default = "default_site_id")]
    pub site_id: i64,

    /// "application-password" or "consumer-key".
    #[serde(default = "default_auth_mode")]
    pub auth_mode: String,

    pub username: Option<String>,

    /// Application password (plaintext; prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable holding the application password.
    pub password_env: Option<String>,

    pub consumer_key: Option<String>,

    /// Consumer secret (plaintext; prefer keyring or env var).
    pub consumer_secret: Option<String>,

    /// Environment variable holding the consumer secret.
    pub consumer_secret_env: Option<String>,

    /// "pretty" (`/wp-json/`) or "query" (`?rest_route=`).
    #[serde(default = "default_route_style")]
    pub route_style: String,

    pub ca_cert: Option<PathBuf>,

    pub insecure: Option<bool>,

    pub timeout: Option<u64>,
}

fn default_site_id() -> i64 {
    1
}
fn default_auth_mode() -> String {
    "application-password".into()
}
fn default_route_style() -> String {
    "pretty".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `$WCFLUX_CONFIG`, else platform conventions.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("com", "wcflux", "wcflux").map_or_else(
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
    p.push("wcflux");
    p
}

// ── Loading & saving ────────────────────────────────────────────────

/// Load the full config from the canonical file and environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Layer defaults, the TOML file at `path`, then `WCFLUX_*` variables.
///
/// Nested keys use a double underscore: `WCFLUX_PROFILES__SHOP__TIMEOUT=60`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("WCFLUX_").split("__"));

    Ok(figment.extract()?)
}

pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(&config_path(), cfg)
}

pub fn save_config_to(path: &Path, cfg: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Which secret a keyring entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretKind {
    Password,
    ConsumerSecret,
}

impl SecretKind {
    fn keyring_user(self, profile_name: &str) -> String {
        match self {
            Self::Password => format!("{profile_name}/password"),
            Self::ConsumerSecret => format!("{profile_name}/consumer-secret"),
        }
    }
}

/// Store a secret for `profile_name` in the system keyring.
pub fn store_secret(profile_name: &str, kind: SecretKind, secret: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &kind.keyring_user(profile_name))?;
    entry.set_password(secret)?;
    Ok(())
}

/// Env var named by the profile, then the keyring, then plaintext.
fn resolve_secret(
    env_name: Option<&str>,
    plaintext: Option<&str>,
    kind: SecretKind,
    profile_name: &str,
) -> Result<SecretString, ConfigError> {
    if let Some(val) = env_name.and_then(|name| std::env::var(name).ok()) {
        return Ok(SecretString::from(val));
    }

    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &kind.keyring_user(profile_name)) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    if let Some(value) = plaintext {
        return Ok(SecretString::from(value.to_owned()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Resolve `AuthCredentials` from a profile's `auth_mode`.
pub fn resolve_auth(profile: &Profile, profile_name: &str) -> Result<AuthCredentials, ConfigError> {
    let missing = || ConfigError::NoCredentials {
        profile: profile_name.into(),
    };

    match profile.auth_mode.as_str() {
        "application-password" => {
            let username = profile.username.clone().ok_or_else(missing)?;
            let password = resolve_secret(
                profile.password_env.as_deref(),
                profile.password.as_deref(),
                SecretKind::Password,
                profile_name,
            )?;
            Ok(AuthCredentials::ApplicationPassword { username, password })
        }
        "consumer-key" => {
            let key = profile.consumer_key.clone().ok_or_else(missing)?;
            let secret = resolve_secret(
                profile.consumer_secret_env.as_deref(),
                profile.consumer_secret.as_deref(),
                SecretKind::ConsumerSecret,
                profile_name,
            )?;
            Ok(AuthCredentials::ConsumerKey { key, secret })
        }
        other => Err(ConfigError::Validation {
            field: "auth_mode".into(),
            reason: format!("expected 'application-password' or 'consumer-key', got '{other}'"),
        }),
    }
}

pub fn parse_route_style(raw: &str) -> Result<RouteStyle, ConfigError> {
    match raw {
        "pretty" => Ok(RouteStyle::Pretty),
        "query" | "rest_route" => Ok(RouteStyle::QueryParam),
        other => Err(ConfigError::Validation {
            field: "route_style".into(),
            reason: format!("expected 'pretty' or 'query', got '{other}'"),
        }),
    }
}

/// Build a `StoreConfig` from a profile without CLI overrides.
pub fn profile_to_store_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<StoreConfig, ConfigError> {
    let url: url::Url = profile
        .site_url
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "site_url".into(),
            reason: format!("invalid URL: {}", profile.site_url),
        })?;

    let auth = resolve_auth(profile, profile_name)?;

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    Ok(StoreConfig {
        url,
        auth,
        site_id: profile.site_id,
        route_style: parse_route_style(&profile.route_style)?,
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
    })
}
