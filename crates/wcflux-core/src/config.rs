// ── Runtime store configuration ──
//
// Describes how to reach one WooCommerce store. Carries credentials and
// connection tuning but never touches disk; the CLI builds a `StoreConfig`
// and hands it to `ProductStore::new`.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;
use wcflux_api::{Credentials, RouteStyle, TlsMode, TransportConfig};

/// How to authenticate with the store.
#[derive(Debug, Clone)]
pub enum AuthCredentials {
    /// WordPress application password.
    ApplicationPassword {
        username: String,
        password: SecretString,
    },
    /// WooCommerce REST API consumer key and secret.
    ConsumerKey { key: String, secret: SecretString },
}

impl From<AuthCredentials> for Credentials {
    fn from(auth: AuthCredentials) -> Self {
        match auth {
            AuthCredentials::ApplicationPassword { username, password } => {
                Credentials::ApplicationPassword { username, password }
            }
            AuthCredentials::ConsumerKey { key, secret } => Credentials::ConsumerKey { key, secret },
        }
    }
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed local stores).
    DangerAcceptInvalid,
}

impl From<TlsVerification> for TlsMode {
    fn from(tls: TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        }
    }
}

/// Configuration for one store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Site URL (e.g. `https://shop.example.com`).
    pub url: Url,
    pub auth: AuthCredentials,
    /// Local identifier stamped on every cached model.
    pub site_id: i64,
    pub route_style: RouteStyle,
    pub tls: TlsVerification,
    pub timeout: Duration,
}

impl StoreConfig {
    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: self.tls.clone().into(),
            timeout: self.timeout,
        }
    }
}
