//! CLI error types with miette diagnostics.
//!
//! Maps core and config failures into user-facing errors with help text
//! and distinct exit codes.

use miette::Diagnostic;
use thiserror::Error;

use wcflux_config::ConfigError;
use wcflux_core::{CoreError, ProductError, ProductErrorType};

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
    #[error("Could not connect to store at {url}")]
    #[diagnostic(
        code(wcflux::connection_failed),
        help(
            "Check the site URL and that the store is reachable.\n\
             Self-signed certificate? Try --insecure (-k).\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(wcflux::auth_failed),
        help(
            "Check the application password or REST API key and its permissions.\n\
             Run: wcflux config set-secret"
        )
    )]
    AuthFailed { message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(wcflux::no_credentials),
        help(
            "Configure credentials with: wcflux config init\n\
             Or set WCFLUX_USERNAME and WCFLUX_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} not found: {detail}")]
    #[diagnostic(
        code(wcflux::not_found),
        help("Run: wcflux {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        detail: String,
        list_command: String,
    },

    #[error("{message}")]
    #[diagnostic(code(wcflux::conflict))]
    Conflict { message: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error ({code}): {message}")]
    #[diagnostic(code(wcflux::api_error))]
    ApiError { code: String, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(wcflux::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(wcflux::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: wcflux config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No store configured")]
    #[diagnostic(
        code(wcflux::no_config),
        help(
            "Create a profile with: wcflux config init\n\
             Expected at: {path}\n\
             Or pass --site-url with WCFLUX_USERNAME / WCFLUX_PASSWORD."
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(wcflux::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(wcflux::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(wcflux::timeout),
        help("Increase the timeout with --timeout or check store responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML output failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::ProfileNotFound { .. }
            | Self::NoConfig { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── Conversions ──────────────────────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::Timeout { timeout_secs } => Self::Timeout {
                seconds: timeout_secs,
            },
            CoreError::Api { message, code, .. } => Self::ApiError {
                code: code.unwrap_or_else(|| "unknown".into()),
                message,
            },
            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::Internal(message) => Self::ApiError {
                code: "internal".into(),
                message,
            },
        }
    }
}

impl From<ProductError> for CliError {
    fn from(err: ProductError) -> Self {
        if let Some(cause) = err.cause {
            return cause.into();
        }
        match (err.kind, err.status) {
            (_, Some(401 | 403)) => Self::AuthFailed {
                message: err.message,
            },
            (ProductErrorType::InvalidProductId, _) => Self::NotFound {
                resource_type: "product".into(),
                detail: err.message,
                list_command: "products list".into(),
            },
            (ProductErrorType::InvalidReviewId, _) => Self::NotFound {
                resource_type: "review".into(),
                detail: err.message,
                list_command: "reviews list".into(),
            },
            (ProductErrorType::DuplicateSku | ProductErrorType::TermExists, _) => Self::Conflict {
                message: err.message,
            },
            (_, Some(404)) => Self::NotFound {
                resource_type: "resource".into(),
                detail: err.message,
                list_command: "products list".into(),
            },
            (kind, _) => Self::ApiError {
                code: kind.to_string(),
                message: err.message,
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_sku_is_a_conflict() {
        let err = CliError::from(ProductError::new(
            ProductErrorType::DuplicateSku,
            "Invalid or duplicated SKU.",
        ));
        assert_eq!(err.exit_code(), exit_code::CONFLICT);
    }

    #[test]
    fn invalid_product_id_is_not_found() {
        let err = CliError::from(ProductError::new(
            ProductErrorType::InvalidProductId,
            "Invalid ID.",
        ));
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
    }

    #[test]
    fn unauthorized_wins_over_kind() {
        let err = CliError::from(ProductError {
            kind: ProductErrorType::GenericError,
            message: "Sorry, you cannot list resources.".into(),
            status: Some(401),
            cause: None,
        });
        assert_eq!(err.exit_code(), exit_code::AUTH);
    }

    fn failed_before_answer(cause: CoreError) -> ProductError {
        ProductError {
            message: cause.to_string(),
            cause: Some(cause),
            ..ProductError::new(ProductErrorType::GenericError, "")
        }
    }

    #[test]
    fn transport_causes_keep_their_exit_codes() {
        let timeout = CliError::from(failed_before_answer(CoreError::Timeout { timeout_secs: 7 }));
        assert_eq!(timeout.exit_code(), exit_code::TIMEOUT);
        assert!(timeout.to_string().contains("7s"));

        let refused = CliError::from(failed_before_answer(CoreError::ConnectionFailed {
            url: "http://127.0.0.1:1/".into(),
            reason: "connection refused".into(),
        }));
        assert_eq!(refused.exit_code(), exit_code::CONNECTION);
    }

    #[test]
    fn missing_credentials_map_to_auth_exit() {
        let err = CliError::from(ConfigError::NoCredentials {
            profile: "shop".into(),
        });
        assert_eq!(err.exit_code(), exit_code::AUTH);
    }
}
