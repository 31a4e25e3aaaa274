// ── Core error types ──
//
// Product operations fail with a `ProductError` whose `kind` is resolved
// from the WooCommerce error code, so callers can branch on "duplicate SKU"
// or "invalid image" without string matching. Everything else surfaces as
// `CoreError`. Both translate from `wcflux_api::Error`.

use strum::{AsRefStr, Display};
use thiserror::Error;

/// Product failure categories, keyed by the WooCommerce `code` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
pub enum ProductErrorType {
    InvalidProductId,
    InvalidParam,
    InvalidReviewId,
    InvalidImageId,
    DuplicateSku,
    TermExists,
    InvalidVariationImageId,
    InvalidMinMaxQuantity,
    GenericError,
}

impl ProductErrorType {
    /// Resolve a WooCommerce error code. Unknown codes map to `GenericError`.
    pub fn from_code(code: &str) -> Self {
        match code {
            "woocommerce_rest_product_invalid_id" => Self::InvalidProductId,
            "rest_invalid_param" => Self::InvalidParam,
            "woocommerce_rest_review_invalid_id" => Self::InvalidReviewId,
            "woocommerce_product_invalid_image_id" => Self::InvalidImageId,
            "product_invalid_sku" => Self::DuplicateSku,
            "term_exists" => Self::TermExists,
            "woocommerce_variation_invalid_image_id" => Self::InvalidVariationImageId,
            "woocommerce_rest_invalid_min_max_quantity" => Self::InvalidMinMaxQuantity,
            _ => Self::GenericError,
        }
    }
}

/// A failed product, variation, term, or review operation.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct ProductError {
    pub kind: ProductErrorType,
    pub message: String,
    /// HTTP status, when the failure came from the server.
    pub status: Option<u16>,
    /// Set when the store never answered (connection, TLS, timeout, decoding).
    #[source]
    pub cause: Option<CoreError>,
}

impl ProductError {
    pub fn new(kind: ProductErrorType, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            cause: None,
        }
    }
}

impl From<wcflux_api::Error> for ProductError {
    fn from(err: wcflux_api::Error) -> Self {
        match err {
            wcflux_api::Error::Api {
                message,
                code,
                status,
            } => Self {
                kind: code
                    .as_deref()
                    .map_or(ProductErrorType::GenericError, ProductErrorType::from_code),
                message,
                status: Some(status),
                cause: None,
            },
            wcflux_api::Error::Authentication { message } => Self {
                kind: ProductErrorType::GenericError,
                message,
                status: Some(401),
                cause: None,
            },
            other => {
                let cause = CoreError::from(other);
                Self {
                    kind: ProductErrorType::GenericError,
                    message: cause.to_string(),
                    status: None,
                    cause: Some(cause),
                }
            }
        }
    }
}

/// Unified error type for non-product failures.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to store at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Store connection timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// WooCommerce error code (e.g. `woocommerce_rest_cannot_view`).
        code: Option<String>,
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<wcflux_api::Error> for CoreError {
    fn from(err: wcflux_api::Error) -> Self {
        match err {
            wcflux_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            wcflux_api::Error::Transport(ref e) => {
                // Timeouts with a known limit arrive as `Error::Timeout`.
                if e.is_connect() || e.is_timeout() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        code: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            wcflux_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            wcflux_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            wcflux_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            wcflux_api::Error::Api {
                message,
                code,
                status,
            } => CoreError::Api {
                message,
                code,
                status: Some(status),
            },
            wcflux_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve() {
        let cases = [
            ("woocommerce_rest_product_invalid_id", ProductErrorType::InvalidProductId),
            ("rest_invalid_param", ProductErrorType::InvalidParam),
            ("woocommerce_rest_review_invalid_id", ProductErrorType::InvalidReviewId),
            ("woocommerce_product_invalid_image_id", ProductErrorType::InvalidImageId),
            ("product_invalid_sku", ProductErrorType::DuplicateSku),
            ("term_exists", ProductErrorType::TermExists),
            (
                "woocommerce_variation_invalid_image_id",
                ProductErrorType::InvalidVariationImageId,
            ),
            (
                "woocommerce_rest_invalid_min_max_quantity",
                ProductErrorType::InvalidMinMaxQuantity,
            ),
        ];
        for (code, kind) in cases {
            assert_eq!(ProductErrorType::from_code(code), kind, "{code}");
        }
    }

    #[test]
    fn unknown_code_is_generic() {
        assert_eq!(
            ProductErrorType::from_code("woocommerce_rest_cannot_edit"),
            ProductErrorType::GenericError
        );
    }

    #[test]
    fn api_error_carries_kind_and_status() {
        let err = ProductError::from(wcflux_api::Error::Api {
            message: "Invalid or duplicated SKU.".into(),
            code: Some("product_invalid_sku".into()),
            status: 400,
        });
        assert_eq!(err.kind, ProductErrorType::DuplicateSku);
        assert_eq!(err.status, Some(400));
        assert_eq!(err.to_string(), "DuplicateSku: Invalid or duplicated SKU.");
    }

    #[test]
    fn transport_failures_keep_their_cause() {
        let err = ProductError::from(wcflux_api::Error::Timeout { timeout_secs: 5 });
        assert_eq!(err.kind, ProductErrorType::GenericError);
        assert!(err.status.is_none());
        assert!(matches!(
            err.cause,
            Some(CoreError::Timeout { timeout_secs: 5 })
        ));
        assert_eq!(err.message, "Store connection timed out after 5s");
    }

    #[test]
    fn server_answers_have_no_cause() {
        let err = ProductError::from(wcflux_api::Error::Api {
            message: "Invalid ID.".into(),
            code: Some("woocommerce_rest_product_invalid_id".into()),
            status: 404,
        });
        assert!(err.cause.is_none());
    }

    #[test]
    fn core_error_maps_authentication() {
        let err = CoreError::from(wcflux_api::Error::Authentication {
            message: "bad key".into(),
        });
        assert!(matches!(err, CoreError::AuthenticationFailed { .. }));
    }
}
