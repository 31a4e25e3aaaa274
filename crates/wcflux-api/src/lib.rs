// wcflux-api: Async Rust client for the WooCommerce REST API (wc/v3)

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod transport;
pub mod types;

pub use auth::{Credentials, RouteStyle};
pub use client::{Page, WooClient};
pub use endpoints::products::ProductQuery;
pub use endpoints::variations::{BatchRequest, BatchResponse};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
