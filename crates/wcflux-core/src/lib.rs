//! Product catalogue layer between `wcflux-api` and the CLI.
//!
//! - **[`ProductStore`]**: fetch, cache, and update products, variations,
//!   categories, tags, shipping classes, and reviews for one store.
//!   Updates are diffed against the cached copy so only changed fields go
//!   over the wire.
//!
//! - **Models** ([`model`]): persistence-shaped records. List fields are
//!   kept as JSON text with parsing accessors.
//!
//! - **[`update_body`]**: the partial-update body builders, usable on their
//!   own for callers that manage their own cache.
//!
//! - **Errors**: [`ProductError`] with a [`ProductErrorType`] resolved from
//!   WooCommerce error codes, and [`CoreError`] for everything else.

#![recursion_limit = "256"]

pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod store;
pub mod update_body;

pub use config::{AuthCredentials, StoreConfig, TlsVerification};
pub use error::{CoreError, ProductError, ProductErrorType};
pub use model::{
    CategoryModel, ProductAttribute, ProductDownload, ProductImage, ProductModel, ProductStatus,
    ProductTerm, ReviewModel, ReviewStatus, ShippingClassModel, StockStatus, TagModel,
    VariationAttribute, VariationModel, sort_category_tree,
};
pub use store::{FetchResult, ProductStore};
pub use update_body::{product_update_body, variation_batch_update, variation_update_body};
pub use wcflux_api::{ProductQuery, RouteStyle};
