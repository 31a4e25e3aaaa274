// ── Product store ──
//
// Request/response facade over `WooClient` with an in-memory cache.

mod collection;
mod product_store;

pub use product_store::{FetchResult, ProductStore};
