// WooCommerce resource endpoints, one file per resource family.

pub mod products;
pub mod reviews;
pub mod shipping_classes;
pub mod terms;
pub mod variations;

/// Default page size for collection routes (WooCommerce caps `per_page` at 100).
pub const DEFAULT_PER_PAGE: u32 = 25;

/// Largest page size the REST API accepts.
pub const MAX_PER_PAGE: u32 = 100;

pub(crate) fn paging(page: u32, per_page: u32) -> Vec<(&'static str, String)> {
    vec![
        ("page", page.max(1).to_string()),
        ("per_page", per_page.clamp(1, MAX_PER_PAGE).to_string()),
    ]
}

pub(crate) fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
