// ── Product persistence model ──

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{
    ProductAttribute, ProductDownload, ProductImage, ProductTerm, StockStatus, parse_list,
    to_list_text,
};

/// A product as held in the local cache.
///
/// Scalars are stored as the REST API reports them. List-valued fields are
/// stored as JSON text, and the accessor methods parse them on demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductModel {
    pub site_id: i64,
    pub remote_id: i64,

    pub name: String,
    pub slug: String,
    pub permalink: String,
    pub date_created: String,
    pub date_modified: String,
    pub product_type: String,
    pub status: String,
    pub featured: bool,
    pub catalog_visibility: String,
    pub description: String,
    pub short_description: String,
    pub sku: String,

    // Pricing
    pub price: String,
    pub regular_price: String,
    pub sale_price: String,
    pub on_sale: bool,
    pub total_sales: i64,
    pub purchasable: bool,
    pub date_on_sale_from: String,
    pub date_on_sale_to: String,
    pub date_on_sale_from_gmt: String,
    pub date_on_sale_to_gmt: String,

    pub is_virtual: bool,
    pub downloadable: bool,
    pub download_limit: i64,
    pub download_expiry: i64,
    pub sold_individually: bool,
    pub external_url: String,
    pub button_text: String,

    pub tax_status: String,
    pub tax_class: String,

    // Inventory
    pub manage_stock: bool,
    pub stock_quantity: f64,
    pub stock_status: String,
    pub backorders: String,
    pub backorders_allowed: bool,
    pub backordered: bool,

    // Shipping
    pub shipping_required: bool,
    pub shipping_taxable: bool,
    pub shipping_class: String,
    pub shipping_class_id: i64,
    pub weight: String,
    pub length: String,
    pub width: String,
    pub height: String,

    pub reviews_allowed: bool,
    pub average_rating: String,
    pub rating_count: i64,
    pub parent_id: i64,
    pub purchase_note: String,
    pub menu_order: i64,

    // JSON text columns
    pub related_ids: String,
    pub upsell_ids: String,
    pub cross_sell_ids: String,
    pub categories: String,
    pub tags: String,
    pub images: String,
    pub attributes: String,
    pub downloads: String,
    pub variations: String,
    pub grouped_product_ids: String,
    pub metadata: String,
}

impl ProductModel {
    pub fn category_list(&self) -> Vec<ProductTerm> {
        parse_list(&self.categories)
    }

    pub fn tag_list(&self) -> Vec<ProductTerm> {
        parse_list(&self.tags)
    }

    pub fn image_list(&self) -> Vec<ProductImage> {
        parse_list(&self.images)
    }

    pub fn attribute_list(&self) -> Vec<ProductAttribute> {
        parse_list(&self.attributes)
    }

    pub fn download_list(&self) -> Vec<ProductDownload> {
        parse_list(&self.downloads)
    }

    pub fn related_id_list(&self) -> Vec<i64> {
        parse_list(&self.related_ids)
    }

    pub fn upsell_id_list(&self) -> Vec<i64> {
        parse_list(&self.upsell_ids)
    }

    pub fn cross_sell_id_list(&self) -> Vec<i64> {
        parse_list(&self.cross_sell_ids)
    }

    pub fn variation_id_list(&self) -> Vec<i64> {
        parse_list(&self.variations)
    }

    pub fn grouped_product_id_list(&self) -> Vec<i64> {
        parse_list(&self.grouped_product_ids)
    }

    /// First image, used as the product's thumbnail.
    pub fn first_image_url(&self) -> Option<String> {
        self.image_list().into_iter().next().map(|img| img.src)
    }

    pub fn stock_status_kind(&self) -> Option<StockStatus> {
        self.stock_status.parse().ok()
    }

    /// `date_created` read as UTC. WooCommerce sends it without an offset.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_wc_datetime(&self.date_created)
    }

    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        parse_wc_datetime(&self.date_modified)
    }

    // ── List comparisons used by the update-body builder ─────────────

    pub fn has_same_categories(&self, other: &Self) -> bool {
        term_ids(&self.category_list()) == term_ids(&other.category_list())
    }

    pub fn has_same_tags(&self, other: &Self) -> bool {
        term_ids(&self.tag_list()) == term_ids(&other.tag_list())
    }

    pub fn has_same_images(&self, other: &Self) -> bool {
        image_keys(&self.image_list()) == image_keys(&other.image_list())
    }

    // ── Editing helpers ──────────────────────────────────────────────

    /// Replace the categories, keeping names of ones already assigned.
    pub fn set_category_ids(&mut self, ids: &[i64]) {
        self.categories = to_list_text(&retain_terms(self.category_list(), ids));
    }

    /// Replace the tags, keeping names of ones already assigned.
    pub fn set_tag_ids(&mut self, ids: &[i64]) {
        self.tags = to_list_text(&retain_terms(self.tag_list(), ids));
    }
}

fn retain_terms(current: Vec<ProductTerm>, ids: &[i64]) -> Vec<ProductTerm> {
    ids.iter()
        .map(|&id| {
            current
                .iter()
                .find(|t| t.id == id)
                .cloned()
                .unwrap_or(ProductTerm {
                    id,
                    ..ProductTerm::default()
                })
        })
        .collect()
}

fn term_ids(terms: &[ProductTerm]) -> Vec<i64> {
    terms.iter().map(|t| t.id).collect()
}

fn image_keys(images: &[ProductImage]) -> Vec<(i64, &str)> {
    images.iter().map(|i| (i.id, i.src.as_str())).collect()
}

/// Parse `2024-03-01T10:00:00`, with or without a trailing `Z` / offset.
pub(crate) fn parse_wc_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|naive| naive.and_utc())
        })
}
