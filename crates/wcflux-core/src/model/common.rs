// ── Shared catalogue types ──
//
// Element types of the JSON-text list columns on the persistence models,
// plus the small closed vocabularies WooCommerce uses for status fields.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Image attached to a product, variation, or category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductImage {
    pub id: i64,
    pub name: String,
    pub src: String,
    pub alt: String,
    pub date_created: Option<String>,
}

/// `{id, name, slug}` reference to a category or tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductTerm {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

/// Attribute defined on a parent product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductAttribute {
    pub id: i64,
    pub name: String,
    pub position: i64,
    pub visible: bool,
    pub variation: bool,
    pub options: Vec<String>,
}

/// The single option a variation picks for one of its parent's attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariationAttribute {
    pub id: i64,
    pub name: String,
    pub option: String,
}

/// Downloadable file of a downloadable product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductDownload {
    pub id: String,
    pub name: String,
    pub file: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum StockStatus {
    InStock,
    OutOfStock,
    OnBackorder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ProductStatus {
    Publish,
    Draft,
    Pending,
    Private,
}

/// Moderation actions accepted by `PUT /products/reviews/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ReviewStatus {
    Approved,
    Hold,
    Spam,
    Unspam,
    Trash,
    Untrash,
}

// ── JSON-text column helpers ────────────────────────────────────────

/// Parse a JSON-text list column, yielding an empty list for blank or malformed text.
pub(crate) fn parse_list<T: DeserializeOwned>(raw: &str) -> Vec<T> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    serde_json::from_str(raw).unwrap_or_default()
}

/// Serialize a list into a JSON-text column. Empty lists are stored as `""`.
pub(crate) fn to_list_text<T: Serialize>(items: &[T]) -> String {
    if items.is_empty() {
        return String::new();
    }
    serde_json::to_string(items).unwrap_or_default()
}
