// ── WooCommerce REST wire types (wc/v3) ──
//
// Flat DTOs mirroring the JSON the store returns. Every field is defaulted
// so partial `_fields=` responses still decode. WooCommerce is loose with
// scalar types (quantities and weights arrive as numbers, strings, or
// null depending on plugins), so those go through `lenient`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Lenient scalar decoding ──────────────────────────────────────────

pub(crate) mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Number, numeric string, empty string, or null → `Option<f64>`.
    pub fn f64_opt<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        })
    }

    /// Number or numeric string → `i64`, anything else → 0.
    pub fn i64_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(truncate_f64))
                .unwrap_or_default(),
            Some(Value::String(s)) => s.trim().parse().unwrap_or_default(),
            _ => 0,
        })
    }

    /// String, number, or null → `String` (null becomes empty).
    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::String(s)) => s,
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        })
    }

    /// Boolean or boolean-ish string. Variations report `"parent"` when
    /// stock is managed on the parent product, which is `false` for the
    /// variation itself.
    pub fn bool<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::Bool(b)) => b,
            Some(Value::String(s)) => matches!(s.as_str(), "true" | "1" | "yes"),
            Some(Value::Number(n)) => n.as_i64() == Some(1),
            _ => false,
        })
    }

    #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
    fn truncate_f64(v: f64) -> i64 {
        v.trunc() as i64
    }
}

// ── Shared nested types ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductImageDto {
    pub id: i64,
    pub date_created: Option<String>,
    pub date_modified: Option<String>,
    pub src: String,
    pub name: String,
    pub alt: String,
}

/// Category or tag reference embedded in a product (`{id, name, slug}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductTermDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductAttributeDto {
    pub id: i64,
    pub name: String,
    pub position: i64,
    pub visible: bool,
    pub variation: bool,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariationAttributeDto {
    pub id: i64,
    pub name: String,
    pub option: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionsDto {
    #[serde(deserialize_with = "lenient::string")]
    pub length: String,
    #[serde(deserialize_with = "lenient::string")]
    pub width: String,
    #[serde(deserialize_with = "lenient::string")]
    pub height: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaDataDto {
    pub id: i64,
    pub key: String,
    pub value: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadDto {
    pub id: String,
    pub name: String,
    pub file: String,
}

// ── Products ─────────────────────────────────────────────────────────

/// `GET /wc/v3/products/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub permalink: String,
    pub date_created: String,
    pub date_created_gmt: Option<String>,
    pub date_modified: String,
    pub date_modified_gmt: Option<String>,
    #[serde(rename = "type")]
    pub product_type: String,
    pub status: String,
    pub featured: bool,
    pub catalog_visibility: String,
    pub description: String,
    pub short_description: String,
    pub sku: String,
    #[serde(deserialize_with = "lenient::string")]
    pub price: String,
    #[serde(deserialize_with = "lenient::string")]
    pub regular_price: String,
    #[serde(deserialize_with = "lenient::string")]
    pub sale_price: String,
    pub date_on_sale_from: Option<String>,
    pub date_on_sale_from_gmt: Option<String>,
    pub date_on_sale_to: Option<String>,
    pub date_on_sale_to_gmt: Option<String>,
    pub on_sale: bool,
    pub purchasable: bool,
    #[serde(deserialize_with = "lenient::i64_or_zero")]
    pub total_sales: i64,
    #[serde(rename = "virtual")]
    pub is_virtual: bool,
    pub downloadable: bool,
    pub downloads: Vec<DownloadDto>,
    pub download_limit: i64,
    pub download_expiry: i64,
    pub external_url: String,
    pub button_text: String,
    pub tax_status: String,
    pub tax_class: String,
    #[serde(deserialize_with = "lenient::bool")]
    pub manage_stock: bool,
    #[serde(deserialize_with = "lenient::f64_opt")]
    pub stock_quantity: Option<f64>,
    pub stock_status: String,
    pub backorders: String,
    pub backorders_allowed: bool,
    pub backordered: bool,
    pub sold_individually: bool,
    #[serde(deserialize_with = "lenient::string")]
    pub weight: String,
    pub dimensions: DimensionsDto,
    pub shipping_required: bool,
    pub shipping_taxable: bool,
    pub shipping_class: String,
    pub shipping_class_id: i64,
    pub reviews_allowed: bool,
    #[serde(deserialize_with = "lenient::string")]
    pub average_rating: String,
    pub rating_count: i64,
    pub related_ids: Vec<i64>,
    pub upsell_ids: Vec<i64>,
    pub cross_sell_ids: Vec<i64>,
    pub parent_id: i64,
    pub purchase_note: String,
    pub categories: Vec<ProductTermDto>,
    pub tags: Vec<ProductTermDto>,
    pub images: Vec<ProductImageDto>,
    pub attributes: Vec<ProductAttributeDto>,
    pub variations: Vec<i64>,
    pub grouped_products: Vec<i64>,
    pub menu_order: i64,
    pub meta_data: Vec<MetaDataDto>,
}

// ── Variations ───────────────────────────────────────────────────────

/// `GET /wc/v3/products/{product_id}/variations/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariationDto {
    pub id: i64,
    pub date_created: String,
    pub date_modified: String,
    pub description: String,
    pub permalink: String,
    pub sku: String,
    #[serde(deserialize_with = "lenient::string")]
    pub price: String,
    #[serde(deserialize_with = "lenient::string")]
    pub regular_price: String,
    #[serde(deserialize_with = "lenient::string")]
    pub sale_price: String,
    pub date_on_sale_from: Option<String>,
    pub date_on_sale_from_gmt: Option<String>,
    pub date_on_sale_to: Option<String>,
    pub date_on_sale_to_gmt: Option<String>,
    pub on_sale: bool,
    pub status: String,
    pub purchasable: bool,
    #[serde(rename = "virtual")]
    pub is_virtual: bool,
    pub downloadable: bool,
    pub downloads: Vec<DownloadDto>,
    pub download_limit: i64,
    pub download_expiry: i64,
    pub tax_status: String,
    pub tax_class: String,
    #[serde(deserialize_with = "lenient::bool")]
    pub manage_stock: bool,
    #[serde(deserialize_with = "lenient::f64_opt")]
    pub stock_quantity: Option<f64>,
    pub stock_status: String,
    pub backorders: String,
    pub backorders_allowed: bool,
    pub backordered: bool,
    #[serde(deserialize_with = "lenient::string")]
    pub weight: String,
    pub dimensions: DimensionsDto,
    pub shipping_class: String,
    pub shipping_class_id: i64,
    pub image: Option<ProductImageDto>,
    pub attributes: Vec<VariationAttributeDto>,
    pub menu_order: i64,
    pub meta_data: Vec<MetaDataDto>,
}

/// One entry of a variation batch response.
///
/// WooCommerce answers 200 for the batch as a whole; rejected items come
/// back as `{"id": N, "error": {...}}` in place of the variation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VariationBatchItem {
    #[serde(flatten)]
    pub variation: VariationDto,
    pub error: Option<BatchItemError>,
}

// ── Terms ────────────────────────────────────────────────────────────

/// `GET /wc/v3/products/categories`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub parent: i64,
    pub description: String,
    pub display: String,
    pub image: Option<ProductImageDto>,
    pub menu_order: i64,
    pub count: i64,
}

/// `GET /wc/v3/products/tags`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub count: i64,
}

/// Response of `POST /wc/v3/products/tags/batch`.
///
/// Items that failed carry an `error` object instead of term fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TagBatchResponse {
    pub create: Vec<TagBatchItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TagBatchItem {
    #[serde(flatten)]
    pub tag: TagDto,
    pub error: Option<BatchItemError>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchItemError {
    pub code: String,
    pub message: String,
}

// ── Shipping classes ─────────────────────────────────────────────────

/// `GET /wc/v3/products/shipping_classes`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingClassDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub count: i64,
}

// ── Reviews ──────────────────────────────────────────────────────────

/// `GET /wc/v3/products/reviews`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewDto {
    pub id: i64,
    pub date_created: String,
    pub date_created_gmt: Option<String>,
    pub product_id: i64,
    pub status: String,
    pub reviewer: String,
    pub reviewer_email: String,
    pub review: String,
    pub rating: i64,
    pub verified: bool,
    pub reviewer_avatar_urls: HashMap<String, String>,
}
