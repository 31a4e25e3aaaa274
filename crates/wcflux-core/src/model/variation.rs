// ── Product variation persistence model ──

use serde::{Deserialize, Serialize};

use super::common::{ProductDownload, ProductImage, VariationAttribute, parse_list};

/// One variation of a variable product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariationModel {
    pub site_id: i64,
    pub remote_product_id: i64,
    pub remote_variation_id: i64,

    pub date_created: String,
    pub date_modified: String,
    pub description: String,
    pub permalink: String,
    pub sku: String,
    pub status: String,

    pub price: String,
    pub regular_price: String,
    pub sale_price: String,
    pub date_on_sale_from: String,
    pub date_on_sale_to: String,
    pub date_on_sale_from_gmt: String,
    pub date_on_sale_to_gmt: String,
    pub on_sale: bool,
    pub purchasable: bool,

    pub is_virtual: bool,
    pub downloadable: bool,
    pub download_limit: i64,
    pub download_expiry: i64,

    pub tax_status: String,
    pub tax_class: String,

    pub manage_stock: bool,
    pub stock_quantity: f64,
    pub stock_status: String,
    pub backorders: String,
    pub backorders_allowed: bool,
    pub backordered: bool,

    pub shipping_class: String,
    pub shipping_class_id: i64,
    pub weight: String,
    pub length: String,
    pub width: String,
    pub height: String,

    pub menu_order: i64,

    /// Single image object as JSON text, `""` when the variation has none.
    pub image: String,
    pub attributes: String,
    pub downloads: String,
    pub metadata: String,
}

impl VariationModel {
    pub fn image_model(&self) -> Option<ProductImage> {
        if self.image.trim().is_empty() {
            return None;
        }
        serde_json::from_str(&self.image).ok()
    }

    pub fn attribute_list(&self) -> Vec<VariationAttribute> {
        parse_list(&self.attributes)
    }

    pub fn download_list(&self) -> Vec<ProductDownload> {
        parse_list(&self.downloads)
    }

    /// Human label built from the attribute options, e.g. `"Blue - Large"`.
    ///
    /// "Any" attributes (empty option) are skipped.
    pub fn option_label(&self) -> String {
        self.attribute_list()
            .into_iter()
            .filter(|a| !a.option.is_empty())
            .map(|a| a.option)
            .collect::<Vec<_>>()
            .join(" - ")
    }

    /// Point the variation at an existing media item, or clear it with `None`.
    pub fn set_image_id(&mut self, id: Option<i64>) {
        self.image = id
            .map(|id| {
                serde_json::to_string(&ProductImage {
                    id,
                    ..ProductImage::default()
                })
                .unwrap_or_default()
            })
            .unwrap_or_default();
    }

    pub fn has_same_image(&self, other: &Self) -> bool {
        let key = |img: Option<ProductImage>| img.map(|i| (i.id, i.src));
        key(self.image_model()) == key(other.image_model())
    }
}
