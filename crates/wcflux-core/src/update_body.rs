// ── Partial-update request bodies ──
//
// Compare a stored snapshot against an edited copy and emit only the
// changed fields, keyed by their wire names. The result is sent as the
// body of `PUT /products/{id}` (or a variation), or as an item of a batch
// request once its `id` is added.

use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::warn;

use crate::model::{ProductImage, ProductModel, VariationModel};

/// Accumulates changed fields for one request body.
#[derive(Debug, Default)]
struct DiffBody {
    map: Map<String, Value>,
}

impl DiffBody {
    /// Insert `key: updated` when `stored != updated`.
    fn changed<T: PartialEq + Serialize + ?Sized>(&mut self, key: &str, stored: &T, updated: &T) {
        if stored != updated {
            self.set(key, updated);
        }
    }

    fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        self.map
            .insert(key.to_owned(), serde_json::to_value(value).unwrap_or(Value::Null));
    }

    fn set_value(&mut self, key: &str, value: Value) {
        self.map.insert(key.to_owned(), value);
    }

    /// Group `length`/`width`/`height` under `dimensions`, only the changed ones.
    fn dimensions(&mut self, stored: [&str; 3], updated: [&str; 3]) {
        let mut dims = Self::default();
        for ((key, old), new) in ["length", "width", "height"]
            .into_iter()
            .zip(stored)
            .zip(updated)
        {
            dims.changed(key, old, new);
        }
        if !dims.map.is_empty() {
            self.set_value("dimensions", Value::Object(dims.map));
        }
    }

    /// Replace a JSON-text list when its parsed value changed.
    ///
    /// Blank text reads as `[]`, so `""` and `"[]"` compare equal, as do
    /// arrays that differ only in whitespace or object key order.
    fn json_list(&mut self, key: &str, stored: &str, updated: &str) {
        if parse_array(stored) != parse_array(updated) {
            self.set_value(key, json_array_or_empty(key, updated));
        }
    }

    fn finish(self) -> Map<String, Value> {
        self.map
    }
}

/// Parse a JSON-text array column. `None` when the text is not an array.
fn parse_array(raw: &str) -> Option<Value> {
    if raw.trim().is_empty() {
        return Some(json!([]));
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ Value::Array(_)) => Some(value),
        Ok(_) | Err(_) => None,
    }
}

/// Parse a JSON-text array column for sending. Malformed text becomes `[]`.
fn json_array_or_empty(field: &str, raw: &str) -> Value {
    parse_array(raw).unwrap_or_else(|| {
        warn!(field, "stored JSON is not an array, sending an empty list");
        json!([])
    })
}

fn id_list(ids: impl IntoIterator<Item = i64>) -> Value {
    Value::Array(ids.into_iter().map(|id| json!({ "id": id })).collect())
}

/// Existing media is referenced by id; new uploads (id 0) by source URL.
fn image_ref(image: &ProductImage) -> Value {
    if image.id == 0 {
        json!({ "src": image.src })
    } else {
        json!({ "id": image.id })
    }
}

#[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
fn stock_quantity_wire(quantity: f64) -> i64 {
    quantity.trunc() as i64
}

// ── Products ───────────────────────────────────────────────────────

/// Build the `PUT /products/{id}` body from the cached product and the edited copy.
///
/// With no cached product every field is compared against
/// `ProductModel::default()`, which also makes this usable for create bodies.
#[allow(clippy::too_many_lines)]
pub fn product_update_body(
    stored: Option<&ProductModel>,
    updated: &ProductModel,
) -> Map<String, Value> {
    let fallback = ProductModel::default();
    let stored = stored.unwrap_or(&fallback);
    let mut body = DiffBody::default();

    body.changed("name", &stored.name, &updated.name);
    body.changed("slug", &stored.slug, &updated.slug);
    body.changed("type", &stored.product_type, &updated.product_type);
    body.changed("status", &stored.status, &updated.status);
    body.changed("featured", &stored.featured, &updated.featured);
    body.changed(
        "catalog_visibility",
        &stored.catalog_visibility,
        &updated.catalog_visibility,
    );
    body.changed("description", &stored.description, &updated.description);
    body.changed(
        "short_description",
        &stored.short_description,
        &updated.short_description,
    );
    body.changed("sku", &stored.sku, &updated.sku);

    // Pricing
    body.changed("regular_price", &stored.regular_price, &updated.regular_price);
    body.changed("sale_price", &stored.sale_price, &updated.sale_price);
    body.changed(
        "date_on_sale_from",
        &stored.date_on_sale_from,
        &updated.date_on_sale_from,
    );
    body.changed(
        "date_on_sale_to",
        &stored.date_on_sale_to,
        &updated.date_on_sale_to,
    );
    body.changed("tax_status", &stored.tax_status, &updated.tax_status);
    body.changed("tax_class", &stored.tax_class, &updated.tax_class);

    // Inventory. Quantity and backorders only apply while stock is managed.
    body.changed("manage_stock", &stored.manage_stock, &updated.manage_stock);
    if updated.manage_stock {
        if stored.stock_quantity.to_bits() != updated.stock_quantity.to_bits() {
            body.set("stock_quantity", &stock_quantity_wire(updated.stock_quantity));
        }
        body.changed("backorders", &stored.backorders, &updated.backorders);
    }
    body.changed("stock_status", &stored.stock_status, &updated.stock_status);
    body.changed(
        "sold_individually",
        &stored.sold_individually,
        &updated.sold_individually,
    );

    // Type flags and downloads
    body.changed("virtual", &stored.is_virtual, &updated.is_virtual);
    body.changed("downloadable", &stored.downloadable, &updated.downloadable);
    body.changed("download_limit", &stored.download_limit, &updated.download_limit);
    body.changed(
        "download_expiry",
        &stored.download_expiry,
        &updated.download_expiry,
    );
    if stored.download_list() != updated.download_list() {
        body.set("downloads", &updated.download_list());
    }
    body.changed("external_url", &stored.external_url, &updated.external_url);
    body.changed("button_text", &stored.button_text, &updated.button_text);

    // Shipping
    body.changed("weight", &stored.weight, &updated.weight);
    body.dimensions(
        [&stored.length, &stored.width, &stored.height],
        [&updated.length, &updated.width, &updated.height],
    );
    body.changed(
        "shipping_class",
        &stored.shipping_class,
        &updated.shipping_class,
    );

    body.changed(
        "reviews_allowed",
        &stored.reviews_allowed,
        &updated.reviews_allowed,
    );
    body.changed("purchase_note", &stored.purchase_note, &updated.purchase_note);
    body.changed("menu_order", &stored.menu_order, &updated.menu_order);

    // Linked products
    if stored.upsell_id_list() != updated.upsell_id_list() {
        body.set("upsell_ids", &updated.upsell_id_list());
    }
    if stored.cross_sell_id_list() != updated.cross_sell_id_list() {
        body.set("cross_sell_ids", &updated.cross_sell_id_list());
    }
    if stored.grouped_product_id_list() != updated.grouped_product_id_list() {
        body.set("grouped_products", &updated.grouped_product_id_list());
    }

    // Terms and media are replaced wholesale.
    if !stored.has_same_categories(updated) {
        body.set_value(
            "categories",
            id_list(updated.category_list().iter().map(|c| c.id)),
        );
    }
    if !stored.has_same_tags(updated) {
        body.set_value("tags", id_list(updated.tag_list().iter().map(|t| t.id)));
    }
    if !stored.has_same_images(updated) {
        let images = updated.image_list().iter().map(image_ref).collect();
        body.set_value("images", Value::Array(images));
    }

    body.json_list("attributes", &stored.attributes, &updated.attributes);
    body.json_list("meta_data", &stored.metadata, &updated.metadata);

    body.finish()
}

// ── Variations ─────────────────────────────────────────────────────

/// Build the `PUT /products/{pid}/variations/{id}` body.
pub fn variation_update_body(
    stored: Option<&VariationModel>,
    updated: &VariationModel,
) -> Map<String, Value> {
    let fallback = VariationModel::default();
    let stored = stored.unwrap_or(&fallback);
    let mut body = DiffBody::default();

    body.changed("sku", &stored.sku, &updated.sku);
    body.changed("status", &stored.status, &updated.status);
    body.changed("description", &stored.description, &updated.description);

    body.changed("regular_price", &stored.regular_price, &updated.regular_price);
    body.changed("sale_price", &stored.sale_price, &updated.sale_price);
    body.changed(
        "date_on_sale_from",
        &stored.date_on_sale_from,
        &updated.date_on_sale_from,
    );
    body.changed(
        "date_on_sale_to",
        &stored.date_on_sale_to,
        &updated.date_on_sale_to,
    );
    body.changed("tax_status", &stored.tax_status, &updated.tax_status);
    body.changed("tax_class", &stored.tax_class, &updated.tax_class);

    body.changed("manage_stock", &stored.manage_stock, &updated.manage_stock);
    if updated.manage_stock {
        if stored.stock_quantity.to_bits() != updated.stock_quantity.to_bits() {
            body.set("stock_quantity", &stock_quantity_wire(updated.stock_quantity));
        }
        body.changed("backorders", &stored.backorders, &updated.backorders);
    }
    body.changed("stock_status", &stored.stock_status, &updated.stock_status);

    body.changed("virtual", &stored.is_virtual, &updated.is_virtual);
    body.changed("downloadable", &stored.downloadable, &updated.downloadable);
    body.changed("download_limit", &stored.download_limit, &updated.download_limit);
    body.changed(
        "download_expiry",
        &stored.download_expiry,
        &updated.download_expiry,
    );
    if stored.download_list() != updated.download_list() {
        body.set("downloads", &updated.download_list());
    }

    body.changed("weight", &stored.weight, &updated.weight);
    body.dimensions(
        [&stored.length, &stored.width, &stored.height],
        [&updated.length, &updated.width, &updated.height],
    );
    body.changed(
        "shipping_class",
        &stored.shipping_class,
        &updated.shipping_class,
    );
    body.changed("menu_order", &stored.menu_order, &updated.menu_order);

    // A non-object image tells WooCommerce to clear the variation image.
    if !stored.has_same_image(updated) {
        let image = updated
            .image_model()
            .map_or_else(|| json!(""), |img| image_ref(&img));
        body.set_value("image", image);
    }

    body.json_list("attributes", &stored.attributes, &updated.attributes);
    body.json_list("meta_data", &stored.metadata, &updated.metadata);

    body.finish()
}

/// `update` items for `POST .../variations/batch`.
///
/// Each item is the variation's diff body plus its `id`. Variations with no
/// changes are left out.
pub fn variation_batch_update<'a>(
    pairs: impl IntoIterator<Item = (Option<&'a VariationModel>, &'a VariationModel)>,
) -> Vec<Map<String, Value>> {
    pairs
        .into_iter()
        .filter_map(|(stored, updated)| {
            let mut item = variation_update_body(stored, updated);
            if item.is_empty() {
                return None;
            }
            item.insert("id".to_owned(), json!(updated.remote_variation_id));
            Some(item)
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn product() -> ProductModel {
        ProductModel {
            site_id: 1,
            remote_id: 10,
            name: "A".into(),
            status: "publish".into(),
            regular_price: "10".into(),
            manage_stock: true,
            stock_quantity: 5.0,
            backorders: "no".into(),
            stock_status: "instock".into(),
            length: "1".into(),
            width: "2".into(),
            height: "3".into(),
            categories: r#"[{"id":1,"name":"Shirts","slug":"shirts"}]"#.into(),
            attributes: r#"[{"id":1,"name":"Color","options":["Blue"]}]"#.into(),
            metadata: r#"[{"id":5,"key":"k","value":"v"}]"#.into(),
            ..ProductModel::default()
        }
    }

    fn variation() -> VariationModel {
        VariationModel {
            site_id: 1,
            remote_product_id: 10,
            remote_variation_id: 20,
            regular_price: "10".into(),
            manage_stock: true,
            stock_quantity: 5.0,
            image: r#"{"id":7,"src":"https://shop.test/7.png"}"#.into(),
            ..VariationModel::default()
        }
    }

    #[test]
    fn identical_products_produce_empty_body() {
        let stored = product();
        assert!(product_update_body(Some(&stored), &stored.clone()).is_empty());
    }

    #[test]
    fn only_changed_name_is_sent() {
        let stored = product();
        let updated = ProductModel {
            name: "B".into(),
            ..stored.clone()
        };
        let body = product_update_body(Some(&stored), &updated);
        assert_eq!(Value::Object(body), json!({"name": "B"}));
    }

    #[test]
    fn stock_fields_ignored_when_stock_not_managed() {
        let stored = ProductModel {
            manage_stock: false,
            ..product()
        };
        let updated = ProductModel {
            stock_quantity: 99.0,
            backorders: "notify".into(),
            ..stored.clone()
        };
        assert!(product_update_body(Some(&stored), &updated).is_empty());
    }

    #[test]
    fn disabling_stock_management_sends_only_the_flag() {
        let stored = product();
        let updated = ProductModel {
            manage_stock: false,
            stock_quantity: 1.0,
            ..stored.clone()
        };
        let body = product_update_body(Some(&stored), &updated);
        assert_eq!(Value::Object(body), json!({"manage_stock": false}));
    }

    #[test]
    fn dimensions_group_only_changed_components() {
        let stored = product();
        let updated = ProductModel {
            width: "5".into(),
            ..stored.clone()
        };
        let body = product_update_body(Some(&stored), &updated);
        assert_eq!(Value::Object(body), json!({"dimensions": {"width": "5"}}));
    }

    #[test]
    fn categories_replaced_wholesale() {
        let stored = product();
        let updated = ProductModel {
            categories: r#"[{"id":1,"name":"Shirts","slug":"shirts"},{"id":4,"name":"Sale","slug":"sale"}]"#.into(),
            ..stored.clone()
        };
        let body = product_update_body(Some(&stored), &updated);
        assert_eq!(
            Value::Object(body),
            json!({"categories": [{"id": 1}, {"id": 4}]})
        );
    }

    #[test]
    fn new_images_referenced_by_src() {
        let stored = product();
        let updated = ProductModel {
            images: r#"[{"id":3,"src":"https://shop.test/3.png"},{"id":0,"src":"https://cdn.test/new.png"}]"#.into(),
            ..stored.clone()
        };
        let body = product_update_body(Some(&stored), &updated);
        assert_eq!(
            body.get("images"),
            Some(&json!([{"id": 3}, {"src": "https://cdn.test/new.png"}]))
        );
    }

    #[test]
    fn malformed_attributes_and_metadata_become_empty_arrays() {
        let stored = product();
        let updated = ProductModel {
            attributes: "{broken".into(),
            metadata: "not json at all".into(),
            ..stored.clone()
        };
        let body = product_update_body(Some(&stored), &updated);
        assert_eq!(
            Value::Object(body),
            json!({"attributes": [], "meta_data": []})
        );
    }

    #[test]
    fn equivalent_list_text_is_not_a_change() {
        let stored = ProductModel {
            attributes: String::new(),
            metadata: r#"[{"id":5,"key":"k","value":"v"}]"#.into(),
            ..product()
        };
        let updated = ProductModel {
            attributes: "[]".into(),
            metadata: r#"[ { "value": "v", "key": "k", "id": 5 } ]"#.into(),
            ..stored.clone()
        };
        assert!(product_update_body(Some(&stored), &updated).is_empty());

        let stored_variation = VariationModel {
            metadata: String::new(),
            ..variation()
        };
        let updated_variation = VariationModel {
            metadata: " [] ".into(),
            ..stored_variation.clone()
        };
        assert!(variation_update_body(Some(&stored_variation), &updated_variation).is_empty());
    }

    #[test]
    fn missing_stored_product_compares_against_defaults() {
        let updated = ProductModel {
            name: "New".into(),
            regular_price: "3".into(),
            ..ProductModel::default()
        };
        let body = product_update_body(None, &updated);
        assert_eq!(
            Value::Object(body),
            json!({"name": "New", "regular_price": "3"})
        );
    }

    #[test]
    fn every_changed_scalar_appears_exactly_once() {
        let stored = product();
        let updated = ProductModel {
            sku: "SKU-2".into(),
            sale_price: "8".into(),
            featured: true,
            menu_order: 4,
            ..stored.clone()
        };
        let body = product_update_body(Some(&stored), &updated);
        let mut keys: Vec<&str> = body.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["featured", "menu_order", "sale_price", "sku"]);
    }

    #[test]
    fn variation_stock_quantity_is_truncated() {
        let stored = variation();
        let updated = VariationModel {
            stock_quantity: 3.7,
            ..stored.clone()
        };
        let body = variation_update_body(Some(&stored), &updated);
        assert_eq!(Value::Object(body), json!({"stock_quantity": 3}));
    }

    #[test]
    fn removed_variation_image_sends_empty_string() {
        let stored = variation();
        let updated = VariationModel {
            image: String::new(),
            ..stored.clone()
        };
        let body = variation_update_body(Some(&stored), &updated);
        assert_eq!(Value::Object(body), json!({"image": ""}));
    }

    #[test]
    fn changed_variation_image_sends_id() {
        let stored = variation();
        let updated = VariationModel {
            image: r#"{"id":8,"src":"https://shop.test/8.png"}"#.into(),
            ..stored.clone()
        };
        let body = variation_update_body(Some(&stored), &updated);
        assert_eq!(Value::Object(body), json!({"image": {"id": 8}}));
    }

    #[test]
    fn batch_skips_unchanged_and_adds_ids() {
        let first = variation();
        let first_updated = VariationModel {
            regular_price: "12".into(),
            ..first.clone()
        };
        let second = VariationModel {
            remote_variation_id: 21,
            ..variation()
        };

        let items = variation_batch_update([
            (Some(&first), &first_updated),
            (Some(&second), &second),
        ]);

        assert_eq!(items.len(), 1);
        assert_eq!(
            Value::Object(items[0].clone()),
            json!({"regular_price": "12", "id": 20})
        );
    }
}
