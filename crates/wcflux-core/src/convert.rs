// ── API-to-model conversions ──
//
// Maps `wcflux_api` wire DTOs into the persistence models. Scalars are
// copied as-is; list fields are re-serialized into JSON text columns.
// Absent optional values become the model's empty default.

use wcflux_api::types::{
    CategoryDto, DimensionsDto, DownloadDto, MetaDataDto, ProductAttributeDto, ProductDto,
    ProductImageDto, ProductTermDto, ReviewDto, ShippingClassDto, TagDto, VariationAttributeDto,
    VariationDto,
};

use crate::model::common::to_list_text;
use crate::model::{
    CategoryModel, ProductAttribute, ProductDownload, ProductImage, ProductModel, ProductTerm,
    ReviewModel, ShippingClassModel, TagModel, VariationAttribute, VariationModel,
};

// ── Nested element conversions ─────────────────────────────────────

impl From<ProductImageDto> for ProductImage {
    fn from(dto: ProductImageDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            src: dto.src,
            alt: dto.alt,
            date_created: dto.date_created,
        }
    }
}

impl From<ProductTermDto> for ProductTerm {
    fn from(dto: ProductTermDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            slug: dto.slug,
        }
    }
}

impl From<ProductAttributeDto> for ProductAttribute {
    fn from(dto: ProductAttributeDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            position: dto.position,
            visible: dto.visible,
            variation: dto.variation,
            options: dto.options,
        }
    }
}

impl From<VariationAttributeDto> for VariationAttribute {
    fn from(dto: VariationAttributeDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            option: dto.option,
        }
    }
}

impl From<DownloadDto> for ProductDownload {
    fn from(dto: DownloadDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            file: dto.file,
        }
    }
}

fn list_text<D, M>(items: Vec<D>) -> String
where
    M: From<D> + serde::Serialize,
{
    let mapped: Vec<M> = items.into_iter().map(M::from).collect();
    to_list_text(&mapped)
}

/// Meta data keeps the wire shape (`{id, key, value}`) verbatim.
fn metadata_text(meta: &[MetaDataDto]) -> String {
    to_list_text(meta)
}

fn dimensions(d: DimensionsDto) -> (String, String, String) {
    (d.length, d.width, d.height)
}

// ── Products ───────────────────────────────────────────────────────

/// Map a product DTO into the cache model for `site_id`.
pub fn product_from_dto(site_id: i64, dto: ProductDto) -> ProductModel {
    let (length, width, height) = dimensions(dto.dimensions);
    let metadata = metadata_text(&dto.meta_data);

    ProductModel {
        site_id,
        remote_id: dto.id,
        name: dto.name,
        slug: dto.slug,
        permalink: dto.permalink,
        date_created: dto.date_created,
        date_modified: dto.date_modified,
        product_type: dto.product_type,
        status: dto.status,
        featured: dto.featured,
        catalog_visibility: dto.catalog_visibility,
        description: dto.description,
        short_description: dto.short_description,
        sku: dto.sku,
        price: dto.price,
        regular_price: dto.regular_price,
        sale_price: dto.sale_price,
        on_sale: dto.on_sale,
        total_sales: dto.total_sales,
        purchasable: dto.purchasable,
        date_on_sale_from: dto.date_on_sale_from.unwrap_or_default(),
        date_on_sale_to: dto.date_on_sale_to.unwrap_or_default(),
        date_on_sale_from_gmt: dto.date_on_sale_from_gmt.unwrap_or_default(),
        date_on_sale_to_gmt: dto.date_on_sale_to_gmt.unwrap_or_default(),
        is_virtual: dto.is_virtual,
        downloadable: dto.downloadable,
        download_limit: dto.download_limit,
        download_expiry: dto.download_expiry,
        sold_individually: dto.sold_individually,
        external_url: dto.external_url,
        button_text: dto.button_text,
        tax_status: dto.tax_status,
        tax_class: dto.tax_class,
        manage_stock: dto.manage_stock,
        stock_quantity: dto.stock_quantity.unwrap_or_default(),
        stock_status: dto.stock_status,
        backorders: dto.backorders,
        backorders_allowed: dto.backorders_allowed,
        backordered: dto.backordered,
        shipping_required: dto.shipping_required,
        shipping_taxable: dto.shipping_taxable,
        shipping_class: dto.shipping_class,
        shipping_class_id: dto.shipping_class_id,
        weight: dto.weight,
        length,
        width,
        height,
        reviews_allowed: dto.reviews_allowed,
        average_rating: dto.average_rating,
        rating_count: dto.rating_count,
        parent_id: dto.parent_id,
        purchase_note: dto.purchase_note,
        menu_order: dto.menu_order,
        related_ids: to_list_text(&dto.related_ids),
        upsell_ids: to_list_text(&dto.upsell_ids),
        cross_sell_ids: to_list_text(&dto.cross_sell_ids),
        categories: list_text::<_, ProductTerm>(dto.categories),
        tags: list_text::<_, ProductTerm>(dto.tags),
        images: list_text::<_, ProductImage>(dto.images),
        attributes: list_text::<_, ProductAttribute>(dto.attributes),
        downloads: list_text::<_, ProductDownload>(dto.downloads),
        variations: to_list_text(&dto.variations),
        grouped_product_ids: to_list_text(&dto.grouped_products),
        metadata,
    }
}

// ── Variations ─────────────────────────────────────────────────────

pub fn variation_from_dto(site_id: i64, product_id: i64, dto: VariationDto) -> VariationModel {
    let (length, width, height) = dimensions(dto.dimensions);
    let metadata = metadata_text(&dto.meta_data);
    let image = dto
        .image
        .map(ProductImage::from)
        .and_then(|img| serde_json::to_string(&img).ok())
        .unwrap_or_default();

    VariationModel {
        site_id,
        remote_product_id: product_id,
        remote_variation_id: dto.id,
        date_created: dto.date_created,
        date_modified: dto.date_modified,
        description: dto.description,
        permalink: dto.permalink,
        sku: dto.sku,
        status: dto.status,
        price: dto.price,
        regular_price: dto.regular_price,
        sale_price: dto.sale_price,
        date_on_sale_from: dto.date_on_sale_from.unwrap_or_default(),
        date_on_sale_to: dto.date_on_sale_to.unwrap_or_default(),
        date_on_sale_from_gmt: dto.date_on_sale_from_gmt.unwrap_or_default(),
        date_on_sale_to_gmt: dto.date_on_sale_to_gmt.unwrap_or_default(),
        on_sale: dto.on_sale,
        purchasable: dto.purchasable,
        is_virtual: dto.is_virtual,
        downloadable: dto.downloadable,
        download_limit: dto.download_limit,
        download_expiry: dto.download_expiry,
        tax_status: dto.tax_status,
        tax_class: dto.tax_class,
        manage_stock: dto.manage_stock,
        stock_quantity: dto.stock_quantity.unwrap_or_default(),
        stock_status: dto.stock_status,
        backorders: dto.backorders,
        backorders_allowed: dto.backorders_allowed,
        backordered: dto.backordered,
        shipping_class: dto.shipping_class,
        shipping_class_id: dto.shipping_class_id,
        weight: dto.weight,
        length,
        width,
        height,
        menu_order: dto.menu_order,
        image,
        attributes: list_text::<_, VariationAttribute>(dto.attributes),
        downloads: list_text::<_, ProductDownload>(dto.downloads),
        metadata,
    }
}

// ── Terms ──────────────────────────────────────────────────────────

pub fn category_from_dto(site_id: i64, dto: CategoryDto) -> CategoryModel {
    CategoryModel {
        site_id,
        remote_id: dto.id,
        name: dto.name,
        slug: dto.slug,
        parent: dto.parent,
        description: dto.description,
        display: dto.display,
        image_url: dto.image.map(|img| img.src).unwrap_or_default(),
        menu_order: dto.menu_order,
        count: dto.count,
    }
}

pub fn tag_from_dto(site_id: i64, dto: TagDto) -> TagModel {
    TagModel {
        site_id,
        remote_id: dto.id,
        name: dto.name,
        slug: dto.slug,
        description: dto.description,
        count: dto.count,
    }
}

pub fn shipping_class_from_dto(site_id: i64, dto: ShippingClassDto) -> ShippingClassModel {
    ShippingClassModel {
        site_id,
        remote_id: dto.id,
        name: dto.name,
        slug: dto.slug,
        description: dto.description,
        count: dto.count,
    }
}

// ── Reviews ────────────────────────────────────────────────────────

pub fn review_from_dto(site_id: i64, dto: ReviewDto) -> ReviewModel {
    let avatars: std::collections::BTreeMap<_, _> = dto.reviewer_avatar_urls.into_iter().collect();
    ReviewModel {
        site_id,
        remote_id: dto.id,
        remote_product_id: dto.product_id,
        date_created: dto.date_created,
        status: dto.status,
        reviewer: dto.reviewer,
        reviewer_email: dto.reviewer_email,
        review: dto.review,
        rating: dto.rating,
        verified: dto.verified,
        reviewer_avatar_urls: if avatars.is_empty() {
            String::new()
        } else {
            serde_json::to_string(&avatars).unwrap_or_default()
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn product_fixture() -> ProductDto {
        serde_json::from_value(json!({
            "id": 101,
            "name": "Hoodie",
            "slug": "hoodie",
            "permalink": "https://shop.test/product/hoodie",
            "date_created": "2024-02-01T09:30:00",
            "date_modified": "2024-02-03T12:00:00",
            "type": "variable",
            "status": "publish",
            "featured": true,
            "catalog_visibility": "visible",
            "description": "<p>Warm</p>",
            "short_description": "Warm hoodie",
            "sku": "HOOD-1",
            "price": "45",
            "regular_price": "50",
            "sale_price": "45",
            "date_on_sale_from": "2024-03-01T00:00:00",
            "date_on_sale_to": null,
            "on_sale": true,
            "purchasable": true,
            "total_sales": 12,
            "virtual": false,
            "downloadable": false,
            "tax_status": "taxable",
            "tax_class": "",
            "manage_stock": true,
            "stock_quantity": 8,
            "stock_status": "instock",
            "backorders": "no",
            "weight": "0.5",
            "dimensions": {"length": "30", "width": "20", "height": "2"},
            "shipping_class": "bulky",
            "shipping_class_id": 4,
            "reviews_allowed": true,
            "average_rating": "4.50",
            "rating_count": 2,
            "related_ids": [5, 6],
            "upsell_ids": [],
            "cross_sell_ids": [9],
            "parent_id": 0,
            "purchase_note": "Thanks!",
            "categories": [{"id": 15, "name": "Clothing", "slug": "clothing"}],
            "tags": [{"id": 3, "name": "winter", "slug": "winter"}],
            "images": [{"id": 77, "src": "https://shop.test/hoodie.png", "name": "hoodie", "alt": ""}],
            "attributes": [{"id": 1, "name": "Color", "position": 0, "visible": true, "variation": true, "options": ["Blue", "Red"]}],
            "variations": [201, 202],
            "grouped_products": [],
            "menu_order": 3,
            "meta_data": [{"id": 900, "key": "_custom", "value": {"a": 1}}]
        }))
        .unwrap()
    }

    #[test]
    fn product_scalars_are_preserved() {
        let model = product_from_dto(7, product_fixture());

        assert_eq!(model.site_id, 7);
        assert_eq!(model.remote_id, 101);
        assert_eq!(model.name, "Hoodie");
        assert_eq!(model.product_type, "variable");
        assert!(model.featured);
        assert_eq!(model.sku, "HOOD-1");
        assert_eq!(model.regular_price, "50");
        assert_eq!(model.sale_price, "45");
        assert_eq!(model.date_on_sale_from, "2024-03-01T00:00:00");
        assert_eq!(model.date_on_sale_to, "");
        assert!(model.manage_stock);
        assert_eq!(model.stock_quantity, 8.0);
        assert_eq!(model.weight, "0.5");
        assert_eq!(
            (model.length.as_str(), model.width.as_str(), model.height.as_str()),
            ("30", "20", "2")
        );
        assert_eq!(model.shipping_class_id, 4);
        assert_eq!(model.average_rating, "4.50");
        assert_eq!(model.menu_order, 3);
    }

    #[test]
    fn product_lists_become_json_text() {
        let model = product_from_dto(7, product_fixture());

        assert_eq!(model.category_list()[0].name, "Clothing");
        assert_eq!(model.tag_list()[0].slug, "winter");
        assert_eq!(model.image_list()[0].id, 77);
        assert_eq!(model.attribute_list()[0].options, vec!["Blue", "Red"]);
        assert_eq!(model.related_id_list(), vec![5, 6]);
        assert_eq!(model.upsell_ids, "");
        assert_eq!(model.cross_sell_id_list(), vec![9]);
        assert_eq!(model.variation_id_list(), vec![201, 202]);

        let meta: serde_json::Value = serde_json::from_str(&model.metadata).unwrap();
        assert_eq!(meta, json!([{"id": 900, "key": "_custom", "value": {"a": 1}}]));
    }

    #[test]
    fn variation_maps_image_and_attributes() {
        let dto: VariationDto = serde_json::from_value(json!({
            "id": 201,
            "sku": "HOOD-1-BLUE",
            "status": "publish",
            "regular_price": "50",
            "manage_stock": true,
            "stock_quantity": 3,
            "image": {"id": 78, "src": "https://shop.test/blue.png"},
            "attributes": [{"id": 1, "name": "Color", "option": "Blue"}],
            "dimensions": {"length": "1", "width": "2", "height": "3"}
        }))
        .unwrap();

        let model = variation_from_dto(7, 101, dto);

        assert_eq!(model.remote_product_id, 101);
        assert_eq!(model.remote_variation_id, 201);
        assert_eq!(model.stock_quantity, 3.0);
        assert_eq!(model.image_model().unwrap().id, 78);
        assert_eq!(model.option_label(), "Blue");
        assert_eq!(model.height, "3");
    }

    #[test]
    fn category_without_image_has_empty_url() {
        let dto: CategoryDto =
            serde_json::from_value(json!({"id": 4, "name": "Misc", "parent": 0, "image": null}))
                .unwrap();
        let model = category_from_dto(1, dto);
        assert_eq!(model.image_url, "");
        assert_eq!(model.remote_id, 4);
    }

    #[test]
    fn review_keeps_avatar_map() {
        let dto: ReviewDto = serde_json::from_value(json!({
            "id": 11,
            "product_id": 101,
            "rating": 4,
            "reviewer_avatar_urls": {"24": "https://a.test/24"}
        }))
        .unwrap();
        let model = review_from_dto(1, dto);
        assert_eq!(model.remote_product_id, 101);
        assert_eq!(
            model.largest_avatar_url().as_deref(),
            Some("https://a.test/24")
        );
    }
}
