//! Product command handlers.

use std::str::FromStr;

use tabled::Tabled;
use wcflux_core::{
    ProductModel, ProductQuery, ProductStatus, ProductStore, StockStatus, product_update_body,
};

use crate::cli::{GlobalOpts, ProductEdit, ProductListArgs, ProductsArgs, ProductsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "SKU")]
    sku: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Stock")]
    stock: String,
}

impl ProductRow {
    fn new(p: &ProductModel, color: bool) -> Self {
        Self {
            id: p.remote_id,
            name: p.name.clone(),
            sku: p.sku.clone(),
            kind: p.product_type.clone(),
            status: p.status.clone(),
            price: util::price(&p.price),
            stock: util::stock(p.manage_stock, p.stock_quantity, &p.stock_status, color),
        }
    }
}

fn detail(p: &ProductModel, color: bool) -> String {
    let names = |terms: Vec<wcflux_core::ProductTerm>| {
        terms
            .into_iter()
            .map(|t| t.name)
            .collect::<Vec<_>>()
            .join(", ")
    };
    let mut pairs = vec![
        ("ID", p.remote_id.to_string()),
        ("Name", p.name.clone()),
        ("SKU", p.sku.clone()),
        ("Type", p.product_type.clone()),
        ("Status", p.status.clone()),
        ("Regular price", p.regular_price.clone()),
        ("Sale price", p.sale_price.clone()),
        (
            "Stock",
            util::stock(p.manage_stock, p.stock_quantity, &p.stock_status, color),
        ),
        ("Categories", names(p.category_list())),
        ("Tags", names(p.tag_list())),
        ("Weight", p.weight.clone()),
        (
            "Dimensions",
            if p.length.is_empty() && p.width.is_empty() && p.height.is_empty() {
                String::new()
            } else {
                format!("{} x {} x {}", p.length, p.width, p.height)
            },
        ),
        ("Shipping class", p.shipping_class.clone()),
        ("Permalink", p.permalink.clone()),
    ];
    let variations = p.variation_id_list();
    if !variations.is_empty() {
        pairs.push(("Variations", variations.len().to_string()));
    }
    if let Some(modified) = p.modified_at() {
        pairs.push(("Modified", modified.to_rfc3339()));
    }
    output::detail_lines(&pairs, color)
}

// ── Edits ───────────────────────────────────────────────────────────

fn validate<T: FromStr>(field: &str, value: &str) -> Result<(), CliError> {
    T::from_str(value).map(|_| ()).map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("unsupported value '{value}'"),
    })
}

/// Apply flag values on top of the current product.
fn apply_edit(mut product: ProductModel, edit: ProductEdit) -> Result<ProductModel, CliError> {
    if let Some(ref status) = edit.status {
        validate::<ProductStatus>("status", status)?;
    }
    if let Some(ref status) = edit.stock_status {
        validate::<StockStatus>("stock-status", status)?;
    }

    if let Some(v) = edit.name {
        product.name = v;
    }
    if let Some(v) = edit.sku {
        product.sku = v;
    }
    if let Some(v) = edit.status {
        product.status = v;
    }
    if let Some(v) = edit.regular_price {
        product.regular_price = v;
    }
    if let Some(v) = edit.sale_price {
        product.sale_price = v;
    }
    if let Some(v) = edit.description {
        product.description = v;
    }
    if let Some(v) = edit.short_description {
        product.short_description = v;
    }
    if let Some(v) = edit.featured {
        product.featured = v;
    }
    if let Some(v) = edit.manage_stock {
        product.manage_stock = v;
    }
    if let Some(v) = edit.stock_quantity {
        product.stock_quantity = v;
    }
    if let Some(v) = edit.stock_status {
        product.stock_status = v;
    }
    if let Some(v) = edit.backorders {
        product.backorders = v;
    }
    if let Some(v) = edit.weight {
        product.weight = v;
    }
    if let Some(v) = edit.length {
        product.length = v;
    }
    if let Some(v) = edit.width {
        product.width = v;
    }
    if let Some(v) = edit.height {
        product.height = v;
    }
    if let Some(v) = edit.shipping_class {
        product.shipping_class = v;
    }
    if let Some(ids) = edit.categories {
        product.set_category_ids(&ids);
    }
    if let Some(ids) = edit.tags {
        product.set_tag_ids(&ids);
    }
    Ok(product)
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub async fn handle(
    store: &ProductStore,
    args: ProductsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = util::color(global);

    match args.command {
        ProductsCommand::List(list) => {
            let products = list_products(store, &list).await?;
            let out = output::render_list(
                global.output,
                &products,
                |p| ProductRow::new(p, color),
                |p| p.remote_id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProductsCommand::Get { id } => {
            let product = store.fetch_product(id).await?;
            let out = output::render_single(
                global.output,
                &product,
                |p| detail(p, color),
                |p| p.remote_id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProductsCommand::Update { id, edit, dry_run } => {
            let current = store.fetch_product(id).await?;
            let updated = apply_edit(current.clone(), edit)?;

            if dry_run {
                let body = product_update_body(Some(&current), &updated);
                let out = serde_json::to_string_pretty(&body)?;
                output::print_output(&out, false);
                return Ok(());
            }

            if updated == current {
                util::notice(global, "No changes to send");
                return Ok(());
            }

            let saved = store.update_product(&updated).await?;
            util::notice(global, &format!("Product {} updated", saved.remote_id));
            let out = output::render_single(
                global.output,
                &saved,
                |p| detail(p, color),
                |p| p.remote_id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProductsCommand::Delete { id, force } => {
            let prompt = if force {
                format!("Permanently delete product {id}?")
            } else {
                format!("Move product {id} to the trash?")
            };
            if !util::confirm(&prompt, "products delete", global.yes)? {
                return Ok(());
            }
            let deleted = store.delete_product(id, force).await?;
            util::notice(
                global,
                &format!(
                    "Product {} ({}) {}",
                    deleted.remote_id,
                    deleted.name,
                    if force { "deleted" } else { "trashed" }
                ),
            );
            Ok(())
        }

        ProductsCommand::SkuCheck { sku } => {
            let available = store.verify_sku_available(&sku).await?;
            let out = output::render_single(
                global.output,
                &serde_json::json!({ "sku": sku, "available": available }),
                |_| {
                    if available {
                        format!("SKU '{sku}' is available")
                    } else {
                        format!("SKU '{sku}' is already in use")
                    }
                },
                |_| available.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

async fn list_products(
    store: &ProductStore,
    list: &ProductListArgs,
) -> Result<Vec<ProductModel>, CliError> {
    let mut query = ProductQuery {
        search: list.search.clone(),
        status: list.status.clone(),
        sku: list.sku.clone(),
        ..ProductQuery::page(list.page, list.limit)
    };

    let mut products = Vec::new();
    loop {
        let page = store.query_products(&query).await?;
        let received = page.items.len();
        products.extend(page.items);
        if !list.all || !page.can_load_more || received == 0 {
            break;
        }
        query.page = query.page.max(1) + 1;
    }
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> ProductModel {
        ProductModel {
            remote_id: 42,
            name: "Shirt".into(),
            status: "publish".into(),
            manage_stock: true,
            stock_quantity: 5.0,
            ..ProductModel::default()
        }
    }

    #[test]
    fn unset_flags_leave_product_untouched() {
        let edited = apply_edit(product(), ProductEdit::default()).unwrap_or_default();
        assert_eq!(edited, product());
    }

    #[test]
    fn flags_overwrite_fields() {
        let edit = ProductEdit {
            name: Some("Tee".into()),
            stock_quantity: Some(3.0),
            categories: Some(vec![9]),
            ..ProductEdit::default()
        };
        let edited = apply_edit(product(), edit).unwrap_or_default();
        assert_eq!(edited.name, "Tee");
        assert!((edited.stock_quantity - 3.0).abs() < f64::EPSILON);
        assert_eq!(edited.category_list()[0].id, 9);
    }

    #[test]
    fn bad_status_rejected() {
        let edit = ProductEdit {
            status: Some("archived".into()),
            ..ProductEdit::default()
        };
        assert!(matches!(
            apply_edit(product(), edit),
            Err(CliError::Validation { .. })
        ));
    }
}
