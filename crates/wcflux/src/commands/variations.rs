//! Variation command handlers.

use tabled::Tabled;
use wcflux_core::{ProductStore, VariationModel, variation_update_body};

use crate::cli::{GlobalOpts, VariationEdit, VariationsArgs, VariationsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct VariationRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Options")]
    options: String,
    #[tabled(rename = "SKU")]
    sku: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Stock")]
    stock: String,
}

impl VariationRow {
    fn new(v: &VariationModel, color: bool) -> Self {
        Self {
            id: v.remote_variation_id,
            options: v.option_label(),
            sku: v.sku.clone(),
            price: util::price(&v.price),
            stock: util::stock(v.manage_stock, v.stock_quantity, &v.stock_status, color),
        }
    }
}

fn detail(v: &VariationModel, color: bool) -> String {
    output::detail_lines(
        &[
            ("ID", v.remote_variation_id.to_string()),
            ("Product", v.remote_product_id.to_string()),
            ("Options", v.option_label()),
            ("SKU", v.sku.clone()),
            ("Status", v.status.clone()),
            ("Regular price", v.regular_price.clone()),
            ("Sale price", v.sale_price.clone()),
            (
                "Stock",
                util::stock(v.manage_stock, v.stock_quantity, &v.stock_status, color),
            ),
            ("Weight", v.weight.clone()),
            (
                "Image",
                v.image_model().map(|img| img.src).unwrap_or_default(),
            ),
        ],
        color,
    )
}

fn apply_edit(mut variation: VariationModel, edit: VariationEdit) -> VariationModel {
    if let Some(v) = edit.sku {
        variation.sku = v;
    }
    if let Some(v) = edit.status {
        variation.status = v;
    }
    if let Some(v) = edit.description {
        variation.description = v;
    }
    if let Some(v) = edit.regular_price {
        variation.regular_price = v;
    }
    if let Some(v) = edit.sale_price {
        variation.sale_price = v;
    }
    if let Some(v) = edit.manage_stock {
        variation.manage_stock = v;
    }
    if let Some(v) = edit.stock_quantity {
        variation.stock_quantity = v;
    }
    if let Some(v) = edit.stock_status {
        variation.stock_status = v;
    }
    if let Some(v) = edit.weight {
        variation.weight = v;
    }
    if edit.clear_image {
        variation.set_image_id(None);
    } else if let Some(id) = edit.image_id {
        variation.set_image_id(Some(id));
    }
    variation
}

/// Managed stock at `quantity` for the selected variations (all when `ids` is empty).
fn with_stock(variations: Vec<VariationModel>, ids: &[i64], quantity: f64) -> Vec<VariationModel> {
    variations
        .into_iter()
        .filter(|v| ids.is_empty() || ids.contains(&v.remote_variation_id))
        .map(|v| VariationModel {
            manage_stock: true,
            stock_quantity: quantity,
            ..v
        })
        .collect()
}

pub async fn handle(
    store: &ProductStore,
    args: VariationsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = util::color(global);

    match args.command {
        VariationsCommand::List { product_id } => {
            let variations = store.fetch_variations(product_id).await?;
            let out = output::render_list(
                global.output,
                &variations,
                |v| VariationRow::new(v, color),
                |v| v.remote_variation_id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        VariationsCommand::Get {
            product_id,
            variation_id,
        } => {
            let variation = store.fetch_variation(product_id, variation_id).await?;
            let out = output::render_single(
                global.output,
                &variation,
                |v| detail(v, color),
                |v| v.remote_variation_id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        VariationsCommand::Update {
            product_id,
            variation_id,
            edit,
            dry_run,
        } => {
            let current = store.fetch_variation(product_id, variation_id).await?;
            let updated = apply_edit(current.clone(), edit);

            if dry_run {
                let body = variation_update_body(Some(&current), &updated);
                output::print_output(&serde_json::to_string_pretty(&body)?, false);
                return Ok(());
            }

            let saved = store.update_variation(&updated).await?;
            util::notice(
                global,
                &format!("Variation {} updated", saved.remote_variation_id),
            );
            let out = output::render_single(
                global.output,
                &saved,
                |v| detail(v, color),
                |v| v.remote_variation_id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        VariationsCommand::Stock {
            product_id,
            quantity,
            variations,
        } => {
            let current = store.fetch_variations(product_id).await?;
            let edited = with_stock(current, &variations, quantity);
            if edited.is_empty() {
                return Err(CliError::Validation {
                    field: "variation".into(),
                    reason: format!("no matching variations on product {product_id}"),
                });
            }

            let saved = store.batch_update_variations(product_id, &edited).await?;
            util::notice(
                global,
                &format!("{} of {} variations updated", saved.len(), edited.len()),
            );
            let out = output::render_list(
                global.output,
                &saved,
                |v| VariationRow::new(v, color),
                |v| v.remote_variation_id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
