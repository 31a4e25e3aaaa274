//! Category command handlers.

use tabled::Tabled;
use wcflux_core::{CategoryModel, ProductStore, sort_category_tree};

use crate::cli::{CategoriesArgs, CategoriesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Products")]
    count: i64,
}

pub async fn handle(
    store: &ProductStore,
    args: CategoriesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        CategoriesCommand::List => {
            let categories = store.fetch_categories().await?;
            // Tree order for every format; the table also indents by depth.
            let tree = sort_category_tree(&categories);
            let ordered: Vec<&CategoryModel> = tree.iter().map(|(_, c)| *c).collect();
            let depths: std::collections::HashMap<i64, usize> = tree
                .iter()
                .map(|(depth, c)| (c.remote_id, *depth))
                .collect();

            let out = output::render_list(
                global.output,
                &ordered,
                |c| CategoryRow {
                    id: c.remote_id,
                    name: format!(
                        "{}{}",
                        "  ".repeat(depths.get(&c.remote_id).copied().unwrap_or(0)),
                        c.name
                    ),
                    slug: c.slug.clone(),
                    count: c.count,
                },
                |c| c.remote_id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CategoriesCommand::Create { name, parent } => {
            let category = store.add_category(&name, parent).await?;
            util::notice(
                global,
                &format!("Category '{}' created (ID {})", category.name, category.remote_id),
            );
            if matches!(global.output, crate::cli::OutputFormat::Plain) {
                output::print_output(&category.remote_id.to_string(), global.quiet);
            }
            Ok(())
        }
    }
}
