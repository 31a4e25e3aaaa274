//! Shipping class command handlers.

use tabled::Tabled;
use wcflux_core::ProductStore;

use crate::cli::{GlobalOpts, ShippingClassesArgs, ShippingClassesCommand};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct ShippingClassRow {
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
    args: ShippingClassesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ShippingClassesCommand::List => {
            let classes = store.fetch_shipping_classes().await?;
            let out = output::render_list(
                global.output,
                &classes,
                |s| ShippingClassRow {
                    id: s.remote_id,
                    name: s.name.clone(),
                    slug: s.slug.clone(),
                    count: s.count,
                },
                |s| s.slug.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
