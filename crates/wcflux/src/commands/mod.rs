//! Command handlers, one module per resource.

pub mod categories;
pub mod config_cmd;
pub mod products;
pub mod reviews;
pub mod shipping_classes;
pub mod tags;
pub mod util;
pub mod variations;

use wcflux_core::ProductStore;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a store-backed command to its handler.
pub async fn dispatch(
    cmd: Command,
    store: &ProductStore,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Products(args) => products::handle(store, args, global).await,
        Command::Variations(args) => variations::handle(store, args, global).await,
        Command::Categories(args) => categories::handle(store, args, global).await,
        Command::Tags(args) => tags::handle(store, args, global).await,
        Command::ShippingClasses(args) => shipping_classes::handle(store, args, global).await,
        Command::Reviews(args) => reviews::handle(store, args, global).await,
        Command::Config(_) | Command::Completions(_) => unreachable!("handled in main"),
    }
}
