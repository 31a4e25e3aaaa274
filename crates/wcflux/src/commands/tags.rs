//! Tag command handlers.

use tabled::Tabled;
use wcflux_core::{ProductStore, TagModel};

use crate::cli::{GlobalOpts, TagsArgs, TagsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct TagRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Products")]
    count: i64,
}

impl From<&TagModel> for TagRow {
    fn from(t: &TagModel) -> Self {
        Self {
            id: t.remote_id,
            name: t.name.clone(),
            slug: t.slug.clone(),
            count: t.count,
        }
    }
}

pub async fn handle(
    store: &ProductStore,
    args: TagsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let tags = match args.command {
        TagsCommand::List { search } => store.fetch_tags(search.as_deref()).await?,
        TagsCommand::Create { names } => {
            let created = store.add_tags(&names).await?;
            util::notice(
                global,
                &format!("{} of {} tags created", created.len(), names.len()),
            );
            created
        }
    };

    let out = output::render_list(
        global.output,
        &tags,
        |t| TagRow::from(t),
        |t| t.remote_id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
