//! Review command handlers.

use std::str::FromStr;

use tabled::Tabled;
use wcflux_core::{ProductStore, ReviewModel, ReviewStatus};

use crate::cli::{GlobalOpts, ReviewsArgs, ReviewsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct ReviewRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Product")]
    product: i64,
    #[tabled(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Reviewer")]
    reviewer: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Review")]
    excerpt: String,
}

impl From<&ReviewModel> for ReviewRow {
    fn from(r: &ReviewModel) -> Self {
        Self {
            id: r.remote_id,
            product: r.remote_product_id,
            rating: stars(r.rating),
            reviewer: r.reviewer.clone(),
            status: r.status.clone(),
            excerpt: excerpt(&r.review, 48),
        }
    }
}

fn stars(rating: i64) -> String {
    let filled = usize::try_from(rating.clamp(0, 5)).unwrap_or(0);
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// First `max` characters of the review text with HTML tags removed.
fn excerpt(html: &str, max: usize) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => text.push(if c == '\n' { ' ' } else { c }),
            _ => {}
        }
    }
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_owned();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}…", cut.trim_end())
}

pub async fn handle(
    store: &ProductStore,
    args: ReviewsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ReviewsCommand::List { products } => {
            let reviews = store.fetch_reviews(&products).await?;
            let out = output::render_list(
                global.output,
                &reviews,
                |r| ReviewRow::from(r),
                |r| r.remote_id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ReviewsCommand::Status { id, status } => {
            let status = ReviewStatus::from_str(&status).map_err(|_| CliError::Validation {
                field: "status".into(),
                reason: format!(
                    "expected approved, hold, spam, unspam, trash, or untrash; got '{status}'"
                ),
            })?;
            if status == ReviewStatus::Trash
                && !util::confirm(&format!("Trash review {id}?"), "reviews status trash", global.yes)?
            {
                return Ok(());
            }
            let review = store.update_review_status(id, status).await?;
            util::notice(
                global,
                &format!("Review {} is now {}", review.remote_id, review.status),
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_strips_markup_and_truncates() {
        assert_eq!(excerpt("<p>Great shirt!</p>\n", 48), "Great shirt!");
        assert_eq!(excerpt("<p>abcdefghij</p>", 4), "abcd…");
    }

    #[test]
    fn stars_clamp_rating() {
        assert_eq!(stars(3), "★★★☆☆");
        assert_eq!(stars(9), "★★★★★");
        assert_eq!(stars(-1), "☆☆☆☆☆");
    }
}
