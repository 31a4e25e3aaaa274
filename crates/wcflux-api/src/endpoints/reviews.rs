// Product review endpoints

use serde_json::json;
use tracing::debug;

use super::{join_ids, paging};
use crate::client::{Page, WooClient};
use crate::error::Error;
use crate::types::ReviewDto;

const REVIEWS: &str = "wc/v3/products/reviews";

impl WooClient {
    /// `GET /wc/v3/products/reviews`, optionally limited to `product_ids`.
    ///
    /// `status` defaults to `all` so held and spam reviews come back too.
    pub async fn list_reviews(
        &self,
        page: u32,
        per_page: u32,
        product_ids: &[i64],
        status: Option<&str>,
    ) -> Result<Page<ReviewDto>, Error> {
        let mut params = paging(page, per_page);
        params.push(("status", status.unwrap_or("all").to_owned()));
        if !product_ids.is_empty() {
            params.push(("product", join_ids(product_ids)));
        }
        self.get_page(REVIEWS, &params).await
    }

    /// `GET /wc/v3/products/reviews/{id}`
    pub async fn get_review(&self, review_id: i64) -> Result<ReviewDto, Error> {
        self.get(&format!("{REVIEWS}/{review_id}")).await
    }

    /// `PUT /wc/v3/products/reviews/{id}` with `{"status": ...}`
    ///
    /// Accepted statuses: `approved`, `hold`, `spam`, `unspam`, `trash`, `untrash`.
    pub async fn update_review_status(
        &self,
        review_id: i64,
        status: &str,
    ) -> Result<ReviewDto, Error> {
        debug!(review_id, status, "updating review status");
        self.put(&format!("{REVIEWS}/{review_id}"), &json!({ "status": status }))
            .await
    }
}
