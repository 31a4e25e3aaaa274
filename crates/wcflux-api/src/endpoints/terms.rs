// Product category and tag endpoints

use serde_json::json;
use tracing::debug;

use super::paging;
use crate::client::{Page, WooClient};
use crate::error::Error;
use crate::types::{CategoryDto, TagBatchResponse, TagDto};

const CATEGORIES: &str = "wc/v3/products/categories";
const TAGS: &str = "wc/v3/products/tags";

impl WooClient {
    // ── Categories ───────────────────────────────────────────────────

    /// `GET /wc/v3/products/categories`
    pub async fn list_categories(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<Page<CategoryDto>, Error> {
        self.get_page(CATEGORIES, &paging(page, per_page)).await
    }

    /// `POST /wc/v3/products/categories`
    ///
    /// A `parent` of 0 creates a top-level category.
    pub async fn create_category(&self, name: &str, parent: i64) -> Result<CategoryDto, Error> {
        debug!(name, parent, "creating category");
        self.post(CATEGORIES, &json!({ "name": name, "parent": parent }))
            .await
    }

    // ── Tags ─────────────────────────────────────────────────────────

    /// `GET /wc/v3/products/tags`
    pub async fn list_tags(
        &self,
        page: u32,
        per_page: u32,
        search: Option<&str>,
    ) -> Result<Page<TagDto>, Error> {
        let mut params = paging(page, per_page);
        if let Some(term) = search {
            params.push(("search", term.to_owned()));
        }
        self.get_page(TAGS, &params).await
    }

    /// `POST /wc/v3/products/tags/batch` with `{"create": [{"name": ...}]}`
    pub async fn batch_create_tags(&self, names: &[String]) -> Result<TagBatchResponse, Error> {
        debug!(count = names.len(), "creating tags");
        let create: Vec<_> = names.iter().map(|name| json!({ "name": name })).collect();
        self.post(&format!("{TAGS}/batch"), &json!({ "create": create }))
            .await
    }
}
