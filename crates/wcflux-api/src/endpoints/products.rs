// Product endpoints
//
// `wc/v3/products` collection and item routes. Updates are PUT with a
// partial body; only the keys present in the body are touched server side.

use serde_json::{Map, Value};
use tracing::debug;

use super::{join_ids, paging};
use crate::client::{Page, WooClient};
use crate::error::Error;
use crate::types::ProductDto;

const PRODUCTS: &str = "wc/v3/products";

/// Filters for `GET /wc/v3/products`.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub page: u32,
    pub per_page: u32,
    pub search: Option<String>,
    pub sku: Option<String>,
    pub status: Option<String>,
    pub include: Vec<i64>,
    pub exclude: Vec<i64>,
    /// `date`, `id`, `include`, `title`, `slug`, `price`, `popularity`, `rating`.
    pub orderby: Option<String>,
    /// `asc` or `desc`.
    pub order: Option<String>,
}

impl ProductQuery {
    pub fn page(page: u32, per_page: u32) -> Self {
        Self {
            page,
            per_page,
            ..Self::default()
        }
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = paging(self.page, self.per_page);
        if let Some(ref search) = self.search {
            params.push(("search", search.clone()));
        }
        if let Some(ref sku) = self.sku {
            params.push(("sku", sku.clone()));
        }
        if let Some(ref status) = self.status {
            params.push(("status", status.clone()));
        }
        if !self.include.is_empty() {
            params.push(("include", join_ids(&self.include)));
        }
        if !self.exclude.is_empty() {
            params.push(("exclude", join_ids(&self.exclude)));
        }
        if let Some(ref orderby) = self.orderby {
            params.push(("orderby", orderby.clone()));
        }
        if let Some(ref order) = self.order {
            params.push(("order", order.clone()));
        }
        params
    }
}

impl WooClient {
    /// `GET /wc/v3/products`
    pub async fn list_products(&self, query: &ProductQuery) -> Result<Page<ProductDto>, Error> {
        self.get_page(PRODUCTS, &query.params()).await
    }

    /// `GET /wc/v3/products/{id}`
    pub async fn get_product(&self, product_id: i64) -> Result<ProductDto, Error> {
        self.get(&format!("{PRODUCTS}/{product_id}")).await
    }

    /// `POST /wc/v3/products`
    pub async fn create_product(&self, body: &Map<String, Value>) -> Result<ProductDto, Error> {
        debug!(keys = body.len(), "creating product");
        self.post(PRODUCTS, body).await
    }

    /// `PUT /wc/v3/products/{id}` with a partial body.
    pub async fn update_product(
        &self,
        product_id: i64,
        body: &Map<String, Value>,
    ) -> Result<ProductDto, Error> {
        debug!(product_id, keys = ?body.keys().collect::<Vec<_>>(), "updating product");
        self.put(&format!("{PRODUCTS}/{product_id}"), body).await
    }

    /// `DELETE /wc/v3/products/{id}`
    ///
    /// Without `force` the product is moved to the trash.
    pub async fn delete_product(&self, product_id: i64, force: bool) -> Result<ProductDto, Error> {
        self.delete_with_params(
            &format!("{PRODUCTS}/{product_id}"),
            &[("force", force.to_string())],
        )
        .await
    }

    /// Products whose SKU matches `sku` exactly (`GET /wc/v3/products?sku=`).
    ///
    /// Only the `id` and `sku` fields are requested.
    pub async fn products_with_sku(&self, sku: &str) -> Result<Vec<ProductDto>, Error> {
        self.get_with_params(
            PRODUCTS,
            &[
                ("sku", sku.to_owned()),
                ("_fields", "id,sku".to_owned()),
            ],
        )
        .await
    }
}
