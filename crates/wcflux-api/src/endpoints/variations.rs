// Product variation endpoints
//
// Variations hang off their parent: `wc/v3/products/{product_id}/variations`.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::paging;
use crate::client::{Page, WooClient};
use crate::error::Error;
use crate::types::{VariationBatchItem, VariationDto};

fn variations_route(product_id: i64) -> String {
    format!("wc/v3/products/{product_id}/variations")
}

/// Body for `POST .../variations/batch`.
///
/// Every `update` item must carry its `id` next to the changed fields.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub create: Vec<Map<String, Value>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub update: Vec<Map<String, Value>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub delete: Vec<i64>,
}

impl BatchRequest {
    pub fn is_empty(&self) -> bool {
        self.create.is_empty() && self.update.is_empty() && self.delete.is_empty()
    }
}

/// Response of `POST .../variations/batch`. Each list may mix saved
/// variations with per-item errors.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default)]
pub struct BatchResponse {
    pub create: Vec<VariationBatchItem>,
    pub update: Vec<VariationBatchItem>,
    pub delete: Vec<VariationBatchItem>,
}

impl WooClient {
    /// `GET /wc/v3/products/{product_id}/variations`
    pub async fn list_variations(
        &self,
        product_id: i64,
        page: u32,
        per_page: u32,
    ) -> Result<Page<VariationDto>, Error> {
        self.get_page(&variations_route(product_id), &paging(page, per_page))
            .await
    }

    /// `GET /wc/v3/products/{product_id}/variations/{id}`
    pub async fn get_variation(
        &self,
        product_id: i64,
        variation_id: i64,
    ) -> Result<VariationDto, Error> {
        self.get(&format!("{}/{variation_id}", variations_route(product_id)))
            .await
    }

    /// `POST /wc/v3/products/{product_id}/variations`
    pub async fn create_variation(
        &self,
        product_id: i64,
        body: &Map<String, Value>,
    ) -> Result<VariationDto, Error> {
        debug!(product_id, "creating variation");
        self.post(&variations_route(product_id), body).await
    }

    /// `PUT /wc/v3/products/{product_id}/variations/{id}` with a partial body.
    pub async fn update_variation(
        &self,
        product_id: i64,
        variation_id: i64,
        body: &Map<String, Value>,
    ) -> Result<VariationDto, Error> {
        debug!(product_id, variation_id, keys = ?body.keys().collect::<Vec<_>>(), "updating variation");
        self.put(
            &format!("{}/{variation_id}", variations_route(product_id)),
            body,
        )
        .await
    }

    /// `DELETE /wc/v3/products/{product_id}/variations/{id}?force=true`
    ///
    /// Variations do not support trashing, so `force` is always set.
    pub async fn delete_variation(
        &self,
        product_id: i64,
        variation_id: i64,
    ) -> Result<VariationDto, Error> {
        self.delete_with_params(
            &format!("{}/{variation_id}", variations_route(product_id)),
            &[("force", "true".to_owned())],
        )
        .await
    }

    /// `POST /wc/v3/products/{product_id}/variations/batch`
    pub async fn batch_variations(
        &self,
        product_id: i64,
        request: &BatchRequest,
    ) -> Result<BatchResponse, Error> {
        debug!(
            product_id,
            create = request.create.len(),
            update = request.update.len(),
            delete = request.delete.len(),
            "batch variation request"
        );
        self.post(&format!("{}/batch", variations_route(product_id)), request)
            .await
    }
}
