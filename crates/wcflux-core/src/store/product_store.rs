// ── ProductStore ──
//
// Each operation performs one REST round trip (plus paging where a whole
// collection is requested), maps the response into models, and refreshes
// the cache. Updates diff the edited model against the cached copy so
// only changed fields are sent. No retries.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};
use wcflux_api::endpoints::{DEFAULT_PER_PAGE, MAX_PER_PAGE};
use wcflux_api::{BatchRequest, ProductQuery, WooClient};

use super::collection::EntityCollection;
use crate::config::StoreConfig;
use crate::convert::{
    category_from_dto, product_from_dto, review_from_dto, shipping_class_from_dto, tag_from_dto,
    variation_from_dto,
};
use crate::error::{CoreError, ProductError, ProductErrorType};
use crate::model::{
    CategoryModel, ProductModel, ReviewModel, ReviewStatus, ShippingClassModel, TagModel,
    VariationModel,
};
use crate::update_body::{product_update_body, variation_batch_update, variation_update_body};

type SiteKey = (i64, i64);
type VariationKey = (i64, i64, i64);

/// One page of fetched items.
#[derive(Debug, Clone)]
pub struct FetchResult<T> {
    pub items: Vec<T>,
    /// Whether the server reports more pages after this one.
    pub can_load_more: bool,
}

/// Product catalogue access for a single store.
pub struct ProductStore {
    client: Arc<WooClient>,
    site_id: i64,
    products: EntityCollection<SiteKey, ProductModel>,
    variations: EntityCollection<VariationKey, VariationModel>,
    categories: EntityCollection<SiteKey, CategoryModel>,
    tags: EntityCollection<SiteKey, TagModel>,
    shipping_classes: EntityCollection<SiteKey, ShippingClassModel>,
    reviews: EntityCollection<SiteKey, ReviewModel>,
}

impl ProductStore {
    /// Build a store and its HTTP client from runtime configuration.
    pub fn new(config: &StoreConfig) -> Result<Self, CoreError> {
        let client = WooClient::new(
            config.url.as_str(),
            config.auth.clone().into(),
            &config.transport(),
            config.route_style,
        )?;
        debug!(url = %config.url, site_id = config.site_id, "product store ready");
        Ok(Self::with_client(Arc::new(client), config.site_id))
    }

    /// Wrap an existing client (shared with other consumers, or pointed at a mock).
    pub fn with_client(client: Arc<WooClient>, site_id: i64) -> Self {
        Self {
            client,
            site_id,
            products: EntityCollection::new(),
            variations: EntityCollection::new(),
            categories: EntityCollection::new(),
            tags: EntityCollection::new(),
            shipping_classes: EntityCollection::new(),
            reviews: EntityCollection::new(),
        }
    }

    pub fn site_id(&self) -> i64 {
        self.site_id
    }

    pub fn client(&self) -> &Arc<WooClient> {
        &self.client
    }

    // ── Products ─────────────────────────────────────────────────────

    /// Fetch one page (1-based) of products, newest first.
    pub async fn fetch_products(&self, page: u32) -> Result<FetchResult<ProductModel>, ProductError> {
        self.query_products(&ProductQuery::page(page, DEFAULT_PER_PAGE))
            .await
    }

    /// Fetch a page of products with arbitrary filters.
    pub async fn query_products(
        &self,
        query: &ProductQuery,
    ) -> Result<FetchResult<ProductModel>, ProductError> {
        let page = self.client.list_products(query).await?;
        let can_load_more = page.has_more(query.page.max(1), query.per_page);
        let items: Vec<ProductModel> = page
            .data
            .into_iter()
            .map(|dto| product_from_dto(self.site_id, dto))
            .collect();

        self.products
            .upsert_many(items.iter().map(|p| ((p.site_id, p.remote_id), p.clone())));
        info!(count = items.len(), can_load_more, "fetched products");
        Ok(FetchResult {
            items,
            can_load_more,
        })
    }

    pub async fn fetch_product(&self, remote_id: i64) -> Result<ProductModel, ProductError> {
        let dto = self.client.get_product(remote_id).await?;
        let product = product_from_dto(self.site_id, dto);
        self.products
            .upsert((self.site_id, product.remote_id), product.clone());
        Ok(product)
    }

    /// First page of products matching `term` (name, description, or SKU).
    pub async fn search_products(&self, term: &str) -> Result<Vec<ProductModel>, ProductError> {
        let query = ProductQuery {
            search: Some(term.to_owned()),
            ..ProductQuery::page(1, DEFAULT_PER_PAGE)
        };
        Ok(self.query_products(&query).await?.items)
    }

    /// Create a product from every non-default field of `product`.
    pub async fn create_product(&self, product: &ProductModel) -> Result<ProductModel, ProductError> {
        let body = product_update_body(None, product);
        if body.is_empty() {
            return Err(ProductError::new(
                ProductErrorType::InvalidParam,
                "product has no fields to create",
            ));
        }
        let dto = self.client.create_product(&body).await?;
        let created = product_from_dto(self.site_id, dto);
        info!(product_id = created.remote_id, "created product");
        self.products
            .upsert((self.site_id, created.remote_id), created.clone());
        Ok(created)
    }

    /// Send the fields of `updated` that differ from the cached copy.
    ///
    /// When nothing changed no request is made and the cached copy (or
    /// `updated` itself, if uncached) is returned.
    pub async fn update_product(&self, updated: &ProductModel) -> Result<ProductModel, ProductError> {
        let key = (self.site_id, updated.remote_id);
        let stored = self.products.get(&key);
        let body = product_update_body(stored.as_deref(), updated);

        if body.is_empty() {
            debug!(product_id = updated.remote_id, "no product changes to send");
            return Ok(stored.map_or_else(|| updated.clone(), |p| (*p).clone()));
        }

        let dto = self.client.update_product(updated.remote_id, &body).await?;
        let saved = product_from_dto(self.site_id, dto);
        info!(product_id = saved.remote_id, fields = body.len(), "updated product");
        self.products.upsert(key, saved.clone());
        Ok(saved)
    }

    /// Delete a product. Without `force` WooCommerce moves it to the trash.
    pub async fn delete_product(
        &self,
        remote_id: i64,
        force: bool,
    ) -> Result<ProductModel, ProductError> {
        let dto = self.client.delete_product(remote_id, force).await?;
        let deleted = product_from_dto(self.site_id, dto);
        self.products.remove(&(self.site_id, remote_id));
        self.variations
            .remove_where(|&(site, product, _)| site == self.site_id && product == remote_id);
        info!(product_id = remote_id, force, "deleted product");
        Ok(deleted)
    }

    /// `true` when no product on the store already uses `sku`.
    pub async fn verify_sku_available(&self, sku: &str) -> Result<bool, ProductError> {
        let matches = self.client.products_with_sku(sku).await?;
        let taken = matches.iter().any(|p| p.sku.eq_ignore_ascii_case(sku));
        debug!(sku, taken, "checked sku availability");
        Ok(!taken)
    }

    pub fn product(&self, remote_id: i64) -> Option<Arc<ProductModel>> {
        self.products.get(&(self.site_id, remote_id))
    }

    pub fn products(&self) -> Arc<Vec<Arc<ProductModel>>> {
        self.products.snapshot()
    }

    /// Receive the cached product list after every change.
    pub fn subscribe_products(&self) -> watch::Receiver<Arc<Vec<Arc<ProductModel>>>> {
        self.products.subscribe()
    }

    // ── Variations ───────────────────────────────────────────────────

    /// Fetch every variation of a product, replacing the cached set.
    pub async fn fetch_variations(
        &self,
        product_id: i64,
    ) -> Result<Vec<VariationModel>, ProductError> {
        let client = &self.client;
        let dtos = client
            .paginate_all(MAX_PER_PAGE, |page, per_page| {
                client.list_variations(product_id, page, per_page)
            })
            .await?;
        let items: Vec<VariationModel> = dtos
            .into_iter()
            .map(|dto| variation_from_dto(self.site_id, product_id, dto))
            .collect();

        self.variations
            .remove_where(|&(site, product, _)| site == self.site_id && product == product_id);
        self.variations.upsert_many(
            items
                .iter()
                .map(|v| ((v.site_id, product_id, v.remote_variation_id), v.clone())),
        );
        info!(product_id, count = items.len(), "fetched variations");
        Ok(items)
    }

    pub async fn fetch_variation(
        &self,
        product_id: i64,
        variation_id: i64,
    ) -> Result<VariationModel, ProductError> {
        let dto = self.client.get_variation(product_id, variation_id).await?;
        let variation = variation_from_dto(self.site_id, product_id, dto);
        self.variations
            .upsert((self.site_id, product_id, variation_id), variation.clone());
        Ok(variation)
    }

    /// Send the fields of `updated` that differ from the cached variation.
    pub async fn update_variation(
        &self,
        updated: &VariationModel,
    ) -> Result<VariationModel, ProductError> {
        let key = (
            self.site_id,
            updated.remote_product_id,
            updated.remote_variation_id,
        );
        let stored = self.variations.get(&key);
        let body = variation_update_body(stored.as_deref(), updated);

        if body.is_empty() {
            debug!(
                product_id = updated.remote_product_id,
                variation_id = updated.remote_variation_id,
                "no variation changes to send"
            );
            return Ok(stored.map_or_else(|| updated.clone(), |v| (*v).clone()));
        }

        let dto = self
            .client
            .update_variation(updated.remote_product_id, updated.remote_variation_id, &body)
            .await?;
        let saved = variation_from_dto(self.site_id, updated.remote_product_id, dto);
        info!(
            product_id = saved.remote_product_id,
            variation_id = saved.remote_variation_id,
            fields = body.len(),
            "updated variation"
        );
        self.variations.upsert(key, saved.clone());
        Ok(saved)
    }

    /// Update several variations of one product in a single batch request.
    ///
    /// Unchanged variations are left out; if none changed no request is made.
    /// Items the server rejects are logged and keep their cached copy. When
    /// every item is rejected the first item error is returned.
    pub async fn batch_update_variations(
        &self,
        product_id: i64,
        updated: &[VariationModel],
    ) -> Result<Vec<VariationModel>, ProductError> {
        let stored: Vec<Option<Arc<VariationModel>>> = updated
            .iter()
            .map(|v| {
                self.variations
                    .get(&(self.site_id, product_id, v.remote_variation_id))
            })
            .collect();
        let items = variation_batch_update(
            stored
                .iter()
                .map(Option::as_deref)
                .zip(updated.iter()),
        );

        if items.is_empty() {
            debug!(product_id, "no variation changes to batch");
            return Ok(Vec::new());
        }

        let request = BatchRequest {
            update: items,
            ..BatchRequest::default()
        };
        let response = self.client.batch_variations(product_id, &request).await?;

        let mut saved = Vec::with_capacity(response.update.len());
        let mut first_error = None;
        for item in response.update {
            if let Some(err) = item.error {
                warn!(
                    product_id,
                    variation_id = item.variation.id,
                    code = %err.code,
                    message = %err.message,
                    "variation not updated"
                );
                first_error.get_or_insert(err);
                continue;
            }
            saved.push(variation_from_dto(self.site_id, product_id, item.variation));
        }

        if let Some(err) = first_error.filter(|_| saved.is_empty()) {
            return Err(ProductError::new(
                ProductErrorType::from_code(&err.code),
                err.message,
            ));
        }

        self.variations.upsert_many(
            saved
                .iter()
                .map(|v| ((self.site_id, product_id, v.remote_variation_id), v.clone())),
        );
        info!(product_id, count = saved.len(), "batch updated variations");
        Ok(saved)
    }

    pub fn variation(&self, product_id: i64, variation_id: i64) -> Option<Arc<VariationModel>> {
        self.variations
            .get(&(self.site_id, product_id, variation_id))
    }

    /// Cached variations of one product, ordered by variation id.
    pub fn variations(&self, product_id: i64) -> Vec<Arc<VariationModel>> {
        self.variations
            .snapshot()
            .iter()
            .filter(|v| v.site_id == self.site_id && v.remote_product_id == product_id)
            .cloned()
            .collect()
    }

    // ── Categories & tags ────────────────────────────────────────────

    pub async fn fetch_categories(&self) -> Result<Vec<CategoryModel>, ProductError> {
        let client = &self.client;
        let dtos = client
            .paginate_all(MAX_PER_PAGE, |page, per_page| {
                client.list_categories(page, per_page)
            })
            .await?;
        let items: Vec<CategoryModel> = dtos
            .into_iter()
            .map(|dto| category_from_dto(self.site_id, dto))
            .collect();
        self.categories
            .upsert_many(items.iter().map(|c| ((c.site_id, c.remote_id), c.clone())));
        info!(count = items.len(), "fetched categories");
        Ok(items)
    }

    /// Create a category under `parent` (0 for top level).
    pub async fn add_category(&self, name: &str, parent: i64) -> Result<CategoryModel, ProductError> {
        let dto = self.client.create_category(name, parent).await?;
        let category = category_from_dto(self.site_id, dto);
        info!(category_id = category.remote_id, name, "created category");
        self.categories
            .upsert((self.site_id, category.remote_id), category.clone());
        Ok(category)
    }

    pub async fn fetch_tags(&self, search: Option<&str>) -> Result<Vec<TagModel>, ProductError> {
        let client = &self.client;
        let dtos = client
            .paginate_all(MAX_PER_PAGE, |page, per_page| {
                client.list_tags(page, per_page, search)
            })
            .await?;
        let items: Vec<TagModel> = dtos
            .into_iter()
            .map(|dto| tag_from_dto(self.site_id, dto))
            .collect();
        self.tags
            .upsert_many(items.iter().map(|t| ((t.site_id, t.remote_id), t.clone())));
        info!(count = items.len(), "fetched tags");
        Ok(items)
    }

    /// Create tags in one batch. Items the server rejects are logged and skipped.
    pub async fn add_tags(&self, names: &[String]) -> Result<Vec<TagModel>, ProductError> {
        if names.is_empty() {
            return Ok(Vec::new());
        }
        let response = self.client.batch_create_tags(names).await?;

        let mut created = Vec::with_capacity(response.create.len());
        for item in response.create {
            if let Some(err) = item.error {
                warn!(code = %err.code, message = %err.message, "tag not created");
                continue;
            }
            created.push(tag_from_dto(self.site_id, item.tag));
        }
        self.tags
            .upsert_many(created.iter().map(|t| ((t.site_id, t.remote_id), t.clone())));
        info!(requested = names.len(), created = created.len(), "created tags");
        Ok(created)
    }

    pub fn categories(&self) -> Arc<Vec<Arc<CategoryModel>>> {
        self.categories.snapshot()
    }

    pub fn tags(&self) -> Arc<Vec<Arc<TagModel>>> {
        self.tags.snapshot()
    }

    // ── Shipping classes ─────────────────────────────────────────────

    pub async fn fetch_shipping_classes(&self) -> Result<Vec<ShippingClassModel>, ProductError> {
        let client = &self.client;
        let dtos = client
            .paginate_all(MAX_PER_PAGE, |page, per_page| {
                client.list_shipping_classes(page, per_page)
            })
            .await?;
        let items: Vec<ShippingClassModel> = dtos
            .into_iter()
            .map(|dto| shipping_class_from_dto(self.site_id, dto))
            .collect();
        self.shipping_classes
            .upsert_many(items.iter().map(|s| ((s.site_id, s.remote_id), s.clone())));
        Ok(items)
    }

    pub fn shipping_classes(&self) -> Arc<Vec<Arc<ShippingClassModel>>> {
        self.shipping_classes.snapshot()
    }

    // ── Reviews ──────────────────────────────────────────────────────

    /// Fetch reviews of every status, optionally limited to `product_ids`.
    pub async fn fetch_reviews(&self, product_ids: &[i64]) -> Result<Vec<ReviewModel>, ProductError> {
        let client = &self.client;
        let dtos = client
            .paginate_all(MAX_PER_PAGE, |page, per_page| {
                client.list_reviews(page, per_page, product_ids, None)
            })
            .await?;
        let items: Vec<ReviewModel> = dtos
            .into_iter()
            .map(|dto| review_from_dto(self.site_id, dto))
            .collect();
        self.reviews
            .upsert_many(items.iter().map(|r| ((r.site_id, r.remote_id), r.clone())));
        info!(count = items.len(), "fetched reviews");
        Ok(items)
    }

    /// Moderate a review. Trashed reviews are dropped from the cache.
    pub async fn update_review_status(
        &self,
        review_id: i64,
        status: ReviewStatus,
    ) -> Result<ReviewModel, ProductError> {
        let dto = self
            .client
            .update_review_status(review_id, status.as_ref())
            .await?;
        let review = review_from_dto(self.site_id, dto);
        info!(review_id, status = %status, "updated review status");

        let key = (self.site_id, review_id);
        if status == ReviewStatus::Trash {
            self.reviews.remove(&key);
        } else {
            self.reviews.upsert(key, review.clone());
        }
        Ok(review)
    }

    pub fn reviews(&self) -> Arc<Vec<Arc<ReviewModel>>> {
        self.reviews.snapshot()
    }
}
