// Shipping class endpoints

use super::paging;
use crate::client::{Page, WooClient};
use crate::error::Error;
use crate::types::ShippingClassDto;

const SHIPPING_CLASSES: &str = "wc/v3/products/shipping_classes";

impl WooClient {
    /// `GET /wc/v3/products/shipping_classes`
    pub async fn list_shipping_classes(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<Page<ShippingClassDto>, Error> {
        self.get_page(SHIPPING_CLASSES, &paging(page, per_page))
            .await
    }

    /// `GET /wc/v3/products/shipping_classes/{id}`
    pub async fn get_shipping_class(&self, class_id: i64) -> Result<ShippingClassDto, Error> {
        self.get(&format!("{SHIPPING_CLASSES}/{class_id}")).await
    }
}
