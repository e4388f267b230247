use std::collections::HashMap;

use http::Method;

use super::BaseController;
use crate::auth::GLOBAL_AUTH_KEY;
use crate::error::Result;
use crate::http::HttpRequest;
use crate::models::Order;

/// Operations on `/store`.
pub struct StoreController {
    base: BaseController,
}

impl StoreController {
    pub(crate) fn new(base: BaseController) -> Self {
        Self { base }
    }

    /// Pet inventories keyed by status.
    pub async fn get_inventory(&self) -> Result<HashMap<String, i32>> {
        let url = self.base.url("/store/inventory", &[])?;
        let request =
            HttpRequest::new(Method::GET, url).with_header("accept", "application/json");
        self.base
            .execute(request, Some(GLOBAL_AUTH_KEY))
            .await?
            .json()
    }

    pub async fn place_order(&self, body: &Order) -> Result<Order> {
        let url = self.base.url("/store/order", &[])?;
        let request = HttpRequest::new(Method::POST, url)
            .with_header("accept", "application/json")
            .with_json(body)?;
        self.base.execute(request, None).await?.json()
    }

    pub async fn get_order_by_id(&self, order_id: i64) -> Result<Order> {
        let order_id = order_id.to_string();
        let url = self
            .base
            .url("/store/order/{orderId}", &[("orderId", order_id.as_str())])?;
        let request =
            HttpRequest::new(Method::GET, url).with_header("accept", "application/json");
        self.base.execute(request, None).await?.json()
    }

    pub async fn delete_order(&self, order_id: i64) -> Result<()> {
        let order_id = order_id.to_string();
        let url = self
            .base
            .url("/store/order/{orderId}", &[("orderId", order_id.as_str())])?;
        self.base
            .execute(HttpRequest::new(Method::DELETE, url), None)
            .await?;
        Ok(())
    }
}
