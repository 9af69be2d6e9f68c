use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Order, OrderId, OrderStatus},
    protocol::{CreateOrderRequest, HealthResponse, OrderCounts, UpdateOrderRequest},
};
use tracing::debug;

use crate::error::{FailureCause, GatewayError};

pub const DEFAULT_API_URL: &str = "http://localhost:7011";
pub const ORDERS_PATH: &str = "/api/v1/orders";

/// REST boundary for orders. One network round trip per call, no retries.
///
/// `create` and `update` succeed on any 2xx; the echoed order is handed back
/// only when its body decodes.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn list(&self) -> Result<Vec<Order>, GatewayError>;
    async fn create(&self, request: &CreateOrderRequest) -> Result<Option<Order>, GatewayError>;
    async fn update(
        &self,
        id: OrderId,
        request: &UpdateOrderRequest,
    ) -> Result<Option<Order>, GatewayError>;
    async fn delete(&self, id: OrderId) -> Result<(), GatewayError>;
    async fn get(&self, id: OrderId) -> Result<Order, GatewayError>;
    async fn list_by_status(&self, status: &OrderStatus) -> Result<Vec<Order>, GatewayError>;
    async fn search(&self, item: &str) -> Result<Vec<Order>, GatewayError>;
    async fn health(&self) -> Result<HealthResponse, GatewayError>;
    async fn counts(&self) -> Result<OrderCounts, GatewayError>;
}

pub struct HttpOrderGateway {
    http: Client,
    api_url: String,
}

impl HttpOrderGateway {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), api_url)
    }

    pub fn with_client(http: Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { http, api_url }
    }

    fn orders_url(&self) -> String {
        format!("{}{ORDERS_PATH}", self.api_url)
    }

    fn order_url(&self, id: OrderId) -> String {
        format!("{}{ORDERS_PATH}/{id}", self.api_url)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, FailureCause> {
        let body = request.send().await?.error_for_status()?.json().await?;
        Ok(body)
    }

    /// Only the status decides the outcome of a write: once the server has
    /// answered 2xx the change is in, whatever the body looks like.
    async fn send_write(&self, request: RequestBuilder) -> Result<Option<Order>, FailureCause> {
        let response = request.send().await?.error_for_status()?;
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(err) => {
                debug!(%err, "write response body unreadable");
                return Ok(None);
            }
        };
        match serde_json::from_slice(&body) {
            Ok(order) => Ok(Some(order)),
            Err(err) => {
                debug!(%err, "write response is not an order");
                Ok(None)
            }
        }
    }

    async fn delete_order(&self, id: OrderId) -> Result<(), FailureCause> {
        let response = self.http.delete(self.order_url(id)).send().await?;
        let status = response.status();
        if !status.is_success() && status != StatusCode::NO_CONTENT {
            return Err(FailureCause::Rejected(status));
        }
        Ok(())
    }
}

#[async_trait]
impl OrderGateway for HttpOrderGateway {
    async fn list(&self) -> Result<Vec<Order>, GatewayError> {
        debug!(url = %self.orders_url(), "fetching orders");
        self.fetch_json(self.http.get(self.orders_url()))
            .await
            .map_err(GatewayError::Load)
    }

    async fn create(&self, request: &CreateOrderRequest) -> Result<Option<Order>, GatewayError> {
        self.send_write(self.http.post(self.orders_url()).json(request))
            .await
            .map_err(GatewayError::Create)
    }

    async fn update(
        &self,
        id: OrderId,
        request: &UpdateOrderRequest,
    ) -> Result<Option<Order>, GatewayError> {
        self.send_write(self.http.put(self.order_url(id)).json(request))
            .await
            .map_err(GatewayError::Update)
    }

    async fn delete(&self, id: OrderId) -> Result<(), GatewayError> {
        self.delete_order(id).await.map_err(GatewayError::Delete)
    }

    async fn get(&self, id: OrderId) -> Result<Order, GatewayError> {
        self.fetch_json(self.http.get(self.order_url(id)))
            .await
            .map_err(GatewayError::Fetch)
    }

    async fn list_by_status(&self, status: &OrderStatus) -> Result<Vec<Order>, GatewayError> {
        let url = format!("{}/status/{status}", self.orders_url());
        self.fetch_json(self.http.get(url))
            .await
            .map_err(GatewayError::ByStatus)
    }

    async fn search(&self, item: &str) -> Result<Vec<Order>, GatewayError> {
        let url = format!("{}/search", self.orders_url());
        self.fetch_json(self.http.get(url).query(&[("item", item)]))
            .await
            .map_err(GatewayError::Search)
    }

    async fn health(&self) -> Result<HealthResponse, GatewayError> {
        let url = format!("{}/health", self.orders_url());
        self.fetch_json(self.http.get(url))
            .await
            .map_err(GatewayError::Health)
    }

    async fn counts(&self) -> Result<OrderCounts, GatewayError> {
        let url = format!("{}/count", self.orders_url());
        self.fetch_json(self.http.get(url))
            .await
            .map_err(GatewayError::Count)
    }
}

#[cfg(test)]
#[path = "tests/gateway_tests.rs"]
mod tests;
