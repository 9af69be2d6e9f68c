use serde::{Deserialize, Serialize};

use crate::domain::{OrderStatus, Price};

/// Body of `POST /api/v1/orders`. The price goes out as a JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub item: String,
    pub price: Price,
}

/// Partial update for `PUT /api/v1/orders/{id}`; only present fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOrderRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
}

impl UpdateOrderRequest {
    pub fn status(status: OrderStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn confirm() -> Self {
        Self::status(OrderStatus::Confirmed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// Server-side per-status totals from `GET /api/v1/orders/count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCounts {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub pending: u64,
    #[serde(default)]
    pub confirmed: u64,
    #[serde(default)]
    pub shipped: u64,
    #[serde(default)]
    pub delivered: u64,
    #[serde(default)]
    pub cancelled: u64,
}
