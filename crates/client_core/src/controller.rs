//! Orchestrates gateway calls and reconciles the view state with the server.
//!
//! Every successful mutation is followed by a full reload; the mutation's own
//! response is never merged into the local collection.

use std::sync::Arc;

use shared::{
    domain::{Order, OrderId, OrderStatus},
    protocol::{OrderCounts, UpdateOrderRequest},
};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    display::{OrderRow, StatusSummary},
    error::GatewayError,
    gateway::OrderGateway,
    view_model::{DraftOrder, LoadResolution, OrderViewState},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Completed,
    /// Local preconditions were not met; nothing was sent.
    Skipped,
    Failed,
    /// A newer reload was issued while this one was in flight.
    Superseded,
}

/// Point-in-time copy of everything a renderer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSnapshot {
    pub rows: Vec<OrderRow>,
    pub total_orders: usize,
    pub summary: StatusSummary,
    pub draft: DraftOrder,
    pub filter: String,
    pub loading: bool,
    pub error: String,
}

impl ViewSnapshot {
    pub fn is_empty(&self) -> bool {
        !self.loading && self.rows.is_empty()
    }
}

pub struct OrderController {
    gateway: Arc<dyn OrderGateway>,
    state: Mutex<OrderViewState>,
}

impl OrderController {
    pub fn new(gateway: Arc<dyn OrderGateway>) -> Arc<Self> {
        Arc::new(Self {
            gateway,
            state: Mutex::new(OrderViewState::default()),
        })
    }

    /// Startup sequence: the first load, with a health check running beside
    /// it. The check only logs and is never awaited.
    pub async fn start(&self) -> ActionOutcome {
        let gateway = Arc::clone(&self.gateway);
        tokio::spawn(async move { check_health(gateway.as_ref()).await });
        self.load().await
    }

    pub async fn load(&self) -> ActionOutcome {
        let ticket = self.state.lock().await.begin_load();
        info!(seq = ticket.seq(), "loading orders");

        let result = self.gateway.list().await;
        if let Err(err) = &result {
            warn!(seq = ticket.seq(), cause = %err.cause(), "order load failed");
        }

        let resolution = self.state.lock().await.finish_load(ticket, result);
        match resolution {
            LoadResolution::Replaced { count } => {
                info!(seq = ticket.seq(), count, "orders loaded");
                ActionOutcome::Completed
            }
            LoadResolution::Failed => ActionOutcome::Failed,
            LoadResolution::Stale => {
                debug!(seq = ticket.seq(), "discarding superseded order load");
                ActionOutcome::Superseded
            }
        }
    }

    pub async fn refresh(&self) -> ActionOutcome {
        self.load().await
    }

    /// Submits the draft. A blank item is ignored without touching any state.
    pub async fn submit_create(&self) -> ActionOutcome {
        let Some(request) = self.state.lock().await.draft.to_request() else {
            debug!("ignoring create with blank item");
            return ActionOutcome::Skipped;
        };

        match self.gateway.create(&request).await {
            Ok(created) => {
                debug!(id = ?created.map(|order| order.id), "order created");
                self.state.lock().await.draft.clear();
                self.load().await;
                ActionOutcome::Completed
            }
            Err(err) => self.fail(err).await,
        }
    }

    pub async fn confirm(&self, id: OrderId) -> ActionOutcome {
        match self
            .gateway
            .update(id, &UpdateOrderRequest::confirm())
            .await
        {
            Ok(_) => {
                debug!(%id, "order confirmed");
                self.load().await;
                ActionOutcome::Completed
            }
            Err(err) => self.fail(err).await,
        }
    }

    pub async fn delete(&self, id: OrderId) -> ActionOutcome {
        match self.gateway.delete(id).await {
            Ok(()) => {
                debug!(%id, "order deleted");
                self.load().await;
                ActionOutcome::Completed
            }
            Err(err) => self.fail(err).await,
        }
    }

    /// Reads one order straight from the server. The collection is not touched.
    pub async fn fetch(&self, id: OrderId) -> Option<Order> {
        match self.gateway.get(id).await {
            Ok(order) => Some(order),
            Err(err) => {
                self.fail(err).await;
                None
            }
        }
    }

    /// Server-side status lookup. Read-only, like [`Self::fetch`].
    pub async fn orders_with_status(&self, status: &OrderStatus) -> Option<Vec<Order>> {
        match self.gateway.list_by_status(status).await {
            Ok(orders) => Some(orders),
            Err(err) => {
                self.fail(err).await;
                None
            }
        }
    }

    /// Server-side item search. Read-only, like [`Self::fetch`].
    pub async fn search(&self, item: &str) -> Option<Vec<Order>> {
        match self.gateway.search(item).await {
            Ok(orders) => Some(orders),
            Err(err) => {
                self.fail(err).await;
                None
            }
        }
    }

    pub async fn server_counts(&self) -> Option<OrderCounts> {
        match self.gateway.counts().await {
            Ok(counts) => Some(counts),
            Err(err) => {
                self.fail(err).await;
                None
            }
        }
    }

    pub async fn set_draft_item(&self, item: impl Into<String>) {
        self.state.lock().await.draft.item = item.into();
    }

    pub async fn set_draft_price(&self, price: impl Into<String>) {
        self.state.lock().await.draft.price = price.into();
    }

    pub async fn set_filter(&self, filter: impl Into<String>) {
        self.state.lock().await.filter = filter.into();
    }

    pub async fn dismiss_error(&self) {
        self.state.lock().await.dismiss_error();
    }

    pub async fn orders(&self) -> Vec<Order> {
        self.state.lock().await.orders().to_vec()
    }

    pub async fn visible_orders(&self) -> Vec<Order> {
        let guard = self.state.lock().await;
        guard.visible_orders().into_iter().cloned().collect()
    }

    pub async fn loading(&self) -> bool {
        self.state.lock().await.loading()
    }

    pub async fn error(&self) -> String {
        self.state.lock().await.error().to_string()
    }

    pub async fn snapshot(&self) -> ViewSnapshot {
        let guard = self.state.lock().await;
        ViewSnapshot {
            rows: guard
                .visible_orders()
                .into_iter()
                .map(OrderRow::from)
                .collect(),
            total_orders: guard.orders().len(),
            summary: StatusSummary::from_orders(guard.orders()),
            draft: guard.draft.clone(),
            filter: guard.filter.clone(),
            loading: guard.loading(),
            error: guard.error().to_string(),
        }
    }

    async fn fail(&self, err: GatewayError) -> ActionOutcome {
        warn!(operation = err.operation(), cause = %err.cause(), "{err}");
        self.state.lock().await.record_failure(&err);
        ActionOutcome::Failed
    }
}

async fn check_health(gateway: &dyn OrderGateway) {
    match gateway.health().await {
        Ok(health) if health.ok => debug!("orders api healthy"),
        Ok(_) => warn!("orders api reported unhealthy"),
        Err(err) => warn!(cause = %err.cause(), "orders api health check failed"),
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
