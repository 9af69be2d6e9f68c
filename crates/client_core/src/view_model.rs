//! In-memory view state for the orders screen and the pure projections over it.

use shared::{
    domain::{Order, Price},
    protocol::CreateOrderRequest,
};

use crate::error::GatewayError;

/// Pending-create form fields, kept as the raw text the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftOrder {
    pub item: String,
    pub price: String,
}

impl DraftOrder {
    /// Builds the create payload, or `None` when the item is blank.
    ///
    /// The item is sent as typed; only the emptiness check trims it.
    pub fn to_request(&self) -> Option<CreateOrderRequest> {
        if self.item.trim().is_empty() {
            return None;
        }
        Some(CreateOrderRequest {
            item: self.item.clone(),
            price: coerce_price(&self.price),
        })
    }

    pub fn clear(&mut self) {
        self.item.clear();
        self.price.clear();
    }
}

/// Blank or unparseable price text becomes zero. Any finite number is kept,
/// even past the exact-decimal range.
pub fn coerce_price(raw: &str) -> Price {
    Price::parse(raw.trim()).unwrap_or(Price::ZERO)
}

/// Orders matching `filter`, in collection order.
///
/// An order matches when its item contains the trimmed, lowercased filter
/// case-insensitively, or when its id's decimal text contains it.
pub fn filter_orders<'a>(orders: &'a [Order], filter: &str) -> Vec<&'a Order> {
    let needle = filter.trim().to_lowercase();
    if needle.is_empty() {
        return orders.iter().collect();
    }
    orders
        .iter()
        .filter(|order| {
            order.item.to_lowercase().contains(&needle) || order.id.to_string().contains(&needle)
        })
        .collect()
}

/// Identifies one list reload. Only the most recently issued ticket may
/// change the view when its response arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn seq(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadResolution {
    Replaced { count: usize },
    Failed,
    Stale,
}

#[derive(Debug, Clone, Default)]
pub struct OrderViewState {
    orders: Vec<Order>,
    pub draft: DraftOrder,
    pub filter: String,
    loading: bool,
    error: String,
    issued_loads: u64,
}

impl OrderViewState {
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Last failure message, empty when nothing is shown.
    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn visible_orders(&self) -> Vec<&Order> {
        filter_orders(&self.orders, &self.filter)
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued_loads += 1;
        self.loading = true;
        self.error.clear();
        LoadTicket(self.issued_loads)
    }

    /// Applies a list response. Superseded tickets leave the state untouched;
    /// a failure keeps the previous collection.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Order>, GatewayError>,
    ) -> LoadResolution {
        if ticket.0 != self.issued_loads {
            return LoadResolution::Stale;
        }
        self.loading = false;
        match result {
            Ok(orders) => {
                let count = orders.len();
                self.orders = orders;
                LoadResolution::Replaced { count }
            }
            Err(err) => {
                self.error = err.to_string();
                LoadResolution::Failed
            }
        }
    }

    /// Overwrites whatever error is currently shown.
    pub fn record_failure(&mut self, err: &GatewayError) {
        self.error = err.to_string();
    }

    pub fn dismiss_error(&mut self) {
        self.error.clear();
    }
}

#[cfg(test)]
#[path = "tests/view_model_tests.rs"]
mod tests;
