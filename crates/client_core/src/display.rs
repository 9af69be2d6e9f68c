use std::collections::BTreeMap;

use rust_decimal::RoundingStrategy;
use shared::domain::{Order, OrderId, OrderStatus, Price};

pub const DEFAULT_STATUS_LABEL: &str = "PENDING";

/// One rendered order card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRow {
    pub id: OrderId,
    pub title: String,
    pub item: String,
    pub price: String,
    pub status: String,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            title: format!("Order #{}", order.id),
            item: order.item.clone(),
            price: format_price(order.price),
            status: status_label(order.status.as_ref()).to_string(),
        }
    }
}

pub fn status_label(status: Option<&OrderStatus>) -> &str {
    match status {
        Some(status) => status.as_str(),
        None => DEFAULT_STATUS_LABEL,
    }
}

/// Two decimals, comma thousands separators, halves rounded away from zero.
/// A missing price shows as zero.
pub fn format_price(price: Option<Price>) -> String {
    let text = match price.unwrap_or(Price::ZERO) {
        Price::Exact(value) => value
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .to_string(),
        // Only amounts far past the exact range end up here; they are whole.
        Price::Float(value) if value.fract() == 0.0 => value.to_string(),
        Price::Float(value) => format!("{value:.2}"),
    };
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}.{fraction:0<2}")
}

/// Per-status totals over a collection; an absent status counts as pending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSummary {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
}

impl StatusSummary {
    pub fn from_orders<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Self {
        let mut summary = Self::default();
        for order in orders {
            summary.total += 1;
            *summary
                .by_status
                .entry(status_label(order.status.as_ref()).to_string())
                .or_default() += 1;
        }
        summary
    }

    pub fn count(&self, status: &str) -> usize {
        self.by_status.get(status).copied().unwrap_or_default()
    }
}
