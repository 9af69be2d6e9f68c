use std::fmt::Write as _;

use client_core::{OrderRow, StatusSummary, ViewSnapshot};
use shared::{domain::Order, protocol::OrderCounts};

pub const EMPTY_STATE: &str = "No orders found. Create your first order!";

pub fn render_view(api_url: &str, view: &ViewSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Orders Management System ===");
    let _ = writeln!(out, "API: {api_url}");

    if !view.error.is_empty() {
        let _ = writeln!(out, "[Error: {}]  (dismiss to clear)", view.error);
    }

    let _ = writeln!(
        out,
        "Draft: item=\"{}\" price=\"{}\"",
        view.draft.item, view.draft.price
    );
    if !view.filter.trim().is_empty() {
        let _ = writeln!(out, "Filter: \"{}\"", view.filter);
    }

    let _ = writeln!(out, "--- Orders List ---");
    if view.loading {
        let _ = writeln!(out, "Loading orders...");
    }
    if view.is_empty() {
        let _ = writeln!(out, "{EMPTY_STATE}");
    }
    for row in &view.rows {
        let _ = writeln!(out, "{}", render_row(row));
    }

    let _ = writeln!(
        out,
        "Showing {} of {} | {}",
        view.rows.len(),
        view.total_orders,
        render_summary(&view.summary)
    );
    out
}

pub fn render_row(row: &OrderRow) -> String {
    format!(
        "{:<12} {:<24} ${:>12}  [{}]",
        row.title, row.item, row.price, row.status
    )
}

fn render_summary(summary: &StatusSummary) -> String {
    if summary.by_status.is_empty() {
        return "no orders".to_string();
    }
    summary
        .by_status
        .iter()
        .map(|(status, count)| format!("{status}: {count}"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn render_order_detail(order: &Order) -> String {
    let row = OrderRow::from(order);
    format!(
        "{}\n  item:   {}\n  price:  ${}\n  status: {}",
        row.title, row.item, row.price, row.status
    )
}

pub fn render_order_list(heading: &str, orders: &[Order]) -> String {
    let mut out = format!("{heading} ({})", orders.len());
    if orders.is_empty() {
        out.push_str("\n  no matching orders");
    }
    for order in orders {
        let _ = write!(out, "\n{}", render_row(&OrderRow::from(order)));
    }
    out
}

pub fn render_counts(counts: &OrderCounts) -> String {
    format!(
        "total {} | pending {} | confirmed {} | shipped {} | delivered {} | cancelled {}",
        counts.total,
        counts.pending,
        counts.confirmed,
        counts.shipped,
        counts.delivered,
        counts.cancelled
    )
}
