//! Routes parsed console commands to the order controller.

use client_core::{ActionOutcome, OrderController};

use crate::{
    commands::{ConsoleCommand, HELP},
    render::{render_counts, render_order_detail, render_order_list},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// State may have changed; redraw the view.
    Render,
    /// Print this text, then redraw.
    Message(String),
    Quit,
}

pub async fn dispatch_command(
    controller: &OrderController,
    command: ConsoleCommand,
) -> Dispatch {
    let command_name = match &command {
        ConsoleCommand::SetItem(_) => "set_item",
        ConsoleCommand::SetPrice(_) => "set_price",
        ConsoleCommand::Add(_) => "add",
        ConsoleCommand::Confirm(_) => "confirm",
        ConsoleCommand::Delete(_) => "delete",
        ConsoleCommand::Show(_) => "show",
        ConsoleCommand::ByStatus(_) => "status",
        ConsoleCommand::Search(_) => "search",
        ConsoleCommand::Filter(_) => "filter",
        ConsoleCommand::Refresh => "refresh",
        ConsoleCommand::Counts => "counts",
        ConsoleCommand::Dismiss => "dismiss",
        ConsoleCommand::Help => "help",
        ConsoleCommand::Quit => "quit",
    };
    tracing::debug!(command = command_name, "dispatching console command");

    match command {
        ConsoleCommand::SetItem(item) => controller.set_draft_item(item).await,
        ConsoleCommand::SetPrice(price) => controller.set_draft_price(price).await,
        ConsoleCommand::Add(item) => {
            if let Some(item) = item {
                controller.set_draft_item(item).await;
            }
            if controller.submit_create().await == ActionOutcome::Skipped {
                return Dispatch::Message("item is required".to_string());
            }
        }
        ConsoleCommand::Confirm(id) => {
            controller.confirm(id).await;
        }
        ConsoleCommand::Delete(id) => {
            controller.delete(id).await;
        }
        ConsoleCommand::Show(id) => {
            if let Some(order) = controller.fetch(id).await {
                return Dispatch::Message(render_order_detail(&order));
            }
        }
        ConsoleCommand::ByStatus(status) => {
            if let Some(orders) = controller.orders_with_status(&status).await {
                let heading = format!("status {status}");
                return Dispatch::Message(render_order_list(&heading, &orders));
            }
        }
        ConsoleCommand::Search(item) => {
            if let Some(orders) = controller.search(&item).await {
                let heading = format!("search \"{item}\"");
                return Dispatch::Message(render_order_list(&heading, &orders));
            }
        }
        ConsoleCommand::Filter(text) => controller.set_filter(text).await,
        ConsoleCommand::Refresh => {
            controller.refresh().await;
        }
        ConsoleCommand::Counts => {
            if let Some(counts) = controller.server_counts().await {
                return Dispatch::Message(render_counts(&counts));
            }
        }
        ConsoleCommand::Dismiss => controller.dismiss_error().await,
        ConsoleCommand::Help => return Dispatch::Message(HELP.to_string()),
        ConsoleCommand::Quit => return Dispatch::Quit,
    }
    Dispatch::Render
}
