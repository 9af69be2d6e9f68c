//! Orders client core: the REST gateway, the view state and the controller
//! that keeps the two in sync.

pub mod controller;
pub mod display;
pub mod error;
pub mod gateway;
pub mod view_model;

pub use controller::{ActionOutcome, OrderController, ViewSnapshot};
pub use display::{format_price, OrderRow, StatusSummary};
pub use error::{FailureCause, GatewayError};
pub use gateway::{HttpOrderGateway, OrderGateway, DEFAULT_API_URL, ORDERS_PATH};
pub use view_model::{filter_orders, DraftOrder, LoadTicket, OrderViewState};
