//! Order detail controller
//!
//! Orchestrates the admin actions on one order: load, advance status, delete,
//! and print-then-advance. The server is authoritative; the cached order is
//! only ever replaced by a fresh load, never advanced locally. A successful
//! mutation clears it, so the next action needs a reload.

use std::sync::Arc;

use canteen_printer::{PrintResult, Printer, ReceiptPrinter};
use shared::order::{DisplayOrderNumber, Order, OrderStatus, ReceiptSnapshot, StatusTone};
use tracing::{error, info, instrument, warn};

use crate::api::{OrderMutation, OrderQuery};
use crate::feedback::{Navigator, OperatorFeedback, Toast, response_toast};
use crate::{ClientError, ClientResult};

/// Where successful order mutations land
pub const TRANSACTIONS_PATH: &str = "/admin/transaction";

/// Where a failed order lookup lands
pub const NOT_FOUND_PATH: &str = "/404";

/// Display data for a loaded order
#[derive(Debug, Clone, PartialEq)]
pub struct OrderView {
    pub order: Order,
    pub order_number: DisplayOrderNumber,
    pub tone: StatusTone,
    pub date: String,
    pub time: String,
}

impl OrderView {
    pub fn new(order: &Order) -> Self {
        Self {
            order_number: DisplayOrderNumber::from_order_id(&order.id),
            tone: order.status.tone(),
            date: order.created_date(),
            time: order.created_time(),
            order: order.clone(),
        }
    }
}

/// Result of a print action
///
/// The receipt and the status advance succeed or fail independently.
#[derive(Debug)]
pub struct PrintOutcome {
    pub snapshot: ReceiptSnapshot,
    pub printed: PrintResult<()>,
    pub advanced: ClientResult<OrderStatus>,
}

pub struct OrderDetailController<A, P> {
    api: A,
    printer: ReceiptPrinter<P>,
    feedback: Arc<dyn OperatorFeedback>,
    navigator: Arc<dyn Navigator>,
    admin_user_id: String,
    order: Option<Order>,
}

impl<A, P> OrderDetailController<A, P>
where
    A: OrderQuery + OrderMutation,
    P: Printer,
{
    pub fn new(
        api: A,
        printer: ReceiptPrinter<P>,
        feedback: Arc<dyn OperatorFeedback>,
        navigator: Arc<dyn Navigator>,
        admin_user_id: impl Into<String>,
    ) -> Self {
        Self {
            api,
            printer,
            feedback,
            navigator,
            admin_user_id: admin_user_id.into(),
            order: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Currently loaded order
    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    pub fn view(&self) -> Option<OrderView> {
        self.order.as_ref().map(OrderView::new)
    }

    /// Load an order by id
    ///
    /// Any query failure redirects to the not-found page.
    #[instrument(skip(self))]
    pub async fn load(&mut self, order_id: &str) -> ClientResult<OrderView> {
        match self.api.query_order(order_id).await {
            Ok(order) => {
                if let Err(e) = order.verify_totals() {
                    warn!(order_id = %order.id, "Order totals inconsistent: {}", e);
                }
                if let Err(e) = order.verify_line_items() {
                    warn!(order_id = %order.id, "Order line items invalid: {}", e);
                }
                let view = OrderView::new(&order);
                info!(number = %view.order_number, status = %order.status, "Order loaded");
                self.order = Some(order);
                Ok(view)
            }
            Err(e) => {
                warn!("Order lookup failed: {}", e);
                self.order = None;
                self.navigator.navigate(NOT_FOUND_PATH);
                Err(e)
            }
        }
    }

    /// Ask the server to advance the loaded order by one step
    ///
    /// Returns the status the server was asked to move to. A terminal or
    /// unknown status is rejected before any request goes out. On success the
    /// cached order is stale and gets cleared.
    #[instrument(skip(self))]
    pub async fn update(&mut self) -> ClientResult<OrderStatus> {
        let order = self.order.as_ref().ok_or(ClientError::NoOrderLoaded)?;
        let order_id = order.id.clone();
        let from = order.status.clone();

        let next = match from.advance() {
            Ok(next) => next,
            Err(e) => {
                let err = ClientError::from(e);
                warn!(order_id = %order_id, "Status update rejected: {}", err);
                self.feedback.toast(&Toast::error(err.operator_message()));
                return Err(err);
            }
        };

        let result = self
            .api
            .mutate_order_status(&self.admin_user_id, &order_id)
            .await;
        response_toast(
            &result,
            self.feedback.as_ref(),
            Some(self.navigator.as_ref()),
            Some(TRANSACTIONS_PATH),
        );

        match result {
            Ok(_) => {
                info!(order_id = %order_id, from = %from, to = %next, "Status advanced");
                self.order = None;
                Ok(next)
            }
            Err(e) => {
                warn!(order_id = %order_id, "Status update failed: {}", e);
                Err(e)
            }
        }
    }

    /// Delete the loaded order (irreversible)
    #[instrument(skip(self))]
    pub async fn delete(&mut self) -> ClientResult<()> {
        let order = self.order.as_ref().ok_or(ClientError::NoOrderLoaded)?;

        let result = self.api.delete_order(&self.admin_user_id, &order.id).await;
        response_toast(
            &result,
            self.feedback.as_ref(),
            Some(self.navigator.as_ref()),
            Some(TRANSACTIONS_PATH),
        );

        match result {
            Ok(_) => {
                info!(order_id = %order.id, "Order deleted");
                self.order = None;
                Ok(())
            }
            Err(e) => {
                warn!(order_id = %order.id, "Order delete failed: {}", e);
                Err(e)
            }
        }
    }

    /// Print the receipt, then advance the status
    ///
    /// The snapshot is taken before the advance request, so the receipt
    /// always shows the order as it was when printing was asked for.
    #[instrument(skip(self))]
    pub async fn print(&mut self) -> ClientResult<PrintOutcome> {
        let order = self.order.as_ref().ok_or(ClientError::NoOrderLoaded)?;
        let snapshot = ReceiptSnapshot::capture(order);

        let printed = self.printer.print_receipt(&snapshot).await;
        if let Err(e) = &printed {
            error!(number = %snapshot.order_number, "Receipt print failed: {}", e);
            self.feedback
                .toast(&Toast::error(format!("Failed to print receipt: {}", e)));
        }

        let advanced = self.update().await;

        Ok(PrintOutcome {
            snapshot,
            printed,
            advanced,
        })
    }
}
