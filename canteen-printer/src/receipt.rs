//! Customer receipt rendering
//!
//! Turns a `ReceiptSnapshot` into ESC/POS bytes. The renderer only reads the
//! snapshot, so a print job always reflects the order as it was captured.

use shared::order::ReceiptSnapshot;
use tracing::{info, instrument};

use crate::encoding::pad_text;
use crate::error::PrintResult;
use crate::escpos::{Align, EscPosBuilder};
use crate::printer::Printer;

/// Store title printed at the top of every receipt
pub const DEFAULT_STORE_TITLE: &str = "H2 Canteen";

/// Receipt renderer
pub struct ReceiptRenderer<'a> {
    receipt: &'a ReceiptSnapshot,
    width: usize,
    title: &'a str,
}

impl<'a> ReceiptRenderer<'a> {
    pub fn new(receipt: &'a ReceiptSnapshot, width: usize) -> Self {
        Self {
            receipt,
            width,
            title: DEFAULT_STORE_TITLE,
        }
    }

    pub fn with_title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    /// Render to ESC/POS bytes (WPC1252 encoded)
    pub fn render(&self) -> Vec<u8> {
        self.builder().build()
    }

    /// Render without encoding conversion, for previews
    pub fn render_preview(&self) -> String {
        String::from_utf8_lossy(&self.builder().build_raw()).into_owned()
    }

    fn builder(&self) -> EscPosBuilder {
        let r = self.receipt;
        let mut b = EscPosBuilder::new(self.width);

        // ── Header ──
        b.align(Align::Center)
            .double_size(true)
            .bold(true)
            .line(self.title)
            .double_size(false)
            .bold(false)
            .align(Align::Left)
            .rule('=');

        b.line(&format!("Name: {}", r.customer_name));
        b.bold(true)
            .line(&format!("Order Number: {}", r.order_number))
            .bold(false);
        if r.has_payment_method() {
            b.line(&format!("Payment Method: {}", r.payment_method));
        }
        b.rule('-');

        // ── Items ──
        b.line("Order:");
        let qty_width = 5;
        let name_width = self.width.saturating_sub(qty_width + 2);
        for item in &r.items {
            let name = pad_text(&format!("{}:", item.name), name_width, false);
            let qty = pad_text(&item.quantity.to_string(), qty_width, true);
            b.line(&format!("  {}{}", name, qty));
        }
        b.rule('-');

        // ── Delivery ──
        b.line(&format!("Address: {}", r.address_line()));
        b.line(&format!("Mobile Number: {}", r.phone));
        b.rule('=');

        b.bold(true)
            .line_lr("Total:", &format!("₹{:.2}", r.total))
            .bold(false)
            .cut_after(4);
        b
    }
}

/// Renders receipts and sends them to a printer
#[derive(Debug, Clone)]
pub struct ReceiptPrinter<P> {
    printer: P,
    width: usize,
    title: String,
}

impl<P: Printer> ReceiptPrinter<P> {
    pub fn new(printer: P, width: usize) -> Self {
        Self {
            printer,
            width,
            title: DEFAULT_STORE_TITLE.to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn printer(&self) -> &P {
        &self.printer
    }

    #[instrument(skip(self, snapshot), fields(order_id = %snapshot.order_id, number = %snapshot.order_number))]
    pub async fn print_receipt(&self, snapshot: &ReceiptSnapshot) -> PrintResult<()> {
        let data = ReceiptRenderer::new(snapshot, self.width)
            .with_title(&self.title)
            .render();
        self.printer.print(&data).await?;
        info!("Receipt printed");
        Ok(())
    }
}
