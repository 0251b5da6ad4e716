//! # canteen-printer
//!
//! ESC/POS receipt printing for the canteen admin console.
//!
//! ## Scope
//!
//! - ESC/POS command building
//! - WPC1252 encoding for receipt printers
//! - Network printing (TCP port 9100)
//! - Customer receipt rendering from a `ReceiptSnapshot`
//!
//! ## Example
//!
//! ```ignore
//! use canteen_printer::{NetworkPrinter, ReceiptPrinter};
//! use shared::order::ReceiptSnapshot;
//!
//! let snapshot = ReceiptSnapshot::capture(&order);
//! let printer = ReceiptPrinter::new(NetworkPrinter::from_addr("192.168.1.100:9100")?, 48);
//! printer.print_receipt(&snapshot).await?;
//! ```

mod encoding;
mod error;
mod escpos;
mod printer;
mod receipt;

// Re-exports
pub use encoding::{convert_to_cp1252, encode_cp1252, pad_text, text_width, truncate_text};
pub use error::{PrintError, PrintResult};
pub use escpos::{Align, EscPosBuilder};
pub use printer::{DEFAULT_PRINTER_PORT, NetworkPrinter, PreviewPrinter, Printer, strip_escpos};
pub use receipt::{DEFAULT_STORE_TITLE, ReceiptPrinter, ReceiptRenderer};
