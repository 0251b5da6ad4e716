//! Printer adapters for sending ESC/POS data
//!
//! Network printers (raw TCP, port 9100) are the only supported transport.

use crate::error::{PrintError, PrintResult};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{info, instrument, warn};

/// Default raw printing port
pub const DEFAULT_PRINTER_PORT: u16 = 9100;

/// Trait for printer adapters
#[allow(async_fn_in_trait)]
pub trait Printer {
    /// Send raw ESC/POS data to the printer
    async fn print(&self, data: &[u8]) -> PrintResult<()>;

    /// Check if the printer is online/reachable
    async fn is_online(&self) -> bool;
}

/// Network printer (TCP port 9100)
///
/// Most thermal printers support raw TCP printing on port 9100.
#[derive(Debug, Clone)]
pub struct NetworkPrinter {
    addr: SocketAddr,
    timeout: Duration,
}

impl NetworkPrinter {
    /// Create a new network printer
    pub fn new(host: &str, port: u16) -> PrintResult<Self> {
        let addr_str = format!("{}:{}", host, port);
        let addr = addr_str
            .parse()
            .map_err(|_| PrintError::InvalidConfig(format!("Invalid address: {}", addr_str)))?;

        Ok(Self {
            addr,
            timeout: Duration::from_secs(5),
        })
    }

    /// Create from a socket address string (e.g., "192.168.1.100:9100")
    ///
    /// A bare IP uses the default port.
    pub fn from_addr(addr: &str) -> PrintResult<Self> {
        if !addr.contains(':') {
            return Self::new(addr, DEFAULT_PRINTER_PORT);
        }
        let addr: SocketAddr = addr
            .parse()
            .map_err(|_| PrintError::InvalidConfig(format!("Invalid address: {}", addr)))?;

        Ok(Self {
            addr,
            timeout: Duration::from_secs(5),
        })
    }

    /// Set connection timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the printer address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

impl Printer for NetworkPrinter {
    #[instrument(skip(data), fields(addr = %self.addr, data_len = data.len()))]
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        info!("Connecting to printer");

        let mut stream = tokio::time::timeout(self.timeout, TcpStream::connect(self.addr))
            .await
            .map_err(|_| PrintError::Timeout(format!("Connection timeout: {}", self.addr)))?
            .map_err(|e| PrintError::Connection(format!("{}: {}", self.addr, e)))?;

        info!("Connected, sending {} bytes", data.len());

        stream.write_all(data).await.map_err(|e| {
            PrintError::Io(std::io::Error::new(
                e.kind(),
                format!("Write failed: {}", e),
            ))
        })?;

        stream.flush().await?;

        info!("Print job sent successfully");
        Ok(())
    }

    #[instrument(fields(addr = %self.addr))]
    async fn is_online(&self) -> bool {
        let check_timeout = Duration::from_millis(500);

        match tokio::time::timeout(check_timeout, TcpStream::connect(self.addr)).await {
            Ok(Ok(_)) => {
                info!("Printer online");
                true
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Printer offline");
                false
            }
            Err(_) => {
                warn!("Printer check timeout");
                false
            }
        }
    }
}

/// Printer stand-in that writes the receipt text to stdout
///
/// Used when no printer address is configured. Control sequences are stripped
/// and the final feed-and-cut becomes blank lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreviewPrinter;

impl Printer for PreviewPrinter {
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        let text = strip_escpos(data);
        let mut stdout = tokio::io::stdout();
        stdout.write_all(text.as_bytes()).await?;
        stdout.flush().await?;
        Ok(())
    }

    async fn is_online(&self) -> bool {
        true
    }
}

/// Remove the ESC/POS commands this crate emits and decode the rest
pub fn strip_escpos(data: &[u8]) -> String {
    let mut text = Vec::with_capacity(data.len());
    let mut i = 0;
    while i < data.len() {
        match (data[i], data.get(i + 1).copied()) {
            // ESC @
            (0x1B, Some(0x40)) => i += 2,
            // ESC a n, ESC E n, ESC t n, GS ! n
            (0x1B, Some(0x61 | 0x45 | 0x74)) | (0x1D, Some(0x21)) => i += 3,
            // GS V 66 n (feed n lines and cut)
            (0x1D, Some(0x56)) => {
                let lines = data.get(i + 3).copied().unwrap_or(0);
                text.extend(std::iter::repeat_n(b'\n', lines as usize));
                i += 4;
            }
            (b, _) => {
                text.push(b);
                i += 1;
            }
        }
    }
    let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&text);
    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    #[test]
    fn test_network_printer_new() {
        let printer = NetworkPrinter::new("192.168.1.100", 9100).unwrap();
        assert_eq!(printer.addr().port(), 9100);
    }

    #[test]
    fn test_network_printer_default_port() {
        let printer = NetworkPrinter::from_addr("192.168.1.100").unwrap();
        assert_eq!(printer.addr().port(), DEFAULT_PRINTER_PORT);
    }

    #[test]
    fn test_invalid_addr() {
        assert!(NetworkPrinter::from_addr("invalid:port").is_err());
        assert!(NetworkPrinter::new("not an ip", 9100).is_err());
    }

    #[tokio::test]
    async fn test_print_sends_bytes() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            socket.read_to_end(&mut received).await.unwrap();
            received
        });

        let printer = NetworkPrinter::from_addr(&addr.to_string()).unwrap();
        printer.print(b"\x1b@hello").await.unwrap();
        drop(printer);

        let received = server.await.unwrap();
        assert_eq!(received, b"\x1b@hello");
    }

    #[test]
    fn test_strip_escpos() {
        let data = [
            &[0x1B, 0x40, 0x1B, 0x74, 16, 0x1B, 0x61, 0x01, 0x1D, 0x21, 0x11][..],
            b"H2 Canteen\n",
            &[0x1D, 0x21, 0x00, 0x1B, 0x45, 0x01],
            b"Total: Rs.50.00\n",
            &[0x1D, 0x56, 0x42, 0x02],
        ]
        .concat();
        assert_eq!(strip_escpos(&data), "H2 Canteen\nTotal: Rs.50.00\n\n\n");
    }

    #[test]
    fn test_strip_decodes_cp1252() {
        assert_eq!(strip_escpos(&[b'C', 0xE9, 0x1D, 0x56, 0x42, 0x00]), "C\u{e9}");
    }
}
