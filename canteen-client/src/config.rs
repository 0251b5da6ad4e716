//! Client configuration

/// Default API base URL
pub const DEFAULT_API_URL: &str = "http://localhost:4000/api/v1";

/// Client configuration for the canteen admin console
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | CANTEEN_API_URL | http://localhost:4000/api/v1 | Backend API base URL |
/// | CANTEEN_ADMIN_ID | (empty) | Id of the signed-in admin, sent with every mutation |
/// | CANTEEN_TIMEOUT_SECS | 30 | Request timeout in seconds |
/// | CANTEEN_PUSH_ADDR | (none) | TCP address of the real-time event feed |
/// | CANTEEN_PRINTER_ADDR | (none) | Receipt printer address (`host[:port]`) |
/// | CANTEEN_PAPER_WIDTH | 48 | Receipt width in characters |
/// | LOG_LEVEL | info | Default log level (`RUST_LOG` overrides) |
/// | LOG_JSON | false | JSON log output |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:4000/api/v1")
    pub base_url: String,

    /// Admin user id used for every mutation request
    pub admin_user_id: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Real-time event feed address
    pub push_addr: Option<String>,

    /// Receipt printer address
    pub printer_addr: Option<String>,

    /// Receipt paper width in characters
    pub paper_width: usize,

    pub log_level: String,
    pub log_json: bool,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            admin_user_id: String::new(),
            timeout: 30,
            push_addr: None,
            printer_addr: None,
            paper_width: 48,
            log_level: "info".to_string(),
            log_json: false,
        }
    }

    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to defaults.
    pub fn from_env() -> Self {
        let env = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());

        let mut config = Self::new(env("CANTEEN_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into()));
        config.admin_user_id = env("CANTEEN_ADMIN_ID").unwrap_or_default();
        config.timeout = env("CANTEEN_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(config.timeout);
        config.push_addr = env("CANTEEN_PUSH_ADDR");
        config.printer_addr = env("CANTEEN_PRINTER_ADDR");
        config.paper_width = env("CANTEEN_PAPER_WIDTH")
            .and_then(|v| v.parse().ok())
            .unwrap_or(config.paper_width);
        config.log_level = env("LOG_LEVEL").unwrap_or(config.log_level);
        config.log_json = env("LOG_JSON")
            .and_then(|v| v.parse().ok())
            .unwrap_or(false);
        config
    }

    /// Set the admin user id
    pub fn with_admin(mut self, admin_user_id: impl Into<String>) -> Self {
        self.admin_user_id = admin_user_id.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the real-time event feed address
    pub fn with_push_addr(mut self, addr: impl Into<String>) -> Self {
        self.push_addr = Some(addr.into());
        self
    }

    /// Set the receipt printer address
    pub fn with_printer(mut self, addr: impl Into<String>) -> Self {
        self.printer_addr = Some(addr.into());
        self
    }

    /// Set the receipt paper width
    pub fn with_paper_width(mut self, width: usize) -> Self {
        self.paper_width = width;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
