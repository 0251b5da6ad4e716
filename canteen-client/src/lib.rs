//! Canteen admin client
//!
//! Order lifecycle operations for the canteen admin console:
//!
//! - `http` / `api`: backend collaborators (orders, users)
//! - `message`: real-time event feed and scoped subscriptions
//! - `reconciler`: payment notifications turned into operator alerts
//! - `controller`: order detail actions (load, advance, delete, print)
//! - `customers`: customer list view
//! - `feedback`: the shared mutation-result to toast mapping

pub mod api;
pub mod config;
pub mod controller;
pub mod customers;
pub mod error;
pub mod feedback;
pub mod http;
pub mod logger;
pub mod message;
pub mod reconciler;

pub use api::{OrderMutation, OrderQuery, UserDirectory};
pub use config::ClientConfig;
pub use controller::{NOT_FOUND_PATH, OrderDetailController, OrderView, PrintOutcome, TRANSACTIONS_PATH};
pub use customers::{CustomerDirectory, CustomersView};
pub use error::{ClientError, ClientResult};
pub use feedback::{LogNavigator, Navigator, OperatorFeedback, Toast, ToastKind, TracingFeedback, response_toast};
pub use http::HttpClient;
pub use message::{MessageError, PushChannel, Subscription};
pub use reconciler::{ListRefresher, NotificationReconciler, ReconcilerHandle};

// Re-export shared types for convenience
pub use shared::client::{ApiResponse, User};
pub use shared::{MessageResponse, Order, OrderStatus};
