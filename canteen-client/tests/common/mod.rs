//! In-memory collaborators shared by the integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use canteen_client::{
    ClientError, ClientResult, Navigator, OperatorFeedback, OrderMutation, OrderQuery, Toast,
    UserDirectory,
};
use canteen_printer::{PrintError, PrintResult, Printer};
use shared::client::User;
use shared::order::{CustomerRef, Order, OrderItem, OrderStatus, ShippingInfo};
use shared::MessageResponse;

pub const ADMIN_ID: &str = "admin-1";

pub fn order(id: &str, status: OrderStatus) -> Order {
    Order {
        id: id.to_string(),
        status,
        shipping_info: ShippingInfo {
            address: "Hostel 4, Room 12".to_string(),
            city: "Pune".to_string(),
            phone: "9876543210".to_string(),
            ..Default::default()
        },
        order_items: vec![
            OrderItem {
                id: "i1".to_string(),
                product_id: "p1".to_string(),
                name: "Masala Dosa".to_string(),
                photo: String::new(),
                price: 60.0,
                quantity: 2,
            },
            OrderItem {
                id: "i2".to_string(),
                product_id: "p2".to_string(),
                name: "Filter Coffee".to_string(),
                photo: String::new(),
                price: 20.0,
                quantity: 1,
            },
        ],
        sub_total: 140.0,
        discount: 10.0,
        shipping_charges: 0.0,
        tax: 7.0,
        total: 137.0,
        user: CustomerRef {
            id: "u1".to_string(),
            name: "Asha".to_string(),
        },
        order_type: "UPI".to_string(),
        created_at: None,
    }
}

pub fn user(id: &str, name: &str) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@canteen.test", name.to_lowercase()),
        photo: String::new(),
        gender: String::new(),
        role: "user".to_string(),
    }
}

/// Mutation request seen by the fake backend
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Advance { user_id: String, order_id: String },
    Delete { user_id: String, order_id: String },
    DeleteUser { user_id: String, admin_id: String },
}

/// Backend that keeps orders and users in memory and advances statuses the
/// way the server does
#[derive(Default)]
pub struct FakeBackend {
    pub orders: Mutex<HashMap<String, Order>>,
    pub users: Mutex<Vec<User>>,
    pub calls: Mutex<Vec<Call>>,
    pub user_queries: Mutex<usize>,
    /// When set, every mutation is rejected with this message
    pub reject: Mutex<Option<String>>,
}

impl FakeBackend {
    pub fn with_orders(orders: Vec<Order>) -> Arc<Self> {
        let backend = Self::default();
        {
            let mut map = backend.orders.lock().unwrap();
            for o in orders {
                map.insert(o.id.clone(), o);
            }
        }
        Arc::new(backend)
    }

    pub fn reject_mutations(&self, message: &str) {
        *self.reject.lock().unwrap() = Some(message.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn status_of(&self, order_id: &str) -> Option<OrderStatus> {
        self.orders
            .lock()
            .unwrap()
            .get(order_id)
            .map(|o| o.status.clone())
    }

    fn rejection(&self) -> Option<ClientError> {
        self.reject
            .lock()
            .unwrap()
            .clone()
            .map(ClientError::Validation)
    }
}

#[async_trait]
impl OrderQuery for FakeBackend {
    async fn query_order(&self, order_id: &str) -> ClientResult<Order> {
        self.orders
            .lock()
            .unwrap()
            .get(order_id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound("Order Not Found".to_string()))
    }

    async fn query_orders(&self, _admin_id: &str) -> ClientResult<Vec<Order>> {
        Ok(self.orders.lock().unwrap().values().cloned().collect())
    }
}

#[async_trait]
impl OrderMutation for FakeBackend {
    async fn mutate_order_status(
        &self,
        user_id: &str,
        order_id: &str,
    ) -> ClientResult<MessageResponse> {
        self.calls.lock().unwrap().push(Call::Advance {
            user_id: user_id.to_string(),
            order_id: order_id.to_string(),
        });
        if let Some(err) = self.rejection() {
            return Err(err);
        }

        let mut orders = self.orders.lock().unwrap();
        let order = orders
            .get_mut(order_id)
            .ok_or_else(|| ClientError::NotFound("Order Not Found".to_string()))?;
        order.status = order.status.advance()?;
        Ok(MessageResponse::message(true, "Order Processed Successfully"))
    }

    async fn delete_order(&self, user_id: &str, order_id: &str) -> ClientResult<MessageResponse> {
        self.calls.lock().unwrap().push(Call::Delete {
            user_id: user_id.to_string(),
            order_id: order_id.to_string(),
        });
        if let Some(err) = self.rejection() {
            return Err(err);
        }

        self.orders
            .lock()
            .unwrap()
            .remove(order_id)
            .ok_or_else(|| ClientError::NotFound("Order Not Found".to_string()))?;
        Ok(MessageResponse::message(true, "Order Deleted Successfully"))
    }
}

#[async_trait]
impl UserDirectory for FakeBackend {
    async fn query_users(&self, _admin_id: &str) -> ClientResult<Vec<User>> {
        *self.user_queries.lock().unwrap() += 1;
        Ok(self.users.lock().unwrap().clone())
    }

    async fn delete_user(&self, user_id: &str, admin_id: &str) -> ClientResult<MessageResponse> {
        self.calls.lock().unwrap().push(Call::DeleteUser {
            user_id: user_id.to_string(),
            admin_id: admin_id.to_string(),
        });
        self.users.lock().unwrap().retain(|u| u.id != user_id);
        Ok(MessageResponse::message(true, "User Deleted Successfully"))
    }
}

/// Records every toast, alert and navigation
#[derive(Default)]
pub struct Recorder {
    pub toasts: Mutex<Vec<Toast>>,
    pub alerts: Mutex<Vec<String>>,
    pub routes: Mutex<Vec<String>>,
}

impl Recorder {
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().unwrap().clone()
    }
}

impl OperatorFeedback for Recorder {
    fn toast(&self, toast: &Toast) {
        self.toasts.lock().unwrap().push(toast.clone());
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

impl Navigator for Recorder {
    fn navigate(&self, path: &str) {
        self.routes.lock().unwrap().push(path.to_string());
    }
}

/// Printer that keeps every job in memory
#[derive(Clone, Default)]
pub struct RecordingPrinter {
    pub jobs: Arc<Mutex<Vec<Vec<u8>>>>,
    pub offline: bool,
}

impl RecordingPrinter {
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Default::default()
        }
    }

    pub fn jobs(&self) -> Vec<Vec<u8>> {
        self.jobs.lock().unwrap().clone()
    }
}

impl Printer for RecordingPrinter {
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        if self.offline {
            return Err(PrintError::Offline("paper out".to_string()));
        }
        self.jobs.lock().unwrap().push(data.to_vec());
        Ok(())
    }

    async fn is_online(&self) -> bool {
        !self.offline
    }
}
