//! Client-related types shared between backend and admin client
//!
//! Response bodies of the order and user endpoints.

use serde::{Deserialize, Serialize};

use crate::order::Order;

// Re-export ApiResponse from response module
pub use crate::response::{ApiResponse, MessageResponse};

// =============================================================================
// User API DTOs
// =============================================================================

/// Customer / admin account as listed in the admin console
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub role: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// `GET user/all` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersBody {
    pub users: Vec<User>,
}

// =============================================================================
// Order API DTOs
// =============================================================================

/// `GET order/{id}` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBody {
    pub order: Order,
}

/// `GET order/all` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersBody {
    pub orders: Vec<Order>,
}

pub type AllUsersResponse = ApiResponse<UsersBody>;
pub type OrderDetailsResponse = ApiResponse<OrderBody>;
pub type AllOrdersResponse = ApiResponse<OrdersBody>;
