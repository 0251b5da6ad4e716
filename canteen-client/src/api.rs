//! Backend collaborator contracts
//!
//! The admin console never decides whether a mutation is legal: it asks the
//! server, which is authoritative for every order and user record.

use async_trait::async_trait;
use std::sync::Arc;
use shared::client::User;
use shared::{MessageResponse, Order};

use crate::ClientResult;

/// Read access to orders
#[async_trait]
pub trait OrderQuery: Send + Sync {
    /// Fetch a single order
    async fn query_order(&self, order_id: &str) -> ClientResult<Order>;

    /// Fetch every order visible to the admin
    async fn query_orders(&self, admin_id: &str) -> ClientResult<Vec<Order>>;
}

/// Admin mutations on orders
#[async_trait]
pub trait OrderMutation: Send + Sync {
    /// Advance the order's status by one step server-side
    async fn mutate_order_status(&self, user_id: &str, order_id: &str)
    -> ClientResult<MessageResponse>;

    /// Remove the order from the backing store (irreversible)
    async fn delete_order(&self, user_id: &str, order_id: &str) -> ClientResult<MessageResponse>;
}

/// Customer accounts
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn query_users(&self, admin_id: &str) -> ClientResult<Vec<User>>;

    async fn delete_user(&self, user_id: &str, admin_id: &str) -> ClientResult<MessageResponse>;
}

#[async_trait]
impl<T: OrderQuery + ?Sized> OrderQuery for Arc<T> {
    async fn query_order(&self, order_id: &str) -> ClientResult<Order> {
        (**self).query_order(order_id).await
    }

    async fn query_orders(&self, admin_id: &str) -> ClientResult<Vec<Order>> {
        (**self).query_orders(admin_id).await
    }
}

#[async_trait]
impl<T: OrderMutation + ?Sized> OrderMutation for Arc<T> {
    async fn mutate_order_status(
        &self,
        user_id: &str,
        order_id: &str,
    ) -> ClientResult<MessageResponse> {
        (**self).mutate_order_status(user_id, order_id).await
    }

    async fn delete_order(&self, user_id: &str, order_id: &str) -> ClientResult<MessageResponse> {
        (**self).delete_order(user_id, order_id).await
    }
}

#[async_trait]
impl<T: UserDirectory + ?Sized> UserDirectory for Arc<T> {
    async fn query_users(&self, admin_id: &str) -> ClientResult<Vec<User>> {
        (**self).query_users(admin_id).await
    }

    async fn delete_user(&self, user_id: &str, admin_id: &str) -> ClientResult<MessageResponse> {
        (**self).delete_user(user_id, admin_id).await
    }
}
