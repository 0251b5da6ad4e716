//! Customer list
//!
//! The customers view lists accounts for the signed-in admin and carries the
//! payment notification reconciler for as long as it is mounted.

use std::sync::Arc;

use async_trait::async_trait;
use shared::client::User;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::ClientResult;
use crate::api::UserDirectory;
use crate::feedback::{OperatorFeedback, Toast, response_toast};
use crate::message::PushChannel;
use crate::reconciler::{ListRefresher, NotificationReconciler, ReconcilerHandle};

pub struct CustomerDirectory<U> {
    api: U,
    admin_user_id: String,
    feedback: Arc<dyn OperatorFeedback>,
    rows: RwLock<Vec<User>>,
}

impl<U: UserDirectory> CustomerDirectory<U> {
    pub fn new(api: U, admin_user_id: impl Into<String>, feedback: Arc<dyn OperatorFeedback>) -> Self {
        Self {
            api,
            admin_user_id: admin_user_id.into(),
            feedback,
            rows: RwLock::new(Vec::new()),
        }
    }

    /// Fetch the customer list
    ///
    /// Failures show an error toast and keep the previous rows; list views
    /// never redirect.
    pub async fn load(&self) -> ClientResult<Vec<User>> {
        match self.api.query_users(&self.admin_user_id).await {
            Ok(users) => {
                info!(count = users.len(), "Customers loaded");
                *self.rows.write().await = users.clone();
                Ok(users)
            }
            Err(e) => {
                warn!("Customer list query failed: {}", e);
                self.feedback.toast(&Toast::error(e.operator_message()));
                Err(e)
            }
        }
    }

    /// Rows from the last successful load
    pub async fn users(&self) -> Vec<User> {
        self.rows.read().await.clone()
    }

    /// Delete a customer account, then reload the list
    pub async fn delete(&self, user_id: &str) -> ClientResult<()> {
        let result = self.api.delete_user(user_id, &self.admin_user_id).await;
        response_toast(&result, self.feedback.as_ref(), None, None);
        result?;

        info!(%user_id, "Customer deleted");
        if let Err(e) = self.load().await {
            warn!("Reload after delete failed: {}", e);
        }
        Ok(())
    }
}

#[async_trait]
impl<U: UserDirectory> ListRefresher for CustomerDirectory<U> {
    async fn refresh(&self) -> ClientResult<()> {
        self.load().await.map(|_| ())
    }
}

/// Mounted customers view
///
/// Owns the reconciler subscription; unmounting (or dropping) the view
/// detaches it.
pub struct CustomersView<U> {
    directory: Arc<CustomerDirectory<U>>,
    reconciler: Option<ReconcilerHandle>,
}

impl<U: UserDirectory + 'static> CustomersView<U> {
    /// Attach the reconciler and load the first page of rows
    ///
    /// `refresh_on_event` reloads the list after every payment notification.
    pub async fn mount(
        directory: Arc<CustomerDirectory<U>>,
        channel: &PushChannel,
        refresh_on_event: bool,
    ) -> Self {
        let refresher =
            refresh_on_event.then(|| Arc::clone(&directory) as Arc<dyn ListRefresher>);
        let reconciler =
            NotificationReconciler::attach(channel, Arc::clone(&directory.feedback), refresher)
                .spawn();

        // Errors are already surfaced as a toast
        let _ = directory.load().await;

        Self {
            directory,
            reconciler: Some(reconciler),
        }
    }

    pub fn directory(&self) -> &CustomerDirectory<U> {
        &self.directory
    }

    pub fn is_mounted(&self) -> bool {
        self.reconciler.is_some()
    }

    pub fn unmount(mut self) {
        if let Some(handle) = self.reconciler.take() {
            handle.detach();
        }
    }
}
