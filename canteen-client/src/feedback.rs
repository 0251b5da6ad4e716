//! Operator feedback
//!
//! Every admin mutation reports back to the operator the same way: a toast
//! carrying the server's message, plus navigation on success where the
//! calling view asks for it. `response_toast` is that mapping.

use std::fmt;

use shared::MessageResponse;
use tracing::{info, warn};

use crate::ClientResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Transient notification shown to the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == ToastKind::Success
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ToastKind::Success => write!(f, "[ok] {}", self.message),
            ToastKind::Error => write!(f, "[error] {}", self.message),
        }
    }
}

/// Route changes requested by the admin views
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Where toasts and alerts end up
pub trait OperatorFeedback: Send + Sync {
    fn toast(&self, toast: &Toast);

    /// Blocking alert raised by real-time events
    fn alert(&self, message: &str);
}

/// Map a mutation result to operator feedback
///
/// Success shows the server message and, when both a navigator and a path are
/// given, navigates there. Failure shows the error message and never
/// navigates.
pub fn response_toast(
    result: &ClientResult<MessageResponse>,
    feedback: &dyn OperatorFeedback,
    navigator: Option<&dyn Navigator>,
    redirect_path: Option<&str>,
) -> Toast {
    let toast = match result {
        Ok(resp) => Toast::success(resp.message.clone()),
        Err(e) => Toast::error(e.operator_message()),
    };
    feedback.toast(&toast);

    if toast.is_success()
        && let (Some(navigator), Some(path)) = (navigator, redirect_path)
    {
        navigator.navigate(path);
    }
    toast
}

/// Feedback sink that writes to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingFeedback;

impl OperatorFeedback for TracingFeedback {
    fn toast(&self, toast: &Toast) {
        match toast.kind {
            ToastKind::Success => info!(message = %toast.message, "Toast"),
            ToastKind::Error => warn!(message = %toast.message, "Toast"),
        }
    }

    fn alert(&self, message: &str) {
        info!(%message, "Alert");
    }
}

/// Navigator that only records the requested route in the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, path: &str) {
        info!(%path, "Navigate");
    }
}
