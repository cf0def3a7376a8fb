//! User-facing notification channel.
//!
//! The dispatcher never shows anything itself; it hands messages meant for
//! the end user to a [`Reporter`] and leaves presentation to the host.

use std::sync::{Arc, Mutex};

pub const NETWORK_ERROR_MESSAGE: &str = "A network error occurred. Please check the console.";

pub fn server_error_message(body: &str) -> String {
    format!("Server error: {}", body)
}

pub trait Reporter: Send + Sync {
    fn alert(&self, message: &str);
}

impl<F> Reporter for F
where
    F: Fn(&str) + Send + Sync,
{
    fn alert(&self, message: &str) {
        self(message)
    }
}

/// Default reporter: alerts become `warn` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn alert(&self, message: &str) {
        tracing::warn!(alert = message, "Flow alert");
    }
}

/// Keeps every alert for later inspection.
#[derive(Debug, Clone, Default)]
pub struct CollectingReporter {
    alerts: Arc<Mutex<Vec<String>>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts
            .lock()
            .map(|alerts| alerts.clone())
            .unwrap_or_default()
    }
}

impl Reporter for CollectingReporter {
    fn alert(&self, message: &str) {
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.push(message.to_string());
        }
    }
}
